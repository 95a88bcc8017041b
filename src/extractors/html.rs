use super::Extractor;
use crate::error::ExtractError;
use crate::model::{RecipeRecord, UNKNOWN_RECIPE_NAME};
use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static INGREDIENTS: LazyLock<Selector> = LazyLock::new(|| selector("li.ingredient"));
static INSTRUCTIONS: LazyLock<Selector> = LazyLock::new(|| selector("p.instruction"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid built-in selector")
}

/// Reads recipe pages marked up with `ingredient` and `instruction` classes.
///
/// Title comes from the first `<h1>`, ingredients from every `li.ingredient`
/// and instructions from every `p.instruction`. Missing elements give empty
/// lists rather than an error.
pub struct HtmlMarkerExtractor;

impl Extractor for HtmlMarkerExtractor {
    fn parse(&self, body: &str, source_url: &str) -> Result<RecipeRecord, ExtractError> {
        let document = Html::parse_document(body);

        let name = document
            .select(&TITLE)
            .next()
            .map(element_text)
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNKNOWN_RECIPE_NAME.to_string());

        let ingredients = collect_text(&document, &INGREDIENTS);
        let instructions = collect_text(&document, &INSTRUCTIONS);

        debug!("HTML recipe '{}' from {}", name, source_url);
        debug!("Ingredients count: {}", ingredients.len());
        debug!("Instructions count: {}", instructions.len());

        Ok(RecipeRecord {
            name,
            ingredients,
            instructions,
            source_url: source_url.to_string(),
        })
    }
}

fn collect_text(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Element text with runs of whitespace collapsed to single spaces
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
