use super::Extractor;
use crate::error::ExtractError;
use crate::model::{RecipeRecord, UNKNOWN_RECIPE_NAME};
use html_escape::decode_html_entities;
use log::debug;
use serde_json::Value;

/// Reads recipe objects served as `application/json`.
///
/// Sources disagree on shape, so every field is optional: a missing or
/// mistyped `title` becomes [`UNKNOWN_RECIPE_NAME`] and missing lists become
/// empty. Only a body that is not a JSON object is rejected.
pub struct JsonExtractor;

impl Extractor for JsonExtractor {
    fn parse(&self, body: &str, source_url: &str) -> Result<RecipeRecord, ExtractError> {
        let value: Value = serde_json::from_str(body)?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ExtractError::NotAnObject {
                    found: kind_name(&other),
                })
            }
        };

        let name = object
            .get("title")
            .and_then(Value::as_str)
            .map(|title| decode_html_symbols(title).trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNKNOWN_RECIPE_NAME.to_string());

        let ingredients = object.get("ingredients").map(text_lines).unwrap_or_default();
        let instructions = object
            .get("instructions")
            .map(text_lines)
            .unwrap_or_default();

        debug!(
            "JSON recipe '{}' from {}: {} ingredients, {} instructions",
            name,
            source_url,
            ingredients.len(),
            instructions.len()
        );

        Ok(RecipeRecord {
            name,
            ingredients,
            instructions,
            source_url: source_url.to_string(),
        })
    }
}

/// Accepts an array of strings or numbers, or a single newline-separated string
fn text_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(decode_html_symbols(s).trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|line| !line.is_empty())
            .collect(),
        Value::String(s) => decode_html_symbols(s)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
