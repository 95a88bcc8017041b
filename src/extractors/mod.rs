use crate::error::ExtractError;
use crate::fetcher::{ContentKind, RawContent};
use crate::model::RecipeRecord;

mod html;
mod json;

pub use html::HtmlMarkerExtractor;
pub use json::JsonExtractor;

pub trait Extractor {
    fn parse(&self, body: &str, source_url: &str) -> Result<RecipeRecord, ExtractError>;
}

/// Turn fetched content into a recipe record using the extractor for its content family
pub fn parse_recipe(content: &RawContent, source_url: &str) -> Result<RecipeRecord, ExtractError> {
    match content.kind {
        ContentKind::Json => JsonExtractor.parse(&content.body, source_url),
        ContentKind::Html => HtmlMarkerExtractor.parse(&content.body, source_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_content_kind() {
        let url = "https://example.com/recipe/1";

        let from_json = parse_recipe(&RawContent::json(r#"{"title": "Soup"}"#), url).unwrap();
        assert_eq!(from_json.name, "Soup");
        assert_eq!(from_json.source_url, url);

        let from_html = parse_recipe(&RawContent::html("<h1>Stew</h1>"), url).unwrap();
        assert_eq!(from_html.name, "Stew");
        assert_eq!(from_html.source_url, url);
    }

    #[test]
    fn test_html_body_labelled_json_fails() {
        let err = parse_recipe(&RawContent::json("<h1>Stew</h1>"), "https://e.test").unwrap_err();
        assert_eq!(err.code(), "invalid_json");
    }
}
