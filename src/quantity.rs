//! Free-text ingredient quantity parsing.
//!
//! Accepts a leading integer or decimal number, optionally followed by an
//! alphabetic unit token, e.g. `"2 cups"`, `"1.5kg"` or `"3"`.

use crate::error::ParseError;
use crate::model::IngredientQuantity;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?(\d+(?:\.\d+)?)\s*([A-Za-z]+)?").expect("Invalid quantity regex pattern")
});

/// Parse a raw quantity string into an [`IngredientQuantity`].
///
/// Text following the unit token is ignored, so `"2 cups flour"` yields
/// `2.0` and `"cups"`. The original string is kept verbatim in the result.
///
/// # Errors
/// * [`ParseError::MalformedQuantity`] if the text does not start with a number,
///   or the number is too large to represent
/// * [`ParseError::NegativeQuantity`] if the leading number is negative
///
/// # Examples
/// ```
/// use best_recipe::parse_quantity;
///
/// let quantity = parse_quantity("2 cups").unwrap();
/// assert_eq!(quantity.raw(), "2 cups");
/// assert_eq!(quantity.amount(), Some(2.0));
/// assert_eq!(quantity.unit(), Some("cups"));
///
/// assert!(parse_quantity("tomato").is_err());
/// ```
pub fn parse_quantity(raw: &str) -> Result<IngredientQuantity, ParseError> {
    let captures = QUANTITY_PATTERN
        .captures(raw.trim())
        .ok_or_else(|| ParseError::MalformedQuantity {
            raw: raw.to_string(),
        })?;

    if captures.get(1).is_some() {
        return Err(ParseError::NegativeQuantity {
            raw: raw.to_string(),
        });
    }

    let amount = captures
        .get(2)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ParseError::MalformedQuantity {
            raw: raw.to_string(),
        })?;
    let unit = captures.get(3).map(|m| m.as_str().trim().to_string());

    debug!("Parsed quantity '{}' as {} {:?}", raw, amount, unit);
    Ok(IngredientQuantity::parsed(raw, amount, unit))
}
