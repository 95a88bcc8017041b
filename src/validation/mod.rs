//! Request validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. every ingredient quantity is parsed (top-level ingredients, then preference ingredients)
//! 2. the meal type, when present, must be a known [`MealType`]
//! 3. registered [`FieldRule`]s, in registration order
//!
//! Fields that are absent are not checked. An ingredient with a `unit` but no
//! `quantity` keeps its unit untouched, since there is nothing to resolve it
//! against.

mod rules;

pub use rules::{AllowedValues, FieldRule, NonEmptyNames};

use crate::error::ValidationError;
use crate::model::{MealType, UserRequest};
use crate::quantity::parse_quantity;
use log::debug;

pub struct RequestValidator {
    rules: Vec<Box<dyn FieldRule>>,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestValidator {
    /// A validator with the built-in ingredient name rule registered
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(NonEmptyNames)],
        }
    }

    /// A validator with no extension rules at all
    pub fn bare() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an extra rule, run after the built-in checks
    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Validate a request, returning it with every ingredient quantity parsed.
    ///
    /// The request is consumed, so a rejected request is never handed back
    /// half-parsed.
    ///
    /// # Example
    /// ```
    /// use best_recipe::{Ingredient, RequestValidator, UserRequest};
    ///
    /// let request = UserRequest::new(vec![Ingredient::new("flour").with_quantity("2 cups")]);
    /// let validated = RequestValidator::new().validate(request).unwrap();
    ///
    /// let quantity = validated.ingredients[0].quantity.as_ref().unwrap();
    /// assert_eq!(quantity.amount(), Some(2.0));
    /// assert_eq!(quantity.unit(), Some("cups"));
    /// ```
    pub fn validate(&self, mut request: UserRequest) -> Result<UserRequest, ValidationError> {
        for ingredient in request.all_ingredients_mut() {
            let Some(quantity) = ingredient.quantity.take() else {
                continue;
            };

            let parsed = parse_quantity(quantity.raw()).map_err(|cause| {
                ValidationError::InvalidIngredientQuantity {
                    ingredient_name: ingredient.name.clone(),
                    cause,
                }
            })?;

            let unit = parsed
                .unit()
                .map(str::to_string)
                .or_else(|| ingredient.unit.take());
            ingredient.unit = unit.clone();
            ingredient.quantity = Some(parsed.with_unit(unit));
        }

        if let Some(meal_type) = request
            .preferences
            .as_ref()
            .and_then(|prefs| prefs.meal_type.as_deref())
        {
            if meal_type.parse::<MealType>().is_err() {
                return Err(ValidationError::InvalidMealType {
                    got: meal_type.to_string(),
                    allowed: MealType::allowed(),
                });
            }
        }

        for rule in &self.rules {
            debug!("Applying validation rule {}", rule.name());
            rule.check(&request)?;
        }

        Ok(request)
    }
}

/// Validate a request with the default rule set
pub fn validate_user_request(request: UserRequest) -> Result<UserRequest, ValidationError> {
    RequestValidator::default().validate(request)
}
