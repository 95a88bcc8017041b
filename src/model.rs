use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name given to a recipe whose title could not be found
pub const UNKNOWN_RECIPE_NAME: &str = "Unknown Recipe";

/// A free-text quantity and, once parsed, its numeric amount and unit.
///
/// `raw` is fixed at construction and kept for auditing even after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl IngredientQuantity {
    /// An unparsed quantity holding only the original text
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            amount: None,
            unit: None,
        }
    }

    /// Callers must guarantee `amount >= 0.0`.
    pub(crate) fn parsed(raw: impl Into<String>, amount: f64, unit: Option<String>) -> Self {
        debug_assert!(amount >= 0.0);
        Self {
            raw: raw.into(),
            amount: Some(amount),
            unit,
        }
    }

    pub(crate) fn with_unit(mut self, unit: Option<String>) -> Self {
        self.unit = unit;
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn is_parsed(&self) -> bool {
        self.amount.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<IngredientQuantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_quantity(mut self, raw: impl Into<String>) -> Self {
        self.quantity = Some(IngredientQuantity::new(raw));
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// The supported meal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(MealType::as_str).collect()
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|meal| meal.as_str() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Checked against [`MealType`] during validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intolerances: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl UserRequest {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self {
            ingredients,
            preferences: None,
        }
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Top-level ingredients followed by those nested in the preferences
    pub fn all_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().chain(
            self.preferences
                .iter()
                .filter_map(|p| p.ingredients.as_ref())
                .flatten(),
        )
    }

    pub(crate) fn all_ingredients_mut(&mut self) -> impl Iterator<Item = &mut Ingredient> {
        self.ingredients.iter_mut().chain(
            self.preferences
                .iter_mut()
                .filter_map(|p| p.ingredients.as_mut())
                .flatten(),
        )
    }

    /// Trimmed ingredient names in first-seen order, without duplicates
    pub fn ingredient_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for ingredient in self.all_ingredients() {
            let name = ingredient.name.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// A recipe normalized from one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub source_url: String,
}

impl RecipeRecord {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            name: UNKNOWN_RECIPE_NAME.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            source_url: source_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_round_trips_through_str() {
        for meal in MealType::ALL {
            assert_eq!(meal.as_str().parse::<MealType>(), Ok(meal));
        }
        assert!("Dinner".parse::<MealType>().is_err());
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_ingredient_names_dedup_across_preferences() {
        let request = UserRequest::new(vec![Ingredient::new(" tomato "), Ingredient::new("onion")])
            .with_preferences(UserPreferences {
                ingredients: Some(vec![Ingredient::new("tomato"), Ingredient::new("basil")]),
                ..Default::default()
            });

        assert_eq!(request.ingredient_names(), vec!["tomato", "onion", "basil"]);
    }

    #[test]
    fn test_request_deserializes_nested_quantity() {
        let json = r#"{
            "preferences": {
                "meal_type": "dinner",
                "ingredients": [{"name": "tomato", "quantity": {"raw": "2 pieces"}}]
            }
        }"#;

        let request: UserRequest = serde_json::from_str(json).unwrap();
        assert!(request.ingredients.is_empty());
        let prefs = request.preferences.unwrap();
        assert_eq!(prefs.meal_type.as_deref(), Some("dinner"));
        let quantity = prefs.ingredients.unwrap()[0].quantity.clone().unwrap();
        assert_eq!(quantity.raw(), "2 pieces");
        assert!(!quantity.is_parsed());
    }
}
