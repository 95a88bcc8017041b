use crate::error::ValidationError;
use crate::model::{UserPreferences, UserRequest};

/// A field-level check run after quantities are parsed and the meal type is checked.
///
/// Rules only see the request; they never modify it.
pub trait FieldRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, request: &UserRequest) -> Result<(), ValidationError>;
}

/// Rejects ingredients whose name is empty or only whitespace
pub struct NonEmptyNames;

impl FieldRule for NonEmptyNames {
    fn name(&self) -> &str {
        "non_empty_names"
    }

    fn check(&self, request: &UserRequest) -> Result<(), ValidationError> {
        match request
            .all_ingredients()
            .position(|ingredient| ingredient.name.trim().is_empty())
        {
            Some(position) => Err(ValidationError::EmptyIngredientName { position }),
            None => Ok(()),
        }
    }
}

type FieldValues = fn(&UserPreferences) -> Vec<&str>;

fn dietary_restriction_values(prefs: &UserPreferences) -> Vec<&str> {
    prefs
        .dietary_restrictions
        .iter()
        .flatten()
        .map(String::as_str)
        .collect()
}

fn cuisine_values(prefs: &UserPreferences) -> Vec<&str> {
    prefs.cuisine.as_deref().into_iter().collect()
}

/// Restricts a preference field to a fixed set of values (case-insensitive)
pub struct AllowedValues {
    field: &'static str,
    allowed: Vec<String>,
    values: FieldValues,
}

impl AllowedValues {
    pub fn dietary_restrictions<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: "dietary_restrictions",
            allowed: allowed.into_iter().map(Into::into).collect(),
            values: dietary_restriction_values,
        }
    }

    pub fn cuisine<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: "cuisine",
            allowed: allowed.into_iter().map(Into::into).collect(),
            values: cuisine_values,
        }
    }

    fn is_allowed(&self, value: &str) -> bool {
        self.allowed
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(value.trim()))
    }
}

impl FieldRule for AllowedValues {
    fn name(&self) -> &str {
        self.field
    }

    fn check(&self, request: &UserRequest) -> Result<(), ValidationError> {
        let Some(prefs) = request.preferences.as_ref() else {
            return Ok(());
        };

        match (self.values)(prefs)
            .into_iter()
            .find(|value| !self.is_allowed(value))
        {
            Some(got) => Err(ValidationError::DisallowedValue {
                field: self.field,
                got: got.to_string(),
                allowed: self.allowed.clone(),
            }),
            None => Ok(()),
        }
    }
}
