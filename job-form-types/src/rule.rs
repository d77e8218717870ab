use std::fmt;

use crate::FieldValue;

/// Message used by required checks that don't override it.
pub const REQUIRED_MESSAGE: &str = "*required";

/// Signature of a custom field validator.
pub type Validator = fn(&FieldValue) -> Result<(), String>;

/// A single validation rule attached to a field.
///
/// Rules only look at the value they are given; they never see other fields.
#[derive(Clone)]
pub enum Rule {
    /// The field must hold something other than an empty string.
    Required { message: String },

    /// Text must have at least `min` characters.
    MinLength { min: usize, message: String },

    /// Text must contain `needle`.
    Contains { needle: String, message: String },

    /// Any other check.
    Custom(Validator),
}

impl Rule {
    /// A required check with the default `*required` message.
    pub fn required() -> Self {
        Self::Required {
            message: REQUIRED_MESSAGE.to_string(),
        }
    }

    /// A required check with a field-specific message.
    pub fn required_with(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn contains(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Contains {
            needle: needle.into(),
            message: message.into(),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// Apply this rule to a present value.
    ///
    /// Content rules pass values that aren't text; type checking is the field kind's job.
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            Self::Required { message } => {
                if value.is_blank() {
                    return Err(message.clone());
                }
                Ok(())
            }
            Self::MinLength { min, message } => {
                let FieldValue::String(text) = value else {
                    return Ok(());
                };
                if text.chars().count() < *min {
                    return Err(message.clone());
                }
                Ok(())
            }
            Self::Contains { needle, message } => {
                let FieldValue::String(text) = value else {
                    return Ok(());
                };
                if !text.contains(needle.as_str()) {
                    return Err(message.clone());
                }
                Ok(())
            }
            Self::Custom(validate) => validate(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { message } => f
                .debug_struct("Required")
                .field("message", message)
                .finish(),
            Self::MinLength { min, message } => f
                .debug_struct("MinLength")
                .field("min", min)
                .field("message", message)
                .finish(),
            Self::Contains { needle, message } => f
                .debug_struct("Contains")
                .field("needle", needle)
                .field("message", message)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
