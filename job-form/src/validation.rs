use std::collections::HashMap;

use crate::FieldPath;

/// Current error message per field.
///
/// A field without an entry is valid (or has not been checked yet).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    errors: HashMap<FieldPath, String>,
}

impl ValidationState {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Record the outcome of validating one field.
    pub fn set(&mut self, path: FieldPath, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.errors.remove(&path);
            }
            Err(message) => {
                self.errors.insert(path, message);
            }
        }
    }

    /// The error message for a field, if it failed.
    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// True when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.errors.iter().map(|(p, m)| (p, m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inserts_and_clears() {
        let mut state = ValidationState::new();
        let email = FieldPath::new("email");

        state.set(email.clone(), Err("Only naver email is available".into()));
        assert_eq!(state.error(&email), Some("Only naver email is available"));
        assert!(!state.is_valid());

        state.set(email.clone(), Ok(()));
        assert_eq!(state.error(&email), None);
        assert!(state.is_valid());
    }
}
