use std::collections::HashMap;

use crate::{FieldPath, FieldValue};

/// Error type for typed access into `FormValues`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("Missing value for field: {0}")]
    MissingPath(FieldPath),

    #[error("Type mismatch at field '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Field '{path}' has no variant with index {index}")]
    UnknownVariant { path: FieldPath, index: usize },

    #[error("Field '{path}' holds {value}, which does not fit the target type")]
    OutOfRange { path: FieldPath, value: i64 },
}

/// Current raw values of a form, keyed by field path.
///
/// A field that was never set (or was cleared) has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<FieldPath, FieldValue>,
}

impl FormValues {
    /// Create a new empty value map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert a value at the given path, returning the previous one.
    pub fn insert(
        &mut self,
        path: impl Into<FieldPath>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.values.insert(path.into(), value.into())
    }

    /// Get the value at the given path.
    pub fn get(&self, path: &FieldPath) -> Option<&FieldValue> {
        self.values.get(path)
    }

    /// Remove the value at the given path.
    pub fn remove(&mut self, path: &FieldPath) -> Option<FieldValue> {
        self.values.remove(path)
    }

    /// Get an iterator over all path-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldValue)> {
        self.values.iter()
    }

    /// Get the number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Convenience accessors ===

    /// Get a string value at the given path.
    pub fn get_string(&self, path: &FieldPath) -> Result<&str, ValueError> {
        match self.get(path) {
            Some(FieldValue::String(s)) => Ok(s),
            Some(other) => Err(ValueError::TypeMismatch {
                path: path.clone(),
                expected: "String",
                actual: other.type_name(),
            }),
            None => Err(ValueError::MissingPath(path.clone())),
        }
    }

    /// Get an integer value at the given path.
    pub fn get_int(&self, path: &FieldPath) -> Result<i64, ValueError> {
        match self.get(path) {
            Some(FieldValue::Int(i)) => Ok(*i),
            Some(other) => Err(ValueError::TypeMismatch {
                path: path.clone(),
                expected: "Int",
                actual: other.type_name(),
            }),
            None => Err(ValueError::MissingPath(path.clone())),
        }
    }

    /// Get a chosen variant index at the given path.
    pub fn get_chosen_variant(&self, path: &FieldPath) -> Result<usize, ValueError> {
        match self.get(path) {
            Some(FieldValue::ChosenVariant(idx)) => Ok(*idx),
            Some(other) => Err(ValueError::TypeMismatch {
                path: path.clone(),
                expected: "ChosenVariant",
                actual: other.type_name(),
            }),
            None => Err(ValueError::MissingPath(path.clone())),
        }
    }

}

impl IntoIterator for FormValues {
    type Item = (FieldPath, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<FieldPath, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a FieldPath, &'a FieldValue);
    type IntoIter = std::collections::hash_map::Iter<'a, FieldPath, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
