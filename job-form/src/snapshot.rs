use crate::{FieldPath, FieldValue, Form, FormValues, ValueError};

/// Values captured by a submit attempt that passed every rule.
///
/// Immutable: later edits go to the controller's live values, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    values: FormValues,
}

impl Snapshot {
    pub(crate) fn new(values: FormValues) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldValue> {
        self.values.get(path)
    }

    /// Rebuild the typed form these values were collected for.
    pub fn to_form<T: Form>(&self) -> Result<T, ValueError> {
        T::from_values(&self.values)
    }
}
