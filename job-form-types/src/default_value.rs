use crate::FieldValue;

/// Default value for a field.
///
/// Controls whether a field starts out pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultValue {
    /// No default value - the field starts unset (selects start at their first option).
    #[default]
    None,

    /// A suggested value that the user can accept or modify.
    Suggested(FieldValue),
}

impl DefaultValue {
    /// Get the inner value if this is Suggested.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::None => None,
            Self::Suggested(v) => Some(v),
        }
    }
}
