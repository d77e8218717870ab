/// A single raw value held by a form field.
///
/// An unset field has no entry in `FormValues` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value (text inputs, textareas, or a not-yet-resolved choice code).
    String(String),

    /// An integer value (select options).
    Int(i64),

    /// The index of the chosen variant in a radio group.
    ChosenVariant(usize),
}

impl FieldValue {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a chosen variant index.
    pub fn as_chosen_variant(&self) -> Option<usize> {
        match self {
            Self::ChosenVariant(idx) => Some(*idx),
            _ => None,
        }
    }

    /// An empty string counts as "nothing entered".
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Int(_) => "Int",
            Self::ChosenVariant(_) => "ChosenVariant",
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}
