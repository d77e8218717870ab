use crate::{FieldPath, FieldSchema};

/// The top-level structure containing all fields and metadata for a form.
///
/// Presentation-agnostic: front ends decide how to lay the fields out.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    /// Heading shown above the form.
    pub title: Option<String>,

    /// Optional message shown before the fields.
    pub prelude: Option<String>,

    /// All fields, in display order.
    pub fields: Vec<FieldSchema>,

    /// Optional text for the submit control.
    pub epilogue: Option<String>,
}

impl FormDefinition {
    /// Create a new form definition with the given fields.
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self {
            title: None,
            prelude: None,
            fields,
            epilogue: None,
        }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Vec<FieldSchema> {
        &mut self.fields
    }

    /// Look up a field by path.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.path() == path)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
