use crate::{FormDefinition, FormValues, ValueError, Variant};

/// Trait for types that can be filled in through a form.
///
/// This trait is typically derived using `#[derive(Form)]`.
pub trait Form: Sized {
    /// Returns the form structure (fields, prompts, validation rules).
    fn definition() -> FormDefinition;

    /// Reconstructs an instance from validated values.
    ///
    /// Values that passed every field's rules always reconstruct; an error
    /// means the values did not come from this form's definition.
    fn from_values(values: &FormValues) -> Result<Self, ValueError>;
}

/// Trait for enums offered as a group of radio options.
///
/// This trait is typically derived using `#[derive(Choice)]`.
pub trait Choice: Sized {
    /// All options, in display order.
    fn variants() -> Vec<Variant>;

    /// The option at `index` in `variants()`.
    fn from_index(index: usize) -> Option<Self>;

    /// Position of this option in `variants()`.
    fn index(&self) -> usize;

    /// The submitted code of this option.
    fn code(&self) -> String {
        Self::variants()
            .into_iter()
            .nth(self.index())
            .map(|v| v.code)
            .unwrap_or_default()
    }

    /// The display label of this option.
    fn label(&self) -> String {
        Self::variants()
            .into_iter()
            .nth(self.index())
            .map(|v| v.label)
            .unwrap_or_default()
    }

    /// The option with the given code.
    fn from_code(code: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .position(|v| v.code == code)
            .and_then(Self::from_index)
    }
}
