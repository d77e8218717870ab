use crate::{FieldPath, ValueError};

/// Error type for form operations.
///
/// Validation failures are not errors; they live in the validation state.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The form has no field with this path.
    #[error("Unknown field: {0}")]
    UnknownField(FieldPath),

    /// An accepted snapshot could not be turned back into the typed form.
    #[error("Snapshot does not match the form: {0}")]
    Snapshot(#[from] ValueError),

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
