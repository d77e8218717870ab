//! Scripted backend for exercising forms without user interaction.
//!
//! `ScriptedBackend` replays a fixed sequence of edits and submits against a
//! controller. This is useful for testing form-enabled types.
//!
//! # Example
//!
//! ```rust,ignore
//! use job_form::{Form, ScriptedBackend};
//!
//! #[derive(Form, Debug, PartialEq)]
//! struct Contact {
//!     #[ask("Email")]
//!     #[required]
//!     email: String,
//! }
//!
//! let contact = Contact::builder()
//!     .run(ScriptedBackend::new().with_string("email", "a@naver.com").submit())
//!     .unwrap();
//!
//! assert_eq!(contact.unwrap().email, "a@naver.com");
//! ```

use crate::{FieldPath, FieldValue, FormBackend, FormController, FormError};

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Set a field, as if the user typed or picked a value.
    Set(FieldPath, FieldValue),

    /// Return a field to its initial value.
    Clear(FieldPath),

    /// Press the submit control.
    Submit,
}

/// A backend that replays pre-configured steps in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    steps: Vec<ScriptStep>,
}

impl ScriptedBackend {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Set a field to a value.
    pub fn with_response(mut self, path: impl Into<FieldPath>, value: impl Into<FieldValue>) -> Self {
        self.steps.push(ScriptStep::Set(path.into(), value.into()));
        self
    }

    /// Type text into a field.
    pub fn with_string(self, path: impl Into<FieldPath>, value: impl Into<String>) -> Self {
        self.with_response(path, FieldValue::String(value.into()))
    }

    /// Pick a numeric select option.
    pub fn with_int(self, path: impl Into<FieldPath>, value: i64) -> Self {
        self.with_response(path, FieldValue::Int(value))
    }

    /// Pick a radio option by its code.
    pub fn with_choice(self, path: impl Into<FieldPath>, code: impl Into<String>) -> Self {
        self.with_response(path, FieldValue::String(code.into()))
    }

    /// Reset a field.
    pub fn clear(mut self, path: impl Into<FieldPath>) -> Self {
        self.steps.push(ScriptStep::Clear(path.into()));
        self
    }

    /// Press submit.
    pub fn submit(mut self) -> Self {
        self.steps.push(ScriptStep::Submit);
        self
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }
}

impl FormBackend for ScriptedBackend {
    type Error = FormError;

    fn drive(&self, controller: &mut FormController) -> Result<(), Self::Error> {
        for step in &self.steps {
            match step {
                ScriptStep::Set(path, value) => {
                    controller.set_field_value(path, value.clone())?;
                }
                ScriptStep::Clear(path) => {
                    controller.clear_field(path)?;
                }
                ScriptStep::Submit => {
                    // Rejections are visible through the controller's state.
                    let _ = controller.submit();
                }
            }
        }
        Ok(())
    }
}
