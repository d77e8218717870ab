//! Core types for the job-form crate.
//!
//! This crate provides the foundational types for defining forms:
//! - `FormDefinition` - The top-level form structure
//! - `FieldSchema` and `FieldKind` - Individual fields and their input types
//! - `Rule` - Ordered validation rules attached to a field
//! - `FormValues` and `FieldPath` - Current values and path-based keys
//! - `Form` and `Choice` traits - For types that describe a form or a radio group

mod field_path;
pub use field_path::FieldPath;

mod field_value;
pub use field_value::FieldValue;

mod form_values;
pub use form_values::{FormValues, ValueError};

mod default_value;
pub use default_value::DefaultValue;

mod rule;
pub use rule::{REQUIRED_MESSAGE, Rule, Validator};

mod field;
pub use field::{
    FieldKind, FieldSchema, NOT_AN_OPTION, NOT_TEXT, OneOfField, SelectField, SelectOption,
    Variant,
};

mod form_definition;
pub use form_definition::FormDefinition;

mod error;
pub use error::FormError;

mod traits;
pub use traits::{Choice, Form};
