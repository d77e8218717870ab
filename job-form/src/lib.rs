//! # job-form
//!
//! Derive validated forms for Rust types. Backend-agnostic.
//!
//! This crate provides the `#[derive(Form)]` and `#[derive(Choice)]` macros,
//! the [`FormController`] that owns a form's live values and per-field
//! errors, and the [`Summary`] renderer for accepted submissions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use job_form::{Choice, Form};
//!
//! #[derive(Choice, Debug, Clone, Copy, PartialEq)]
//! enum Team {
//!     #[label("Red team")]
//!     Red,
//!     #[label("Blue team")]
//!     Blue,
//! }
//!
//! #[derive(Form, Debug)]
//! #[title("Sign up")]
//! struct SignUp {
//!     #[ask("Which team?")]
//!     #[required]
//!     team: Team,
//!
//!     #[ask("Email")]
//!     #[required]
//!     #[contains("@naver.com", "Only naver email is available")]
//!     email: String,
//! }
//!
//! let mut controller = SignUp::builder().controller();
//! controller.set_field_value("team", "red")?;
//! controller.set_field_value("email", "a@naver.com")?;
//! assert!(controller.submit().is_accepted());
//! ```
//!
//! ## Attributes
//!
//! ### On structs
//! - `#[title("...")]` - Heading shown above the form
//! - `#[prelude("...")]` - Message shown before the fields
//! - `#[epilogue("...")]` - Text of the submit control
//!
//! ### On fields
//! - `#[ask("...")]` - The prompt text shown next to the field
//! - `#[required]` / `#[required("msg")]` - Reject empty values
//! - `#[multiline]` - Show a textarea
//! - `#[min_len(n, "msg")]` - Minimum number of characters
//! - `#[contains("needle", "msg")]` - Text must contain a substring
//! - `#[validate(fn_name)]` - Custom validator `fn(&FieldValue) -> Result<(), String>`
//! - `#[select(a, b, ...)]` / `#[display("${}K")]` - Numeric select options and their labels
//!
//! ### On `Choice` variants
//! - `#[value("code")]` - Submitted code (default: lower-cased variant name)
//! - `#[label("...")]` - Display label (default: variant name)
//!
//! ## Backends
//!
//! Backends implement [`FormBackend`] and drive a controller:
//! - [`ScriptedBackend`] - replays edits and submits, for tests
//! - `job-form-ratatui` - full-screen terminal form

// Re-export all types from job-form-types
pub use job_form_types::*;

// Re-export the derive macros
pub use job_form_macro::{Choice, Form};

#[doc(hidden)]
pub use anyhow;

mod backend;
pub use backend::FormBackend;

mod controller;
pub use controller::{FormController, SubmitOutcome, SubscriptionId};

mod snapshot;
pub use snapshot::Snapshot;

pub mod summary;
pub use summary::{Summary, SummaryLine};

mod validation;
pub use validation::ValidationState;

// Scripted backend for driving forms without user interaction
mod scripted_backend;
pub use scripted_backend::{ScriptStep, ScriptedBackend};
