//! # job-form-ratatui
//!
//! Ratatui form backend for job-form.
//!
//! This backend displays all form fields at once in a scrollable TUI form.
//! Users move between fields with Tab/Shift+Tab, pick radio and select
//! options with the arrow keys and Space/Enter, and submit with the button
//! at the bottom (or F10). Errors show inline as you type; after a valid
//! submit the rendered summary appears below the form.
//!
//! Esc leaves the form and returns the last accepted submission.
//! Ctrl+C cancels.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use job_application::JobApplication;
//! use job_form_ratatui::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = RatatuiFormBackend::new();
//!     let result = JobApplication::builder().run(backend)?;
//!     println!("{result:#?}");
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{RatatuiFormBackend, RatatuiFormError, Theme};
