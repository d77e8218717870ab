pub mod job_application;

// Re-export job_application types
pub use job_application::{Department, JobApplication, JobApplicationBuilder, Motivation};
