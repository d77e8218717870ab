//! Job application form in the terminal.
//!
//! Logs go to stderr; redirect them to keep the screen clean:
//! `RUST_LOG=debug cargo run --example job_application 2> form.log`

use job_application::{Department, JobApplication};
use job_form_ratatui::RatatuiFormBackend;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let result = JobApplication::builder()
        .suggest_department(Department::Sales)
        .run(RatatuiFormBackend::new())?;

    match result {
        Some(application) => {
            println!("{application:#?}");
        }
        None => println!("No application submitted"),
    }

    Ok(())
}
