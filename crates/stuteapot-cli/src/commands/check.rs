//! The `stuteapot check` command.

use std::path::PathBuf;

use anyhow::Result;

use stuteapot_core::{parser, validate_submission};

pub fn execute(responses_path: PathBuf) -> Result<()> {
    let responses = parser::parse_responses(&responses_path)?;
    let issues = validate_submission(&responses);

    if issues.is_empty() {
        println!("Submission complete: {} fields.", responses.len());
        return Ok(());
    }

    for issue in &issues {
        println!("  {issue}");
    }
    tracing::info!(issues = issues.len(), "submission is incomplete");
    anyhow::bail!(
        "{} problem(s) found in {}",
        issues.len(),
        responses_path.display()
    )
}
