//! The `stuteapot score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use stuteapot_core::parser;
use stuteapot_core::report::Submission;
use stuteapot_core::scoring::{RangePolicy, Scorer};
use stuteapot_store::config::load_config_from;
use stuteapot_store::create_store;

use super::ScoreFormat;

pub async fn execute(
    responses_path: PathBuf,
    instrument_path: Option<PathBuf>,
    strict: bool,
    format: ScoreFormat,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let scorer = match instrument_path {
        Some(path) => Scorer::new(parser::parse_instrument(&path)?),
        None => config.scorer()?,
    };
    let policy = if strict || config.strict_range {
        RangePolicy::Strict
    } else {
        RangePolicy::Permissive
    };
    let scorer = scorer.with_policy(policy);

    let responses = parser::parse_responses(&responses_path)?;
    tracing::info!(
        fields = responses.len(),
        instrument = %scorer.instrument().id,
        "scoring responses"
    );

    let submission = Submission::score(&scorer, responses)
        .with_context(|| format!("failed to score {}", responses_path.display()))?;

    match format {
        ScoreFormat::Json => println!("{}", serde_json::to_string_pretty(&submission.result)?),
        ScoreFormat::Markdown => println!("{}", submission.result.to_markdown()),
        ScoreFormat::Text => print!("{}", submission.result.to_text()),
    }

    if save {
        let store = create_store(&config.store);
        store.append(&submission).await?;
        eprintln!("Saved submission {} to {} store", submission.id, store.name());
    }

    Ok(())
}
