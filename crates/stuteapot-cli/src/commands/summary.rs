//! The `stuteapot summary` command.

use std::path::PathBuf;

use anyhow::Result;

use stuteapot_core::statistics::{compute_cohort_stats, CohortStats};
use stuteapot_core::Category;
use stuteapot_store::config::load_config_from;
use stuteapot_store::create_store;

use super::SummaryFormat;

pub async fn execute(format: SummaryFormat, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_store(&config.store);

    let submissions = store.load_all().await?;
    let stats = compute_cohort_stats(&submissions);

    match format {
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        SummaryFormat::Text => print_summary(&stats),
    }

    Ok(())
}

fn print_summary(stats: &CohortStats) {
    use comfy_table::{Cell, Table};

    println!("Respondents: {}", stats.respondents);
    if stats.respondents == 0 {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Mean", "Min", "Max", "Main style"]);

    for category in Category::ALL {
        let s = stats.per_category.get(&category).copied().unwrap_or_default();
        let count = stats.dominant_counts.get(&category).copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(format!("{:.1}%", s.mean)),
            Cell::new(format!("{}%", s.min)),
            Cell::new(format!("{}%", s.max)),
            Cell::new(format!(
                "{count} ({:.0}%)",
                stats.dominant_share(category) * 100.0
            )),
        ]);
    }

    println!("{table}");
}
