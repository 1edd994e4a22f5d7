//! The `stuteapot validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(instrument_path: PathBuf) -> Result<()> {
    let instruments = if instrument_path.is_dir() {
        stuteapot_core::parser::load_instrument_directory(&instrument_path)?
    } else {
        vec![stuteapot_core::parser::parse_instrument(&instrument_path)?]
    };

    let mut total_warnings = 0;

    for instrument in &instruments {
        let field_count: usize = stuteapot_core::Category::ALL
            .into_iter()
            .map(|c| instrument.categories.get(c).len())
            .sum();
        println!(
            "Instrument: {} ({} scored fields, range {}..={})",
            instrument.name, field_count, instrument.range.min, instrument.range.max
        );

        let warnings = stuteapot_core::parser::validate_instrument(instrument);
        for w in &warnings {
            let prefix = w
                .category
                .map(|c| format!("  [{}]", c.key()))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All instruments valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
