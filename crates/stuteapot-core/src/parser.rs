//! Instrument and response-set loaders.
//!
//! Instruments are TOML files; response sets are JSON objects. Both are
//! validated here before they reach the scorer.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Category, CategoryFields, Instrument, LikertRange, ResponseSet};

/// Intermediate TOML structure for instrument files.
#[derive(Debug, Deserialize)]
struct TomlInstrumentFile {
    instrument: TomlInstrumentHeader,
    #[serde(default)]
    categories: CategoryFields,
}

#[derive(Debug, Deserialize)]
struct TomlInstrumentHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_min")]
    min: i64,
    #[serde(default = "default_max")]
    max: i64,
}

fn default_min() -> i64 {
    LikertRange::default().min
}

fn default_max() -> i64 {
    LikertRange::default().max
}

/// Parse a single TOML file into an `Instrument`.
pub fn parse_instrument(path: &Path) -> Result<Instrument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read instrument file: {}", path.display()))?;

    parse_instrument_str(&content, path)
}

/// Parse a TOML string into an `Instrument`.
pub fn parse_instrument_str(content: &str, source_path: &Path) -> Result<Instrument> {
    let parsed: TomlInstrumentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.instrument;
    let range = LikertRange {
        min: header.min,
        max: header.max,
    };
    if !range.is_valid() {
        anyhow::bail!(
            "instrument '{}' in {}: Likert range {}..={} is empty or inverted",
            header.id,
            source_path.display(),
            range.min,
            range.max
        );
    }

    Ok(Instrument {
        id: header.id,
        name: header.name,
        description: header.description,
        range,
        categories: parsed.categories,
    })
}

/// Recursively load all `.toml` instrument files from a directory.
pub fn load_instrument_directory(dir: &Path) -> Result<Vec<Instrument>> {
    let mut instruments = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            instruments.extend(load_instrument_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_instrument(&path) {
                Ok(instrument) => instruments.push(instrument),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(instruments)
}

/// Load a response set from a JSON file.
pub fn parse_responses(path: &Path) -> Result<ResponseSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;

    parse_responses_str(&content)
        .with_context(|| format!("invalid responses file: {}", path.display()))
}

/// Parse a JSON object of field → answer.
pub fn parse_responses_str(content: &str) -> Result<ResponseSet> {
    serde_json::from_str(content).context("expected a JSON object of field answers")
}

/// A warning from instrument validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The category concerned (if applicable).
    pub category: Option<Category>,
    /// Warning message.
    pub message: String,
}

/// Validate an instrument for common issues.
pub fn validate_instrument(instrument: &Instrument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !instrument.range.is_valid() {
        warnings.push(ValidationWarning {
            category: None,
            message: format!(
                "Likert range {}..={} is empty or inverted",
                instrument.range.min, instrument.range.max
            ),
        });
    }

    // Empty groups always score 0
    for category in Category::ALL {
        if instrument.categories.get(category).is_empty() {
            warnings.push(ValidationWarning {
                category: Some(category),
                message: "category has no fields and will always score 0".into(),
            });
        }
    }

    // A repeated field inside one group is weighted twice
    for category in Category::ALL {
        let mut seen = HashSet::new();
        for field in instrument.categories.get(category) {
            if !seen.insert(field.as_str()) {
                warnings.push(ValidationWarning {
                    category: Some(category),
                    message: format!("duplicate field: {field}"),
                });
            }
        }
    }

    // Shared fields are allowed; report them so they are never accidental
    let mut owners: HashMap<&str, Vec<Category>> = HashMap::new();
    for category in Category::ALL {
        let unique: HashSet<&str> = instrument
            .categories
            .get(category)
            .iter()
            .map(String::as_str)
            .collect();
        for field in unique {
            owners.entry(field).or_default().push(category);
        }
    }
    let mut shared: Vec<(&str, Vec<Category>)> = owners
        .into_iter()
        .filter(|(_, categories)| categories.len() > 1)
        .collect();
    shared.sort();
    for (field, categories) in shared {
        let names: Vec<&str> = categories.iter().map(|c| c.key()).collect();
        warnings.push(ValidationWarning {
            category: None,
            message: format!("field {field} is shared by {}", names.join(", ")),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[instrument]
id = "ils-short"
name = "Short ILS"
description = "A trimmed inventory"
min = 1
max = 5

[categories]
meaning = ["ils_act1", "ils_act2"]
reproduction = ["ils_act3", "ils_mot7"]
application = ["ils_act5", "ils_mot7"]
undirected = ["ils_act10"]
"#;

    #[test]
    fn parse_valid_toml() {
        let instrument = parse_instrument_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(instrument.id, "ils-short");
        assert_eq!(instrument.name, "Short ILS");
        assert_eq!(instrument.categories.meaning, vec!["ils_act1", "ils_act2"]);
        assert_eq!(instrument.range, LikertRange { min: 1, max: 5 });
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[instrument]
id = "minimal"
name = "Minimal"

[categories]
meaning = ["q1"]
"#;
        let instrument = parse_instrument_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(instrument.range, LikertRange::default());
        assert!(instrument.description.is_empty());
        assert!(instrument.categories.undirected.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_instrument_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn builtin_instrument_only_reports_shared_field() {
        let warnings = validate_instrument(&Instrument::ils());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("ils_mot7"));
        assert!(warnings[0].message.contains("reproduction, application"));
    }

    #[test]
    fn validate_empty_and_duplicate_fields() {
        let toml = r#"
[instrument]
id = "bad"
name = "Bad"

[categories]
meaning = ["q1", "q1"]
"#;
        let mut instrument = parse_instrument_str(toml, &PathBuf::from("test.toml")).unwrap();
        instrument.range = LikertRange { min: 5, max: 1 };
        let warnings = validate_instrument(&instrument);
        assert!(warnings.iter().any(|w| w.message.contains("inverted")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicate field: q1")));
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.message.contains("no fields"))
                .count(),
            3
        );
    }

    #[test]
    fn parse_rejects_empty_or_inverted_range() {
        for (min, max) in [(5, 1), (3, 3)] {
            let toml = format!(
                "[instrument]\nid = \"flat\"\nname = \"Flat\"\nmin = {min}\nmax = {max}\n\n[categories]\nmeaning = [\"q1\"]\n"
            );
            let err = parse_instrument_str(&toml, &PathBuf::from("flat.toml")).unwrap_err();
            assert!(err.to_string().contains("empty or inverted"));
        }
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("short.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let instruments = load_instrument_directory(dir.path()).unwrap();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].id, "ils-short");
    }

    #[test]
    fn parse_responses_json() {
        let set = parse_responses_str(r#"{"ils_act1": "5", "ils_act2": 4, "remarks_admin": null}"#)
            .unwrap();
        assert_eq!(set.len(), 3);
        assert!(parse_responses_str("[1, 2, 3]").is_err());
    }
}
