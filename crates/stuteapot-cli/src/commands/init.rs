//! The `stuteapot init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("stuteapot.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("instruments")?;
    write_if_missing(Path::new("instruments/ils.toml"), ILS_INSTRUMENT)?;

    write_if_missing(Path::new("responses.json"), SAMPLE_RESPONSES)?;

    println!("\nNext steps:");
    println!("  1. Run: stuteapot validate --instrument instruments/ils.toml");
    println!("  2. Run: stuteapot score --responses responses.json --save");
    println!("  3. Run: stuteapot summary");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# stuteapot configuration

instrument = "instruments/ils.toml"
strict_range = false

[store]
type = "jsonl"
path = "responses.jsonl"
"#;

const ILS_INSTRUMENT: &str = r#"[instrument]
id = "ils"
name = "Index of Learning Styles"
description = "Learning activities and motives inventory"
min = 1
max = 5

[categories]
meaning = ["ils_act1", "ils_act2", "ils_act6", "ils_act7", "ils_mot1", "ils_mot6"]
reproduction = ["ils_act3", "ils_act4", "ils_act8", "ils_act9", "ils_mot2", "ils_mot7"]
application = ["ils_act5", "ils_mot3", "ils_mot7", "ils_mot9"]
undirected = ["ils_act10", "ils_mot4", "ils_mot5", "ils_mot10", "ils_mot8"]
"#;

const SAMPLE_RESPONSES: &str = r#"{
  "anonymous_id": "sample-001",
  "study_field": "biology",
  "ffm1": "4",
  "ils_act1": "5",
  "ils_act2": "4",
  "ils_act3": "2",
  "ils_act4": "1",
  "ils_act5": "3",
  "ils_act6": "5",
  "ils_act7": "4",
  "ils_act8": "2",
  "ils_act9": "2",
  "ils_act10": "1",
  "ils_mot1": "5",
  "ils_mot2": "2",
  "ils_mot3": "3",
  "ils_mot4": "1",
  "ils_mot5": "2",
  "ils_mot6": "4",
  "ils_mot7": "3",
  "ils_mot8": "1",
  "ils_mot9": "4",
  "ils_mot10": "1",
  "pedagogy_group_work_like": "4",
  "study_tips": "Explain it to someone else."
}
"#;
