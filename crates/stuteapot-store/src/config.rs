//! Configuration loading and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use stuteapot_core::model::Instrument;
use stuteapot_core::parser::parse_instrument;
use stuteapot_core::scoring::{RangePolicy, Scorer};
use stuteapot_core::traits::ResponseStore;

use crate::jsonl::JsonLinesStore;
use crate::memory::MemoryStore;

/// Where submissions are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Jsonl {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Jsonl {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("responses.jsonl")
}

/// Top-level stuteapot configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StuteapotConfig {
    /// Submission store.
    #[serde(default)]
    pub store: StoreConfig,
    /// Instrument definition file; the built-in ILS grouping when unset.
    #[serde(default)]
    pub instrument: Option<PathBuf>,
    /// Reject answers outside the instrument's Likert range.
    #[serde(default)]
    pub strict_range: bool,
}

impl StuteapotConfig {
    pub fn range_policy(&self) -> RangePolicy {
        if self.strict_range {
            RangePolicy::Strict
        } else {
            RangePolicy::Permissive
        }
    }

    /// Build a scorer from the configured instrument and range policy.
    pub fn scorer(&self) -> Result<Scorer> {
        let instrument = match &self.instrument {
            Some(path) => parse_instrument(path)?,
            None => Instrument::ils(),
        };
        Ok(Scorer::new(instrument).with_policy(self.range_policy()))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again, so a value containing `${`
/// is inserted literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `stuteapot.toml` in the current directory
/// 2. `~/.config/stuteapot/config.toml`
///
/// Environment variable override: `STUTEAPOT_STORE_PATH`.
pub fn load_config() -> Result<StuteapotConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StuteapotConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("stuteapot.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StuteapotConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StuteapotConfig::default(),
    };

    if let Ok(store_path) = std::env::var("STUTEAPOT_STORE_PATH") {
        config.store = StoreConfig::Jsonl {
            path: PathBuf::from(store_path),
        };
    }

    if let StoreConfig::Jsonl { path } = &mut config.store {
        *path = resolve_path(path);
    }
    config.instrument = config.instrument.as_deref().map(resolve_path);

    tracing::debug!(
        source = ?config_path,
        store = ?config.store,
        "loaded configuration"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("stuteapot"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Box<dyn ResponseStore> {
    match config {
        StoreConfig::Jsonl { path } => Box::new(JsonLinesStore::new(path.clone())),
        StoreConfig::Memory => Box::new(MemoryStore::new()),
    }
}
