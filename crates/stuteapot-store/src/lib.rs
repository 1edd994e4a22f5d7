//! stuteapot-store — configuration and response persistence.
//!
//! Implements the `ResponseStore` trait for an append-only JSON-lines file and
//! an in-memory store, and loads `stuteapot.toml` configuration.

pub mod config;
pub mod error;
pub mod jsonl;
pub mod memory;

pub use config::{create_store, load_config, StoreConfig, StuteapotConfig};
pub use error::StoreError;
pub use jsonl::JsonLinesStore;
pub use memory::MemoryStore;
