//! Persistence trait for scored submissions.
//!
//! Implemented by the `stuteapot-store` crate. Whatever handles incoming
//! questionnaires receives a store explicitly instead of writing to a global
//! file.

use async_trait::async_trait;

use crate::report::Submission;

/// Append-only storage for submissions.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Human-readable store name (e.g. "jsonl").
    fn name(&self) -> &str;

    /// Persist one submission after any previously appended ones.
    async fn append(&self, submission: &Submission) -> anyhow::Result<()>;

    /// Load every stored submission in insertion order.
    async fn load_all(&self) -> anyhow::Result<Vec<Submission>>;
}
