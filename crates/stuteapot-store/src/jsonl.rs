//! Append-only JSON-lines store.
//!
//! Each submission is one JSON object on its own line. Appends are serialized
//! through a mutex so concurrent writers never interleave partial lines.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use stuteapot_core::report::Submission;
use stuteapot_core::traits::ResponseStore;

use crate::error::StoreError;

/// A [`ResponseStore`] backed by a `.jsonl` file.
pub struct JsonLinesStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn write_line(&self, line: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Submission>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: i + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl ResponseStore for JsonLinesStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, submission: &Submission) -> anyhow::Result<()> {
        let mut line =
            serde_json::to_string(submission).map_err(|e| StoreError::Encode(e.to_string()))?;
        line.push('\n');
        self.write_line(&line).await?;
        tracing::debug!(id = %submission.id, path = %self.path.display(), "stored submission");
        Ok(())
    }

    async fn load_all(&self) -> anyhow::Result<Vec<Submission>> {
        let submissions = self.read_all().await?;
        tracing::debug!(
            count = submissions.len(),
            path = %self.path.display(),
            "loaded submissions"
        );
        Ok(submissions)
    }
}
