//! In-memory store for tests and dry runs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use stuteapot_core::report::Submission;
use stuteapot_core::traits::ResponseStore;

/// A [`ResponseStore`] that keeps submissions in process memory.
///
/// Nothing survives the process; useful for exercising code that takes a
/// store without touching the filesystem.
#[derive(Default)]
pub struct MemoryStore {
    submissions: Mutex<Vec<Submission>>,
    append_count: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `submissions`.
    pub fn with_submissions(submissions: Vec<Submission>) -> Self {
        Self {
            submissions: Mutex::new(submissions),
            append_count: AtomicU32::new(0),
        }
    }

    /// Number of `append` calls made to this store.
    pub fn append_count(&self) -> u32 {
        self.append_count.load(Ordering::Relaxed)
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Vec<Submission>>> {
        self.submissions
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, submission: &Submission) -> anyhow::Result<()> {
        self.append_count.fetch_add(1, Ordering::Relaxed);
        self.lock()?.push(submission.clone());
        Ok(())
    }

    async fn load_all(&self) -> anyhow::Result<Vec<Submission>> {
        Ok(self.lock()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use stuteapot_core::model::{Category, ResponseSet};
    use stuteapot_core::scoring::Scorer;

    #[tokio::test]
    async fn append_and_load() {
        let store = MemoryStore::new();
        let responses = ResponseSet::new().with("ils_act5", 5i64);
        let submission = Submission::score(&Scorer::ils(), responses).unwrap();

        store.append(&submission).await.unwrap();
        let loaded = store.load_all().await.unwrap();

        assert_eq!(store.append_count(), 1);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].result.dominant, Category::Application);
    }

    #[tokio::test]
    async fn prepopulated_store() {
        let submission = Submission::score(&Scorer::ils(), ResponseSet::new()).unwrap();
        let store = MemoryStore::with_submissions(vec![submission.clone(), submission]);

        assert_eq!(store.load_all().await.unwrap().len(), 2);
        assert_eq!(store.append_count(), 0);
        assert_eq!(store.name(), "memory");
    }
}
