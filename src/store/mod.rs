//! Key/item store.
//!
//! One owning component guards the item map and the word pool behind a
//! single mutex, so key assignment and expiry can never race. The invariant
//! it maintains: a key is in the pool XOR it is a live store key.

pub mod file_storage;
pub mod models;
pub mod sweeper;
pub mod word_pool;

pub use file_storage::FileStorage;
pub use models::{Item, ItemKind};
pub use sweeper::ExpirySweeper;
pub use word_pool::WordPool;

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::errors::{Result, SharekeyError};

pub struct ShareStore {
    inner: Mutex<StoreInner>,
    files: FileStorage,
    retention: Duration,
}

struct StoreInner {
    items: HashMap<String, Item>,
    pool: WordPool,
}

/// Outcome of one sweeper pass
#[derive(Debug, Default)]
pub struct SweepReport {
    pub items_removed: usize,
    pub files_deleted: usize,
    pub files_already_gone: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.items_removed == 0
    }
}

impl ShareStore {
    pub fn new(pool: WordPool, files: FileStorage, retention: StdDuration) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                items: HashMap::new(),
                pool,
            }),
            files,
            retention: Duration::from_std(retention).unwrap_or(Duration::MAX),
        }
    }

    pub fn files(&self) -> &FileStorage {
        &self.files
    }

    /// Draw a key from the pool and store the item under it.
    /// Fails when the pool is dry; the item is not stored in that case.
    pub fn insert(&self, item: Item) -> Result<String> {
        let mut inner = self.inner.lock();
        let key = inner
            .pool
            .draw()
            .ok_or_else(|| SharekeyError::pool_exhausted("No keys left in the word pool"))?;
        inner.items.insert(key.clone(), item);
        Ok(key)
    }

    /// Look up a live item. Items at or past the retention window are
    /// reported absent even if the sweeper has not collected them yet.
    pub fn get(&self, key: &str) -> Option<Item> {
        let inner = self.inner.lock();
        let item = inner.items.get(key)?;
        if self.is_expired(item, Utc::now()) {
            debug!("Item for key '{}' has expired, awaiting sweep", key);
            return None;
        }
        Some(item.clone())
    }

    fn is_expired(&self, item: &Item, now: DateTime<Utc>) -> bool {
        now - item.created_at >= self.retention
    }

    /// Remove every expired item, return its key to the pool and delete its
    /// stored bytes. No ordering guarantee among expired entries.
    pub async fn sweep_expired(&self) -> SweepReport {
        let now = Utc::now();

        let expired: Vec<(String, Item)> = {
            let mut inner = self.inner.lock();
            let keys: Vec<String> = inner
                .items
                .iter()
                .filter(|(_, item)| self.is_expired(item, now))
                .map(|(key, _)| key.clone())
                .collect();

            keys.into_iter()
                .filter_map(|key| {
                    let item = inner.items.remove(&key)?;
                    inner.pool.restore(key.clone());
                    Some((key, item))
                })
                .collect()
        };

        self.cleanup_files(expired).await
    }

    /// Remove every live item regardless of age. Used at shutdown: nothing
    /// is meant to survive the process.
    pub async fn drain_all(&self) -> SweepReport {
        let drained: Vec<(String, Item)> = {
            let mut inner = self.inner.lock();
            let items: Vec<(String, Item)> = inner.items.drain().collect();
            for (key, _) in &items {
                inner.pool.restore(key.clone());
            }
            items
        };

        self.cleanup_files(drained).await
    }

    async fn cleanup_files(&self, removed: Vec<(String, Item)>) -> SweepReport {
        let mut report = SweepReport {
            items_removed: removed.len(),
            ..SweepReport::default()
        };

        for (key, item) in removed {
            if item.kind != ItemKind::File {
                continue;
            }
            match self.files.remove(&item.id).await {
                Ok(true) => report.files_deleted += 1,
                Ok(false) => report.files_already_gone += 1,
                Err(e) => {
                    // store entry is already gone; nothing retries this delete
                    warn!("Failed to delete stored file for key '{}': {}", key, e);
                }
            }
        }

        report
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn pool_size(&self) -> usize {
        self.inner.lock().pool.len()
    }

    /// Whether a key currently sits in the pool. Test support for the
    /// pool-XOR-live invariant.
    pub fn pool_contains(&self, word: &str) -> bool {
        self.inner.lock().pool.contains(word)
    }
}
