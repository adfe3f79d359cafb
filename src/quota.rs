use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Date-stamped daily counter. `count` only ever reflects requests received
/// on `date`; a day change resets it before any increment is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCounter {
    pub date: NaiveDate,
    pub count: u64,
}

impl QuotaCounter {
    pub fn fresh(date: NaiveDate) -> Self {
        Self { date, count: 0 }
    }

    /// Resets the counter when `today` has moved past the stored date.
    fn roll_over(&mut self, today: NaiveDate) {
        if self.date != today {
            debug!("quota counter rolling over from {} to {}", self.date, today);
            *self = Self::fresh(today);
        }
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Returns the persisted counter, or a fresh zero counter dated today if
    /// none exists or the backing store is unreadable.
    async fn read(&self) -> QuotaCounter;

    /// Atomically performs read-with-rollover, checks the daily limit, and
    /// increments when under it. Returns whether the request was admitted.
    async fn admit(&self) -> bool;
}

/// Single JSON record on disk. The mutex spans the whole read-modify-write
/// of `admit`, so interleaved requests cannot both observe the same stale
/// count and lose an increment.
pub struct FileQuotaStore {
    path: PathBuf,
    limit: u64,
    lock: Mutex<()>,
}

impl FileQuotaStore {
    pub fn new(path: PathBuf, limit: u64) -> Self {
        Self {
            path,
            limit,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self, today: NaiveDate) -> QuotaCounter {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("quota counter file is corrupt, starting fresh: {}", e);
                QuotaCounter::fresh(today)
            }),
            Err(_) => QuotaCounter::fresh(today),
        }
    }

    /// Best-effort persistence: a write failure is logged and the in-memory
    /// admit decision for the current request still applies.
    async fn persist(&self, counter: &QuotaCounter) {
        let bytes = match serde_json::to_vec(counter) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to serialize quota counter: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, bytes).await {
            warn!("failed to persist quota counter: {}", e);
        }
    }

    pub(crate) async fn admit_for(&self, today: NaiveDate) -> bool {
        let _guard = self.lock.lock().await;

        let mut counter = self.load(today).await;
        counter.roll_over(today);

        if counter.count >= self.limit {
            return false;
        }

        counter.count += 1;
        self.persist(&counter).await;
        true
    }
}

#[async_trait]
impl QuotaStore for FileQuotaStore {
    async fn read(&self) -> QuotaCounter {
        let _guard = self.lock.lock().await;
        self.load(utc_today()).await
    }

    async fn admit(&self) -> bool {
        self.admit_for(utc_today()).await
    }
}

/// In-memory store with the same rollover and limit semantics, for tests
/// and single-run deployments that do not need restart durability.
pub struct MemoryQuotaStore {
    limit: u64,
    counter: Mutex<QuotaCounter>,
}

impl MemoryQuotaStore {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            counter: Mutex::new(QuotaCounter::fresh(utc_today())),
        }
    }

    pub(crate) async fn admit_for(&self, today: NaiveDate) -> bool {
        let mut counter = self.counter.lock().await;
        counter.roll_over(today);

        if counter.count >= self.limit {
            return false;
        }

        counter.count += 1;
        true
    }
}

#[async_trait]
impl QuotaStore for MemoryQuotaStore {
    async fn read(&self) -> QuotaCounter {
        self.counter.lock().await.clone()
    }

    async fn admit(&self) -> bool {
        self.admit_for(utc_today()).await
    }
}
