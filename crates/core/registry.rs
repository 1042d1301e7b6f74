//! Queue and worker registries.
//!
//! The queue registry is a persisted set of every queue that has ever
//! received a push. It is a watch-list for discovery and reporting, not a
//! liveness indicator: entries are never removed.

use dashmap::DashSet;
use std::sync::Arc;

use crate::error::{ResqError, Result};
use crate::keys::ResqKeys;
use crate::store::Store;

/// Persisted queue registry with a per-engine memo of registered names.
#[derive(Clone)]
pub struct QueueRegistry<S: Store + Clone> {
    store: S,
    keys: ResqKeys,
    watched: Arc<DashSet<String>>,
}

impl<S: Store + Clone> QueueRegistry<S> {
    /// Create a registry over `store`.
    pub fn new(store: S, keys: ResqKeys) -> Self {
        Self {
            store,
            keys,
            watched: Arc::new(DashSet::new()),
        }
    }

    /// Register `queue` in the persisted set.
    ///
    /// Names this engine already registered are skipped without touching the
    /// store. A failed write leaves the name unmemoized so the next call
    /// retries it.
    pub async fn watch_queue(&self, queue: &str) -> Result<()> {
        if self.watched.contains(queue) {
            return Ok(());
        }

        self.store
            .sadd(&self.keys.queues(), queue)
            .await
            .map_err(|e| ResqError::RegistrationFailed {
                queue: queue.to_string(),
                reason: e.to_string(),
            })?;

        self.watched.insert(queue.to_string());
        tracing::debug!(queue = %queue, "Queue registered");
        Ok(())
    }

    /// Whether this engine has already registered `queue`.
    pub fn is_watched(&self, queue: &str) -> bool {
        self.watched.contains(queue)
    }

    /// All registered queue names. Empty if the store cannot be read.
    pub async fn queues(&self) -> Vec<String> {
        self.members(&self.keys.queues()).await
    }

    /// All registered worker ids. Empty if the store cannot be read.
    ///
    /// Workers register themselves; this side only reads the set.
    pub async fn workers(&self) -> Vec<String> {
        self.members(&self.keys.workers()).await
    }

    async fn members(&self, key: &str) -> Vec<String> {
        match self.store.smembers(key).await {
            Ok(members) => members,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read registry");
                Vec::new()
            }
        }
    }
}
