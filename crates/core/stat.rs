//! Named throughput counters.
//!
//! Counters are plain integer keys under `<namespace>:stat:<name>`. An absent
//! key reads as 0. Updates use the store's atomic INCR/DECR so concurrent
//! processes converge on the net delta. Counters are not tied to queue
//! activity; keeping them in step is up to the caller.

use crate::keys::ResqKeys;
use crate::store::Store;

/// Counter of successfully processed jobs.
pub const PROCESSED: &str = "processed";

/// Counter of failed jobs.
pub const FAILED: &str = "failed";

/// Handle to one named counter.
#[derive(Clone)]
pub struct Stat<S: Store + Clone> {
    name: String,
    key: String,
    store: S,
}

impl<S: Store + Clone> Stat<S> {
    /// Create a handle for counter `name`.
    pub fn new(name: impl Into<String>, store: S, keys: &ResqKeys) -> Self {
        let name = name.into();
        let key = keys.stat(&name);
        Self { name, key, store }
    }

    /// Counter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store key backing this counter.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value; 0 if unset, unreadable or not an integer.
    pub async fn get(&self) -> i64 {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(stat = %self.name, value = %raw, "Counter is not an integer");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(stat = %self.name, error = %e, "Failed to read counter");
                0
            }
        }
    }

    /// Add one. Returns `false` if the store rejected the update.
    pub async fn incr(&self) -> bool {
        self.report("incr", self.store.incr(&self.key).await.map(|_| ()))
    }

    /// Subtract one. Returns `false` if the store rejected the update.
    pub async fn decr(&self) -> bool {
        self.report("decr", self.store.decr(&self.key).await.map(|_| ()))
    }

    /// Delete the counter so it reads 0 again.
    pub async fn clear(&self) -> bool {
        self.report("clear", self.store.del(&self.key).await)
    }

    fn report(&self, op: &str, outcome: crate::Result<()>) -> bool {
        match outcome {
            Ok(()) => {
                tracing::trace!(stat = %self.name, op = op, "Counter updated");
                true
            }
            Err(e) => {
                tracing::warn!(stat = %self.name, op = op, error = %e, "Counter update failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, Op};
    use std::sync::Arc;

    fn stat(name: &str) -> (Arc<MemoryStore>, Stat<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let stat = Stat::new(name, store.clone(), &ResqKeys::default());
        (store, stat)
    }

    #[test]
    fn test_stat_key() {
        let (_, s) = stat("processed");
        assert_eq!(s.name(), "processed");
        assert_eq!(s.key(), "resq:stat:processed");
    }

    #[tokio::test]
    async fn test_absent_reads_zero() {
        let (_, s) = stat("x");
        assert_eq!(s.get().await, 0);
    }

    #[tokio::test]
    async fn test_incr_k_times() {
        let (_, s) = stat("x");
        for _ in 0..7 {
            assert!(s.incr().await);
        }
        assert_eq!(s.get().await, 7);
    }

    #[tokio::test]
    async fn test_decr_below_zero() {
        let (_, s) = stat("x");
        assert!(s.decr().await);
        assert!(s.decr().await);
        assert_eq!(s.get().await, -2);
    }

    #[tokio::test]
    async fn test_clear_resets() {
        let (_, s) = stat("x");
        s.incr().await;
        s.incr().await;
        assert!(s.clear().await);
        assert_eq!(s.get().await, 0);
        // Clearing an absent counter is still a success.
        assert!(s.clear().await);
    }

    #[tokio::test]
    async fn test_failures_report_false() {
        let (store, s) = stat("x");
        store.fail(Op::Incr);
        store.fail(Op::Decr);
        store.fail(Op::Del);

        assert!(!s.incr().await);
        assert!(!s.decr().await);
        assert!(!s.clear().await);
    }

    #[tokio::test]
    async fn test_read_failure_reads_zero() {
        let (store, s) = stat("x");
        s.incr().await;
        store.fail(Op::Get);
        assert_eq!(s.get().await, 0);
    }

    #[tokio::test]
    async fn test_non_integer_reads_zero() {
        let (store, s) = stat("x");
        store.seed_value("resq:stat:x", "many");
        assert_eq!(s.get().await, 0);
        assert!(!s.incr().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_incr_decr_converge() {
        let (_, s) = stat("x");
        let mut handles = Vec::new();
        for i in 0..40 {
            let s = s.clone();
            handles.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    s.decr().await
                } else {
                    s.incr().await
                }
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        // 30 increments, 10 decrements.
        assert_eq!(s.get().await, 20);
    }
}
