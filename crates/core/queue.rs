//! FIFO job queues.
//!
//! Each queue is a store list under `<namespace>:queue:<name>`. Pushing
//! appends to the tail and then registers the queue; popping removes the
//! head. There is no in-flight state: once popped, a job belongs to the
//! caller and cannot be recovered from the queue.

use serde::Serialize;

use crate::codec;
use crate::error::{ResqError, Result};
use crate::job::Job;
use crate::keys::ResqKeys;
use crate::registry::QueueRegistry;
use crate::store::Store;

/// Outcome of [`JobQueue::pop_entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Popped {
    /// The queue was empty.
    Empty,
    /// A payload was removed from the queue but could not be decoded.
    ///
    /// The raw text is returned so it can be logged or quarantined; it is no
    /// longer in the queue.
    Corrupt(String),
    /// A decoded job, tagged with its queue.
    Job(Job),
}

/// Push/pop access to named queues.
#[derive(Clone)]
pub struct JobQueue<S: Store + Clone> {
    store: S,
    keys: ResqKeys,
    registry: QueueRegistry<S>,
}

impl<S: Store + Clone> JobQueue<S> {
    /// Create a job queue over `store`, with its own registry memo.
    pub fn new(store: S, keys: ResqKeys) -> Self {
        let registry = QueueRegistry::new(store.clone(), keys.clone());
        Self {
            store,
            keys,
            registry,
        }
    }

    /// The registry this queue registers into.
    pub fn registry(&self) -> &QueueRegistry<S> {
        &self.registry
    }

    /// Append `item` to the tail of `queue` and register the queue.
    ///
    /// This is two independent store operations. If the append succeeds but
    /// registration fails the result is [`ResqError::RegistrationFailed`]
    /// and the item stays enqueued; check [`ResqError::is_enqueued`] before
    /// retrying to avoid a duplicate.
    pub async fn push<T: Serialize + ?Sized>(&self, queue: &str, item: &T) -> Result<()> {
        let payload = codec::encode(item)?;

        self.store
            .rpush(&self.keys.queue(queue), &payload)
            .await
            .map_err(|e| ResqError::PushFailed {
                queue: queue.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(queue = %queue, "Job pushed");
        self.registry.watch_queue(queue).await
    }

    /// Remove and return the head of `queue`.
    ///
    /// Returns `None` when the queue is empty, when the store cannot be read
    /// and when the payload does not decode; a corrupt payload is dropped.
    /// Use [`JobQueue::pop_entry`] to tell these apart.
    pub async fn pop(&self, queue: &str) -> Option<Job> {
        match self.pop_entry(queue).await {
            Ok(Popped::Job(job)) => Some(job),
            Ok(Popped::Empty) => None,
            Ok(Popped::Corrupt(raw)) => {
                tracing::warn!(queue = %queue, payload = %raw, "Dropped undecodable job");
                None
            }
            Err(e) => {
                tracing::warn!(queue = %queue, error = %e, "Failed to pop job");
                None
            }
        }
    }

    /// Remove the head of `queue`, reporting empty, corrupt and decoded
    /// outcomes separately. Store failures are returned as errors.
    pub async fn pop_entry(&self, queue: &str) -> Result<Popped> {
        let Some(raw) = self.store.lpop(&self.keys.queue(queue)).await? else {
            return Ok(Popped::Empty);
        };

        Ok(match codec::decode(raw.as_bytes()) {
            Some(mut job) => {
                job.tag(queue);
                Popped::Job(job)
            }
            None => Popped::Corrupt(raw),
        })
    }

    /// Number of jobs waiting in `queue`. 0 if the store cannot be read.
    pub async fn size(&self, queue: &str) -> usize {
        match self.store.llen(&self.keys.queue(queue)).await {
            Ok(len) => len,
            Err(e) => {
                tracing::warn!(queue = %queue, error = %e, "Failed to read queue size");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, Op};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn queue() -> (Arc<MemoryStore>, JobQueue<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let queue = JobQueue::new(store.clone(), ResqKeys::default());
        (store, queue)
    }

    #[tokio::test]
    async fn test_push_then_pop_tags_queue() {
        let (_, q) = queue();
        q.push("emails", &json!({"to": "a@b.com", "tries": 2}))
            .await
            .unwrap();

        let job = q.pop("emails").await.unwrap();
        assert_eq!(job.queue(), Some("emails"));
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({"to": "a@b.com", "tries": 2, "Struct": "emails"})
        );
    }

    #[tokio::test]
    async fn test_push_registers_queue() {
        let (store, q) = queue();
        q.push("emails", &json!({"n": 1})).await.unwrap();
        q.push("emails", &json!({"n": 2})).await.unwrap();

        assert_eq!(q.registry().queues().await, vec!["emails"]);
        assert_eq!(store.calls(Op::Sadd), 1);
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let (_, q) = queue();
        for n in 0..3 {
            q.push("work", &json!({ "n": n })).await.unwrap();
        }
        for n in 0..3 {
            let job = q.pop("work").await.unwrap();
            assert_eq!(job.get("n"), Some(&json!(n)));
        }
    }

    #[tokio::test]
    async fn test_pop_empty_and_unknown_queue() {
        let (_, q) = queue();
        assert!(q.pop("never-created").await.is_none());

        q.push("work", &json!({})).await.unwrap();
        assert!(q.pop("work").await.is_some());
        assert!(q.pop("work").await.is_none());
        assert_eq!(q.pop_entry("work").await.unwrap(), Popped::Empty);
    }

    #[tokio::test]
    async fn test_size_after_pushes_and_pops() {
        let (_, q) = queue();
        for n in 0..5 {
            q.push("work", &json!({ "n": n })).await.unwrap();
        }
        for _ in 0..2 {
            q.pop("work").await.unwrap();
        }
        assert_eq!(q.size("work").await, 3);
        assert_eq!(q.size("other").await, 0);
    }

    #[tokio::test]
    async fn test_encode_failure_touches_nothing() {
        let (store, q) = queue();
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "x");

        let err = q.push("work", &bad).await.unwrap_err();
        assert!(matches!(err, ResqError::EncodeFailed(_)));
        assert_eq!(store.calls(Op::Rpush), 0);
        assert_eq!(store.calls(Op::Sadd), 0);
    }

    #[tokio::test]
    async fn test_append_failure_skips_registration() {
        let (store, q) = queue();
        store.fail(Op::Rpush);

        let err = q.push("work", &json!({})).await.unwrap_err();
        assert!(matches!(err, ResqError::PushFailed { .. }));
        assert!(!err.is_enqueued());
        assert_eq!(store.calls(Op::Sadd), 0);
        assert!(!q.registry().is_watched("work"));
    }

    #[tokio::test]
    async fn test_registration_failure_still_enqueues() {
        let (store, q) = queue();
        store.fail(Op::Sadd);

        let err = q.push("work", &json!({"n": 1})).await.unwrap_err();
        assert!(err.is_enqueued());
        assert_eq!(q.size("work").await, 1);
        assert!(q.registry().queues().await.is_empty());

        // Next push to the same queue heals the registry.
        store.recover(Op::Sadd);
        q.push("work", &json!({"n": 2})).await.unwrap();
        assert_eq!(q.registry().queues().await, vec!["work"]);
        assert_eq!(q.size("work").await, 2);
    }

    #[tokio::test]
    async fn test_corrupt_payload_collapses_to_none() {
        let (store, q) = queue();
        store.seed_list("resq:queue:work", "{not json");
        store.seed_list("resq:queue:work", r#"{"n":1}"#);

        assert!(q.pop("work").await.is_none());
        // The corrupt entry is gone; the next job is intact.
        assert_eq!(q.pop("work").await.unwrap().get("n"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_pop_entry_reports_corrupt_payload() {
        let (store, q) = queue();
        store.seed_list("resq:queue:work", "[1,2]");

        assert_eq!(
            q.pop_entry("work").await.unwrap(),
            Popped::Corrupt("[1,2]".to_string())
        );
        assert_eq!(q.size("work").await, 0);
    }

    #[tokio::test]
    async fn test_store_failure_on_read_paths() {
        let (store, q) = queue();
        q.push("work", &json!({})).await.unwrap();
        store.fail(Op::Lpop);
        store.fail(Op::Llen);

        assert!(q.pop("work").await.is_none());
        assert!(matches!(
            q.pop_entry("work").await,
            Err(ResqError::StoreUnavailable(_))
        ));
        assert_eq!(q.size("work").await, 0);

        store.recover(Op::Lpop);
        store.recover(Op::Llen);
        assert_eq!(q.size("work").await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_pushes_register_once_per_engine() {
        let (store, q) = queue();
        let mut handles = Vec::new();
        for n in 0..20 {
            let q = q.clone();
            handles.push(tokio::spawn(async move {
                q.push("burst", &json!({ "n": n })).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(q.size("burst").await, 20);
        assert_eq!(q.registry().queues().await, vec!["burst"]);
        // Racing first pushes may each write before the memo is set.
        assert!(store.calls(Op::Sadd) >= 1);
        assert!(q.registry().is_watched("burst"));
    }
}
