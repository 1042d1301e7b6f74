//! Store abstraction for queue and counter state.
//!
//! The engine only needs a handful of single-key primitives from the
//! backing store. Each call is independent: implementations acquire a
//! connection, issue one command and release it. Atomicity across processes
//! comes entirely from the store's native single-key guarantees.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Primitive key-value operations used by the queue engine.
///
/// Implementations must be thread-safe (Send + Sync) and must report every
/// failure as [`ResqError::StoreUnavailable`](crate::ResqError::StoreUnavailable).
#[async_trait]
pub trait Store: Send + Sync {
    // ========== Lists ==========

    /// Append a value to the tail of a list.
    async fn rpush(&self, key: &str, value: &str) -> Result<()>;

    /// Remove and return the head of a list, `None` if empty or missing.
    async fn lpop(&self, key: &str) -> Result<Option<String>>;

    /// Length of a list; 0 for a missing key.
    async fn llen(&self, key: &str) -> Result<usize>;

    // ========== Sets ==========

    /// Add a member to a set.
    async fn sadd(&self, key: &str, member: &str) -> Result<()>;

    /// All members of a set; empty for a missing key.
    async fn smembers(&self, key: &str) -> Result<Vec<String>>;

    // ========== Counters ==========

    /// Raw string value of a key, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Atomically increment an integer key, returning the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Atomically decrement an integer key, returning the new value.
    async fn decr(&self, key: &str) -> Result<i64>;

    /// Delete a key.
    async fn del(&self, key: &str) -> Result<()>;
}

/// A type-erased store that can be shared across threads.
pub type DynStore = Arc<dyn Store>;

/// Wrapper around Arc<dyn Store> for convenience.
#[derive(Clone)]
pub struct SharedStore {
    inner: DynStore,
}

impl SharedStore {
    /// Create a new SharedStore from any Store implementation.
    pub fn new<S: Store + 'static>(store: S) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Get a reference to the inner store.
    pub fn inner(&self) -> &DynStore {
        &self.inner
    }
}

#[async_trait]
impl Store for SharedStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        self.inner.rpush(key, value).await
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        self.inner.lpop(key).await
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        self.inner.llen(key).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        self.inner.sadd(key, member).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.inner.smembers(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.incr(key).await
    }

    async fn decr(&self, key: &str) -> Result<i64> {
        self.inner.decr(key).await
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.inner.del(key).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> Store for Arc<S> {
    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        (**self).rpush(key, value).await
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        (**self).lpop(key).await
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        (**self).llen(key).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        (**self).sadd(key, member).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        (**self).smembers(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        (**self).incr(key).await
    }

    async fn decr(&self, key: &str) -> Result<i64> {
        (**self).decr(key).await
    }

    async fn del(&self, key: &str) -> Result<()> {
        (**self).del(key).await
    }
}
