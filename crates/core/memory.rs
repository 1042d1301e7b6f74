//! In-process store, useful for tests and demos.
//!
//! Mirrors the Redis semantics the engine relies on (list order, set
//! idempotence, integer counters) and records how often each operation was
//! issued. Individual operations can be made to fail to exercise degraded
//! paths.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::error::{ResqError, Result};
use crate::store::Store;

/// Store operations tracked by [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Rpush,
    Lpop,
    Llen,
    Sadd,
    Smembers,
    Get,
    Incr,
    Decr,
    Del,
}

#[derive(Default)]
struct Data {
    lists: HashMap<String, VecDeque<String>>,
    sets: HashMap<String, BTreeSet<String>>,
    strings: HashMap<String, String>,
}

/// Thread-safe in-memory [`Store`].
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
    calls: Mutex<HashMap<Op, usize>>,
    failing: Mutex<HashSet<Op>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `op` has been issued, including failed attempts.
    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().get(&op).copied().unwrap_or(0)
    }

    /// Make every subsequent `op` fail with `StoreUnavailable`.
    pub fn fail(&self, op: Op) {
        self.failing.lock().insert(op);
    }

    /// Stop failing `op`.
    pub fn recover(&self, op: Op) {
        self.failing.lock().remove(&op);
    }

    /// Add a set member directly, as an external worker process would.
    pub fn seed_set(&self, key: &str, member: &str) {
        self.data
            .lock()
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
    }

    /// Append a raw payload to a list, bypassing the codec.
    pub fn seed_list(&self, key: &str, value: &str) {
        self.data
            .lock()
            .lists
            .entry(key.to_string())
            .or_default()
            .push_back(value.to_string());
    }

    /// Set a plain string value directly.
    pub fn seed_value(&self, key: &str, value: &str) {
        self.data
            .lock()
            .strings
            .insert(key.to_string(), value.to_string());
    }

    fn enter(&self, op: Op) -> Result<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        if self.failing.lock().contains(&op) {
            return Err(ResqError::StoreUnavailable(format!(
                "injected failure for {:?}",
                op
            )));
        }
        Ok(())
    }

    fn add(&self, key: &str, delta: i64) -> Result<i64> {
        let mut data = self.data.lock();
        let current = match data.strings.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                ResqError::StoreUnavailable("value is not an integer or out of range".to_string())
            })?,
            None => 0,
        };
        let next = current + delta;
        data.strings.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        self.enter(Op::Rpush)?;
        self.seed_list(key, value);
        Ok(())
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        self.enter(Op::Lpop)?;
        let mut data = self.data.lock();
        let popped = data.lists.get_mut(key).and_then(|list| list.pop_front());
        if data.lists.get(key).is_some_and(|list| list.is_empty()) {
            data.lists.remove(key);
        }
        Ok(popped)
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        self.enter(Op::Llen)?;
        Ok(self.data.lock().lists.get(key).map_or(0, |list| list.len()))
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        self.enter(Op::Sadd)?;
        self.seed_set(key, member);
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.enter(Op::Smembers)?;
        Ok(self
            .data
            .lock()
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.enter(Op::Get)?;
        Ok(self.data.lock().strings.get(key).cloned())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.enter(Op::Incr)?;
        self.add(key, 1)
    }

    async fn decr(&self, key: &str) -> Result<i64> {
        self.enter(Op::Decr)?;
        self.add(key, -1)
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.enter(Op::Del)?;
        let mut data = self.data.lock();
        data.lists.remove(key);
        data.sets.remove(key);
        data.strings.remove(key);
        Ok(())
    }
}
