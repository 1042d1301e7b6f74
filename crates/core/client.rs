//! Client for producing, consuming and inspecting jobs.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::info::Info;
use crate::job::Job;
use crate::keys::ResqKeys;
use crate::queue::{JobQueue, Popped};
use crate::registry::QueueRegistry;
use crate::router::Routable;
use crate::stat::{Stat, FAILED, PROCESSED};
use crate::store::{SharedStore, Store};

/// One engine instance per logical store connection.
///
/// Clones share the store handle and the registry memo.
#[derive(Clone)]
pub struct ResQ<S: Store + Clone = SharedStore> {
    store: S,
    keys: ResqKeys,
    queue: JobQueue<S>,
    host: String,
}

impl ResQ<SharedStore> {
    /// Create a new client with a shared store and default namespace.
    pub fn new(store: impl Store + 'static, host: impl Into<String>) -> Self {
        Self::with_store(SharedStore::new(store), ClientConfig::new(host))
    }
}

impl<S: Store + Clone> ResQ<S> {
    /// Create a new client with a specific store and configuration.
    pub fn with_store(store: S, config: ClientConfig) -> Self {
        let keys = ResqKeys::new(config.namespace);
        let queue = JobQueue::new(store.clone(), keys.clone());
        Self {
            store,
            keys,
            queue,
            host: config.host,
        }
    }

    /// The configured store endpoint.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Key layout used by this client.
    pub fn keys(&self) -> &ResqKeys {
        &self.keys
    }

    /// Underlying job queue.
    pub fn job_queue(&self) -> &JobQueue<S> {
        &self.queue
    }

    /// Underlying queue registry.
    pub fn registry(&self) -> &QueueRegistry<S> {
        self.queue.registry()
    }

    /// Push `item` onto `queue`. See [`JobQueue::push`].
    pub async fn push<T: Serialize + ?Sized>(&self, queue: &str, item: &T) -> Result<()> {
        self.queue.push(queue, item).await
    }

    /// Push a routable job to its own queue. See [`JobQueue::enqueue`].
    pub async fn enqueue<R: Routable + ?Sized>(&self, item: &R) -> Result<()> {
        self.queue.enqueue(item).await
    }

    /// Pop the next job from `queue`. See [`JobQueue::pop`].
    pub async fn pop(&self, queue: &str) -> Option<Job> {
        self.queue.pop(queue).await
    }

    /// Pop the next job, keeping empty and corrupt outcomes apart.
    pub async fn pop_entry(&self, queue: &str) -> Result<Popped> {
        self.queue.pop_entry(queue).await
    }

    /// Number of jobs waiting in `queue`.
    pub async fn size(&self, queue: &str) -> usize {
        self.queue.size(queue).await
    }

    /// Register `queue` without pushing to it.
    pub async fn watch_queue(&self, queue: &str) -> Result<()> {
        self.queue.registry().watch_queue(queue).await
    }

    /// Every queue that has ever received a push.
    pub async fn queues(&self) -> Vec<String> {
        self.queue.registry().queues().await
    }

    /// Every registered worker.
    pub async fn workers(&self) -> Vec<String> {
        self.queue.registry().workers().await
    }

    /// Handle to counter `name`.
    pub fn stat(&self, name: impl Into<String>) -> Stat<S> {
        Stat::new(name, self.store.clone(), &self.keys)
    }

    /// Snapshot of pending jobs, counters and registry sizes.
    pub async fn info(&self) -> Info {
        let queues = self.queues().await;
        let mut pending = 0;
        for queue in &queues {
            pending += self.size(queue).await;
        }

        Info {
            pending,
            processed: self.stat(PROCESSED).get().await,
            failed: self.stat(FAILED).get().await,
            queues: queues.len(),
            workers: self.workers().await.len(),
            host: self.host.clone(),
        }
    }
}
