//! # resq-core - Queue and stat engine
//!
//! A small job-queue client layered on a key-value store:
//! - `Store` trait for the primitive list/set/counter operations
//! - `JobQueue` for FIFO push/pop with a JSON codec
//! - `QueueRegistry` tracking every queue that ever received a push
//! - `Stat` counters for throughput reporting
//! - `Routable` jobs that carry their own destination queue
//! - `ResQ`, the client tying these together, and its `Info` snapshot
//!
//! Delivery is best effort: a popped job is gone from the queue whether or
//! not the worker finishes it.
//!
//! ## Usage
//!
//! ```rust
//! use resq_core::{MemoryStore, ResQ};
//! use serde_json::json;
//!
//! # async fn run() -> resq_core::Result<()> {
//! let resq = ResQ::new(MemoryStore::new(), "localhost:6379");
//!
//! resq.enqueue(&json!({"queue": "emails", "args": {"to": "a@b.com"}})).await?;
//!
//! let job = resq.pop("emails").await.expect("job available");
//! assert_eq!(job.queue(), Some("emails"));
//! # Ok(())
//! # }
//! ```

mod client;
mod codec;
mod config;
mod error;
mod info;
mod job;
mod keys;
mod memory;
mod queue;
mod registry;
mod router;
mod stat;
mod store;

// Re-export main types
pub use client::ResQ;
pub use codec::{decode, encode};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ResqError, Result};
pub use info::Info;
pub use job::{Job, QUEUE_TAG};
pub use keys::{ResqKeys, DEFAULT_NAMESPACE};
pub use memory::{MemoryStore, Op};
pub use queue::{JobQueue, Popped};
pub use registry::QueueRegistry;
pub use router::{Routable, RoutedJob, ARGS_FIELD, QUEUE_FIELD};
pub use stat::{Stat, FAILED, PROCESSED};
pub use store::{DynStore, SharedStore, Store};
