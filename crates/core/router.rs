//! Routing of self-describing jobs to their queue.
//!
//! A routable job names its destination queue and carries an arguments
//! payload. [`JobQueue::enqueue`] checks both are present and pushes the
//! arguments to that queue; the engine never needs a registry of job types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ResqError, Result};
use crate::queue::JobQueue;
use crate::store::Store;

/// Field holding the destination queue in generic JSON jobs.
pub const QUEUE_FIELD: &str = "queue";

/// Field holding the arguments payload in generic JSON jobs.
pub const ARGS_FIELD: &str = "args";

/// A job that knows which queue it belongs to.
///
/// Either accessor returning `None` makes the job unroutable.
pub trait Routable {
    /// Payload pushed to the queue.
    type Args: Serialize + ?Sized;

    /// Destination queue name.
    fn queue(&self) -> Option<&str>;

    /// Arguments payload.
    fn args(&self) -> Option<&Self::Args>;
}

/// A typed job with its destination queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedJob<A = Value> {
    /// Destination queue name.
    pub queue: String,
    /// Arguments payload.
    pub args: A,
}

impl<A> RoutedJob<A> {
    /// Create a job for `queue`.
    pub fn new(queue: impl Into<String>, args: A) -> Self {
        Self {
            queue: queue.into(),
            args,
        }
    }
}

impl<A: Serialize> Routable for RoutedJob<A> {
    type Args = A;

    fn queue(&self) -> Option<&str> {
        Some(&self.queue)
    }

    fn args(&self) -> Option<&A> {
        Some(&self.args)
    }
}

/// `{"queue": "<name>", "args": ...}`. A non-string queue counts as missing.
impl Routable for Map<String, Value> {
    type Args = Value;

    fn queue(&self) -> Option<&str> {
        self.get(QUEUE_FIELD).and_then(Value::as_str)
    }

    fn args(&self) -> Option<&Value> {
        self.get(ARGS_FIELD)
    }
}

impl Routable for Value {
    type Args = Value;

    fn queue(&self) -> Option<&str> {
        self.as_object().and_then(|fields| fields.queue())
    }

    fn args(&self) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.args())
    }
}

impl<S: Store + Clone> JobQueue<S> {
    /// Push a routable job's arguments to its destination queue.
    ///
    /// Fails with [`ResqError::MissingField`] before touching the store if
    /// the job has no queue or no arguments. Otherwise behaves like
    /// [`JobQueue::push`].
    pub async fn enqueue<R: Routable + ?Sized>(&self, item: &R) -> Result<()> {
        let queue = item.queue().ok_or(ResqError::MissingField(QUEUE_FIELD))?;
        let args = item.args().ok_or(ResqError::MissingField(ARGS_FIELD))?;
        self.push(queue, args).await
    }
}
