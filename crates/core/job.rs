//! Decoded job records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

use crate::error::{ResqError, Result};

/// Reserved key under which a popped job carries its originating queue.
pub const QUEUE_TAG: &str = "Struct";

/// A job popped from a queue: a generic string-keyed JSON object.
///
/// The queue stays agnostic to job schemas; workers either read fields
/// directly or convert with [`Job::decode_as`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job(Map<String, Value>);

impl Job {
    /// Wrap an already decoded object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Queue this job was popped from, if it has been tagged.
    pub fn queue(&self) -> Option<&str> {
        self.0.get(QUEUE_TAG).and_then(Value::as_str)
    }

    pub(crate) fn tag(&mut self, queue: &str) {
        self.0
            .insert(QUEUE_TAG.to_string(), Value::String(queue.to_string()));
    }

    /// Convert into a typed payload. Unknown fields, including the queue tag,
    /// are ignored unless the target type denies them.
    pub fn decode_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ResqError::DecodeFailed(e.to_string()))
    }

    /// Consume the job and return the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Job {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Job {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Job {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
