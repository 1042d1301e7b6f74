//! JSON payload codec.
//!
//! Jobs are stored as JSON text. Encoding keeps field names and nesting;
//! decoding always yields a generic object so the queue never needs to know
//! a job's schema.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ResqError, Result};
use crate::job::Job;

/// Serialize a job record to its stored form.
pub fn encode<T: Serialize + ?Sized>(item: &T) -> Result<String> {
    serde_json::to_string(item).map_err(|e| ResqError::EncodeFailed(e.to_string()))
}

/// Parse a stored payload.
///
/// Returns `None` for malformed input and for JSON that is not an object, so
/// a decode failure is never mistaken for an empty job.
pub fn decode(bytes: &[u8]) -> Option<Job> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Some(Job::new(fields)),
        _ => None,
    }
}
