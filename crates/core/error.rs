//! Error types for the resq job queue.

use thiserror::Error;

/// The main error type for resq.
#[derive(Error, Debug)]
pub enum ResqError {
    /// The job could not be serialized. Nothing was written to the store.
    #[error("Encode failed: {0}")]
    EncodeFailed(String),

    /// A payload could not be deserialized into the requested shape.
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// An underlying store operation failed (connection, timeout, protocol).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The list append failed. The job was not enqueued.
    #[error("Push to queue '{queue}' failed: {reason}")]
    PushFailed {
        /// Target queue name.
        queue: String,
        /// Underlying store error.
        reason: String,
    },

    /// A job value lacks a field required for routing.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The job was appended but the queue could not be added to the registry.
    ///
    /// The job is durably enqueued; the queue may not show up in
    /// [`QueueRegistry::queues`](crate::QueueRegistry::queues) until a later
    /// push to the same queue registers it.
    #[error("Queue '{queue}' enqueued but not registered: {reason}")]
    RegistrationFailed {
        /// Queue that received the job.
        queue: String,
        /// Underlying store error.
        reason: String,
    },

    /// Invalid or missing connection configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResqError {
    /// Whether the job reached the queue despite this error.
    pub fn is_enqueued(&self) -> bool {
        matches!(self, ResqError::RegistrationFailed { .. })
    }
}

/// Result type alias using ResqError.
pub type Result<T> = std::result::Result<T, ResqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_encode_failed() {
        let err = ResqError::EncodeFailed("key must be a string".to_string());
        assert_eq!(format!("{}", err), "Encode failed: key must be a string");
    }

    #[test]
    fn test_error_display_store_unavailable() {
        let err = ResqError::StoreUnavailable("connection refused".to_string());
        assert_eq!(format!("{}", err), "Store unavailable: connection refused");
    }

    #[test]
    fn test_error_display_push_failed() {
        let err = ResqError::PushFailed {
            queue: "emails".to_string(),
            reason: "broken pipe".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Push to queue 'emails' failed: broken pipe"
        );
    }

    #[test]
    fn test_error_display_missing_field() {
        let err = ResqError::MissingField("args");
        assert_eq!(format!("{}", err), "Missing field: args");
    }

    #[test]
    fn test_error_display_registration_failed() {
        let err = ResqError::RegistrationFailed {
            queue: "emails".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Queue 'emails' enqueued but not registered: timeout"
        );
    }

    #[test]
    fn test_is_enqueued_only_for_registration_failure() {
        let registration = ResqError::RegistrationFailed {
            queue: "q".to_string(),
            reason: "x".to_string(),
        };
        let push = ResqError::PushFailed {
            queue: "q".to_string(),
            reason: "x".to_string(),
        };
        assert!(registration.is_enqueued());
        assert!(!push.is_enqueued());
        assert!(!ResqError::MissingField("queue").is_enqueued());
        assert!(!ResqError::EncodeFailed("x".to_string()).is_enqueued());
    }

    #[test]
    fn test_error_debug() {
        let err = ResqError::Config("REDISURL not set".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("Config"));
        assert!(debug.contains("REDISURL"));
    }
}
