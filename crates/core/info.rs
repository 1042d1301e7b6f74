//! Dashboard snapshot.

use serde::{Deserialize, Serialize};

/// Aggregate view of the queue system.
///
/// Figures are read one key at a time and are not a consistent cut: under
/// concurrent pushes and pops `pending` may be slightly stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Jobs waiting across every registered queue.
    pub pending: usize,
    /// Value of the `processed` counter.
    pub processed: i64,
    /// Value of the `failed` counter.
    pub failed: i64,
    /// Number of registered queues.
    pub queues: usize,
    /// Number of registered workers.
    pub workers: usize,
    /// Configured store endpoint, for display.
    pub host: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_serializes_as_flat_map() {
        let info = Info {
            pending: 3,
            processed: 10,
            failed: 1,
            queues: 2,
            workers: 1,
            host: "localhost:6379".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "pending": 3,
                "processed": 10,
                "failed": 1,
                "queues": 2,
                "workers": 1,
                "host": "localhost:6379"
            })
        );
    }
}
