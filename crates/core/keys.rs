//! Store key layout with namespace support.

/// Default namespace shared by every resq client.
pub const DEFAULT_NAMESPACE: &str = "resq";

/// Builds store keys under a namespace prefix.
#[derive(Debug, Clone)]
pub struct ResqKeys {
    namespace: String,
}

impl Default for ResqKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl ResqKeys {
    /// Create a new ResqKeys instance with the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key for a named job queue (LIST).
    pub fn queue(&self, name: &str) -> String {
        format!("{}:queue:{}", self.namespace, name)
    }

    /// Key for the set of queues that have ever received a push (SET).
    pub fn queues(&self) -> String {
        format!("{}:queues", self.namespace)
    }

    /// Key for the set of registered workers (SET).
    pub fn workers(&self) -> String {
        format!("{}:workers", self.namespace)
    }

    /// Key for a named stat counter (STRING holding an integer).
    pub fn stat(&self, name: &str) -> String {
        format!("{}:stat:{}", self.namespace, name)
    }
}
