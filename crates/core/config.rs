//! Client configuration.

use crate::keys::DEFAULT_NAMESPACE;

/// Configuration for a [`ResQ`](crate::ResQ) client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store endpoint, reported verbatim in [`Info::host`](crate::Info::host).
    pub host: String,
    /// Key prefix for every queue, registry and counter key.
    pub namespace: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config for `host` using the default namespace.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the displayed host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the key namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Build the ClientConfig.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "");
        assert_eq!(config.namespace, "resq");
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new("localhost:6379");
        assert_eq!(config.host, "localhost:6379");
        assert_eq!(config.namespace, "resq");
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .host("redis.internal:6380")
            .namespace("staging")
            .build();
        assert_eq!(config.host, "redis.internal:6380");
        assert_eq!(config.namespace, "staging");
    }
}
