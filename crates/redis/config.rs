//! Redis connection configuration.

use redis::{ConnectionInfo, IntoConnectionInfo};
use resq_core::{ResqError, Result};

/// Environment variable holding the Redis endpoint (`host:port` or a URL).
pub const ENV_URL: &str = "REDISURL";

/// Environment variable holding the Redis password.
pub const ENV_PASSWORD: &str = "REDIS_PW";

/// Environment variable selecting the logical database.
pub const ENV_DATABASE: &str = "REDIS_DB";

/// Where and how to connect to Redis.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Endpoint as given, either `host:port` or a `redis://` URL.
    pub host: String,
    /// Password sent with AUTH, if any.
    pub password: Option<String>,
    /// Logical database selected after connecting.
    pub database: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:6379".to_string(),
            password: None,
            database: 0,
        }
    }
}

impl RedisConfig {
    /// Create a config for `host` with no password on database 0.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> RedisConfigBuilder {
        RedisConfigBuilder::new()
    }

    /// Read `REDISURL`, `REDIS_PW` and `REDIS_DB` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// `REDISURL` is required. An empty `REDIS_PW` means no password.
    /// `REDIS_DB` defaults to 0 and must be an integer when set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_URL)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ResqError::Config(format!("{} is not set", ENV_URL)))?;

        let password = lookup(ENV_PASSWORD).filter(|v| !v.is_empty());

        let database = match lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| {
                ResqError::Config(format!("{} must be an integer, got '{}'", ENV_DATABASE, raw))
            })?,
            None => 0,
        };

        Ok(Self {
            host,
            password,
            database,
        })
    }

    /// Connection parameters for the redis client.
    pub fn connection_info(&self) -> Result<ConnectionInfo> {
        let url = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("redis://{}", self.host)
        };

        let mut info = url
            .as_str()
            .into_connection_info()
            .map_err(|e| ResqError::Config(format!("invalid Redis endpoint '{}': {}", self.host, e)))?;

        if self.password.is_some() {
            info.redis.password = self.password.clone();
        }
        if self.database != 0 {
            info.redis.db = self.database;
        }
        Ok(info)
    }
}

/// Builder for RedisConfig.
#[derive(Debug, Default)]
pub struct RedisConfigBuilder {
    config: RedisConfig,
}

impl RedisConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Set the logical database.
    pub fn database(mut self, database: i64) -> Self {
        self.config.database = database;
        self
    }

    /// Build the RedisConfig.
    pub fn build(self) -> RedisConfig {
        self.config
    }
}
