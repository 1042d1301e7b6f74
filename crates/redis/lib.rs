//! Redis store for the resq job queue.
//!
//! This crate provides the Redis implementation of [`resq_core::Store`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use resq_redis::RedisConfig;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> resq_core::Result<()> {
//!     let resq = resq_redis::connect(RedisConfig::from_env()?).await?;
//!     resq.push("emails", &json!({"to": "a@b.com"})).await?;
//!     println!("{:?}", resq.info().await);
//!     Ok(())
//! }
//! ```

mod config;

pub use config::{RedisConfig, RedisConfigBuilder, ENV_DATABASE, ENV_PASSWORD, ENV_URL};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use resq_core::{ClientConfig, ResQ, ResqError, Result, Store};

/// Redis store.
///
/// Each operation clones the connection manager, issues one command and
/// drops the clone; no connection is held across calls.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect using a Redis URL.
    pub async fn open(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| ResqError::Config(e.to_string()))?;
        Self::from_client(client).await
    }

    /// Connect using a [`RedisConfig`].
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.connection_info()?)
            .map_err(|e| ResqError::Config(e.to_string()))?;
        Self::from_client(client).await
    }

    /// Create a store with an existing connection manager.
    pub fn with_connection(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    async fn from_client(client: redis::Client) -> Result<Self> {
        let conn = ConnectionManager::new(client).await.map_err(unavailable)?;
        Ok(Self { conn })
    }
}

/// Connect to Redis and build a client that reports `config.host`.
pub async fn connect(config: RedisConfig) -> Result<ResQ<RedisStore>> {
    let store = RedisStore::connect(&config).await?;
    tracing::debug!(host = %config.host, db = config.database, "Connected to Redis");
    Ok(ResQ::with_store(store, ClientConfig::new(config.host)))
}

fn unavailable(e: redis::RedisError) -> ResqError {
    ResqError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl Store for RedisStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(key, value).await.map_err(unavailable)?;
        Ok(())
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.lpop(key, None).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        let len: usize = conn.llen(key).await.map_err(unavailable)?;
        Ok(len)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.sadd::<_, _, ()>(key, member).await.map_err(unavailable)?;
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = conn.smembers(key).await.map_err(unavailable)?;
        Ok(members)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn decr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.decr(key, 1).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(unavailable)?;
        Ok(())
    }
}

// ========== Integration Tests (require Redis) ==========
