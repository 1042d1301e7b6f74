//! Producer/worker walkthrough.
//!
//! Uses Redis when `REDISURL` is set (with optional `REDIS_PW` and
//! `REDIS_DB`), otherwise an in-memory store.
//!
//! Run with: `cargo run -p demo-basic`

use resq_core::{
    ClientConfig, MemoryStore, Popped, ResQ, RoutedJob, SharedStore, FAILED, PROCESSED,
};
use resq_redis::{RedisConfig, RedisStore};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Email notification job payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmailJob {
    to: String,
    subject: String,
}

async fn client() -> resq_core::Result<ResQ> {
    if std::env::var(resq_redis::ENV_URL).is_ok() {
        let config = RedisConfig::from_env()?;
        let store = RedisStore::connect(&config).await?;
        Ok(ResQ::with_store(
            SharedStore::new(store),
            ClientConfig::new(config.host),
        ))
    } else {
        Ok(ResQ::new(MemoryStore::new(), "in-memory"))
    }
}

#[tokio::main]
async fn main() -> resq_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,resq_core=debug")),
        )
        .init();

    let resq = client().await?;

    let emails = vec![
        EmailJob {
            to: "alice@example.com".to_string(),
            subject: "Welcome!".to_string(),
        },
        EmailJob {
            to: "bob@example.com".to_string(),
            subject: "Your order shipped".to_string(),
        },
    ];

    for email in emails {
        resq.enqueue(&RoutedJob::new("emails", email)).await?;
    }
    resq.push("reports", &serde_json::json!({"day": "monday"}))
        .await?;

    tracing::info!(info = ?resq.info().await, "Enqueued");

    for queue in resq.queues().await {
        loop {
            match resq.pop_entry(&queue).await? {
                Popped::Empty => break,
                Popped::Corrupt(raw) => {
                    tracing::warn!(queue = %queue, payload = %raw, "Skipping corrupt job");
                    resq.stat(FAILED).incr().await;
                }
                Popped::Job(job) if queue == "emails" => match job.decode_as::<EmailJob>() {
                    Ok(email) => {
                        tracing::info!(to = %email.to, subject = %email.subject, "Sending email");
                        resq.stat(PROCESSED).incr().await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Malformed email job");
                        resq.stat(FAILED).incr().await;
                    }
                },
                Popped::Job(job) => {
                    tracing::info!(queue = ?job.queue(), fields = job.len(), "Processed job");
                    resq.stat(PROCESSED).incr().await;
                }
            }
        }
    }

    let info = resq.info().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&info).unwrap_or_else(|_| format!("{:?}", info))
    );

    Ok(())
}
