use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Shared handle to the event store.
///
/// Cloning is cheap. Each store call takes its own [`Connection`] through
/// [`Database::connect`] and drops it when the call returns.
pub struct Database {
    pub(crate) db: Arc<libsql::Database>,
    pub(crate) is_remote: bool,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let is_remote = config.url.starts_with("libsql://") || config.url.starts_with("https://");

        let db = if is_remote {
            Builder::new_remote(
                config.url.clone(),
                config.auth_token.clone().unwrap_or_default(),
            )
            .build()
            .await?
        } else if config.url == ":memory:" {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let database = Self {
            db: Arc::new(db),
            is_remote,
        };
        database.configure_database().await?;

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure_database(&self) -> Result<()> {
        if self.is_remote {
            return Ok(());
        }

        let conn = self.connect()?;
        let busy_timeout_ms = std::env::var("DATABASE_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

        let busy_timeout_sql = format!("PRAGMA busy_timeout = {busy_timeout_ms}");
        if let Err(error) = conn.execute_batch(&busy_timeout_sql).await {
            tracing::warn!(
                busy_timeout_ms,
                error = %error,
                "Failed to set SQLite busy_timeout"
            );
        }

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            is_remote: self.is_remote,
        }
    }
}
