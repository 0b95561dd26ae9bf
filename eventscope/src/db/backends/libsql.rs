use crate::config::DatabaseConfig;
use crate::db::connection::Database;
use crate::db::repository::EventRepository;
use crate::db::traits::{DatabaseBackend, EventStore};
use crate::error::Result;
use crate::models::{EventRecord, EventText};
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
    batch_query: String,
    text_fields_query: String,
}

impl LibSqlBackend {
    pub fn new(db: Database, config: &DatabaseConfig) -> Self {
        Self {
            db,
            batch_query: config.batch_query.clone(),
            text_fields_query: config.text_fields_query.clone(),
        }
    }
}

#[async_trait]
impl EventStore for LibSqlBackend {
    async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<EventRecord>> {
        let conn = self.db.connect()?;
        EventRepository::get_by_ids(&conn, &self.batch_query, ids).await
    }

    async fn get_event_text(&self, id: &str) -> Result<Option<EventText>> {
        let conn = self.db.connect()?;
        EventRepository::get_text(&conn, &self.text_fields_query, id).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn ping(&self) -> Result<()> {
        let conn = self.db.connect()?;
        let mut rows = conn.query("SELECT 1", ()).await?;
        rows.next().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend_with_events() -> (tempfile::TempDir, LibSqlBackend) {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = DatabaseConfig {
            url: format!("file:{}", dir.path().join("events.db").display()),
            auth_token: None,
            batch_query: "SELECT id, name, subtitle, user_id, user_name, datetime, venue_name, address, seats_sold, seats_max FROM events WHERE id IN ({placeholders})".to_string(),
            text_fields_query:
                "SELECT name, venue_name, description, subtitle FROM events WHERE id = ?1"
                    .to_string(),
        };
        let db = Database::new(&config).await.expect("open db");
        db.connect()
            .expect("connect")
            .execute_batch(
                r#"
                CREATE TABLE events (
                    id TEXT PRIMARY KEY, name TEXT, subtitle TEXT, user_id TEXT,
                    user_name TEXT, datetime TEXT, venue_name TEXT, address TEXT,
                    seats_sold TEXT, seats_max TEXT, description TEXT
                );
                INSERT INTO events VALUES
                    ('7', 'Jazz Night', '', 'u1', 'alice', '2024-05-01', 'Blue Hall', 'Addr', '30', '100', 'Smooth');
                "#,
            )
            .await
            .expect("seed");

        (dir, LibSqlBackend::new(db, &config))
    }

    #[tokio::test]
    async fn test_backend_reads_through_fresh_connections() {
        let (_dir, backend) = backend_with_events().await;

        backend.ping().await.unwrap();

        let events = backend.get_events_by_ids(&["7".to_string()]).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].venue_name, "Blue Hall");

        let text = backend.get_event_text("7").await.unwrap().unwrap();
        assert_eq!(text.description, "Smooth");
        assert!(backend.get_event_text("8").await.unwrap().is_none());
    }
}
