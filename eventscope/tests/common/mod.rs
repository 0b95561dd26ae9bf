// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use eventscope::config::{
    Config, DatabaseConfig, KeyphraseConfig, SearchConfig, ServerConfig,
};

static INIT: Once = Once::new();

pub const BATCH_QUERY: &str = "SELECT id, name, subtitle, user_id, user_name, datetime, venue_name, address, seats_sold, seats_max FROM events WHERE id IN ({placeholders})";
pub const TEXT_QUERY: &str =
    "SELECT name, venue_name, description, subtitle FROM events WHERE id = ?1";

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Search settings pointing at a mock backend rooted at `base`.
pub fn search_config(base: &str) -> SearchConfig {
    SearchConfig {
        keyword_url: format!("{base}/event/_search?from={{offset}}&size=20&q={{keyword}}"),
        similar_url: format!("{base}/event2/_search"),
        page_size: 20,
        hits_key: "hits".to_string(),
        rows_key: "hits".to_string(),
        id_key: "_id".to_string(),
        similar_index: "event2".to_string(),
        similar_doc_type: "default".to_string(),
        result_window: 100,
        timeout_secs: 5,
        restore_rank_order: false,
    }
}

pub fn keyphrase_config(base: &str) -> KeyphraseConfig {
    KeyphraseConfig {
        endpoint: format!("{base}/KeyphraseService/V1/extract"),
        app_id: "test-app".to_string(),
        timeout_secs: 5,
    }
}

pub fn database_config(dir: &tempfile::TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("file:{}", dir.path().join("events.db").display()),
        auth_token: None,
        batch_query: BATCH_QUERY.to_string(),
        text_fields_query: TEXT_QUERY.to_string(),
    }
}

pub fn test_config(dir: &tempfile::TempDir, search_base: &str, keyphrase_base: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: database_config(dir),
        search: search_config(search_base),
        keyphrase: keyphrase_config(keyphrase_base),
    }
}

/// Create the events table and load a few rows.
pub async fn seed_events(db: &eventscope::db::Database) {
    db.connect()
        .expect("connect")
        .execute_batch(
            r#"
            CREATE TABLE events (
                id TEXT PRIMARY KEY,
                name TEXT,
                subtitle TEXT,
                user_id TEXT,
                user_name TEXT,
                datetime TEXT,
                venue_name TEXT,
                address TEXT,
                seats_sold TEXT,
                seats_max TEXT,
                description TEXT
            );
            INSERT INTO events VALUES
                ('1', 'Jazz Night', 'Live', 'u1', 'alice', '2024-05-01 19:00', 'Blue Hall', '1 Main St', '30', '100', '<p>Smooth <b>jazz</b></p><script>track()</script>'),
                ('2', 'Blues Jam', NULL, 'u2', 'bob', '2024-05-02 20:00', 'Red Room', '2 Side St', '12', '50', NULL),
                ('3', 'Rock Fest', 'Loud', 'u3', 'carol', '2024-06-01 18:00', 'Park', '3 Park Rd', 'sold out', '500', 'Outdoor');
            "#,
        )
        .await
        .expect("seed events");
}

/// A search backend response body carrying `ids` in the default layout.
pub fn hits_body(ids: &[&str]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "_id": id, "_score": 1.0 }))
        .collect();
    serde_json::json!({ "took": 3, "hits": { "total": rows.len(), "hits": rows } })
}
