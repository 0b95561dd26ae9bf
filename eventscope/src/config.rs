use serde::Deserialize;
use std::path::Path;

use crate::error::{EventscopeError, Result};

/// Prefix for environment overrides, e.g. `EVENTSCOPE__SEARCH__PAGE_SIZE=20`.
pub const ENV_PREFIX: &str = "EVENTSCOPE";

/// Token replaced with `?1, ?2, ...` in [`DatabaseConfig::batch_query`].
pub const PLACEHOLDERS_TOKEN: &str = "{placeholders}";

/// Tokens substituted into [`SearchConfig::keyword_url`].
pub const OFFSET_TOKEN: &str = "{offset}";
pub const KEYWORD_TOKEN: &str = "{keyword}";

const DEFAULT_KEYPHRASE_ENDPOINT: &str = "http://jlp.yahooapis.jp/KeyphraseService/V1/extract";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub keyphrase: KeyphraseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Batch hydration query. Must contain [`PLACEHOLDERS_TOKEN`] and select
    /// the ten event columns in [`crate::models::EventRecord`] order.
    pub batch_query: String,
    /// Single-row lookup selecting name, venue name, description, subtitle
    /// for the event bound to `?1`.
    pub text_fields_query: String,
}

/// Search backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// GET template with `{offset}` and `{keyword}` tokens.
    pub keyword_url: String,
    /// POST endpoint for more-like-this queries.
    pub similar_url: String,
    pub page_size: u32,
    /// Top-level key of the response holding the hits object.
    pub hits_key: String,
    /// Key inside the hits object holding the array of rows.
    pub rows_key: String,
    /// Key inside each row holding the event id.
    pub id_key: String,
    #[serde(default = "default_similar_index")]
    pub similar_index: String,
    #[serde(default = "default_similar_doc_type")]
    pub similar_doc_type: String,
    #[serde(default = "default_result_window")]
    pub result_window: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reorder hydrated events to follow the backend's ranking.
    #[serde(default)]
    pub restore_rank_order: bool,
}

/// Keyphrase extraction service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyphraseConfig {
    #[serde(default = "default_keyphrase_endpoint")]
    pub endpoint: String,
    pub app_id: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_similar_index() -> String {
    "event2".to_string()
}

fn default_similar_doc_type() -> String {
    "default".to_string()
}

fn default_result_window() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_keyphrase_endpoint() -> String {
    DEFAULT_KEYPHRASE_ENDPOINT.to_string()
}

impl Config {
    /// Load the configuration file at `path`, layer `EVENTSCOPE__*`
    /// environment overrides on top, and validate the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EventscopeError::ConfigurationMissing(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| EventscopeError::ConfigurationMissing(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that would make a pipeline fail on first use.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("database.url", &self.database.url),
            ("database.batch_query", &self.database.batch_query),
            ("database.text_fields_query", &self.database.text_fields_query),
            ("search.keyword_url", &self.search.keyword_url),
            ("search.similar_url", &self.search.similar_url),
            ("search.hits_key", &self.search.hits_key),
            ("search.rows_key", &self.search.rows_key),
            ("search.id_key", &self.search.id_key),
            ("keyphrase.endpoint", &self.keyphrase.endpoint),
            ("keyphrase.app_id", &self.keyphrase.app_id),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EventscopeError::ConfigurationMissing(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if self.search.page_size == 0 {
            return Err(EventscopeError::ConfigurationMissing(
                "search.page_size must be greater than zero".to_string(),
            ));
        }

        if !self.database.batch_query.contains(PLACEHOLDERS_TOKEN) {
            return Err(EventscopeError::ConfigurationMissing(format!(
                "database.batch_query must contain {PLACEHOLDERS_TOKEN}"
            )));
        }

        if !self.search.keyword_url.contains(KEYWORD_TOKEN) {
            return Err(EventscopeError::ConfigurationMissing(format!(
                "search.keyword_url must contain {KEYWORD_TOKEN}"
            )));
        }

        Ok(())
    }
}
