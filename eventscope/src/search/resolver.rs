use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::{SearchConfig, KEYWORD_TOKEN, OFFSET_TOKEN};
use crate::error::{EventscopeError, Result};
use crate::models::SimilarityParams;

use super::decode::{extract_event_ids, ResponseKeys};
use super::pagination::offset_for;
use super::query::{IndexLocation, SimilarityRequest};

/// Turns a query into the ordered ids of matching events for one page.
#[async_trait]
pub trait EventIdResolver: Send + Sync {
    async fn resolve_by_keyword(&self, keyword: &str, page: i64) -> Result<Vec<String>>;

    async fn resolve_by_similarity(
        &self,
        event_id: &str,
        page: i64,
        params: SimilarityParams,
    ) -> Result<Vec<String>>;
}

/// [`EventIdResolver`] backed by an Elasticsearch-style HTTP search backend.
#[derive(Clone)]
pub struct SearchBackendClient {
    client: Client,
    config: SearchConfig,
}

impl SearchBackendClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                EventscopeError::Resolution(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fill the keyword URL template. The keyword is query-escaped.
    pub fn keyword_url(&self, keyword: &str, offset: u64) -> String {
        let escaped: String = url::form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        self.config
            .keyword_url
            .replace(OFFSET_TOKEN, &offset.to_string())
            .replace(KEYWORD_TOKEN, &escaped)
    }

    fn response_keys(&self) -> ResponseKeys<'_> {
        ResponseKeys {
            hits_key: &self.config.hits_key,
            rows_key: &self.config.rows_key,
            id_key: &self.config.id_key,
        }
    }

    async fn read_ids(&self, response: reqwest::Response) -> Result<Vec<String>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventscopeError::Resolution(format!(
                "Search backend returned {status}: {body}"
            )));
        }

        let root: Value = response.json().await.map_err(|e| {
            EventscopeError::Resolution(format!("Failed to parse search response: {e}"))
        })?;

        match extract_event_ids(&root, self.response_keys()) {
            Some(ids) => Ok(ids),
            None => {
                tracing::warn!(
                    hits_key = %self.config.hits_key,
                    rows_key = %self.config.rows_key,
                    "Search response did not have the expected shape, treating as no results"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl EventIdResolver for SearchBackendClient {
    async fn resolve_by_keyword(&self, keyword: &str, page: i64) -> Result<Vec<String>> {
        let offset = offset_for(page, self.config.page_size);
        let url = self.keyword_url(keyword, offset);
        tracing::debug!(%url, page, offset, "Resolving events by keyword");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EventscopeError::Resolution(format!("Search request failed: {e}")))?;

        let ids = self.read_ids(response).await?;
        tracing::debug!(count = ids.len(), "Keyword search resolved");
        Ok(ids)
    }

    async fn resolve_by_similarity(
        &self,
        event_id: &str,
        page: i64,
        params: SimilarityParams,
    ) -> Result<Vec<String>> {
        let offset = offset_for(page, self.config.page_size);
        let location = IndexLocation {
            index: &self.config.similar_index,
            doc_type: &self.config.similar_doc_type,
        };
        let request =
            SimilarityRequest::new(location, event_id, params, offset, self.config.result_window);
        tracing::debug!(event_id, page, offset, ?params, "Resolving similar events");

        let response = self
            .client
            .post(&self.config.similar_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                EventscopeError::Resolution(format!("Similarity request failed: {e}"))
            })?;

        let ids = self.read_ids(response).await?;
        tracing::debug!(count = ids.len(), "Similarity search resolved");
        Ok(ids)
    }
}
