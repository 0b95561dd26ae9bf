use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::KeyphraseConfig;
use crate::error::{EventscopeError, Result};
use crate::models::WeightedTerm;

/// Scores the key phrases of a piece of text.
#[async_trait]
pub trait PhraseExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<WeightedTerm>>;
}

/// Client for a form-encoded key-phrase API that answers with a flat JSON
/// object mapping each phrase to its weight.
pub struct KeyphraseApiClient {
    client: Client,
    endpoint: String,
    app_id: String,
}

impl KeyphraseApiClient {
    pub fn new(config: &KeyphraseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                EventscopeError::Extraction(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            app_id: config.app_id.clone(),
        })
    }
}

#[async_trait]
impl PhraseExtractor for KeyphraseApiClient {
    async fn extract(&self, text: &str) -> Result<Vec<WeightedTerm>> {
        let form = [
            ("appid", self.app_id.as_str()),
            ("output", "json"),
            ("sentence", text),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| EventscopeError::Extraction(format!("Key-phrase request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventscopeError::Extraction(format!(
                "Key-phrase service returned {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            EventscopeError::Extraction(format!("Failed to parse key-phrase response: {e}"))
        })?;

        let Value::Object(weights) = body else {
            return Err(EventscopeError::Extraction(
                "Key-phrase response is not a JSON object".to_string(),
            ));
        };

        let terms = parse_weights(weights)?;
        tracing::debug!(count = terms.len(), "Key phrases extracted");
        Ok(terms)
    }
}

/// Convert `{"phrase": weight, ...}` into terms ordered by weight descending,
/// ties broken by phrase.
fn parse_weights(weights: Map<String, Value>) -> Result<Vec<WeightedTerm>> {
    let mut terms = weights
        .into_iter()
        .map(|(term, weight)| match weight.as_f64() {
            Some(weight) => Ok(WeightedTerm { term, weight }),
            None => Err(EventscopeError::Extraction(format!(
                "Non-numeric weight for key phrase {term:?}: {weight}"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    terms.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.term.cmp(&b.term))
    });
    Ok(terms)
}
