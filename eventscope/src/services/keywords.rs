use std::sync::Arc;

use crate::db::EventStore;
use crate::error::Result;
use crate::keyphrase::{strip_markup, PhraseExtractor};
use crate::models::{EventText, WeightedTerm};

/// Extracts weighted key phrases from an event's descriptive text.
#[derive(Clone)]
pub struct KeywordService {
    store: Arc<dyn EventStore>,
    extractor: Arc<dyn PhraseExtractor>,
}

impl KeywordService {
    pub fn new(store: Arc<dyn EventStore>, extractor: Arc<dyn PhraseExtractor>) -> Self {
        Self { store, extractor }
    }

    /// Key phrases for one event. An unknown event yields no terms.
    pub async fn extract_keywords(&self, event_id: &str) -> Result<Vec<WeightedTerm>> {
        let Some(text) = self.store.get_event_text(event_id).await? else {
            tracing::info!(event_id, "No event row for keyword extraction");
            return Ok(Vec::new());
        };

        let blob = text_blob(&text);
        let terms = self.extractor.extract(&blob).await?;
        tracing::debug!(event_id, terms = terms.len(), "Keywords extracted");
        Ok(terms)
    }
}

/// Name, subtitle, stripped description and venue, space separated.
fn text_blob(text: &EventText) -> String {
    format!(
        "{} {} {} {}",
        text.name,
        text.subtitle,
        strip_markup(&text.description),
        text.venue_name
    )
}
