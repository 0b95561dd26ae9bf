use serde::{Deserialize, Serialize};

use super::EventRecord;

/// More-like-this tuning knobs, echoed back on the wire as `mtf`/`xdf`/`xqt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityParams {
    #[serde(rename = "mtf")]
    pub min_term_freq: i64,
    #[serde(rename = "xdf")]
    pub max_doc_freq: i64,
    #[serde(rename = "xqt")]
    pub max_query_terms: i64,
}

impl SimilarityParams {
    /// Defaults for the interactive similar-events view.
    pub const INTERACTIVE_DEFAULTS: Self = Self {
        min_term_freq: 1,
        max_doc_freq: 10000,
        max_query_terms: 25,
    };

    /// Defaults for the CSV export of similar events. These intentionally
    /// differ from [`Self::INTERACTIVE_DEFAULTS`].
    pub const EXPORT_DEFAULTS: Self = Self {
        min_term_freq: 1,
        max_doc_freq: 1,
        max_query_terms: 1,
    };
}

/// What was searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Keyword(String),
    Similar {
        event_id: String,
        params: SimilarityParams,
    },
}

/// One page of hydrated search results plus the echoed request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub events: Vec<EventRecord>,
    /// Sum of `seats_sold` over `events`.
    pub total: i64,
    pub page: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(flatten)]
    pub similarity: Option<SimilarityParams>,
}

impl SearchOutcome {
    /// An outcome with no events that only echoes the request. Used when no
    /// query was given or the resolver found nothing.
    pub fn empty(query: Option<&SearchQuery>, page: i64) -> Self {
        let mut outcome = Self {
            page,
            ..Self::default()
        };
        match query {
            Some(SearchQuery::Keyword(keyword)) => outcome.keyword = Some(keyword.clone()),
            Some(SearchQuery::Similar { event_id, params }) => {
                outcome.event_id = Some(event_id.clone());
                outcome.similarity = Some(*params);
            }
            None => {}
        }
        outcome
    }
}
