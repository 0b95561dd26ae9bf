use axum::extract::FromRequestParts;
use axum_extra::extract::QueryRejection;
use serde::Deserialize;

use crate::error::EventscopeError;
use crate::models::SimilarityParams;

/// Query-string extractor that accepts repeated keys and rejects with an
/// [`EventscopeError`] so failures share the response envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(EventscopeError))]
pub struct AppQuery<T>(pub T);

impl From<QueryRejection> for EventscopeError {
    fn from(rejection: QueryRejection) -> Self {
        EventscopeError::Validation(format!("Invalid query string: {rejection}"))
    }
}

/// Query parameters of the two search endpoints. Every key may repeat;
/// only the first value is used.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Vec<String>,
    #[serde(default)]
    pub p: Vec<String>,
    #[serde(default)]
    pub mtf: Vec<String>,
    #[serde(default)]
    pub xdf: Vec<String>,
    #[serde(default)]
    pub xqt: Vec<String>,
    #[serde(default)]
    pub csv: Vec<String>,
}

impl SearchParams {
    /// The search term or reference event id. Empty counts as absent.
    pub fn query(&self) -> Option<&str> {
        first(&self.q).filter(|q| !q.is_empty())
    }

    /// Requested page, 1 when absent or not an integer.
    pub fn page(&self) -> i64 {
        first(&self.p)
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }

    /// `csv` present in any form, including a bare `?csv`.
    pub fn wants_csv(&self) -> bool {
        !self.csv.is_empty()
    }

    /// Similarity knobs, each falling back to its entry in `defaults`.
    pub fn similarity(&self, defaults: SimilarityParams) -> SimilarityParams {
        SimilarityParams {
            min_term_freq: int_or(&self.mtf, defaults.min_term_freq),
            max_doc_freq: int_or(&self.xdf, defaults.max_doc_freq),
            max_query_terms: int_or(&self.xqt, defaults.max_query_terms),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordsParams {
    #[serde(default)]
    pub eid: Vec<String>,
}

impl KeywordsParams {
    pub fn event_id(&self) -> Option<&str> {
        first(&self.eid).filter(|eid| !eid.is_empty())
    }
}

fn first(values: &[String]) -> Option<&str> {
    values.first().map(String::as_str)
}

fn int_or(values: &[String], default: i64) -> i64 {
    first(values)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}
