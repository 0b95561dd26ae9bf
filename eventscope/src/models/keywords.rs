use serde::{Deserialize, Serialize};

/// A candidate keyphrase and the weight the extraction service gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub terms: Vec<WeightedTerm>,
}
