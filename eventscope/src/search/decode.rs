//! Lenient extraction of event ids from a search backend response.
//!
//! Responses are navigated as `root[hits_key][rows_key][*][id_key]`. The
//! backend's response shape is not under our control, so a structural
//! mismatch anywhere above the rows collapses to `None` (no results) instead
//! of an error. Individual rows without a usable id are skipped.

use serde_json::Value;

/// Key names used to locate ids in a response document.
#[derive(Debug, Clone, Copy)]
pub struct ResponseKeys<'a> {
    pub hits_key: &'a str,
    pub rows_key: &'a str,
    pub id_key: &'a str,
}

/// Returns `None` when the response does not have the expected shape.
pub fn extract_event_ids(root: &Value, keys: ResponseKeys<'_>) -> Option<Vec<String>> {
    let rows = root
        .as_object()?
        .get(keys.hits_key)?
        .as_object()?
        .get(keys.rows_key)?
        .as_array()?;

    Some(
        rows.iter()
            .filter_map(|row| row.as_object()?.get(keys.id_key))
            .filter_map(id_to_string)
            .collect(),
    )
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
