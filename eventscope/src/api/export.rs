use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::{EventscopeError, Result};
use crate::models::EventRecord;

/// Render `events` as a headerless CSV attachment named
/// `<escaped query>_<page>.csv`.
pub fn csv_attachment(query: &str, page: i64, events: &[EventRecord]) -> Result<Response> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for event in events {
        writer.write_record(event.export_row())?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| EventscopeError::Internal(format!("Failed to flush CSV export: {e}")))?;

    let escaped: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let disposition = format!("attachment; filename={escaped}_{page}.csv");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `302 Found` pointing at `location`.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
