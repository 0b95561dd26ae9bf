//! Keyword and similar-event search handlers.
//!
//! Both paths answer with the JSON envelope, or with a CSV attachment when
//! the `csv` flag is present.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::api::export::{csv_attachment, found};
use crate::api::extractors::{AppQuery, SearchParams};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::{SearchOutcome, SearchQuery, SimilarityParams};

pub const KEYWORD_PATH: &str = "/search/keyword";
pub const SIMILAR_PATH: &str = "/search/similar";

/// `GET /search/keyword?q=&p=[&csv]`
pub async fn keyword_search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> Response {
    let page = params.page();
    let query = params.query().map(|q| SearchQuery::Keyword(q.to_string()));

    if params.wants_csv() {
        return export(&state, params.query(), query, page, KEYWORD_PATH).await;
    }

    respond(state.search.search(query, page).await)
}

/// `GET /search/similar?q=&p=&mtf=&xdf=&xqt=[&csv]`
///
/// Missing similarity knobs fall back to different defaults for the
/// interactive view and the export.
pub async fn similar_search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> Response {
    let page = params.page();
    let csv = params.wants_csv();
    let defaults = if csv {
        SimilarityParams::EXPORT_DEFAULTS
    } else {
        SimilarityParams::INTERACTIVE_DEFAULTS
    };
    let similarity = params.similarity(defaults);
    let query = params.query().map(|event_id| SearchQuery::Similar {
        event_id: event_id.to_string(),
        params: similarity,
    });

    if csv {
        return export(&state, params.query(), query, page, SIMILAR_PATH).await;
    }

    let result = state.search.search(query, page).await.map(|mut outcome| {
        outcome.similarity.get_or_insert(similarity);
        outcome
    });
    respond(result)
}

fn respond(result: crate::error::Result<SearchOutcome>) -> Response {
    match result {
        Ok(outcome) => ApiResponse::success(outcome).into_response(),
        Err(err) => ApiResponse::<SearchOutcome>::from(err).into_response(),
    }
}

async fn export(
    state: &AppState,
    raw_query: Option<&str>,
    query: Option<SearchQuery>,
    page: i64,
    interactive_path: &'static str,
) -> Response {
    let (Some(raw_query), Some(query)) = (raw_query, query) else {
        return found(interactive_path);
    };

    let result = state
        .search
        .search(Some(query), page)
        .await
        .and_then(|outcome| csv_attachment(raw_query, page, &outcome.events));

    match result {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
