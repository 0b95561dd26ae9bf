use axum::extract::State;

use crate::api::extractors::{AppQuery, KeywordsParams};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::models::KeywordsOutcome;

/// `GET /keywords?eid=`
pub async fn extract_keywords(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<KeywordsParams>,
) -> ApiResponse<KeywordsOutcome> {
    let Some(event_id) = params.event_id() else {
        return ApiResponse::success(KeywordsOutcome::default());
    };

    match state.keywords.extract_keywords(event_id).await {
        Ok(terms) => ApiResponse::success(KeywordsOutcome {
            event_id: Some(event_id.to_string()),
            terms,
        }),
        Err(err) => err.into(),
    }
}
