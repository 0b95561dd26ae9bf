mod export;
mod extractors;
pub mod handlers;
pub mod response;
mod routes;
mod state;

pub use extractors::{KeywordsParams, SearchParams};
pub use response::{ApiError, ApiResponse, ErrorCode};
pub use routes::create_router;
pub use state::AppState;
