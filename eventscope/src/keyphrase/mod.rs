//! Key-phrase extraction: markup stripping and the external scoring API.

mod api;
mod sanitize;

pub use api::{KeyphraseApiClient, PhraseExtractor};
pub use sanitize::strip_markup;
