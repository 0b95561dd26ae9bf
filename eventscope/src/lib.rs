//! Event discovery aggregator.
//!
//! Keyword and more-like-this searches resolve to event ids through an
//! Elasticsearch-style backend; the ids are hydrated from a libSQL store in
//! one batch query. A separate workflow scores key phrases of an event's
//! text through an external NLP service.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod keyphrase;
pub mod models;
pub mod search;
pub mod services;
