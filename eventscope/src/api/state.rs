use std::sync::Arc;

use crate::config::Config;
use crate::db::{DatabaseBackend, EventStore};
use crate::keyphrase::PhraseExtractor;
use crate::search::EventIdResolver;
use crate::services::{KeywordService, SearchService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub search: SearchService,
    pub keywords: KeywordService,
}

impl AppState {
    pub fn new<B>(
        config: Config,
        backend: Arc<B>,
        resolver: Arc<dyn EventIdResolver>,
        extractor: Arc<dyn PhraseExtractor>,
    ) -> Self
    where
        B: DatabaseBackend + 'static,
    {
        let config = Arc::new(config);
        let store: Arc<dyn EventStore> = backend.clone();
        let db: Arc<dyn DatabaseBackend> = backend;
        let search = SearchService::new(
            resolver,
            store.clone(),
            config.search.restore_rank_order,
        );
        let keywords = KeywordService::new(store, extractor);

        Self {
            config,
            db,
            search,
            keywords,
        }
    }
}
