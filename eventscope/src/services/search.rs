use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::db::EventStore;
use crate::error::{EventscopeError, Result};
use crate::models::{EventRecord, SearchOutcome, SearchQuery};
use crate::search::{sum_sold_counts, EventIdResolver};

/// Resolve a query to event ids, then hydrate them from the store.
#[derive(Clone)]
pub struct SearchService {
    resolver: Arc<dyn EventIdResolver>,
    store: Arc<dyn EventStore>,
    restore_rank_order: bool,
}

impl SearchService {
    pub fn new(
        resolver: Arc<dyn EventIdResolver>,
        store: Arc<dyn EventStore>,
        restore_rank_order: bool,
    ) -> Self {
        Self {
            resolver,
            store,
            restore_rank_order,
        }
    }

    /// Run one page of a keyword or similarity search.
    ///
    /// With no query the outcome only echoes `page` and nothing is resolved.
    pub async fn search(&self, query: Option<SearchQuery>, page: i64) -> Result<SearchOutcome> {
        let Some(query) = query else {
            return Ok(SearchOutcome::empty(None, page));
        };

        let start = Instant::now();
        let ids = match &query {
            SearchQuery::Keyword(keyword) => self.resolver.resolve_by_keyword(keyword, page).await?,
            SearchQuery::Similar { event_id, params } => {
                self.resolver
                    .resolve_by_similarity(event_id, page, *params)
                    .await?
            }
        };

        let (events, total) = self.hydrate(&ids).await?;

        tracing::info!(
            ?query,
            page,
            resolved = ids.len(),
            hydrated = events.len(),
            total,
            latency_ms = start.elapsed().as_millis() as u64,
            "Search completed"
        );

        let mut outcome = SearchOutcome::empty(Some(&query), page);
        outcome.events = events;
        outcome.total = total;
        Ok(outcome)
    }

    /// Fetch the events for `ids` and sum their sold counts.
    ///
    /// An empty id list returns immediately without touching the store.
    pub async fn hydrate(&self, ids: &[String]) -> Result<(Vec<EventRecord>, i64)> {
        if ids.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let mut events = self
            .store
            .get_events_by_ids(ids)
            .await
            .map_err(|e| match e {
                EventscopeError::Hydration(_) => e,
                other => EventscopeError::Hydration(other.to_string()),
            })?;

        if self.restore_rank_order {
            restore_order(&mut events, ids);
        }

        let total = sum_sold_counts(&events);
        Ok((events, total))
    }
}

/// Sort `events` into the order their ids appear in `ids`. Events whose id
/// is not in `ids` go last, keeping their relative order.
fn restore_order(events: &mut [EventRecord], ids: &[String]) {
    let rank: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .rev()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    events.sort_by_key(|event| rank.get(event.event_id.as_str()).copied().unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventText, SimilarityParams};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubResolver {
        ids: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventIdResolver for StubResolver {
        async fn resolve_by_keyword(&self, keyword: &str, page: i64) -> Result<Vec<String>> {
            self.calls.lock().unwrap().push(format!("keyword:{keyword}:{page}"));
            Ok(self.ids.clone())
        }

        async fn resolve_by_similarity(
            &self,
            event_id: &str,
            page: i64,
            params: SimilarityParams,
        ) -> Result<Vec<String>> {
            self.calls.lock().unwrap().push(format!(
                "similar:{event_id}:{page}:{}:{}:{}",
                params.min_term_freq, params.max_doc_freq, params.max_query_terms
            ));
            Ok(self.ids.clone())
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl EventIdResolver for FailingResolver {
        async fn resolve_by_keyword(&self, _: &str, _: i64) -> Result<Vec<String>> {
            Err(EventscopeError::Resolution("connection refused".into()))
        }

        async fn resolve_by_similarity(
            &self,
            _: &str,
            _: i64,
            _: SimilarityParams,
        ) -> Result<Vec<String>> {
            Err(EventscopeError::Resolution("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct StubStore {
        events: Vec<EventRecord>,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl EventStore for StubStore {
        async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<EventRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EventscopeError::Internal("no such table: events".into()));
            }
            Ok(self
                .events
                .iter()
                .filter(|e| ids.contains(&e.event_id))
                .cloned()
                .collect())
        }

        async fn get_event_text(&self, _: &str) -> Result<Option<EventText>> {
            Ok(None)
        }
    }

    fn event(id: &str, sold: &str) -> EventRecord {
        EventRecord {
            event_id: id.to_string(),
            name: format!("Event {id}"),
            seats_sold: sold.to_string(),
            ..EventRecord::default()
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keyword_search_hydrates_and_totals() {
        let resolver = Arc::new(StubResolver {
            ids: ids(&["1", "2"]),
            ..StubResolver::default()
        });
        let store = Arc::new(StubStore {
            events: vec![event("1", "30"), event("2", "12")],
            ..StubStore::default()
        });
        let service = SearchService::new(resolver.clone(), store, false);

        let outcome = service
            .search(Some(SearchQuery::Keyword("jazz".into())), 1)
            .await
            .unwrap();

        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.total, 42);
        assert_eq!(outcome.page, 1);
        assert_eq!(outcome.keyword.as_deref(), Some("jazz"));
        assert_eq!(*resolver.calls.lock().unwrap(), vec!["keyword:jazz:1"]);
    }

    #[tokio::test]
    async fn test_similar_search_passes_params_through() {
        let resolver = Arc::new(StubResolver::default());
        let service = SearchService::new(resolver.clone(), Arc::new(StubStore::default()), false);

        let outcome = service
            .search(
                Some(SearchQuery::Similar {
                    event_id: "7".into(),
                    params: SimilarityParams::INTERACTIVE_DEFAULTS,
                }),
                3,
            )
            .await
            .unwrap();

        assert!(outcome.events.is_empty());
        assert_eq!(outcome.event_id.as_deref(), Some("7"));
        assert_eq!(outcome.similarity, Some(SimilarityParams::INTERACTIVE_DEFAULTS));
        assert_eq!(*resolver.calls.lock().unwrap(), vec!["similar:7:3:1:10000:25"]);
    }

    #[tokio::test]
    async fn test_no_query_skips_resolver() {
        let resolver = Arc::new(StubResolver::default());
        let service = SearchService::new(resolver.clone(), Arc::new(StubStore::default()), false);

        let outcome = service.search(None, 4).await.unwrap();

        assert_eq!(outcome, SearchOutcome::empty(None, 4));
        assert!(resolver.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_empty_does_not_touch_store() {
        let store = Arc::new(StubStore {
            fail: true,
            ..StubStore::default()
        });
        let service = SearchService::new(Arc::new(StubResolver::default()), store.clone(), false);

        let (events, total) = service.hydrate(&[]).await.unwrap();

        assert!(events.is_empty());
        assert_eq!(total, 0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_hydrate_tolerates_bad_sold_counts() {
        let store = Arc::new(StubStore {
            events: vec![event("a", "10"), event("b", ""), event("c", "abc"), event("d", "5")],
            ..StubStore::default()
        });
        let service = SearchService::new(Arc::new(StubResolver::default()), store, false);

        let (events, total) = service.hydrate(&ids(&["a", "b", "c", "d"])).await.unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(total, 15);
    }

    #[tokio::test]
    async fn test_store_error_becomes_hydration_failure() {
        let store = Arc::new(StubStore {
            fail: true,
            ..StubStore::default()
        });
        let service = SearchService::new(Arc::new(StubResolver::default()), store, false);

        let err = service.hydrate(&ids(&["1"])).await.unwrap_err();
        assert!(matches!(err, EventscopeError::Hydration(_)));
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let service = SearchService::new(
            Arc::new(FailingResolver),
            Arc::new(StubStore::default()),
            false,
        );

        let err = service
            .search(Some(SearchQuery::Keyword("jazz".into())), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, EventscopeError::Resolution(_)));
    }

    #[tokio::test]
    async fn test_rank_order_kept_as_store_order_by_default() {
        let store = Arc::new(StubStore {
            events: vec![event("1", "1"), event("2", "1"), event("3", "1")],
            ..StubStore::default()
        });
        let service = SearchService::new(Arc::new(StubResolver::default()), store, false);

        let (events, _) = service.hydrate(&ids(&["3", "1", "2"])).await.unwrap();
        let order: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_rank_order_restored_when_enabled() {
        let store = Arc::new(StubStore {
            events: vec![event("1", "1"), event("2", "1"), event("3", "1")],
            ..StubStore::default()
        });
        let service = SearchService::new(Arc::new(StubResolver::default()), store, true);

        let (events, _) = service.hydrate(&ids(&["3", "1", "2"])).await.unwrap();
        let order: Vec<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(order, vec!["3", "1", "2"]);
    }
}
