use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EventRecord, EventText};

/// Read access to stored events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Fetch all events whose id is in `ids` in a single round trip.
    ///
    /// Rows come back in the store's natural order, which need not match
    /// the order of `ids`. Unknown ids are silently absent.
    async fn get_events_by_ids(&self, ids: &[String]) -> Result<Vec<EventRecord>>;

    /// Fetch the free-text columns of one event, `None` if it does not exist.
    async fn get_event_text(&self, id: &str) -> Result<Option<EventText>>;
}

/// A complete database backend: event reads plus liveness checking.
#[async_trait]
pub trait DatabaseBackend: EventStore {
    /// Run a trivial query to confirm the store is reachable.
    async fn ping(&self) -> Result<()>;
}
