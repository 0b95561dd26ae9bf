mod decode;
pub mod pagination;
mod query;
mod resolver;

pub use decode::{extract_event_ids, ResponseKeys};
pub use pagination::{offset_for, parse_sold_count, sum_sold_counts};
pub use query::{IndexLocation, SimilarityRequest, SIMILARITY_FIELDS};
pub use resolver::{EventIdResolver, SearchBackendClient};
