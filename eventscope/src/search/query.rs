use serde::Serialize;

use crate::models::SimilarityParams;

/// Fields of the indexed event compared by more-like-this queries.
pub const SIMILARITY_FIELDS: [&str; 2] = ["name", "description"];

#[derive(Debug, Serialize)]
pub struct SimilarityRequest<'a> {
    pub from: u64,
    pub size: u32,
    pub query: SimilarityQuery<'a>,
}

#[derive(Debug, Serialize)]
pub struct SimilarityQuery<'a> {
    pub more_like_this: MoreLikeThis<'a>,
}

#[derive(Debug, Serialize)]
pub struct MoreLikeThis<'a> {
    pub fields: [&'static str; 2],
    pub docs: Vec<DocRef<'a>>,
    pub min_term_freq: i64,
    pub max_doc_freq: i64,
    pub max_query_terms: i64,
}

#[derive(Debug, Serialize)]
pub struct DocRef<'a> {
    #[serde(rename = "_index")]
    pub index: &'a str,
    #[serde(rename = "_type")]
    pub doc_type: &'a str,
    #[serde(rename = "_id")]
    pub id: &'a str,
}

/// Where the reference document lives in the search index.
#[derive(Debug, Clone, Copy)]
pub struct IndexLocation<'a> {
    pub index: &'a str,
    pub doc_type: &'a str,
}

impl<'a> SimilarityRequest<'a> {
    pub fn new(
        location: IndexLocation<'a>,
        event_id: &'a str,
        params: SimilarityParams,
        from: u64,
        size: u32,
    ) -> Self {
        Self {
            from,
            size,
            query: SimilarityQuery {
                more_like_this: MoreLikeThis {
                    fields: SIMILARITY_FIELDS,
                    docs: vec![DocRef {
                        index: location.index,
                        doc_type: location.doc_type,
                        id: event_id,
                    }],
                    min_term_freq: params.min_term_freq,
                    max_doc_freq: params.max_doc_freq,
                    max_query_terms: params.max_query_terms,
                },
            },
        }
    }
}
