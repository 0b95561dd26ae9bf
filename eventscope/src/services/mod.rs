mod keywords;
mod search;

pub use keywords::KeywordService;
pub use search::SearchService;
