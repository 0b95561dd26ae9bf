pub(crate) mod health;
pub mod keywords;
pub mod search;

pub use health::health_check;
