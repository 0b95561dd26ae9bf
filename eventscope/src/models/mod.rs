mod event;
mod keywords;
mod search;

pub use event::*;
pub use keywords::*;
pub use search::*;
