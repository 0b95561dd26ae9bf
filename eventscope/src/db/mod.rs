pub mod backends;
mod connection;
pub mod repository;
pub mod traits;

pub use backends::libsql::LibSqlBackend;
pub use connection::Database;
pub use traits::*;
