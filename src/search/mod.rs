pub mod client;
pub mod query;

pub use client::SearchClient;
pub use query::{check_query, RawResultSet, MAX_QUERY_CHARS};
