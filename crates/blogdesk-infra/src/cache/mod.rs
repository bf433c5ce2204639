//! Query cache keyed by [`blogdesk_core::domain::QueryKey`].

mod query;

pub use query::{CacheEntry, QueryCache, QueryStatus};
