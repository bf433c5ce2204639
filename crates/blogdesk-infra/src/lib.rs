//! # Blogdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `blogdesk-core`, plus the
//! query cache the view controller reads through.
//!
//! - [`HttpBlogStore`] - REST client for `{base}/blogs`
//! - [`InMemoryBlogStore`] - in-process store with call counters
//! - [`QueryCache`] - keyed fetch cache with in-flight request coalescing

pub mod cache;
pub mod store;

pub use cache::{CacheEntry, QueryCache, QueryStatus};
pub use store::{HttpBlogStore, HttpStoreError, InMemoryBlogStore, StoreCalls};
