//! Blog store implementations - HTTP and in-memory.

mod http;
mod memory;

pub use http::{HttpBlogStore, HttpStoreError};
pub use memory::{InMemoryBlogStore, StoreCalls};
