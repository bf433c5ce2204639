use async_trait::async_trait;

use crate::domain::BlogPost;
use crate::error::StoreError;

/// Remote blog collection - list, fetch one, create.
///
/// Every call is attempted exactly once; failures reach the caller unchanged.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts currently known to the store, in store order.
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError>;

    /// A single post by id. `id` must be non-empty.
    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError>;

    /// Write a fully populated post and return the store's echo of it.
    async fn create(&self, post: &BlogPost) -> Result<BlogPost, StoreError>;
}
