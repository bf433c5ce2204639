//! In-memory blog store.
//!
//! Behaves like the REST collection (insertion order, echo on create) and
//! counts every call it receives. Data is lost when the process exits.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blogdesk_core::domain::BlogPost;
use blogdesk_core::ports::BlogStore;
use blogdesk_core::StoreError;

/// Per-operation call counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub get_by_id: usize,
    pub create: usize,
}

impl StoreCalls {
    pub fn total(&self) -> usize {
        self.list + self.get_by_id + self.create
    }
}

#[derive(Default)]
struct CallCounters {
    list: AtomicUsize,
    get_by_id: AtomicUsize,
    create: AtomicUsize,
}

/// Blog store kept in a `Vec` behind an async RwLock.
#[derive(Default)]
pub struct InMemoryBlogStore {
    posts: RwLock<Vec<BlogPost>>,
    counters: CallCounters,
    get_requests: RwLock<Vec<String>>,
    reject_creates: AtomicBool,
    fail_lists: AtomicBool,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: RwLock::new(posts),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            list: self.counters.list.load(Ordering::Relaxed),
            get_by_id: self.counters.get_by_id.load(Ordering::Relaxed),
            create: self.counters.create.load(Ordering::Relaxed),
        }
    }

    /// Ids passed to `get_by_id`, in call order.
    pub async fn requested_ids(&self) -> Vec<String> {
        self.get_requests.read().await.clone()
    }

    /// Make subsequent `create` calls fail as a rejected write.
    pub fn reject_creates(&self, reject: bool) {
        self.reject_creates.store(reject, Ordering::Relaxed);
    }

    /// Make subsequent `list` calls fail as if the service were unreachable.
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::Relaxed);
    }

    pub async fn posts(&self) -> Vec<BlogPost> {
        self.posts.read().await.clone()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.counters.list.fetch_add(1, Ordering::Relaxed);

        if self.fail_lists.load(Ordering::Relaxed) {
            return Err(StoreError::Network("store is unreachable".to_string()));
        }

        Ok(self.posts.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError> {
        if id.is_empty() {
            return Err(StoreError::BadInput("blog id must not be empty".to_string()));
        }

        self.counters.get_by_id.fetch_add(1, Ordering::Relaxed);
        self.get_requests.write().await.push(id.to_string());

        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn create(&self, post: &BlogPost) -> Result<BlogPost, StoreError> {
        self.counters.create.fetch_add(1, Ordering::Relaxed);

        if self.reject_creates.load(Ordering::Relaxed) {
            return Err(StoreError::Creation("store rejected the write".to_string()));
        }

        self.posts.write().await.push(post.clone());
        Ok(post.clone())
    }
}
