//! Application state - the store and cache the controller is built on.

use std::sync::Arc;

use blogdesk_core::ports::BlogStore;
use blogdesk_infra::{HttpBlogStore, QueryCache};

use crate::config::ClientConfig;
use crate::controller::{QueryData, ViewController};
use crate::error::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub cache: Arc<QueryCache<QueryData>>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let store = HttpBlogStore::new(&config.api_url)?;
        tracing::info!(api_url = %store.base_url(), "Using blog service");

        Ok(Self {
            store: Arc::new(store),
            cache: Arc::new(QueryCache::new()),
        })
    }

    pub fn controller(&self) -> ViewController {
        ViewController::new(self.store.clone(), self.cache.clone())
    }
}
