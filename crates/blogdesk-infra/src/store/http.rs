//! REST client for the remote blog collection.
//!
//! - `GET  {base}/blogs`      - list
//! - `GET  {base}/blogs/{id}` - single post
//! - `POST {base}/blogs`      - create, echoes the stored record

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use blogdesk_core::domain::BlogPost;
use blogdesk_core::ports::BlogStore;
use blogdesk_core::StoreError;

/// Errors raised while building an [`HttpBlogStore`].
#[derive(Debug, thiserror::Error)]
pub enum HttpStoreError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// [`BlogStore`] backed by a REST endpoint.
///
/// No timeout, retry or backoff: each call is sent once and any failure is
/// returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpBlogStore {
    base: Url,
    client: Client,
}

impl HttpBlogStore {
    pub fn new(base_url: &str) -> Result<Self, HttpStoreError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, HttpStoreError> {
        let base = Url::parse(base_url).map_err(|e| HttpStoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(HttpStoreError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn blogs_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base is rejected in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("blogs");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl BlogStore for HttpBlogStore {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let url = self.blogs_url(None);
        tracing::debug!(%url, "Fetching blog list");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Blog list request failed");
            return Err(StoreError::Network(format!("list returned {}", status)));
        }

        decode(response).await
    }

    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError> {
        if id.is_empty() {
            return Err(StoreError::BadInput("blog id must not be empty".to_string()));
        }
        // The URL parser drops these segments instead of encoding them.
        if id == "." || id == ".." {
            return Err(StoreError::BadInput(format!("invalid blog id {:?}", id)));
        }

        let url = self.blogs_url(Some(id));
        tracing::debug!(%url, id = %id, "Fetching blog");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            tracing::warn!(%status, id = %id, "Blog request failed");
            return Err(StoreError::Network(format!("get {} returned {}", id, status)));
        }

        decode(response).await
    }

    async fn create(&self, post: &BlogPost) -> Result<BlogPost, StoreError> {
        let url = self.blogs_url(None);
        tracing::debug!(%url, id = %post.id, "Creating blog");

        let response = self
            .client
            .post(url)
            .json(post)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, id = %post.id, "Blog creation rejected");
            return Err(StoreError::Creation(format!("server responded with {}", status)));
        }

        decode(response).await
    }
}
