//! View/sync controller - screen state plus the reads and writes behind it.
//!
//! The screen is in one of two modes. In create mode the form is live and no
//! detail is fetched, whatever was selected before. Selecting a list item
//! switches to view mode and enables the detail fetch for that id. All reads
//! go through the shared [`QueryCache`], so repeated selections of a post
//! already loaded stay local.

use std::sync::Arc;

use chrono::Utc;

use blogdesk_core::domain::{BlogPost, QueryKey, TimestampIdGenerator};
use blogdesk_core::ports::BlogStore;
use blogdesk_core::{DomainError, StoreError};
use blogdesk_infra::{QueryCache, QueryStatus};

pub const FILL_BOTH_FIELDS: &str = "Please fill in both fields";
pub const CREATED_MESSAGE: &str = "Blog Created Successfully!";

/// Values stored in the controller's query cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    Posts(Vec<BlogPost>),
    Post(BlogPost),
}

impl QueryData {
    fn into_posts(self, key: &QueryKey) -> Result<Vec<BlogPost>, StoreError> {
        match self {
            QueryData::Posts(posts) => Ok(posts),
            QueryData::Post(_) => Err(mismatch(key)),
        }
    }

    fn into_post(self, key: &QueryKey) -> Result<BlogPost, StoreError> {
        match self {
            QueryData::Post(post) => Ok(post),
            QueryData::Posts(_) => Err(mismatch(key)),
        }
    }
}

fn mismatch(key: &QueryKey) -> StoreError {
    StoreError::Decode(format!("cache entry {} holds another resource", key))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    View,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub title: String,
    pub description: String,
}

/// What the list panel should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub loading: bool,
    pub posts: Vec<BlogPost>,
    pub error: Option<String>,
}

/// What the detail panel should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Create mode; the form takes the panel.
    Hidden,
    NotLoaded,
    Loading,
    Ready(BlogPost),
    Failed(StoreError),
}

/// Returned by a successful [`ViewController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: &'static str,
    pub post: BlogPost,
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ViewController {
    store: Arc<dyn BlogStore>,
    cache: Arc<QueryCache<QueryData>>,
    ids: TimestampIdGenerator,
    mode: Mode,
    selected_id: Option<String>,
    form: DraftForm,
}

impl ViewController {
    pub fn new(store: Arc<dyn BlogStore>, cache: Arc<QueryCache<QueryData>>) -> Self {
        Self {
            store,
            cache,
            ids: TimestampIdGenerator::new(),
            mode: Mode::Create,
            selected_id: None,
            form: DraftForm::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn form(&self) -> &DraftForm {
        &self.form
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Switch to view mode on `id`.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(id = %id, "Selected blog");
        self.selected_id = Some(id);
        self.mode = Mode::View;
    }

    /// Back to create mode with nothing selected.
    pub fn new_post(&mut self) {
        self.selected_id = None;
        self.mode = Mode::Create;
    }

    /// Key of the detail query, if the detail fetch is enabled.
    fn detail_key(&self) -> Option<QueryKey> {
        match (self.mode, &self.selected_id) {
            (Mode::View, Some(id)) => Some(QueryKey::entity(id.clone())),
            _ => None,
        }
    }

    pub async fn load_list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let key = QueryKey::List;
        let store = self.store.clone();
        self.cache
            .fetch(&key, move || async move { store.list().await.map(QueryData::Posts) })
            .await?
            .into_posts(&key)
    }

    /// Current list panel state, without fetching.
    pub async fn list_view(&self) -> ListView {
        let Some(entry) = self.cache.peek(&QueryKey::List).await else {
            return ListView::default();
        };

        let posts = match entry.value {
            Some(QueryData::Posts(posts)) => posts,
            _ => Vec::new(),
        };

        ListView {
            loading: entry.status == QueryStatus::Loading,
            posts,
            error: match entry.status {
                QueryStatus::Error => entry.error.map(|e| e.to_string()),
                _ => None,
            },
        }
    }

    /// Fetch the selected post, unless in create mode.
    pub async fn load_detail(&self) -> DetailView {
        let Some(key) = self.detail_key() else {
            return DetailView::Hidden;
        };
        let QueryKey::Entity(id) = key.clone() else {
            return DetailView::Hidden;
        };

        let store = self.store.clone();
        let result = self
            .cache
            .fetch(&key, move || async move {
                store.get_by_id(&id).await.map(QueryData::Post)
            })
            .await
            .and_then(|data| data.into_post(&key));

        match result {
            Ok(post) => DetailView::Ready(post),
            Err(err) => DetailView::Failed(err),
        }
    }

    /// Current detail panel state, without fetching.
    pub async fn detail(&self) -> DetailView {
        let Some(key) = self.detail_key() else {
            return DetailView::Hidden;
        };

        match self.cache.peek(&key).await {
            None => DetailView::NotLoaded,
            Some(entry) => match entry.status {
                QueryStatus::Loading => DetailView::Loading,
                QueryStatus::Ready => match entry.value {
                    Some(QueryData::Post(post)) => DetailView::Ready(post),
                    _ => DetailView::Failed(mismatch(&key)),
                },
                QueryStatus::Error => DetailView::Failed(
                    entry
                        .error
                        .unwrap_or_else(|| StoreError::Network("request failed".to_string())),
                ),
            },
        }
    }

    /// Publish the form as a new post.
    ///
    /// Nothing is sent unless in create mode with both fields filled. On
    /// success the form is cleared and the list is invalidated and re-read;
    /// on failure form and cache are left as they were.
    pub async fn submit(&mut self) -> Result<Acknowledgement, ControllerError> {
        if self.mode != Mode::Create {
            let msg = "Start a new blog before publishing".to_string();
            return Err(DomainError::BadInput(msg).into());
        }
        if self.form.title.is_empty() || self.form.description.is_empty() {
            return Err(DomainError::BadInput(FILL_BOTH_FIELDS.to_string()).into());
        }

        let now = Utc::now();
        let post = BlogPost::draft(
            self.ids.next_id(now),
            self.form.title.clone(),
            self.form.description.clone(),
            now,
        );

        tracing::info!(id = %post.id, title = %post.title, "Publishing blog");
        let created = match self.store.create(&post).await {
            Ok(created) => created,
            Err(err) => {
                tracing::error!(id = %post.id, error = %err, "Blog creation failed");
                return Err(err.into());
            }
        };

        self.form = DraftForm::default();

        let store = self.store.clone();
        let refreshed = self
            .cache
            .refetch(&QueryKey::List, move || async move {
                store.list().await.map(QueryData::Posts)
            })
            .await;
        if let Err(err) = refreshed {
            // The entry stays stale, so the next list read tries again.
            tracing::warn!(error = %err, "List refresh after create failed");
        }

        Ok(Acknowledgement {
            message: CREATED_MESSAGE,
            post: created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdesk_infra::InMemoryBlogStore;
    use chrono::DateTime;

    fn hello() -> BlogPost {
        post_fixture("1", "Hello", "World")
    }

    fn post_fixture(id: &str, title: &str, description: &str) -> BlogPost {
        let date = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        BlogPost {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: vec!["Tech".to_string()],
            date,
            cover_image: blogdesk_core::domain::DEFAULT_COVER_IMAGE.to_string(),
            content: None,
        }
    }

    fn controller(store: &Arc<InMemoryBlogStore>) -> ViewController {
        ViewController::new(store.clone(), Arc::new(QueryCache::new()))
    }

    #[tokio::test]
    async fn test_starts_in_create_mode_without_detail_fetch() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let ctrl = controller(&store);

        assert_eq!(ctrl.mode(), Mode::Create);
        assert_eq!(ctrl.selected_id(), None);
        assert_eq!(ctrl.load_detail().await, DetailView::Hidden);
        assert_eq!(store.calls().get_by_id, 0);
    }

    #[tokio::test]
    async fn test_empty_fields_send_nothing() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);

        for (title, description) in [("", ""), ("Title", ""), ("", "Body")] {
            ctrl.set_title(title);
            ctrl.set_description(description);

            let err = ctrl.submit().await.unwrap_err();
            assert!(matches!(
                err,
                ControllerError::Domain(DomainError::BadInput(ref msg)) if msg == FILL_BOTH_FIELDS
            ));
        }

        assert_eq!(store.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_submit_creates_once_and_resets_form() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);
        ctrl.set_title("First");
        ctrl.set_description("Post body");

        let before = Utc::now();
        let ack = ctrl.submit().await.unwrap();

        assert_eq!(ack.message, CREATED_MESSAGE);
        assert_eq!(store.calls().create, 1);
        assert_eq!(ctrl.form(), &DraftForm::default());

        let stored = store.posts().await;
        assert_eq!(stored.len(), 1);
        let post = &stored[0];
        assert_eq!(post, &ack.post);
        assert_eq!(post.title, "First");
        assert_eq!(post.description, "Post body");
        assert_eq!(post.category, vec!["Tech", "New"]);
        assert!(post.date >= before);
        assert!(DateTime::parse_from_rfc3339(&post.date.to_rfc3339()).is_ok());
        assert!(post.id.parse::<i64>().unwrap() >= before.timestamp_millis());
    }

    #[tokio::test]
    async fn test_list_reflects_created_post() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);

        assert_eq!(ctrl.load_list().await.unwrap().len(), 1);
        assert_eq!(ctrl.load_list().await.unwrap().len(), 1);
        assert_eq!(store.calls().list, 1);

        ctrl.set_title("Second");
        ctrl.set_description("More");
        let ack = ctrl.submit().await.unwrap();
        assert_eq!(store.calls().list, 2);

        let posts = ctrl.load_list().await.unwrap();
        assert_eq!(store.calls().list, 2);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, ack.post.id);

        let view = ctrl.list_view().await;
        assert!(!view.loading);
        assert_eq!(view.posts, posts);
    }

    #[tokio::test]
    async fn test_reselecting_uses_cached_detail() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![
            post_fixture("a", "A", "first"),
            post_fixture("b", "B", "second"),
        ]));
        let mut ctrl = controller(&store);

        for id in ["a", "b", "a"] {
            ctrl.select(id);
            match ctrl.load_detail().await {
                DetailView::Ready(post) => assert_eq!(post.id, id),
                other => panic!("unexpected detail {:?}", other),
            }
        }

        assert_eq!(store.requested_ids().await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_new_post_clears_selection_and_suppresses_detail() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);

        ctrl.select("1");
        assert_eq!(ctrl.mode(), Mode::View);
        assert_eq!(ctrl.detail().await, DetailView::NotLoaded);
        ctrl.load_detail().await;

        ctrl.new_post();
        assert_eq!(ctrl.mode(), Mode::Create);
        assert_eq!(ctrl.selected_id(), None);
        assert_eq!(ctrl.load_detail().await, DetailView::Hidden);
        assert_eq!(ctrl.detail().await, DetailView::Hidden);
        assert_eq!(store.calls().get_by_id, 1);
    }

    #[tokio::test]
    async fn test_identical_submissions_get_distinct_ids() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);

        for _ in 0..2 {
            ctrl.set_title("Same");
            ctrl.set_description("Same body");
            ctrl.submit().await.unwrap();
        }

        let posts = store.posts().await;
        assert_eq!(store.calls().create, 2);
        assert_eq!(posts.len(), 2);
        assert_ne!(posts[0].id, posts[1].id);
    }

    #[tokio::test]
    async fn test_selecting_listed_post_shows_its_detail() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);

        let posts = ctrl.load_list().await.unwrap();
        ctrl.select(posts[0].id.clone());

        let detail = ctrl.load_detail().await;
        assert_eq!(store.requested_ids().await, vec!["1"]);
        assert_eq!(detail, DetailView::Ready(hello()));
        assert_eq!(ctrl.detail().await, detail);

        let rendered = crate::view::render_detail(&detail);
        assert!(rendered.contains("Hello"));
        assert!(rendered.contains("World"));
    }

    #[tokio::test]
    async fn test_failed_create_keeps_form_and_list() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);
        ctrl.load_list().await.unwrap();
        store.reject_creates(true);

        ctrl.set_title("Title");
        ctrl.set_description("Body");
        let err = ctrl.submit().await.unwrap_err();

        assert!(matches!(err, ControllerError::Store(StoreError::Creation(_))));
        assert_eq!(ctrl.form().title, "Title");
        assert_eq!(ctrl.form().description, "Body");
        assert_eq!(store.calls().list, 1);
        ctrl.load_list().await.unwrap();
        assert_eq!(store.calls().list, 1);
    }

    #[tokio::test]
    async fn test_submit_outside_create_mode_is_rejected() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);
        ctrl.set_title("Title");
        ctrl.set_description("Body");
        ctrl.select("1");

        let err = ctrl.submit().await.unwrap_err();

        assert!(matches!(err, ControllerError::Domain(DomainError::BadInput(_))));
        assert_eq!(store.calls().create, 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_after_create_leaves_list_stale() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![hello()]));
        let mut ctrl = controller(&store);
        ctrl.load_list().await.unwrap();

        store.fail_lists(true);
        ctrl.set_title("Second");
        ctrl.set_description("More");
        let ack = ctrl.submit().await.unwrap();

        assert_eq!(ack.message, CREATED_MESSAGE);
        assert_eq!(store.calls().list, 2);
        let entry = ctrl.cache.peek(&QueryKey::List).await.unwrap();
        assert!(entry.stale);
        assert_eq!(entry.status, QueryStatus::Error);
        assert_eq!(entry.value, Some(QueryData::Posts(vec![hello()])));

        store.fail_lists(false);
        let posts = ctrl.load_list().await.unwrap();
        assert_eq!(store.calls().list, 3);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, ack.post.id);
    }

    #[tokio::test]
    async fn test_missing_post_is_reported() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);
        ctrl.select("missing");

        let missing = DetailView::Failed(StoreError::NotFound {
            id: "missing".to_string(),
        });
        assert_eq!(ctrl.load_detail().await, missing);
        assert_eq!(ctrl.detail().await, missing);
    }
}
