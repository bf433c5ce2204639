use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cover image used when a post does not supply its own.
pub const DEFAULT_COVER_IMAGE: &str =
    "https://images.pexels.com/photos/1181675/pexels-photo-1181675.jpeg";

/// Tags attached to every post created from the form.
pub const DEFAULT_CATEGORY: [&str; 2] = ["Tech", "New"];

fn default_cover_image() -> String {
    DEFAULT_COVER_IMAGE.to_string()
}

/// BlogPost entity - a titled piece of content with tags and a timestamp.
///
/// `description` doubles as the body. `content` is only ever read from the
/// remote store; the client never fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default = "default_cover_image")]
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BlogPost {
    /// Build a post as submitted from the create form.
    pub fn draft(
        id: String,
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            category: DEFAULT_CATEGORY.iter().map(|c| c.to_string()).collect(),
            date,
            cover_image: default_cover_image(),
            content: None,
        }
    }
}
