//! Command-line interface and one-shot commands.

use clap::{Parser, Subcommand};

use crate::controller::{DetailView, ViewController};
use crate::error::AppResult;
use crate::view;

/// blogdesk: read and publish posts on a remote blog service
#[derive(Parser, Debug)]
#[command(name = "blogdesk", version)]
#[command(about = "Terminal client for a remote blog collection")]
pub struct Cli {
    /// Base URL of the blog service (overrides BLOGDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Emit logs as JSON (same as LOG_FORMAT=json)
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run; starts an interactive session when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all blogs
    List,

    /// Show a single blog
    Show {
        /// Blog id
        id: String,
    },

    /// Publish a new blog
    Create {
        #[arg(short, long)]
        title: String,

        /// Body text
        #[arg(short, long)]
        description: String,
    },

    /// Interactive list/detail/create session
    Browse,
}

/// Run a one-shot command and return what it printed.
pub async fn run(command: Command, ctrl: &mut ViewController) -> AppResult<String> {
    match command {
        Command::List => {
            ctrl.load_list().await?;
            Ok(view::render_list(&ctrl.list_view().await, None))
        }
        Command::Show { id } => {
            ctrl.select(id);
            match ctrl.load_detail().await {
                DetailView::Failed(err) => Err(err.into()),
                detail => Ok(view::render_detail(&detail)),
            }
        }
        Command::Create { title, description } => {
            ctrl.set_title(title);
            ctrl.set_description(description);
            let ack = ctrl.submit().await?;
            Ok(format!("{} (id {})\n", ack.message, ack.post.id))
        }
        Command::Browse => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blogdesk_core::domain::BlogPost;
    use blogdesk_infra::{InMemoryBlogStore, QueryCache};
    use chrono::Utc;

    fn controller(store: &Arc<InMemoryBlogStore>) -> ViewController {
        ViewController::new(store.clone(), Arc::new(QueryCache::new()))
    }

    #[test]
    fn test_parses_create() {
        let cli = Cli::try_parse_from([
            "blogdesk",
            "--api-url",
            "http://blogs.test",
            "create",
            "--title",
            "T",
            "--description",
            "D",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://blogs.test"));
        assert_eq!(
            cli.command,
            Some(Command::Create {
                title: "T".to_string(),
                description: "D".to_string()
            })
        );
    }

    #[test]
    fn test_no_command_means_session() {
        let cli = Cli::try_parse_from(["blogdesk"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json_logs);
    }

    #[tokio::test]
    async fn test_show_missing_is_an_error() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);

        let err = run(Command::Show { id: "3".to_string() }, &mut ctrl)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "No blog with id 3");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = Arc::new(InMemoryBlogStore::with_posts(vec![BlogPost::draft(
            "1".to_string(),
            "Hello",
            "World",
            Utc::now(),
        )]));
        let mut ctrl = controller(&store);

        let out = run(
            Command::Create {
                title: "Fresh".to_string(),
                description: "Body".to_string(),
            },
            &mut ctrl,
        )
        .await
        .unwrap();
        assert!(out.starts_with("Blog Created Successfully!"));

        let listed = run(Command::List, &mut ctrl).await.unwrap();
        assert!(listed.contains("Hello"));
        assert!(listed.contains("Fresh"));
    }

    #[tokio::test]
    async fn test_create_with_empty_title_is_rejected() {
        let store = Arc::new(InMemoryBlogStore::new());
        let mut ctrl = controller(&store);

        let err = run(
            Command::Create {
                title: String::new(),
                description: "Body".to_string(),
            },
            &mut ctrl,
        )
        .await
        .unwrap_err();

        assert_eq!(err.user_message(), "Please fill in both fields");
        assert_eq!(store.calls().total(), 0);
    }
}
