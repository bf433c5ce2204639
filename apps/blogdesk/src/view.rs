//! Plain-text rendering of the list, detail and create panels.

use std::fmt::Write;

use blogdesk_core::domain::BlogPost;

use crate::controller::{DetailView, DraftForm, ListView};
use crate::error::store_message;

const SUMMARY_WIDTH: usize = 72;
const SUMMARY_LINES: usize = 2;

fn tags(post: &BlogPost, upper: bool) -> String {
    post.category
        .iter()
        .map(|tag| {
            if upper {
                format!("[{}]", tag.to_uppercase())
            } else {
                format!("[{}]", tag)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word-wrap `text` to `width` and keep at most `lines` lines, marking the
/// cut with an ellipsis.
fn clamp(text: &str, width: usize, lines: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            if out.len() == lines {
                truncated = true;
                break;
            }
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !truncated && !current.is_empty() {
        out.push(current);
    }

    for line in out.iter_mut() {
        if line.chars().count() > width {
            *line = line.chars().take(width.saturating_sub(3)).collect();
            line.push_str("...");
        }
    }
    if truncated {
        if let Some(last) = out.last_mut() {
            last.push_str("...");
        }
    }
    out
}

pub fn render_list(view: &ListView, selected: Option<&str>) -> String {
    let mut out = String::from("Latest Blogs\n");

    if view.loading {
        out.push_str("  Loading list...\n");
    }
    if let Some(err) = &view.error {
        let _ = writeln!(out, "  Could not load blogs: {}", err);
    }
    if !view.loading && view.error.is_none() && view.posts.is_empty() {
        out.push_str("  No blogs yet\n");
    }

    for post in &view.posts {
        let marker = if selected == Some(post.id.as_str()) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {:<14} {}", marker, post.id, tags(post, true));
        let _ = writeln!(out, "  {:<14} {}", "", post.title);
        for line in clamp(&post.description, SUMMARY_WIDTH, SUMMARY_LINES) {
            let _ = writeln!(out, "  {:<14} {}", "", line);
        }
    }

    out
}

pub fn render_detail(view: &DetailView) -> String {
    match view {
        DetailView::Hidden => String::new(),
        DetailView::NotLoaded => "Select a blog to read\n".to_string(),
        DetailView::Loading => "Loading story...\n".to_string(),
        DetailView::Failed(err) => format!("Could not load story: {}\n", store_message(err)),
        DetailView::Ready(post) => {
            let mut out = String::new();
            let _ = writeln!(out, "Cover: {}", post.cover_image);
            if !post.category.is_empty() {
                let _ = writeln!(out, "{}", tags(post, false));
            }
            let _ = writeln!(out, "\n{}\n", post.title);
            let _ = writeln!(out, "Published on {}", post.date.format("%Y-%m-%d"));
            let _ = writeln!(out, "\n{}", post.description);
            if let Some(content) = post.content.as_deref().filter(|c| !c.is_empty()) {
                let _ = writeln!(out, "\n{}", content);
            }
            out
        }
    }
}

pub fn render_form(form: &DraftForm) -> String {
    let show = |value: &str| {
        if value.is_empty() {
            "(empty)".to_string()
        } else {
            value.to_string()
        }
    };

    format!(
        "Create a New Blog\n  Title:   {}\n  Content: {}\n",
        show(&form.title),
        show(&form.description)
    )
}
