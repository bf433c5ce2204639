//! Interactive session - the list/detail/create screen driven from stdin.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{Mode, ViewController};
use crate::error::{AppError, AppResult, store_message};
use crate::view;

pub const HELP: &str = "\
Commands:
  list            show the latest blogs
  open <id>       read a blog
  new             start a new blog
  title <text>    set the title of the new blog
  desc <text>     set the content of the new blog
  publish         publish the new blog
  help            show this help
  quit            leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Open(String),
    New,
    Title(String),
    Desc(String),
    Publish,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(SessionCommand::List),
            "open" | "show" if !rest.is_empty() => Ok(SessionCommand::Open(rest.to_string())),
            "open" | "show" => Err("Usage: open <id>".to_string()),
            "new" => Ok(SessionCommand::New),
            "title" => Ok(SessionCommand::Title(rest.to_string())),
            "desc" | "content" => Ok(SessionCommand::Desc(rest.to_string())),
            "publish" => Ok(SessionCommand::Publish),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command: {} (type `help`)", other)),
        }
    }
}

pub enum Step {
    Continue(String),
    Quit,
}

/// Render the whole screen: list panel, then the detail or form panel.
pub async fn render_screen(ctrl: &ViewController) -> String {
    let selected = match ctrl.mode() {
        Mode::View => ctrl.selected_id(),
        Mode::Create => None,
    };
    let mut out = view::render_list(&ctrl.list_view().await, selected);
    out.push('\n');
    match ctrl.mode() {
        Mode::Create => out.push_str(&view::render_form(ctrl.form())),
        Mode::View => out.push_str(&view::render_detail(&ctrl.detail().await)),
    }
    out
}

/// Apply one command and return the text to show.
pub async fn handle(ctrl: &mut ViewController, command: SessionCommand) -> Step {
    let out = match command {
        SessionCommand::List => match ctrl.load_list().await {
            Ok(_) => view::render_list(&ctrl.list_view().await, ctrl.selected_id()),
            Err(err) => format!("{}\n", store_message(&err)),
        },
        SessionCommand::Open(id) => {
            ctrl.select(id);
            let detail = ctrl.load_detail().await;
            view::render_detail(&detail)
        }
        SessionCommand::New => {
            ctrl.new_post();
            view::render_form(ctrl.form())
        }
        SessionCommand::Title(text) => {
            ctrl.set_title(text);
            view::render_form(ctrl.form())
        }
        SessionCommand::Desc(text) => {
            ctrl.set_description(text);
            view::render_form(ctrl.form())
        }
        SessionCommand::Publish => match ctrl.submit().await {
            Ok(ack) => format!("{}\n\n{}", ack.message, render_screen(ctrl).await),
            Err(err) => format!("{}\n", AppError::from(err).user_message()),
        },
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => return Step::Quit,
    };
    Step::Continue(out)
}

/// Read commands line by line until `quit` or end of input.
pub async fn run_session<R>(ctrl: &mut ViewController, input: R) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    if let Err(err) = ctrl.load_list().await {
        tracing::warn!(error = %err, "Initial list load failed");
    }
    println!("{}", render_screen(ctrl).await);
    println!("Type `help` for commands.");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        if command == SessionCommand::Publish {
            println!("Publishing...");
        }

        match handle(ctrl, command).await {
            Step::Continue(out) => print!("{}", out),
            Step::Quit => break,
        }
    }

    Ok(())
}
