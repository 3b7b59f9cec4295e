//! Terminal rendering of the forum page.
//!
//! Rendering is pure string formatting so the client loop decides when to
//! print. New messages are printed as they arrive, which keeps the newest
//! entry at the bottom of the terminal.

use crate::forum::Message;

pub const TITLE: &str = "Common Q&A Forum";
pub const SUBTITLE: &str =
    "Ask questions, share answers, and collaborate with other candidates";

pub const EMPTY_TITLE: &str = "No discussions yet";
pub const EMPTY_HINT: &str = "Be the first to start a discussion!";

pub const HELP: &str = "Type a message and press Enter to post. \
Commands: /like <id>, /list, /help, /quit";

pub fn render_header() -> String {
    format!("{TITLE}\n{SUBTITLE}\n")
}

pub fn render_message(message: &Message) -> String {
    format!(
        "{name} ({role} \u{2022} {label})\n  {content}\n  \u{2665} {likes}  [id {id}]\n",
        name = message.author.name,
        role = message.author.role,
        label = message.created_label,
        content = message.content,
        likes = message.like_count,
        id = message.id,
    )
}

/// Renders the whole message list, or the empty state when there is nothing
/// to show.
pub fn render_feed(messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n");
    }

    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n")
}
