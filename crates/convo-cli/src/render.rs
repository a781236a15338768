//! Plain-text views of session state. Markdown is printed as-is.

use std::fmt::Write;

use convo_session::SessionState;
use convo_types::{Message, MessageRole, Thread};

/// Numbered thread list, newest first, as shown by `/list`
pub fn thread_list(state: &SessionState) -> String {
    if state.threads().is_empty() {
        return "No conversations yet. Type a message to start one.\n".to_string();
    }

    let mut out = String::new();
    for (index, thread) in state.threads().iter().enumerate() {
        let active = if state.active_thread_id() == Some(thread.id) {
            '*'
        } else {
            ' '
        };
        let loading = if state.is_loading(thread.id) {
            " (waiting for reply)"
        } else {
            ""
        };
        let menu = if state.selection().menu_open() == Some(thread.id) {
            " [menu: /delete]"
        } else {
            ""
        };
        let _ = writeln!(out, "{} {:>2}. {}{}{}", active, index + 1, thread.title, loading, menu);
    }
    out
}

pub fn transcript(thread: &Thread) -> String {
    let mut out = format!("== {} ==\n", thread.title);
    for message in &thread.messages {
        out.push_str(&message_line(message));
    }
    out
}

pub fn message_line(message: &Message) -> String {
    let speaker = match message.role() {
        MessageRole::User => "you",
        MessageRole::Assistant => "assistant",
    };
    let mut line = format!("{}> {}", speaker, message.text());
    if let Some(name) = message.attachment_name() {
        if !message.text().is_empty() {
            line.push(' ');
        }
        let _ = write!(line, "[attached: {}]", name);
    }
    line.push('\n');
    line
}

/// One-line status shown under the prompt: what is staged, who is active
pub fn status_line(state: &SessionState) -> String {
    let target = match state.active_thread() {
        Some(thread) => format!("in \"{}\"", thread.title),
        None => "new conversation".to_string(),
    };
    match state.staged_file() {
        Some(file) => format!("[{} | attached: {}]", target, file.name()),
        None => format!("[{}]", target),
    }
}
