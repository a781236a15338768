//! Interactive loop: reads commands from stdin, drives the orchestrator,
//! and prints replies and title updates as they arrive.

use std::path::PathBuf;

use convo_session::{Orchestrator, Session, StagedFile};
use convo_types::{MessageRole, SessionEvent, ThreadId};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::render;

const HELP: &str = "\
Commands:
  <text>          send a message (an empty line sends just the attachment)
  /new            start a new conversation
  /list           list conversations
  /open <n>       switch to conversation n
  /menu <n>       toggle the menu for conversation n
  /delete <n>     delete conversation n
  /attach <path>  attach a file to the next message
  /detach         drop the attached file
  /show           print the current conversation
  /help           show this help
  /quit           exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    New,
    List,
    Open(usize),
    Menu(usize),
    Delete(usize),
    Attach(PathBuf),
    Detach,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("Not a conversation number: {0}")]
    InvalidIndex(String),
}

/// Parse one input line. Anything not starting with `/` is a message.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Send(line.trim().to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "new" => Ok(Command::New),
        "list" | "ls" => Ok(Command::List),
        "open" => parse_index(arg, "open").map(Command::Open),
        "menu" => parse_index(arg, "menu").map(Command::Menu),
        "delete" | "rm" => parse_index(arg, "delete").map(Command::Delete),
        "attach" if arg.is_empty() => Err(CommandError::MissingArgument("attach")),
        "attach" => Ok(Command::Attach(normalize_input_path(arg))),
        "detach" => Ok(Command::Detach),
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Conversation numbers are 1-based, as printed by `/list`
fn parse_index(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::InvalidIndex(arg.to_string())),
    }
}

/// Undo drag-and-drop shell escaping (`\ `, `\(`, `\)`) and expand `~/`
pub fn normalize_input_path(path: &str) -> PathBuf {
    let unescaped = path
        .replace("\\ ", " ")
        .replace("\\(", "(")
        .replace("\\)", ")");

    if let Some(rest) = unescaped.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(unescaped)
}

fn thread_at(session: &Session, index: usize) -> Option<ThreadId> {
    session.read(|state| state.threads().get(index).map(|t| t.id))
}

/// Run until `/quit` or end of input
pub async fn run(orchestrator: Orchestrator) -> anyhow::Result<()> {
    let session = orchestrator.session().clone();
    let printer = spawn_printer(session.clone());

    println!("Type a message to start chatting, /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Send(text) => match orchestrator.submit(text) {
                Ok(submission) => {
                    tracing::debug!(submission_id = %submission.id, "Submitted");
                }
                Err(rejected) => println!("{}", rejected),
            },
            Command::New => session.go_to_landing(),
            Command::List => print!("{}", session.read(render::thread_list)),
            Command::Open(index) => match thread_at(&session, index) {
                Some(id) => {
                    session.select(id);
                    if let Some(thread) = session.snapshot().thread(id) {
                        print!("{}", render::transcript(thread));
                    }
                }
                None => println!("No conversation {}", index + 1),
            },
            Command::Menu(index) => match thread_at(&session, index) {
                Some(id) => {
                    session.toggle_menu(id);
                    print!("{}", session.read(render::thread_list));
                }
                None => println!("No conversation {}", index + 1),
            },
            Command::Delete(index) => match thread_at(&session, index) {
                Some(id) => {
                    session.delete_thread(id);
                    println!("Deleted conversation {}", index + 1);
                }
                None => println!("No conversation {}", index + 1),
            },
            Command::Attach(path) => {
                if !path.is_file() {
                    println!("Not a file: {}", path.display());
                    continue;
                }
                session.stage(StagedFile::from_path(path));
            }
            Command::Detach => {
                session.clear_staged();
            }
            Command::Show => match session.snapshot().active_thread() {
                Some(thread) => print!("{}", render::transcript(thread)),
                None => println!("No conversation selected"),
            },
            Command::Help => print!("{}", HELP),
            Command::Quit => break,
        }
        println!("{}", session.read(render::status_line));
    }

    printer.abort();
    Ok(())
}

/// Print assistant messages and title changes as they land
fn spawn_printer(session: Session) -> JoinHandle<()> {
    let mut events = session.events();
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Printer fell behind session events");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            match event {
                SessionEvent::MessageAppended {
                    thread_id,
                    role: MessageRole::Assistant,
                } => {
                    let line = session.read(|state| {
                        let thread = state.thread(thread_id)?;
                        let message = thread.last_message()?;
                        Some(format!("[{}] {}", thread.title, render::message_line(message)))
                    });
                    if let Some(line) = line {
                        print!("{}", line);
                    }
                }
                SessionEvent::TitleChanged { title, .. } => println!("(titled \"{}\")", title),
                _ => {}
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_message() {
        assert_eq!(
            parse_command("hello there\n"),
            Ok(Command::Send("hello there".to_string()))
        );
        assert_eq!(parse_command(""), Ok(Command::Send(String::new())));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command("/new"), Ok(Command::New));
        assert_eq!(parse_command("/list"), Ok(Command::List));
        assert_eq!(parse_command("/open 2"), Ok(Command::Open(1)));
        assert_eq!(parse_command("/delete  3 "), Ok(Command::Delete(2)));
        assert_eq!(parse_command("/menu 1"), Ok(Command::Menu(0)));
        assert_eq!(parse_command("/detach"), Ok(Command::Detach));
        assert_eq!(parse_command("/quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_bad_commands() {
        assert_eq!(
            parse_command("/open"),
            Err(CommandError::MissingArgument("open"))
        );
        assert_eq!(
            parse_command("/open 0"),
            Err(CommandError::InvalidIndex("0".to_string()))
        );
        assert_eq!(
            parse_command("/open x"),
            Err(CommandError::InvalidIndex("x".to_string()))
        );
        assert_eq!(
            parse_command("/frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            parse_command("/attach"),
            Err(CommandError::MissingArgument("attach"))
        );
    }

    #[test]
    fn test_attach_unescapes_path() {
        assert_eq!(
            parse_command("/attach /tmp/My\\ Report\\ \\(final\\).pdf"),
            Ok(Command::Attach(PathBuf::from("/tmp/My Report (final).pdf")))
        );
    }

    #[test]
    fn test_normalize_expands_home() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                normalize_input_path("~/notes.txt"),
                PathBuf::from(home).join("notes.txt")
            );
        }
    }
}
