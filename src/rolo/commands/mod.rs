//! # Command Registry and Dispatch
//!
//! One static table of [`CommandSpec`] descriptors drives everything the
//! dispatcher needs to know about a command: its minimum arity, whether the
//! first argument must name an existing contact, and the handler to call.
//! A single generic [`dispatch`] routine consults the table — there is no
//! per-handler wrapper logic keyed off function identity.
//!
//! Handlers are pure functions of `(session, args) -> Result<String>`. They
//! never touch stdin/stdout; the binary shell owns all terminal I/O,
//! including the sub-prompts that complete `birthdays` and `edit-note`
//! argument lists before dispatch.
//!
//! No error escapes this module: validation failures render as
//! `Error: <message>`, missing contacts as a canned not-found line, and
//! anything else as an "Unexpected error" with the detail attached.

use crate::book::AddressBook;
use crate::config::RoloConfig;
use crate::error::{Result, RoloError};
use crate::notes::Notes;

pub mod contact;
pub mod help;
pub mod note;

pub const MSG_GREETING: &str = "How can I help you?";
pub const MSG_INSUFFICIENT_ARGS: &str = "Error: Insufficient arguments provided";

/// The mutable state a command operates on: both stores plus the policy
/// configuration.
pub struct Session {
    pub book: AddressBook,
    pub notes: Notes,
    pub config: RoloConfig,
}

impl Session {
    pub fn new(book: AddressBook, notes: Notes, config: RoloConfig) -> Self {
        Self {
            book,
            notes,
            config,
        }
    }
}

type Handler = fn(&mut Session, &[&str]) -> Result<String>;

/// Declarative description of one command.
pub struct CommandSpec {
    pub name: &'static str,
    /// Arguments required after the command name.
    pub min_args: usize,
    /// The first argument must name an existing contact before the handler
    /// runs (the note commands that are keyed by user).
    pub requires_contact: bool,
    run: Handler,
}

const fn cmd(name: &'static str, min_args: usize, run: Handler) -> CommandSpec {
    CommandSpec {
        name,
        min_args,
        requires_contact: false,
        run,
    }
}

const fn user_cmd(name: &'static str, min_args: usize, run: Handler) -> CommandSpec {
    CommandSpec {
        name,
        min_args,
        requires_contact: true,
        run,
    }
}

/// The full command surface, resolved once.
pub static COMMANDS: &[CommandSpec] = &[
    cmd("hello", 0, hello),
    cmd("add", 1, contact::add),
    cmd("all", 0, contact::all),
    cmd("show", 1, contact::show),
    cmd("find", 1, contact::find),
    cmd("delete", 1, contact::delete),
    cmd("update", 3, contact::update),
    cmd("remove", 2, contact::remove),
    cmd("birthdays", 1, contact::birthdays),
    user_cmd("add-note", 2, note::add_note),
    user_cmd("edit-note", 3, note::edit_note),
    user_cmd("delete-note", 2, note::delete_note),
    user_cmd("all-notes", 1, note::all_notes),
    cmd("find-notes", 1, note::find_notes),
    cmd("find-tag", 1, note::find_tag),
    cmd("sort-notes", 0, note::sort_notes),
    cmd("help", 0, help::help),
];

/// What the shell should do with a line's result.
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Print this reply and keep going.
    Reply(String),
    /// Terminate the session.
    Exit,
    /// Blank input, nothing to do.
    Empty,
}

/// Parses one input line and runs it against the session.
///
/// The first whitespace-separated token, lowercased, selects the command;
/// the remaining tokens are its positional arguments.
pub fn dispatch(line: &str, session: &mut Session) -> DispatchOutcome {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return DispatchOutcome::Empty;
    };
    let command = first.to_lowercase();

    if command == "close" || command == "exit" {
        return DispatchOutcome::Exit;
    }

    let args: Vec<&str> = tokens.collect();
    let Some(spec) = COMMANDS.iter().find(|spec| spec.name == command) else {
        return DispatchOutcome::Reply(format!("Invalid command: {}", command));
    };

    if args.len() < spec.min_args {
        return DispatchOutcome::Reply(MSG_INSUFFICIENT_ARGS.to_string());
    }

    if spec.requires_contact {
        let user = args[0];
        if session.book.find(user).is_none() {
            return DispatchOutcome::Reply(format!("User '{}' does not exist.", user));
        }
    }

    let reply = match (spec.run)(session, &args) {
        Ok(message) => message,
        Err(RoloError::ContactNotFound) => RoloError::ContactNotFound.to_string(),
        Err(e) if e.is_validation() => format!("Error: {}", e),
        Err(e) => format!("Unexpected error: {}", e),
    };
    DispatchOutcome::Reply(reply)
}

fn hello(_session: &mut Session, _args: &[&str]) -> Result<String> {
    Ok(MSG_GREETING.to_string())
}

pub(crate) fn unknown_field(keyword: &str) -> String {
    format!(
        "Unknown field '{}'. Known fields are phone, birthday, email and address.",
        keyword
    )
}

#[cfg(test)]
pub(crate) fn test_session() -> Session {
    Session::new(AddressBook::new(), Notes::new(), RoloConfig::default())
}

#[cfg(test)]
pub(crate) fn reply(session: &mut Session, line: &str) -> String {
    match dispatch(line, session) {
        DispatchOutcome::Reply(message) => message,
        other => panic!("expected a reply for {:?}, got {:?}", line, other),
    }
}
