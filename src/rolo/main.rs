use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use rolo::book::title_case;
use rolo::commands::{dispatch, DispatchOutcome, Session};
use rolo::config::RoloConfig;
use rolo::error::Result;
use rolo::storage::Storage;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rolo", version, about = "Contact book and notes assistant")]
struct Cli {
    /// Data directory for contacts.json, notes.json and config.json.
    /// Defaults to the platform data directory.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = match cli.data {
        Some(dir) => dir,
        None => ProjectDirs::from("com", "rolo", "rolo")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".rolo")),
    };

    let storage = Storage::new(data_dir);
    let book = storage.load_book();
    let notes = storage.load_notes();
    for warning in [&book.warning, &notes.warning].into_iter().flatten() {
        println!("{}", warning.yellow());
    }

    let config = RoloConfig::load(storage.data_dir()).unwrap_or_default();
    let mut session = Session::new(book.value, notes.value, config);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt("Enter a command: ")?;
        let Some(line) = lines.next() else {
            // EOF still saves and says goodbye.
            println!();
            break;
        };
        let line = line?;

        let Some(line) = complete_line(&line, &session, &mut lines)? else {
            continue;
        };
        match dispatch(&line, &mut session) {
            DispatchOutcome::Reply(reply) => print_reply(&reply),
            DispatchOutcome::Exit => break,
            DispatchOutcome::Empty => {}
        }
    }

    storage.save_book(&session.book)?;
    storage.save_notes(&session.notes)?;
    println!("Good bye!");
    Ok(())
}

/// Fills in the arguments that `birthdays` and `edit-note` collect
/// interactively, so the command layer always sees a complete argument
/// list. Returns `None` when the line was answered here and needs no
/// dispatch.
fn complete_line<I>(line: &str, session: &Session, lines: &mut I) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = match tokens.first() {
        Some(first) => first.to_lowercase(),
        None => return Ok(Some(line.to_string())),
    };

    if command == "birthdays" && tokens.len() == 1 {
        prompt("Enter the number of days: ")?;
        let Some(days) = lines.next() else {
            return Ok(None);
        };
        return Ok(Some(format!("birthdays {}", days?.trim())));
    }

    if command == "edit-note" && tokens.len() == 3 {
        let user = title_case(tokens[1]);
        let id = tokens[2];

        if session.book.find(&user).is_none() {
            print_reply(&format!("User '{}' does not exist.", tokens[1]));
            return Ok(None);
        }
        let notes = session.notes.get_all_user_notes(&user);
        let Some(note) = notes.get(id) else {
            print_reply(&format!("Note {} not found for {}.", id, user));
            return Ok(None);
        };

        println!("Current text: {}", note.text);
        prompt("Enter new text: ")?;
        let Some(text) = lines.next() else {
            return Ok(None);
        };
        return Ok(Some(format!("edit-note {} {} {}", user, id, text?.trim())));
    }

    Ok(Some(line.to_string()))
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush()?;
    Ok(())
}

fn print_reply(reply: &str) {
    let is_error = ["Error", "Sorry", "Unexpected", "Invalid", "User "]
        .iter()
        .any(|prefix| reply.starts_with(prefix));
    if is_error {
        println!("{}", reply.red());
    } else {
        println!("{}", reply);
    }
}
