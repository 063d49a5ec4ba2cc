//! The `help` command: an overview of the command surface plus per-command
//! usage texts.

use crate::commands::Session;
use crate::error::Result;

pub const MAIN_HELP: &str = "\
** Available Commands **

- help <command>                     Show help for a specific command

[Contact Management]
- hello                              Display a greeting
- add <name>                         Add a new contact
  - add <name> <phone>               Add contact with phone
  - add <name> <field> <value>       Add field to contact (phone, email, address, birthday)
- all                                Show all contacts
- show <name> [field]                Show contact details
- find <query> [field]               Search contacts (case insensitive)
- delete <name>                      Delete a contact
- update <name> <field> <value>      Update contact field
- remove <name> <field> [value]      Remove field from contact
- birthdays                          Show upcoming birthdays

[Note Management]
- add-note <user> tag=<tag> <text>   Add a new note for a user
- edit-note <user> <id>              Edit existing note
- find-notes <keyword>               Search notes by keyword
- find-tag <tag>                     Find notes by tag
- sort-notes                         Show notes grouped by tag
- all-notes <user>                   Show all notes for a user
- delete-note <user> <id>            Delete a note

[Exit]
- close / exit                       Exit the application";

/// `help [<command>]`.
pub fn help(_session: &mut Session, args: &[&str]) -> Result<String> {
    let Some(command) = args.first() else {
        return Ok(MAIN_HELP.to_string());
    };
    match help_for(&command.to_lowercase()) {
        Some(text) => Ok(text.to_string()),
        None => Ok(format!("No help available for '{}'.", command)),
    }
}

fn help_for(command: &str) -> Option<&'static str> {
    let text = match command {
        "add" => {
            "Usage:
  add <name>
  add <name> <phone>
  add <name> <field> <value>

Adds a new contact, or adds a field to an existing one.

Examples:
  add John
  add John 0987654321
  add John email john@gmail.com"
        }
        "all" => "Usage:\n  all\n\nShows every contact in the address book.",
        "show" => {
            "Usage:
  show <name>
  show <name> <field>

Displays a contact, or just one of its fields."
        }
        "find" => {
            "Usage:
  find <query>           Search in all fields
  find <query> <field>   Search only the given field (phone, email, address, birthday)

Examples:
  find 0987654321
  find 0987654321 phone"
        }
        "delete" => "Usage:\n  delete <name>\n\nRemoves the contact entirely.",
        "update" => {
            "Usage:
  update <name> <field> <value>
  update <name> phone <old_number> <new_number>

Updates an existing field. Updating a phone names both the old and the
new number.

Examples:
  update John birthday 12.11.2000
  update John phone 3333333333 5555555555"
        }
        "remove" => {
            "Usage:
  remove <name> <field>
  remove <name> phone <number>

Removes a field from a contact. Removing a phone names the number to drop.

Examples:
  remove John birthday
  remove John phone 0987654321"
        }
        "birthdays" => {
            "Usage:
  birthdays [<days>]

Shows contacts with birthdays in the next <days> days, together with the
weekend-adjusted congratulation date. Prompts for the day count when it is
not given."
        }
        "add-note" => {
            "Usage:
  add-note <user> <text>
  add-note <user> tag=<tag> <text>

Creates a note for the user and reports its ID.

Examples:
  add-note John Buy milk
  add-note Anna tag=work Finish the report"
        }
        "edit-note" => {
            "Usage:
  edit-note <user> <id>

Replaces the text of an existing note. The current text is shown and a
replacement is prompted for; the tag is kept."
        }
        "find-notes" => {
            "Usage:
  find-notes <keyword>

Shows every note containing the keyword (case sensitive), grouped by user."
        }
        "find-tag" => {
            "Usage:
  find-tag <tag>

Shows every note carrying exactly the given tag."
        }
        "sort-notes" => {
            "Usage:
  sort-notes

Shows all notes grouped by tag, tags in sorted order; untagged notes fall
under \"No tag\"."
        }
        "all-notes" => "Usage:\n  all-notes <user>\n\nShows every note belonging to the user.",
        "delete-note" => {
            "Usage:
  delete-note <user> <id>

Deletes one of the user's notes by ID."
        }
        "hello" => "Usage:\n  hello\n\nSays hello back.",
        "help" => "Usage:\n  help [<command>]\n\nYou are here.",
        _ => return None,
    };
    Some(text)
}
