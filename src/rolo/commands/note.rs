//! Note command handlers: `add-note`, `edit-note`, `delete-note`,
//! `all-notes`, `find-notes`, `find-tag` and `sort-notes`.
//!
//! The user-keyed commands run behind the dispatcher's contact-existence
//! precheck; user keys are title-cased so they line up with address-book
//! keys.

use crate::book::title_case;
use crate::commands::{Session, MSG_INSUFFICIENT_ARGS};
use crate::error::Result;
use crate::notes::{numeric_id, Note};

/// `add-note <user> [tag=<tag>] <text...>`.
pub fn add_note(session: &mut Session, args: &[&str]) -> Result<String> {
    let user = title_case(args[0]);

    let (tag, text_args) = match args[1].strip_prefix("tag=") {
        Some(tag) => (Some(tag), &args[2..]),
        None => (None, &args[1..]),
    };
    if text_args.is_empty() {
        return Ok(MSG_INSUFFICIENT_ARGS.to_string());
    }

    let text = text_args.join(" ");
    let id = session.notes.add_note(&user, &text, tag);
    Ok(format!("Note {} added for {}.", id, user))
}

/// `edit-note <user> <id> <text...>` — the shell collects the replacement
/// text before dispatch.
pub fn edit_note(session: &mut Session, args: &[&str]) -> Result<String> {
    let user = title_case(args[0]);
    let id = args[1];
    let text = args[2..].join(" ");

    match session.notes.edit_note(&user, id, &text) {
        Some(id) => Ok(format!("Note {} updated.", id)),
        None => Ok(format!("Note {} not found for {}.", id, user)),
    }
}

/// `delete-note <user> <id>`.
pub fn delete_note(session: &mut Session, args: &[&str]) -> Result<String> {
    let user = title_case(args[0]);
    let id = args[1];

    if session.notes.delete_note(&user, id) {
        Ok(format!("Note {} deleted.", id))
    } else {
        Ok(format!("Note {} not found for {}.", id, user))
    }
}

/// `all-notes <user>`.
pub fn all_notes(session: &mut Session, args: &[&str]) -> Result<String> {
    let user = title_case(args[0]);
    let notes = session.notes.get_all_user_notes(&user);
    if notes.is_empty() {
        return Ok(format!("No notes for {}.", user));
    }

    let mut entries: Vec<(String, Note)> = notes.into_iter().collect();
    entries.sort_by_key(|(id, _)| numeric_id(id));

    let mut lines = vec![format!("Notes for {}:", user)];
    for (id, note) in entries {
        lines.push(format_note_line(&id, &note.text, note.tag.as_deref()));
    }
    Ok(lines.join("\n"))
}

/// `find-notes <fragment...>` — case-sensitive substring search across all
/// users.
pub fn find_notes(session: &mut Session, args: &[&str]) -> Result<String> {
    let fragment = args.join(" ");
    let hits = session.notes.find_notes(&fragment);
    if hits.is_empty() {
        return Ok(format!("No notes found containing '{}'.", fragment));
    }

    let mut users: Vec<&String> = hits.keys().collect();
    users.sort();

    let mut lines = Vec::new();
    for user in users {
        lines.push(format!("{}:", user));
        for hit in &hits[user] {
            lines.push(format!(
                "  {}",
                format_note_line(&hit.id, &hit.text, hit.tag.as_deref())
            ));
        }
    }
    Ok(lines.join("\n"))
}

/// `find-tag <tag>` — exact tag match across all users.
pub fn find_tag(session: &mut Session, args: &[&str]) -> Result<String> {
    let tag = args[0];
    let found = session.notes.find_by_tag(tag);
    if found.is_empty() {
        return Ok(format!("No notes found with tag '{}'.", tag));
    }

    let mut lines = vec![format!("Notes tagged '{}':", tag)];
    for note in found {
        lines.push(format!("  {} {}: {}", note.user, note.id, note.text));
    }
    Ok(lines.join("\n"))
}

/// `sort-notes` — every note grouped by tag, tags in sorted order, untagged
/// notes under the "No tag" group.
pub fn sort_notes(session: &mut Session, _args: &[&str]) -> Result<String> {
    let groups = session.notes.group_by_tag();
    if groups.is_empty() {
        return Ok("No notes yet.".to_string());
    }

    let mut lines = Vec::new();
    for (tag, notes) in groups {
        lines.push(format!("{}:", tag));
        for note in notes {
            lines.push(format!("  {} {}: {}", note.user, note.id, note.text));
        }
    }
    Ok(lines.join("\n"))
}

fn format_note_line(id: &str, text: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) if !tag.is_empty() => format!("{}: {} [tag: {}]", id, text, tag),
        _ => format!("{}: {}", id, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{reply, test_session};
    use crate::notes::NO_TAG;

    fn session_with_contacts(names: &[&str]) -> crate::commands::Session {
        let mut session = test_session();
        for name in names {
            reply(&mut session, &format!("add {}", name));
        }
        session
    }

    #[test]
    fn test_add_note_with_tag() {
        let mut session = session_with_contacts(&["Anna"]);
        assert_eq!(
            reply(&mut session, "add-note Anna tag=work Finish report"),
            "Note 1 added for Anna."
        );

        let notes = session.notes.get_all_user_notes("Anna");
        assert_eq!(notes["1"].text, "Finish report");
        assert_eq!(notes["1"].tag.as_deref(), Some("work"));
    }

    #[test]
    fn test_add_note_without_tag_joins_text() {
        let mut session = session_with_contacts(&["Anna"]);
        reply(&mut session, "add-note Anna Buy some milk");
        let notes = session.notes.get_all_user_notes("Anna");
        assert_eq!(notes["1"].text, "Buy some milk");
        assert!(notes["1"].tag.is_none());
    }

    #[test]
    fn test_add_note_tag_but_no_text_is_insufficient() {
        let mut session = session_with_contacts(&["Anna"]);
        assert_eq!(
            reply(&mut session, "add-note Anna tag=work"),
            MSG_INSUFFICIENT_ARGS
        );
        assert!(session.notes.is_empty());
    }

    #[test]
    fn test_note_user_keys_follow_contact_casing() {
        let mut session = session_with_contacts(&["Anna"]);
        reply(&mut session, "add-note anna First");
        reply(&mut session, "add-note ANNA Second");
        assert_eq!(session.notes.get_all_user_notes("Anna").len(), 2);
    }

    #[test]
    fn test_edit_note_keeps_tag() {
        let mut session = session_with_contacts(&["Anna"]);
        reply(&mut session, "add-note Anna tag=work Draft");
        assert_eq!(reply(&mut session, "edit-note Anna 1 Final text"), "Note 1 updated.");

        let notes = session.notes.get_all_user_notes("Anna");
        assert_eq!(notes["1"].text, "Final text");
        assert_eq!(notes["1"].tag.as_deref(), Some("work"));
    }

    #[test]
    fn test_delete_missing_note_reports_and_keeps_store() {
        let mut session = session_with_contacts(&["Anna"]);
        reply(&mut session, "add-note Anna Keep me");
        assert_eq!(
            reply(&mut session, "delete-note Anna 99"),
            "Note 99 not found for Anna."
        );
        assert_eq!(session.notes.get_all_user_notes("Anna").len(), 1);

        assert_eq!(reply(&mut session, "delete-note Anna 1"), "Note 1 deleted.");
        assert!(session.notes.is_empty());
    }

    #[test]
    fn test_all_notes_sorted_numerically() {
        let mut session = session_with_contacts(&["Anna"]);
        for i in 0..11 {
            reply(&mut session, &format!("add-note Anna Note number {}", i));
        }

        let listing = reply(&mut session, "all-notes Anna");
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Notes for Anna:");
        assert!(lines[1].starts_with("1:"));
        // "10" must sort after "9", not between "1" and "2".
        assert!(lines[10].starts_with("10:"));
        assert!(lines[11].starts_with("11:"));
    }

    #[test]
    fn test_all_notes_empty() {
        let mut session = session_with_contacts(&["Anna"]);
        assert_eq!(reply(&mut session, "all-notes Anna"), "No notes for Anna.");
    }

    #[test]
    fn test_find_notes_across_users() {
        let mut session = session_with_contacts(&["Anna", "John"]);
        reply(&mut session, "add-note Anna tag=work Finish report");
        reply(&mut session, "add-note John Report for standup");

        let hits = reply(&mut session, "find-notes report");
        assert!(hits.contains("John:"));
        assert!(!hits.contains("Anna:"));

        assert_eq!(
            reply(&mut session, "find-notes nothing here"),
            "No notes found containing 'nothing here'."
        );
    }

    #[test]
    fn test_find_tag_hits_and_misses() {
        let mut session = session_with_contacts(&["Anna"]);
        reply(&mut session, "add-note Anna tag=work Finish report");

        let hits = reply(&mut session, "find-tag work");
        assert!(hits.contains("Anna 1: Finish report"));

        assert_eq!(
            reply(&mut session, "find-tag missing"),
            "No notes found with tag 'missing'."
        );
    }

    #[test]
    fn test_sort_notes_groups_by_tag() {
        let mut session = session_with_contacts(&["Anna", "John"]);
        reply(&mut session, "add-note Anna tag=work Finish report");
        reply(&mut session, "add-note John Buy milk");

        let grouped = reply(&mut session, "sort-notes");
        let no_tag_pos = grouped.find(NO_TAG).unwrap();
        let work_pos = grouped.find("work:").unwrap();
        // BTreeMap ordering: "No tag" sorts before lowercase tags.
        assert!(no_tag_pos < work_pos);
        assert!(grouped.contains("John 1: Buy milk"));
        assert!(grouped.contains("Anna 1: Finish report"));

        let mut empty = test_session();
        assert_eq!(reply(&mut empty, "sort-notes"), "No notes yet.");
    }
}
