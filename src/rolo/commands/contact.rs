//! Contact command handlers: `add`, `all`, `show`, `find`, `delete`,
//! `update`, `remove` and `birthdays`.

use crate::book::{format_date, title_case};
use crate::commands::{unknown_field, Session, MSG_INSUFFICIENT_ARGS};
use crate::error::{Result, RoloError};
use crate::model::{FieldKind, Phone, Record};

/// `add <name>` / `add <name> <phone>` / `add <name> <field> <value...>`.
///
/// Creates the contact when missing (name capitalized at insertion), then
/// attaches the phone or field if one was given.
pub fn add(session: &mut Session, args: &[&str]) -> Result<String> {
    let name = args[0];

    // Validate a shorthand phone up front so a rejected number does not
    // leave an empty record behind.
    if args.len() == 2 && FieldKind::parse(args[1]).is_none() {
        session.config.check_phone(args[1])?;
        Phone::new(args[1])?;
    }

    let created = if session.book.find(name).is_none() {
        session.config.check_name(name)?;
        session.book.add_record(Record::new(&title_case(name))?);
        true
    } else {
        false
    };

    let field_message = if args.len() == 1 {
        None
    } else if let Some(kind) = FieldKind::parse(args[1]) {
        if args.len() < 3 {
            return Ok(MSG_INSUFFICIENT_ARGS.to_string());
        }
        Some(set_field(session, name, kind, &args[2..].join(" "), false)?)
    } else if args.len() == 2 {
        // `add <name> <phone>` shorthand.
        Some(set_field(session, name, FieldKind::Phone, args[1], false)?)
    } else {
        return Ok(unknown_field(args[1]));
    };

    Ok(match (created, field_message) {
        (true, _) => "Contact added.".to_string(),
        (false, Some(message)) => message,
        (false, None) => "Contact already exists.".to_string(),
    })
}

pub fn all(session: &mut Session, _args: &[&str]) -> Result<String> {
    if session.book.is_empty() {
        return Ok("No contacts".to_string());
    }
    let lines: Vec<String> = session.book.iter().map(|r| r.to_string()).collect();
    Ok(lines.join("\n"))
}

/// `show <name> [field]`.
pub fn show(session: &mut Session, args: &[&str]) -> Result<String> {
    let record = session.book.find(args[0]).ok_or(RoloError::ContactNotFound)?;
    if args.len() == 1 {
        return Ok(record.to_string());
    }

    let Some(kind) = FieldKind::parse(args[1]) else {
        return Ok(unknown_field(args[1]));
    };
    let reply = match kind {
        FieldKind::Phone => {
            if record.phones.is_empty() {
                "Sorry, phone number not found".to_string()
            } else {
                let phones: Vec<&str> = record.phones.iter().map(Phone::as_str).collect();
                format!("Phones: {}", phones.join("; "))
            }
        }
        FieldKind::Birthday => match &record.birthday {
            Some(birthday) => format!("Birthday: {}", birthday),
            None => "Sorry, birthday not found".to_string(),
        },
        FieldKind::Email => match &record.email {
            Some(email) => format!("Email: {}", email),
            None => "Sorry, email not found".to_string(),
        },
        FieldKind::Address => match &record.address {
            Some(address) => format!("Address: {}", address),
            None => "Sorry, address not found".to_string(),
        },
    };
    Ok(reply)
}

/// `find <query> [field]` — case-insensitive substring search, over every
/// field (including the name) or restricted to one.
pub fn find(session: &mut Session, args: &[&str]) -> Result<String> {
    let query = args[0];
    let field = if args.len() >= 2 {
        match FieldKind::parse(args[1]) {
            Some(kind) => Some(kind),
            None => return Ok(unknown_field(args[1])),
        }
    } else {
        None
    };

    let matches = session.book.search(query, field);
    if matches.is_empty() {
        return Ok(format!("No contacts found matching '{}'.", query));
    }
    let lines: Vec<String> = matches.iter().map(|r| r.to_string()).collect();
    Ok(lines.join("\n"))
}

pub fn delete(session: &mut Session, args: &[&str]) -> Result<String> {
    if session.book.delete(args[0]) {
        Ok("Contact deleted.".to_string())
    } else {
        Err(RoloError::ContactNotFound)
    }
}

/// `update <name> <field> <value...>`; phones take `<old> <new>`.
pub fn update(session: &mut Session, args: &[&str]) -> Result<String> {
    let name = args[0];
    let Some(kind) = FieldKind::parse(args[1]) else {
        return Ok(unknown_field(args[1]));
    };

    if kind == FieldKind::Phone {
        if args.len() < 4 {
            return Ok(MSG_INSUFFICIENT_ARGS.to_string());
        }
        return update_phone(session, name, args[2], args[3]);
    }

    set_field(session, name, kind, &args[2..].join(" "), true)
}

fn update_phone(session: &mut Session, name: &str, old: &str, new: &str) -> Result<String> {
    // Validate the replacement before touching the record so a failed
    // update leaves the old number in place.
    session.config.check_phone(new)?;
    Phone::new(new)?;

    let record = session
        .book
        .find_mut(name)
        .ok_or(RoloError::ContactNotFound)?;
    if new != old && record.phones.iter().any(|p| p.as_str() == new) {
        return Err(RoloError::PhoneExists);
    }
    if !record.remove_phone(old) {
        return Ok("Sorry, phone number not found".to_string());
    }
    record.add_phone(new)?;
    Ok("Phone updated.".to_string())
}

/// `remove <name> <field> [value]`; phones name the number to drop.
pub fn remove(session: &mut Session, args: &[&str]) -> Result<String> {
    let name = args[0];
    let Some(kind) = FieldKind::parse(args[1]) else {
        return Ok(unknown_field(args[1]));
    };

    let record = session
        .book
        .find_mut(name)
        .ok_or(RoloError::ContactNotFound)?;
    let reply = match kind {
        FieldKind::Phone => {
            let Some(value) = args.get(2) else {
                return Ok(MSG_INSUFFICIENT_ARGS.to_string());
            };
            if record.remove_phone(value) {
                "Phone removed."
            } else {
                "Sorry, phone number not found"
            }
        }
        FieldKind::Birthday => {
            if record.clear_birthday() {
                "Birthday removed."
            } else {
                "Sorry, birthday not found"
            }
        }
        FieldKind::Email => {
            if record.clear_email() {
                "Email removed."
            } else {
                "Sorry, email not found"
            }
        }
        FieldKind::Address => {
            if record.clear_address() {
                "Address removed."
            } else {
                "Sorry, address not found"
            }
        }
    };
    Ok(reply.to_string())
}

/// `birthdays <days>` — the shell prompts for the day count when it is
/// missing, so by dispatch time it is always present.
pub fn birthdays(session: &mut Session, args: &[&str]) -> Result<String> {
    let Ok(days) = args[0].parse::<i64>() else {
        return Ok(format!("'{}' is not a valid number of days.", args[0]));
    };

    let upcoming = session.book.upcoming_birthdays(days);
    if upcoming.is_empty() {
        return Ok(format!("No upcoming birthdays in the next {} days.", days));
    }

    let mut lines = vec![format!("Upcoming birthdays in the next {} days:", days)];
    for entry in &upcoming {
        lines.push(format!(
            "{}: birthday {}, congratulate on {}",
            entry.name,
            entry.birthday,
            format_date(entry.congratulation_date)
        ));
    }
    Ok(lines.join("\n"))
}

fn set_field(
    session: &mut Session,
    name: &str,
    kind: FieldKind,
    value: &str,
    updating: bool,
) -> Result<String> {
    if kind == FieldKind::Phone {
        session.config.check_phone(value)?;
    }
    let record = session
        .book
        .find_mut(name)
        .ok_or(RoloError::ContactNotFound)?;
    let message = match kind {
        FieldKind::Phone => {
            record.add_phone(value)?;
            if updating {
                "Phone updated."
            } else {
                "Phone added."
            }
        }
        FieldKind::Birthday => {
            record.set_birthday(value)?;
            if updating {
                "Birthday updated."
            } else {
                "Birthday added."
            }
        }
        FieldKind::Email => {
            record.set_email(value)?;
            if updating {
                "Email updated."
            } else {
                "Email added."
            }
        }
        FieldKind::Address => {
            record.set_address(value)?;
            if updating {
                "Address updated."
            } else {
                "Address added."
            }
        }
    };
    Ok(message.to_string())
}
