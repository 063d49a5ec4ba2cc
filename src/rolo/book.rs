//! # Address Book
//!
//! A name-keyed store of [`Record`]s. Keys are title-cased (first letter
//! upper, the rest lower), which makes lookup, deletion and overwrite
//! case-insensitive: adding "john" and then "JOHN" touches the same entry.
//!
//! The map is private — callers only get the operations defined here, never
//! raw mutation of the underlying mapping.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{FieldKind, Record, DATE_FORMAT};

/// Canonical form for address-book (and notes) user keys.
pub fn title_case(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// One entry of the upcoming-birthdays query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    /// The stored birthday in its original `DD.MM.YYYY` rendering.
    pub birthday: String,
    /// The occurrence date shifted off weekends (Sat +2 days, Sun +1 day).
    pub congratulation_date: NaiveDate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    records: BTreeMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record under its title-cased name. An existing entry at
    /// that key is silently overwritten.
    pub fn add_record(&mut self, record: Record) {
        self.records.insert(title_case(record.name.as_str()), record);
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(&title_case(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(&title_case(name))
    }

    /// Removes the entry for `name`. Returns whether one was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.records.remove(&title_case(name)).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Case-insensitive substring search. With `field` set the match is
    /// restricted to that field; otherwise every field including the name
    /// is searched.
    pub fn search(&self, query: &str, field: Option<FieldKind>) -> Vec<&Record> {
        let needle = query.to_lowercase();
        self.records
            .values()
            .filter(|record| match field {
                Some(FieldKind::Phone) => phone_matches(record, &needle),
                Some(FieldKind::Birthday) => birthday_matches(record, &needle),
                Some(FieldKind::Email) => email_matches(record, &needle),
                Some(FieldKind::Address) => address_matches(record, &needle),
                None => {
                    record.name.as_str().to_lowercase().contains(&needle)
                        || phone_matches(record, &needle)
                        || birthday_matches(record, &needle)
                        || email_matches(record, &needle)
                        || address_matches(record, &needle)
                }
            })
            .collect()
    }

    /// Records whose birthday falls within the next `days_limit` days,
    /// counted from today.
    pub fn upcoming_birthdays(&self, days_limit: i64) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_from(Local::now().date_naive(), days_limit)
    }

    fn upcoming_birthdays_from(&self, today: NaiveDate, days_limit: i64) -> Vec<UpcomingBirthday> {
        let mut upcoming = Vec::new();
        for record in self.records.values() {
            let Some(birthday) = &record.birthday else {
                continue;
            };

            let mut occurrence = occurrence_in_year(birthday.date(), today.year());
            if occurrence < today {
                occurrence = occurrence_in_year(birthday.date(), today.year() + 1);
            }

            let offset = (occurrence - today).num_days();
            if offset < 0 || offset > days_limit {
                continue;
            }

            let congratulation_date = match occurrence.weekday() {
                Weekday::Sat => occurrence + Duration::days(2),
                Weekday::Sun => occurrence + Duration::days(1),
                _ => occurrence,
            };

            upcoming.push(UpcomingBirthday {
                name: record.name.as_str().to_string(),
                birthday: birthday.to_string(),
                congratulation_date,
            });
        }
        upcoming
    }
}

/// This year's occurrence of a birthday. Feb 29 falls back to Feb 28 in
/// non-leap years.
fn occurrence_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .expect("Feb 28 exists in every year")
}

fn phone_matches(record: &Record, needle: &str) -> bool {
    record.phones.iter().any(|p| p.as_str().contains(needle))
}

fn birthday_matches(record: &Record, needle: &str) -> bool {
    record
        .birthday
        .as_ref()
        .is_some_and(|b| b.to_string().contains(needle))
}

fn email_matches(record: &Record, needle: &str) -> bool {
    record
        .email
        .as_ref()
        .is_some_and(|e| e.as_str().to_lowercase().contains(needle))
}

fn address_matches(record: &Record, needle: &str) -> bool {
    record
        .address
        .as_ref()
        .is_some_and(|a| a.as_str().to_lowercase().contains(needle))
}

/// Formats a date the way birthdays are shown.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn record(name: &str) -> Record {
        Record::new(name).unwrap()
    }

    fn book_with_birthday(name: &str, birthday: &str) -> AddressBook {
        let mut book = AddressBook::new();
        let mut rec = record(name);
        rec.set_birthday(birthday).unwrap();
        book.add_record(rec);
        book
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("john"), "John");
        assert_eq!(title_case("JOHN"), "John");
        assert_eq!(title_case("jOhN"), "John");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let mut book = AddressBook::new();
        book.add_record(record("john"));

        for query in ["JOHN", "John", "john"] {
            assert!(book.find(query).is_some(), "query {:?} missed", query);
        }
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_case_variant_add_overwrites() {
        let mut book = AddressBook::new();
        let mut first = record("john");
        first.add_phone("0987654321").unwrap();
        book.add_record(first);

        book.add_record(record("JOHN"));

        assert_eq!(book.len(), 1);
        assert!(book.find("john").unwrap().phones.is_empty());
    }

    #[test]
    fn test_delete_normalizes_and_reports() {
        let mut book = AddressBook::new();
        book.add_record(record("john"));
        assert!(book.delete("JOHN"));
        assert!(!book.delete("john"));
        assert!(book.is_empty());
    }

    #[test]
    fn test_search_all_fields_and_restricted() {
        let mut book = AddressBook::new();
        let mut rec = record("John");
        rec.add_phone("0987654321").unwrap();
        rec.set_email("john@gmail.com").unwrap();
        rec.set_address("12 Main Street").unwrap();
        book.add_record(rec);
        book.add_record(record("Anna"));

        assert_eq!(book.search("jOhN", None).len(), 1);
        assert_eq!(book.search("9876", None).len(), 1);
        assert_eq!(book.search("main", Some(FieldKind::Address)).len(), 1);
        assert_eq!(book.search("9876", Some(FieldKind::Email)).len(), 0);
        assert!(book.search("nothing", None).is_empty());
    }

    #[test]
    fn test_upcoming_birthdays_window() {
        // Fixed Monday so weekday arithmetic is deterministic.
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        let mut book = AddressBook::new();
        for (name, birthday) in [
            ("Today", "02.06.1990"),
            ("Edge", "09.06.1990"),
            ("Past", "01.06.1990"),
            ("Far", "20.06.1990"),
        ] {
            let mut rec = record(name);
            rec.set_birthday(birthday).unwrap();
            book.add_record(rec);
        }

        let upcoming = book.upcoming_birthdays_from(today, 7);
        let names: Vec<&str> = upcoming.iter().map(|u| u.name.as_str()).collect();
        assert!(names.contains(&"Today"));
        assert!(names.contains(&"Edge"));
        assert!(!names.contains(&"Far"));
        // "Past" rolled forward to next year, outside the window.
        assert!(!names.contains(&"Past"));

        for entry in &upcoming {
            let offset = (entry.congratulation_date - today).num_days();
            assert!(offset >= 0);
            assert!(!matches!(
                entry.congratulation_date.weekday(),
                Weekday::Sat | Weekday::Sun
            ));
        }
    }

    #[test]
    fn test_congratulation_shifts_off_weekend() {
        // 2025-06-07 is a Saturday, 2025-06-08 a Sunday.
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

        let book = book_with_birthday("Sat", "07.06.1990");
        let upcoming = book.upcoming_birthdays_from(today, 7);
        assert_eq!(
            upcoming[0].congratulation_date,
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );

        let book = book_with_birthday("Sun", "08.06.1990");
        let upcoming = book.upcoming_birthdays_from(today, 7);
        assert_eq!(
            upcoming[0].congratulation_date,
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
        );
    }

    #[test]
    fn test_feb_29_falls_back_in_non_leap_years() {
        // 2025 is not a leap year.
        let today = NaiveDate::from_ymd_opt(2025, 2, 24).unwrap();
        let book = book_with_birthday("Leap", "29.02.2000");

        let upcoming = book.upcoming_birthdays_from(today, 5);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].birthday, "29.02.2000");

        let occurrence = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        // Feb 28 2025 is a Friday, so no weekend shift applies.
        assert_eq!(upcoming[0].congratulation_date, occurrence);
    }

    #[test]
    fn test_birthday_already_passed_rolls_forward() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let book = book_with_birthday("NewYear", "02.01.1990");

        let upcoming = book.upcoming_birthdays_from(today, 7);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].congratulation_date.year(), 2026);
    }

    #[test]
    fn test_book_serde_roundtrip() {
        let mut book = AddressBook::new();
        let mut rec = record("John");
        rec.add_phone("0987654321").unwrap();
        rec.set_birthday("15.06.1990").unwrap();
        book.add_record(rec);

        let json = serde_json::to_string(&book).unwrap();
        let loaded: AddressBook = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.len(), 1);
        let john = loaded.find("john").unwrap();
        assert_eq!(john.phones.len(), 1);
        assert_eq!(john.birthday.as_ref().unwrap().to_string(), "15.06.1990");
    }
}
