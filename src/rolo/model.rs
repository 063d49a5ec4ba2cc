//! # Domain Model: Validated Fields and the Contact Record
//!
//! Every scalar attached to a contact is a newtype whose constructor is the
//! *only* way to produce a value. Once a `Phone` (or `Birthday`, `Email`, …)
//! exists, its contents have passed validation — the rest of the crate never
//! re-checks field formats.
//!
//! ## Validation rules
//!
//! - **Name**: non-empty, a single token of alphabetic characters. Stored
//!   trimmed, case preserved.
//! - **Phone**: exactly 10 ASCII digits, stored verbatim.
//! - **Birthday**: strict `DD.MM.YYYY` calendar date. Stored as a date and
//!   formatted back through the same pattern, so parse/format round-trips.
//! - **Email**: `localpart@domain.tld` shape; the local part starts
//!   alphanumeric and the final domain label has at least two letters.
//! - **Address**: non-empty, stored trimmed.
//!
//! ## Loading persisted data
//!
//! `Record` has a hand-written `Deserialize` that funnels every field back
//! through its constructor. A corrupted document fails loudly at load time
//! instead of smuggling bad data into the book.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{Result, RoloError};

/// Display and persistence pattern for birthdays.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._%+-]*@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RoloError::EmptyName);
        }
        if !trimmed.chars().all(char::is_alphabetic) {
            return Err(RoloError::InvalidName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: &str) -> Result<Self> {
        if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RoloError::InvalidPhone);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn new(value: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| RoloError::InvalidDate)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

// Birthdays persist as their display text, not as chrono's default encoding.
impl Serialize for Birthday {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(RoloError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RoloError::EmptyAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field keywords accepted by `add`/`update`/`remove`/`show`/`find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Phone,
    Birthday,
    Email,
    Address,
}

impl FieldKind {
    /// Case-insensitive keyword lookup. `None` means an unknown field name,
    /// which callers report as a message rather than an error.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "phone" | "phones" => Some(Self::Phone),
            "birthday" => Some(Self::Birthday),
            "email" => Some(Self::Email),
            "address" => Some(Self::Address),
            _ => None,
        }
    }
}

/// One contact: a name plus an ordered list of unique phones and optional
/// singleton birthday/email/address.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub name: Name,
    pub phones: Vec<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Birthday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            birthday: None,
            email: None,
            address: None,
        })
    }

    /// Appends a validated phone. Rejects a value already on the record.
    pub fn add_phone(&mut self, value: &str) -> Result<()> {
        let phone = Phone::new(value)?;
        if self.phones.contains(&phone) {
            return Err(RoloError::PhoneExists);
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Removes the first phone with a matching value. Returns whether a
    /// removal occurred.
    pub fn remove_phone(&mut self, value: &str) -> bool {
        match self.phones.iter().position(|p| p.as_str() == value) {
            Some(pos) => {
                self.phones.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Replaces the birthday, last write wins.
    pub fn set_birthday(&mut self, value: &str) -> Result<()> {
        self.birthday = Some(Birthday::new(value)?);
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> Result<()> {
        self.email = Some(Email::new(value)?);
        Ok(())
    }

    pub fn set_address(&mut self, value: &str) -> Result<()> {
        self.address = Some(Address::new(value)?);
        Ok(())
    }

    pub fn clear_birthday(&mut self) -> bool {
        self.birthday.take().is_some()
    }

    pub fn clear_email(&mut self) -> bool {
        self.email.take().is_some()
    }

    pub fn clear_address(&mut self) -> bool {
        self.address.take().is_some()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact name: {}", self.name)?;
        if !self.phones.is_empty() {
            let phones: Vec<&str> = self.phones.iter().map(Phone::as_str).collect();
            write!(f, ", phones: {}", phones.join("; "))?;
        }
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {}", birthday)?;
        }
        if let Some(email) = &self.email {
            write!(f, ", email: {}", email)?;
        }
        if let Some(address) = &self.address {
            write!(f, ", address: {}", address)?;
        }
        Ok(())
    }
}

// Deserialization re-runs full validation on every field so a hand-edited or
// corrupted document fails at load time.
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = RecordHelper::deserialize(deserializer)?;

        let mut record = Record::new(&helper.name).map_err(D::Error::custom)?;
        for phone in &helper.phones {
            record.add_phone(phone).map_err(D::Error::custom)?;
        }
        if let Some(birthday) = &helper.birthday {
            record.set_birthday(birthday).map_err(D::Error::custom)?;
        }
        if let Some(email) = &helper.email {
            record.set_email(email).map_err(D::Error::custom)?;
        }
        if let Some(address) = &helper.address {
            record.set_address(address).map_err(D::Error::custom)?;
        }
        Ok(record)
    }
}

#[derive(Deserialize)]
struct RecordHelper {
    name: String,
    #[serde(default)]
    phones: Vec<String>,
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_ten_digits() {
        assert!(Phone::new("0987654321").is_ok());
    }

    #[test]
    fn test_phone_rejects_other_shapes() {
        for bad in ["098765432", "09876543211", "098765432a", "", "098 65432"] {
            assert!(matches!(Phone::new(bad), Err(RoloError::InvalidPhone)));
        }
    }

    #[test]
    fn test_birthday_roundtrips_through_format() {
        for text in ["01.01.2000", "29.02.2020", "31.12.1999"] {
            let birthday = Birthday::new(text).unwrap();
            assert_eq!(birthday.to_string(), text);
        }
    }

    #[test]
    fn test_birthday_rejects_invalid_calendar_dates() {
        for bad in ["32.01.2020", "29.02.2021", "13.13.2020", "2020-01-01", "abc"] {
            assert!(matches!(Birthday::new(bad), Err(RoloError::InvalidDate)));
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::new("john@gmail.com").is_ok());
        assert!(Email::new("j.doe+tag@mail.example.org").is_ok());
        for bad in ["john", "john@", "@gmail.com", "john@gmail", "john@gmail.c"] {
            assert!(matches!(Email::new(bad), Err(RoloError::InvalidEmail)));
        }
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(Name::new("  John ").unwrap().as_str(), "John");
        assert!(matches!(Name::new("   "), Err(RoloError::EmptyName)));
        assert!(matches!(Name::new("John2"), Err(RoloError::InvalidName)));
        assert!(matches!(Name::new("John Doe"), Err(RoloError::InvalidName)));
    }

    #[test]
    fn test_address_validation() {
        assert_eq!(Address::new(" 1 Main St ").unwrap().as_str(), "1 Main St");
        assert!(matches!(Address::new("  "), Err(RoloError::EmptyAddress)));
    }

    #[test]
    fn test_duplicate_phone_rejected_and_list_unchanged() {
        let mut record = Record::new("John").unwrap();
        record.add_phone("0987654321").unwrap();
        assert!(matches!(
            record.add_phone("0987654321"),
            Err(RoloError::PhoneExists)
        ));
        assert_eq!(record.phones.len(), 1);
    }

    #[test]
    fn test_remove_phone_reports_outcome() {
        let mut record = Record::new("John").unwrap();
        record.add_phone("0987654321").unwrap();
        assert!(record.remove_phone("0987654321"));
        assert!(!record.remove_phone("0987654321"));
        assert!(record.phones.is_empty());
    }

    #[test]
    fn test_singletons_last_write_wins() {
        let mut record = Record::new("John").unwrap();
        record.set_email("old@mail.com").unwrap();
        record.set_email("new@mail.com").unwrap();
        assert_eq!(record.email.as_ref().unwrap().as_str(), "new@mail.com");
    }

    #[test]
    fn test_display_omits_absent_fields() {
        let mut record = Record::new("John").unwrap();
        assert_eq!(record.to_string(), "Contact name: John");

        record.add_phone("0987654321").unwrap();
        record.add_phone("1112223344").unwrap();
        record.set_birthday("15.06.1990").unwrap();
        assert_eq!(
            record.to_string(),
            "Contact name: John, phones: 0987654321; 1112223344, birthday: 15.06.1990"
        );
    }

    #[test]
    fn test_record_serde_roundtrip_all_fields() {
        let mut record = Record::new("John").unwrap();
        record.add_phone("0987654321").unwrap();
        record.set_birthday("29.02.2000").unwrap();
        record.set_email("john@gmail.com").unwrap();
        record.set_address("1 Main St").unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let loaded: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.name, record.name);
        assert_eq!(loaded.phones, record.phones);
        assert_eq!(loaded.birthday, record.birthday);
        assert_eq!(loaded.email, record.email);
        assert_eq!(loaded.address, record.address);
    }

    #[test]
    fn test_record_deserialize_revalidates() {
        let json = r#"{"name": "John", "phones": ["not-a-phone"]}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());

        let json = r#"{"name": "John", "birthday": "99.99.9999"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_record_deserialize_missing_optionals() {
        let loaded: Record = serde_json::from_str(r#"{"name": "John"}"#).unwrap();
        assert!(loaded.phones.is_empty());
        assert!(loaded.birthday.is_none());
        assert!(loaded.email.is_none());
        assert!(loaded.address.is_none());
    }

    #[test]
    fn test_field_kind_keywords() {
        assert_eq!(FieldKind::parse("Phone"), Some(FieldKind::Phone));
        assert_eq!(FieldKind::parse("phones"), Some(FieldKind::Phone));
        assert_eq!(FieldKind::parse("BIRTHDAY"), Some(FieldKind::Birthday));
        assert_eq!(FieldKind::parse("email"), Some(FieldKind::Email));
        assert_eq!(FieldKind::parse("address"), Some(FieldKind::Address));
        assert_eq!(FieldKind::parse("nickname"), None);
    }
}
