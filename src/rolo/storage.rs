//! # Persistence
//!
//! Bulk JSON persistence of the two session documents: the address book
//! (`contacts.json`, name → record) and the notes store (`notes.json`,
//! user → id → note). Both load at session start and save at session end.
//!
//! A missing or structurally invalid document never fails startup: loading
//! substitutes an empty store and carries a warning for the shell to show.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::book::AddressBook;
use crate::error::{Result, RoloError};
use crate::notes::Notes;

const BOOK_FILENAME: &str = "contacts.json";
const NOTES_FILENAME: &str = "notes.json";

/// A loaded document plus the warning to surface when the on-disk copy had
/// to be discarded.
pub struct Loaded<T> {
    pub value: T,
    pub warning: Option<String>,
}

pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_book(&self) -> Loaded<AddressBook> {
        self.load_document(BOOK_FILENAME)
    }

    pub fn load_notes(&self) -> Loaded<Notes> {
        self.load_document(NOTES_FILENAME)
    }

    pub fn save_book(&self, book: &AddressBook) -> Result<()> {
        self.save_document(BOOK_FILENAME, book)
    }

    pub fn save_notes(&self, notes: &Notes) -> Result<()> {
        self.save_document(NOTES_FILENAME, notes)
    }

    fn load_document<T: Default + DeserializeOwned>(&self, filename: &str) -> Loaded<T> {
        let path = self.data_dir.join(filename);
        if !path.exists() {
            return Loaded {
                value: T::default(),
                warning: None,
            };
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                return Loaded {
                    value: T::default(),
                    warning: Some(format!(
                        "Warning: could not read {}: {}. Starting with empty data.",
                        path.display(),
                        e
                    )),
                }
            }
        };

        if content.trim().is_empty() {
            return Loaded {
                value: T::default(),
                warning: None,
            };
        }

        match serde_json::from_str(&content) {
            Ok(value) => Loaded {
                value,
                warning: None,
            },
            Err(e) => Loaded {
                value: T::default(),
                warning: Some(format!(
                    "Warning: {} is corrupted ({}). Starting with empty data.",
                    path.display(),
                    e
                )),
            },
        }
    }

    fn save_document<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(RoloError::Io)?;
        }
        let content = serde_json::to_string_pretty(value).map_err(RoloError::Serialization)?;
        fs::write(self.data_dir.join(filename), content).map_err(RoloError::Io)?;
        Ok(())
    }
}
