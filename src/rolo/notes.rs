//! # Notes Store
//!
//! A user-keyed store of note collections. Note IDs are per-user strings of
//! sequential positive integers: the next ID is always `max(existing) + 1`,
//! so an ID is never reused within a user even after deletions.
//!
//! Notes relate to contacts only by user-name string. The store holds no
//! reference into the address book; the dispatcher's existence precheck is
//! what ties the two together.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Group key for notes without a tag (or with an empty one).
pub const NO_TAG: &str = "No tag";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A search hit from [`Notes::find_notes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMatch {
    pub id: String,
    pub text: String,
    pub tag: Option<String>,
}

/// A note paired with its owner, as produced by tag queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedNote {
    pub user: String,
    pub id: String,
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes {
    users: HashMap<String, HashMap<String, Note>>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a note under the next sequential ID for `user` and returns
    /// that ID.
    pub fn add_note(&mut self, user: &str, text: &str, tag: Option<&str>) -> String {
        let user_notes = self.users.entry(user.to_string()).or_default();
        let id = next_id(user_notes);
        user_notes.insert(
            id.clone(),
            Note {
                text: text.to_string(),
                tag: tag.filter(|t| !t.is_empty()).map(str::to_string),
            },
        );
        id
    }

    /// Replaces the text of an existing note, leaving its tag untouched.
    /// Returns the ID on success, `None` if the user/ID pair is unknown.
    pub fn edit_note(&mut self, user: &str, id: &str, new_text: &str) -> Option<String> {
        let note = self.users.get_mut(user)?.get_mut(id)?;
        note.text = new_text.to_string();
        Some(id.to_string())
    }

    /// Removes a note. Returns whether a removal occurred.
    pub fn delete_note(&mut self, user: &str, id: &str) -> bool {
        self.users
            .get_mut(user)
            .is_some_and(|notes| notes.remove(id).is_some())
    }

    /// The user's note mapping; an unknown user yields an empty mapping.
    pub fn get_all_user_notes(&self, user: &str) -> HashMap<String, Note> {
        self.users.get(user).cloned().unwrap_or_default()
    }

    /// Case-sensitive substring search over every note's text across all
    /// users. Users with no matches are omitted.
    pub fn find_notes(&self, fragment: &str) -> HashMap<String, Vec<NoteMatch>> {
        let mut result: HashMap<String, Vec<NoteMatch>> = HashMap::new();
        for (user, notes) in &self.users {
            let mut matches: Vec<NoteMatch> = notes
                .iter()
                .filter(|(_, note)| note.text.contains(fragment))
                .map(|(id, note)| NoteMatch {
                    id: id.clone(),
                    text: note.text.clone(),
                    tag: note.tag.clone(),
                })
                .collect();
            if !matches.is_empty() {
                matches.sort_by_key(|m| numeric_id(&m.id));
                result.insert(user.clone(), matches);
            }
        }
        result
    }

    /// Notes whose tag equals `tag` exactly, across all users.
    pub fn find_by_tag(&self, tag: &str) -> Vec<TaggedNote> {
        let mut found: Vec<TaggedNote> = self
            .users
            .iter()
            .flat_map(|(user, notes)| {
                notes
                    .iter()
                    .filter(|(_, note)| note.tag.as_deref() == Some(tag))
                    .map(|(id, note)| TaggedNote {
                        user: user.clone(),
                        id: id.clone(),
                        text: note.text.clone(),
                    })
            })
            .collect();
        found.sort_by(|a, b| (&a.user, numeric_id(&a.id)).cmp(&(&b.user, numeric_id(&b.id))));
        found
    }

    /// Every note grouped by tag value, with absent or empty tags under the
    /// [`NO_TAG`] sentinel. Groups come back in tag order.
    pub fn group_by_tag(&self) -> BTreeMap<String, Vec<TaggedNote>> {
        let mut groups: BTreeMap<String, Vec<TaggedNote>> = BTreeMap::new();
        for (user, notes) in &self.users {
            for (id, note) in notes {
                let tag = match note.tag.as_deref() {
                    Some(tag) if !tag.is_empty() => tag.to_string(),
                    _ => NO_TAG.to_string(),
                };
                groups.entry(tag).or_default().push(TaggedNote {
                    user: user.clone(),
                    id: id.clone(),
                    text: note.text.clone(),
                });
            }
        }
        for group in groups.values_mut() {
            group.sort_by(|a, b| (&a.user, numeric_id(&a.id)).cmp(&(&b.user, numeric_id(&b.id))));
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.users.values().all(HashMap::is_empty)
    }
}

fn next_id(notes: &HashMap<String, Note>) -> String {
    let max = notes.keys().filter_map(|id| id.parse::<u64>().ok()).max();
    match max {
        Some(n) => (n + 1).to_string(),
        None => "1".to_string(),
    }
}

/// Sort key treating note IDs as integers so "10" sorts after "2".
pub fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(u64::MAX)
}
