//! Captured notes, tasks and other classified text.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::ids::{EntryId, MemberId};

/// Kind of thing a piece of text describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Task,
    Idea,
    Shopping,
    #[default]
    Note,
    Meeting,
    Reflection,
    Contact,
    Event,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Task,
        Category::Idea,
        Category::Shopping,
        Category::Note,
        Category::Meeting,
        Category::Reflection,
        Category::Contact,
        Category::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Idea => "idea",
            Self::Shopping => "shopping",
            Self::Note => "note",
            Self::Meeting => "meeting",
            Self::Reflection => "reflection",
            Self::Contact => "contact",
            Self::Event => "event",
        }
    }

    /// Parses a category name; anything unrecognized is a note.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Classified text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub category: Category,
    pub title: String,
    pub summary: String,
    /// Category-specific fields (priority, attendees, due date, ...).
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// The text as the user wrote it.
    pub raw_input: String,
}

/// An entry saved for a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedEntry {
    pub id: EntryId,
    pub member_id: MemberId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub entry: Entry,
}

impl CapturedEntry {
    pub fn new(member_id: MemberId, entry: Entry) -> Self {
        Self {
            id: EntryId::new(),
            member_id,
            created_at: Utc::now(),
            entry,
        }
    }
}
