use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the notes table.
///
/// Tables keyed by `bigserial` hand back integers while `uuid` keyed tables
/// hand back strings, so both shapes are accepted and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Int(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl std::str::FromStr for NoteId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes [`NoteId::Int`], anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

/// A note as stored in the remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Null until the first save unless the table supplies a default.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Title and content of a note, either a new-note draft or edited fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

impl From<&Note> for Draft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }
}

/// Body of an update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}
