//! Test doubles for the storage collaborator and the user prompt.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use supanotes::models::{Draft, Note, NoteId, NotePatch};
use supanotes::prompt::Prompter;
use supanotes::remote::{ClientError, NoteStorage};

/// Timestamp for the `n`th fixture note, one day apart.
pub fn created_at(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 10, 0, 0).unwrap()
}

/// The clock handed to the store under test.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 12, 30, 0).unwrap()
}

pub fn note(id: i64, title: &str, content: &str) -> Note {
    Note {
        id: NoteId::Int(id),
        title: title.to_string(),
        content: content.to_string(),
        created_at: created_at(id as u32),
        updated_at: None,
    }
}

/// Three notes, newest first, as the table would list them.
pub fn three_notes() -> Vec<Note> {
    vec![
        note(3, "Third", "three"),
        note(2, "Second", "two"),
        note(1, "First", "one"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Insert(Draft),
    Update(NoteId, NotePatch),
    Delete(NoteId),
}

#[derive(Default)]
struct FakeState {
    rows: Vec<Note>,
    calls: Vec<Call>,
    failing: bool,
}

/// In-memory notes table that records every call.
#[derive(Clone, Default)]
pub struct FakeStorage {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStorage {
    pub fn with_rows(rows: Vec<Note>) -> Self {
        let storage = Self::default();
        storage.state.lock().unwrap().rows = rows;
        storage
    }

    /// Make every following call fail with a server error.
    pub fn fail(&self) {
        self.state.lock().unwrap().failing = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn rows(&self) -> Vec<Note> {
        self.state.lock().unwrap().rows.clone()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, FakeState>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ClientError::Server("500 Internal Server Error: boom".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl NoteStorage for FakeStorage {
    async fn list(&self) -> Result<Vec<Note>, ClientError> {
        let state = self.record(Call::List)?;
        let mut rows = state.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, draft: &Draft) -> Result<Note, ClientError> {
        let mut state = self.record(Call::Insert(draft.clone()))?;
        let next_id = state
            .rows
            .iter()
            .filter_map(|note| match note.id {
                NoteId::Int(id) => Some(id),
                NoteId::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;
        let note = Note {
            id: NoteId::Int(next_id),
            title: draft.title.clone(),
            content: draft.content.clone(),
            created_at: created_at(next_id as u32),
            updated_at: None,
        };
        state.rows.push(note.clone());
        Ok(note)
    }

    async fn update_by_id(&self, id: &NoteId, patch: &NotePatch) -> Result<(), ClientError> {
        let mut state = self.record(Call::Update(id.clone(), patch.clone()))?;
        for row in state.rows.iter_mut().filter(|row| &row.id == id) {
            row.title = patch.title.clone();
            row.content = patch.content.clone();
            row.updated_at = Some(patch.updated_at);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &NoteId) -> Result<(), ClientError> {
        let mut state = self.record(Call::Delete(id.clone()))?;
        state.rows.retain(|row| &row.id != id);
        Ok(())
    }
}

/// Prompter with a canned confirmation answer that remembers what it showed.
#[derive(Clone)]
pub struct RecordingPrompter {
    answer: bool,
    questions: Arc<Mutex<Vec<String>>>,
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            questions: Arc::default(),
            alerts: Arc::default(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
