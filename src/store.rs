//! In-memory note list kept in step with the remote table.
//!
//! [`NoteStore`] owns the rendered state: the notes (newest first), the
//! new-note draft, the note under edit and the loading flag. Every mutation
//! goes to storage first; local state only changes once storage reports
//! success, and then the whole reconciliation step is applied at once.
//!
//! Failures are logged, shown through [`Prompter::alert`] and returned. They
//! never leave the store half-updated.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Draft, Note, NoteId, NotePatch};
use crate::prompt::Prompter;
use crate::remote::{ClientError, NoteStorage};

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this note?";

/// The remote call a [`StoreError::Remote`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "Error fetching notes!",
            Self::Add => "Error adding note!",
            Self::Update => "Error updating note!",
            Self::Delete => "Error deleting note!",
        })
    }
}

/// Errors surfaced to the user. `Display` is the alert text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Title or content is blank. Storage was not contacted.
    #[error("Please fill in both title and content!")]
    Validation,

    #[error("{op}")]
    Remote {
        op: Operation,
        #[source]
        source: ClientError,
    },
}

/// Client-side note list backed by a [`NoteStorage`].
pub struct NoteStore<S> {
    storage: S,
    prompter: Box<dyn Prompter>,
    clock: fn() -> DateTime<Utc>,
    notes: Vec<Note>,
    draft: Draft,
    editing: Option<Note>,
    loading: bool,
}

impl<S: NoteStorage> NoteStore<S> {
    /// A store that has not loaded anything yet, so it starts out loading.
    pub fn new(storage: S, prompter: Box<dyn Prompter>) -> Self {
        Self {
            storage,
            prompter,
            clock: Utc::now,
            notes: Vec::new(),
            draft: Draft::default(),
            editing: None,
            loading: true,
        }
    }

    /// Replace the clock used to stamp `updated_at`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<&Note> {
        self.editing.as_ref()
    }

    /// The edit snapshot, for changing fields before [`Self::commit_edit`].
    pub fn editing_mut(&mut self) -> Option<&mut Note> {
        self.editing.as_mut()
    }

    pub fn is_editing(&self, id: &NoteId) -> bool {
        self.editing.as_ref().is_some_and(|note| &note.id == id)
    }

    /// Fetch every note, replacing the local list on success.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.loading = true;
        let result = self.storage.list().await;
        self.loading = false;

        match result {
            Ok(notes) => {
                tracing::info!("Loaded {} notes", notes.len());
                self.notes = notes;
                Ok(())
            }
            Err(source) => Err(self.fail(StoreError::Remote {
                op: Operation::Fetch,
                source,
            })),
        }
    }

    /// Persist the draft and put the stored note at the top of the list.
    pub async fn create(&mut self) -> Result<(), StoreError> {
        if !self.draft.is_complete() {
            return Err(self.fail(StoreError::Validation));
        }

        match self.storage.insert(&self.draft).await {
            Ok(note) => {
                tracing::info!("Note created: {}", note.id);
                self.notes.insert(0, note);
                self.draft = Draft::default();
                Ok(())
            }
            Err(source) => Err(self.fail(StoreError::Remote {
                op: Operation::Add,
                source,
            })),
        }
    }

    /// Save new title and content for `id`.
    ///
    /// On success the local copy takes the new fields and the timestamp this
    /// client sent; whatever `updated_at` the table ends up with is not read
    /// back.
    pub async fn update(&mut self, id: &NoteId, fields: Draft) -> Result<(), StoreError> {
        if !fields.is_complete() {
            return Err(self.fail(StoreError::Validation));
        }

        let patch = NotePatch {
            title: fields.title,
            content: fields.content,
            updated_at: (self.clock)(),
        };
        if let Err(source) = self.storage.update_by_id(id, &patch).await {
            return Err(self.fail(StoreError::Remote {
                op: Operation::Update,
                source,
            }));
        }

        if let Some(note) = self.notes.iter_mut().find(|note| &note.id == id) {
            note.title = patch.title;
            note.content = patch.content;
            note.updated_at = Some(patch.updated_at);
        }
        self.editing = None;
        tracing::info!("Note updated: {}", id);
        Ok(())
    }

    /// Delete `id` after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; storage is not contacted.
    pub async fn delete(&mut self, id: &NoteId) -> Result<bool, StoreError> {
        if !self.prompter.confirm(DELETE_CONFIRMATION) {
            tracing::debug!("Delete of {} declined", id);
            return Ok(false);
        }

        match self.storage.delete_by_id(id).await {
            Ok(()) => {
                self.notes.retain(|note| &note.id != id);
                tracing::info!("Note deleted: {}", id);
                Ok(true)
            }
            Err(source) => Err(self.fail(StoreError::Remote {
                op: Operation::Delete,
                source,
            })),
        }
    }

    /// Open `note` for editing. The snapshot is a copy; the list is untouched.
    pub fn begin_edit(&mut self, note: &Note) {
        self.editing = Some(note.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the edit snapshot. The selection stays open if saving fails.
    pub async fn commit_edit(&mut self) -> Result<(), StoreError> {
        let Some(note) = self.editing.as_ref() else {
            return Ok(());
        };
        let id = note.id.clone();
        let fields = Draft::from(note);

        if !fields.is_complete() {
            return Err(self.fail(StoreError::Validation));
        }
        self.update(&id, fields).await
    }

    /// Log `err`, show it to the user and hand it back.
    fn fail(&self, err: StoreError) -> StoreError {
        match &err {
            StoreError::Validation => tracing::warn!("{}", err),
            StoreError::Remote { source, .. } => tracing::error!("{} {}", err, source),
        }
        self.prompter.alert(&err.to_string());
        err
    }
}
