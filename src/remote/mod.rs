//! The storage collaborator: the remote notes table.
//!
//! [`NoteStorage`] is the seam [`crate::store::NoteStore`] talks to.
//! [`RestClient`] implements it against a PostgREST table endpoint.

mod client;

pub use client::RestClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Draft, Note, NoteId, NotePatch};

/// Remote storage errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: check the anon key")]
    Unauthorized,

    #[error("Insert returned no rows")]
    EmptyResponse,

    #[error("Server error: {0}")]
    Server(String),
}

/// List, insert, update and delete for notes.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// All notes, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Note>, ClientError>;

    /// Persist a new note. Storage assigns `id` and `created_at`.
    async fn insert(&self, draft: &Draft) -> Result<Note, ClientError>;

    async fn update_by_id(&self, id: &NoteId, patch: &NotePatch) -> Result<(), ClientError>;

    async fn delete_by_id(&self, id: &NoteId) -> Result<(), ClientError>;
}
