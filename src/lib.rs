//! Note-taking client for a hosted PostgREST notes table.
//!
//! [`store::NoteStore`] holds the note list and keeps it in step with the
//! remote table through the [`remote::NoteStorage`] seam.

pub mod config;
pub mod models;
pub mod prompt;
pub mod remote;
pub mod render;
pub mod store;
