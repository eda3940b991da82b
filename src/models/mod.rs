//! Domain models for supanotes.
//!
//! # Core Concepts
//!
//! - [`Note`]: A persisted title/content record. The remote table assigns its
//!   [`NoteId`] and `created_at`; the client stamps `updated_at` on every save.
//! - [`Draft`]: The unpersisted "new note" form, reset once a create succeeds.
//! - [`NotePatch`]: The body sent when an existing note is saved.

mod note;

pub use note::*;
