//! Plain-text rendering of the note list.

use crate::models::Note;
use crate::remote::NoteStorage;
use crate::store::NoteStore;

const LOADING: &str = "Loading notes...";
const EMPTY: &str = "No notes yet. Create your first note with `notes add`.";

/// Render the store's current state.
///
/// Example output:
/// ```text
/// [2] Groceries  (2024-03-02)
///     eggs, milk
///
/// [1] Ideas  (2024-03-01)  [editing]
///     write the thing
/// ```
pub fn render_notes<S: NoteStorage>(store: &NoteStore<S>) -> String {
    if store.is_loading() {
        return format!("{}\n", LOADING);
    }
    if store.notes().is_empty() {
        return format!("{}\n", EMPTY);
    }

    let cards: Vec<String> = store
        .notes()
        .iter()
        .map(|note| render_card(note, store.is_editing(&note.id)))
        .collect();
    cards.join("\n")
}

fn render_card(note: &Note, editing: bool) -> String {
    let mut output = format!(
        "[{}] {}  ({})",
        note.id,
        note.title,
        note.created_at.format("%Y-%m-%d")
    );
    if editing {
        output.push_str("  [editing]");
    }
    output.push('\n');
    for line in note.content.lines() {
        output.push_str("    ");
        output.push_str(line);
        output.push('\n');
    }
    output
}
