//! Application State: zentrale Datenhaltung.

mod editor_state;
mod selection;

pub use editor_state::EditorState;
pub use selection::SelectionState;
