//! Application-Layer: Controller, State, Commands, Menü und Caches.

pub mod cache;
pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
pub mod menu;
/// Application State
///
/// Dieses Modul verwaltet den Zustand des Editors (Modell, Selektion, History, Werkzeuge).
pub mod state;

pub use cache::{GeometryCache, Label, LabelCache, LabelKind, PresentationCache, SpatialCache};
pub use command_log::CommandLog;
pub use controller::EditorController;
pub use events::EditorCommand;
pub use history::{EditHistory, Snapshot};
pub use menu::{MenuArgs, MenuContext, MenuPointer, MenuRegistry};
pub use state::{EditorState, SelectionState};
