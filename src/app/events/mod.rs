//! EditorCommand-Enum für den Command-Datenfluss vom Host zum Controller.

mod command;

pub use command::EditorCommand;
