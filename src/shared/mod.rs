//! Geteilte, layer-neutrale Bausteine.
//!
//! Enthält Geometrie-Funktionen und Optionen, die von `core`, `json`
//! und `app` genutzt werden, ohne Zirkel-Abhängigkeiten zu erzeugen.

pub mod options;
pub mod rotation;
pub mod spline_geometry;

pub use options::EditorOptions;
pub use options::{CORNER_TOLERANCE, DEFAULT_PRIM_NAME, UNTIE_TOLERANCE};
