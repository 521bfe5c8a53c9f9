//! JSON Import/Export des Kurven-Dokuments.
//!
//! Das Dokument speichert den kompletten Editor-Zustand als
//! "Array of Structs": pro Anker `[in, pos, out]`, Flag, Tag und Attribute,
//! dazu die Attribut-Definitionen, Prim-Bereiche und die Auswahl.

pub mod parser;
pub mod writer;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use parser::{export_document, parse_curve_document, ParsedDocument};
pub use writer::write_curve_document;

/// Serialisierter Anker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    /// `[in, pos, out]`
    pub controls: [[f64; 3]; 3],
    /// Handle-Typ als Host-Flag (0 Smooth, 1 Corner, 2 Untied)
    pub flag: i64,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub attribs: IndexMap<String, serde_json::Value>,
}

/// Gesamtes Dokument wie es der Host speichert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveDocument {
    #[serde(default)]
    pub anchors: Vec<AnchorRecord>,
    /// `(Name, Typcode)` in Definitionsreihenfolge
    #[serde(default)]
    pub attrib_meta: Vec<(String, i64)>,
    /// `(start, end, geschlossen, Name)`
    #[serde(default)]
    pub prims: Vec<(usize, usize, bool, String)>,
    #[serde(default)]
    pub selection: Vec<usize>,
}
