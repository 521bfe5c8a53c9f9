//! Zentrale Konfiguration für den Pen Curve Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Undo/Redo ───────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;

// ── Klassifizierung ─────────────────────────────────────────────────

/// Toleranz für kollineare Handles (|dot − 1| darunter → Smooth).
pub const UNTIE_TOLERANCE: f64 = 1e-4;
/// Toleranz für kollabierte Handles (Summe der Quadrat-Längen darunter → Corner).
pub const CORNER_TOLERANCE: f64 = 1e-7;

// ── Selektion ───────────────────────────────────────────────────────

/// Mindest-Ausdehnung einer Selektions-Box pro Achse, ab der skaliert wird.
pub const BOX_SIZE_TOLERANCE: f64 = 1e-6;
/// Pick-Radius für Anker in Welteinheiten.
pub const PICK_RADIUS: f64 = 0.5;

// ── Kurven ──────────────────────────────────────────────────────────

/// Name neu angelegter Prims.
pub const DEFAULT_PRIM_NAME: &str = "curve";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `pen_curve_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    // ── Undo/Redo ───────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    pub history_depth: usize,

    // ── Klassifizierung ─────────────────────────────────────────
    /// Toleranz für Smooth-Erkennung
    pub untie_tolerance: f64,
    /// Toleranz für Corner-Erkennung
    pub corner_tolerance: f64,

    // ── Selektion ───────────────────────────────────────────────
    /// Skalierungs-Schutz der Selektions-Box
    pub box_size_tolerance: f64,
    /// Pick-Radius in Welteinheiten
    pub pick_radius: f64,

    // ── Kurven ──────────────────────────────────────────────────
    /// Name für neu gezeichnete Prims
    pub default_prim_name: String,

    // ── Handle-Drag ─────────────────────────────────────────────
    /// Gegenüberliegenden Handle beim Ziehen mitführen
    pub aligned_handle_move: bool,
    /// Gegenüberliegenden Handle auf gleiche Länge setzen
    pub symmetric_handle_move: bool,
    /// Handles beim Ziehen um den Anker rotieren (Corner-Rotate)
    pub rotate_corner_mode: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_DEPTH,
            untie_tolerance: UNTIE_TOLERANCE,
            corner_tolerance: CORNER_TOLERANCE,
            box_size_tolerance: BOX_SIZE_TOLERANCE,
            pick_radius: PICK_RADIUS,
            default_prim_name: DEFAULT_PRIM_NAME.to_string(),
            aligned_handle_move: true,
            symmetric_handle_move: false,
            rotate_corner_mode: false,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("pen_curve_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("pen_curve_editor.toml")
    }

    /// Leitet die Modell-Einstellungen (Toleranzen, Prim-Name) ab.
    pub fn model_settings(&self) -> crate::core::ModelSettings {
        crate::core::ModelSettings {
            default_prim_name: self.default_prim_name.clone(),
            untie_tolerance: self.untie_tolerance,
            corner_tolerance: self.corner_tolerance,
        }
    }

    /// Anfangs-Modus für das Ziehen von Handles.
    pub fn handle_move(&self) -> crate::core::HandleMove {
        crate::core::HandleMove {
            aligned: self.aligned_handle_move,
            symmetric: self.symmetric_handle_move,
            rotate_about_anchor: self.rotate_corner_mode,
        }
    }
}
