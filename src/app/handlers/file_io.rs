//! Handler für Dokument-Operationen (Laden, Speichern, Export) und Optionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::app::{EditorState, SelectionState};
use crate::json::{parse_curve_document, write_curve_document};
use crate::shared::EditorOptions;

/// Lädt ein Dokument aus dem JSON-String des Hosts.
pub fn load_document(state: &mut EditorState, text: &str) -> Result<()> {
    let parsed = parse_curve_document(text)?;
    state.replace_document(parsed.model, SelectionState::from_indices(parsed.selection));
    Ok(())
}

/// Lädt ein Dokument aus einer Datei und merkt den Pfad für späteres Save.
pub fn load_file(state: &mut EditorState, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Dokument {} nicht lesbar", path.display()))?;
    load_document(state, &text)
        .with_context(|| format!("Dokument {} fehlerhaft", path.display()))?;
    state.current_file_path = Some(path.to_path_buf());
    log::info!("Dokument geladen aus: {}", path.display());
    Ok(())
}

/// Speichert das Dokument samt Selektion.
///
/// `None` speichert unter dem zuletzt geladenen/gespeicherten Pfad.
pub fn save_file(state: &mut EditorState, path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(|| state.current_file_path.clone()) else {
        anyhow::bail!("Kein Speicherpfad bekannt");
    };
    let text = write_curve_document(&state.model, &state.selection.indices())?;
    std::fs::write(&path, text)
        .with_context(|| format!("Dokument {} nicht schreibbar", path.display()))?;
    log::info!(
        "Dokument gespeichert nach: {} ({} Anker, {} Prims)",
        path.display(),
        state.model.anchor_count(),
        state.model.prim_count()
    );
    state.current_file_path = Some(path);
    Ok(())
}

/// Schreibt den Export-Snapshot als JSON.
pub fn export_file(state: &mut EditorState, path: &Path) -> Result<()> {
    let geometry = state.caches.geometry.get(&state.model);
    let text = serde_json::to_string_pretty(geometry.as_ref())
        .context("Export-Snapshot nicht serialisierbar")?;
    std::fs::write(path, text)
        .with_context(|| format!("Export {} nicht schreibbar", path.display()))?;
    log::info!(
        "Export geschrieben nach: {} ({} Prims, {} Punkte)",
        path.display(),
        geometry.prims.len(),
        geometry.point_count()
    );
    Ok(())
}

/// Übernimmt neue Laufzeit-Optionen.
pub fn apply_options(state: &mut EditorState, options: EditorOptions) {
    let settings = options.model_settings();
    if state.model.settings() != &settings {
        state.model_mut().set_settings(settings);
    }
    state.handle_move = options.handle_move();
    state.options = options;
    log::info!("Optionen übernommen");
}
