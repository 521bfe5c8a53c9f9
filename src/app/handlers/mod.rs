//! Feature-Handler für EditorCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod anchor;
pub mod attributes;
pub mod curve;
pub mod file_io;
pub mod history;
pub mod selection;

use crate::app::history::Snapshot;
use crate::app::EditorState;
use crate::core::CurveModel;

/// Führt eine Modell-Mutation aus; ein Undo-Snapshot wird nur aufgezeichnet,
/// wenn sich die Modell-Version dabei geändert hat.
///
/// Ohne Änderung wird das ursprüngliche `Arc` zurückgesetzt, die
/// Arbeitskopie verworfen. Bekannte No-Ops prüfen die Handler vorab.
pub(crate) fn edit_model<R>(state: &mut EditorState, edit: impl FnOnce(&mut CurveModel) -> R) -> R {
    let snap = Snapshot::from_state(state);
    let version = state.model.version();
    let result = edit(state.model_mut());
    if state.model.version() != version {
        state.history.record_snapshot(snap);
    } else {
        state.model = snap.model;
    }
    result
}

/// Prüft einen vom Host gelieferten Anker-Index.
pub(crate) fn ensure_anchor(state: &EditorState, anchor: usize) -> anyhow::Result<()> {
    if anchor >= state.model.anchor_count() {
        anyhow::bail!(
            "Anker {} existiert nicht ({} Anker)",
            anchor,
            state.model.anchor_count()
        );
    }
    Ok(())
}

/// Prüft eine Liste vom Host gelieferter Anker-Indizes.
pub(crate) fn ensure_anchors(state: &EditorState, anchors: &[usize]) -> anyhow::Result<()> {
    anchors.iter().try_for_each(|&a| ensure_anchor(state, a))
}

/// Prüft einen vom Host gelieferten Prim-Index.
pub(crate) fn ensure_prim(state: &EditorState, prim: usize) -> anyhow::Result<()> {
    if prim >= state.model.prim_count() {
        anyhow::bail!(
            "Prim {} existiert nicht ({} Prims)",
            prim,
            state.model.prim_count()
        );
    }
    Ok(())
}
