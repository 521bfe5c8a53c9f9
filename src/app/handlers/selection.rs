//! Handler für Selektions-Operationen.

use anyhow::Result;
use glam::DVec3;

use super::{ensure_anchors, ensure_prim};
use crate::app::history::Snapshot;
use crate::app::{EditorState, SelectionState};

/// Zeichnet einen Undo-Snapshot auf, wenn sich die Selektion geändert hat.
fn record_if_selection_changed(state: &mut EditorState, old_selection: SelectionState) {
    if old_selection != state.selection {
        let snap = Snapshot {
            model: state.model.clone(),
            selection: old_selection,
        };
        state.history.record_snapshot(snap);
        state.selection_box = None;
    }
}

/// Ersetzt oder erweitert die Selektion.
fn apply_selection(state: &mut EditorState, anchors: impl IntoIterator<Item = usize>, additive: bool) {
    let old = state.selection.clone();
    let ids = state.selection.ids_mut();
    if !additive {
        ids.clear();
    }
    ids.extend(anchors);
    record_if_selection_changed(state, old);
}

/// Selektiert alle Anker.
pub fn select_all(state: &mut EditorState) {
    let count = state.model.anchor_count();
    apply_selection(state, 0..count, false);
}

/// Hebt die aktuelle Selektion auf.
pub fn clear(state: &mut EditorState) {
    let old = state.selection.clone();
    state.selection.clear();
    record_if_selection_changed(state, old);
}

/// Selektiert die angegebenen Anker.
pub fn select_anchors(state: &mut EditorState, anchors: &[usize], additive: bool) -> Result<()> {
    ensure_anchors(state, anchors)?;
    apply_selection(state, anchors.iter().copied(), additive);
    Ok(())
}

/// Selektiert alle Anker eines Prims.
pub fn select_prim(state: &mut EditorState, prim: usize, additive: bool) -> Result<()> {
    ensure_prim(state, prim)?;
    let range = state.model.prim(prim).range();
    apply_selection(state, range, additive);
    Ok(())
}

/// Selektiert den nächsten Anker im Pick-Radius.
///
/// Ohne Treffer wird eine nicht-additive Selektion geleert.
pub fn pick_anchor(state: &mut EditorState, position: DVec3, additive: bool) {
    let radius = state.options.pick_radius;
    let hit = state
        .caches
        .spatial
        .get(&state.model)
        .nearest(position)
        .filter(|m| m.distance <= radius);

    match hit {
        Some(m) => apply_selection(state, [m.anchor], additive),
        None if !additive => clear(state),
        None => {}
    }
}

/// Selektiert alle Anker innerhalb einer achsenparallelen Box.
pub fn select_in_box(state: &mut EditorState, min: DVec3, max: DVec3, additive: bool) {
    let hits = state.caches.spatial.get(&state.model).within_box(min, max);
    log::debug!("Box-Selektion: {} Treffer", hits.len());
    apply_selection(state, hits, additive);
}
