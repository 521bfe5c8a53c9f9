//! Handler für Anker-Operationen: Verschieben, Typen, Ausrichten, Löschen.

use anyhow::Result;
use glam::DVec3;

use super::{edit_model, ensure_anchor, ensure_anchors};
use crate::app::EditorState;
use crate::core::{AlignMode, AnchorType, Axis, Handle, HandleMove, SelectionBox};

/// Startet einen Drag-Lifecycle (nimmt Undo-Snapshot auf).
///
/// Die folgenden Move-Commands zeichnen selbst keinen Snapshot auf.
pub fn begin_drag(state: &mut EditorState) {
    state.record_undo_snapshot();
}

/// Verschiebt einen Anker starr an eine neue Position.
pub fn move_anchor(state: &mut EditorState, anchor: usize, position: DVec3) -> Result<()> {
    ensure_anchor(state, anchor)?;
    state.model_mut().move_anchor(anchor, position);
    Ok(())
}

/// Verschiebt alle selektierten Anker um ein Delta.
pub fn move_selected(state: &mut EditorState, delta: DVec3) {
    let anchors = state.selection.indices();
    if anchors.is_empty() || delta == DVec3::ZERO {
        return;
    }
    state.model_mut().move_anchors(&anchors, delta);
}

/// Verschiebt einen Handle im aktuellen Handle-Modus.
pub fn move_control(
    state: &mut EditorState,
    anchor: usize,
    handle: Handle,
    position: DVec3,
) -> Result<()> {
    ensure_anchor(state, anchor)?;
    let mode = state.handle_move;
    state.model_mut().move_control(anchor, handle, position, mode);
    Ok(())
}

/// Setzt den Handle-Modus für folgende Drags.
pub fn set_handle_move(state: &mut EditorState, mode: HandleMove) {
    state.handle_move = mode;
}

/// Setzt den Typ mehrerer Anker.
pub fn set_anchor_type(
    state: &mut EditorState,
    anchors: &[usize],
    anchor_type: AnchorType,
) -> Result<()> {
    ensure_anchors(state, anchors)?;
    edit_model(state, |model| {
        for &anchor in anchors {
            model.set_anchor_type(anchor, anchor_type);
        }
    });
    Ok(())
}

/// Schaltet einen Anker zwischen Corner und Smooth um.
pub fn toggle_smoothness(state: &mut EditorState, anchor: usize) -> Result<()> {
    ensure_anchor(state, anchor)?;
    edit_model(state, |model| model.toggle_anchor_smoothness(anchor));
    Ok(())
}

/// Setzt das Label eines Ankers.
pub fn set_tag(state: &mut EditorState, anchor: usize, tag: String) -> Result<()> {
    ensure_anchor(state, anchor)?;
    edit_model(state, |model| model.set_tag(anchor, tag));
    Ok(())
}

/// Entfernt Anker; leere Prims verschwinden mit.
pub fn remove_anchors(state: &mut EditorState, anchors: &[usize]) -> Result<()> {
    ensure_anchors(state, anchors)?;
    let removed = edit_model(state, |model| model.remove_anchors(anchors));
    if removed > 0 {
        state.selection.shift_for_removal(anchors);
        state.selection_box = None;
        log::info!("{} Anker entfernt", removed);
    }
    Ok(())
}

/// Begradigt alle zusammenhängenden Läufe der Anker.
pub fn straighten(state: &mut EditorState, anchors: &[usize]) -> Result<()> {
    ensure_anchors(state, anchors)?;
    let runs = edit_model(state, |model| model.straighten_anchors(anchors));
    if runs == 0 {
        log::debug!("Begradigen: keine zusammenhängenden Anker in {:?}", anchors);
    } else {
        log::info!("{} Lauf/Läufe begradigt", runs);
    }
    Ok(())
}

/// Richtet Anker an einer Weltachse aus.
pub fn align(state: &mut EditorState, anchors: &[usize], axis: Axis, mode: AlignMode) -> Result<()> {
    ensure_anchors(state, anchors)?;
    edit_model(state, |model| model.align_anchors(anchors, axis, mode));
    Ok(())
}

/// Projiziert Anker auf die Ebene durch den Ursprung mit der gegebenen Normale.
pub fn project(state: &mut EditorState, anchors: &[usize], normal: DVec3) -> Result<()> {
    ensure_anchors(state, anchors)?;
    edit_model(state, |model| model.project_anchors(anchors, DVec3::ZERO, normal));
    Ok(())
}

/// Baut die Selektions-Box aus der aktuellen Selektion neu auf.
pub fn reset_selection_transform(state: &mut EditorState) {
    state.selection_box = SelectionBox::from_anchors(&state.model, &state.selection.indices());
    if state.selection_box.is_none() {
        log::debug!("Selektions-Box braucht mindestens zwei Anker");
    }
}

/// Transformiert die Selektion über die Box (Mitte, Größe, Euler-Grad).
///
/// Ohne bestehende Box wird sie zuerst aus der Selektion gebaut.
pub fn transform_selection(
    state: &mut EditorState,
    center: DVec3,
    size: DVec3,
    rotation_deg: [f64; 3],
) {
    if state.selection_box.is_none() {
        reset_selection_transform(state);
    }
    let Some(selection_box) = state.selection_box.clone() else {
        return;
    };
    let tolerance = state.options.box_size_tolerance;
    edit_model(state, |model| {
        selection_box.apply(model, center, size, rotation_deg, tolerance)
    });
}
