//! Handler für Kurven-Operationen: Zeichnen, Prims, Vorlagen.

use anyhow::{bail, Result};
use glam::DVec3;

use super::{edit_model, ensure_anchor, ensure_prim};
use crate::app::EditorState;
use crate::core::{CustomShape, ProjectionPlane};

/// Schaltet das Zeichenwerkzeug.
pub fn set_draw_mode(state: &mut EditorState, enabled: bool) {
    state.draw_mode = enabled;
    log::debug!("Zeichenmodus: {}", if enabled { "an" } else { "aus" });
}

/// Zeichenwerkzeug: hängt einen Anker an.
///
/// Genau ein selektierter Anker am Rand eines offenen Prims verlängert
/// dieses Prim (am Ende, wenn es der letzte Anker ist); sonst entsteht ein
/// neues Prim. Der neue Anker wird allein selektiert.
pub fn append_anchor(state: &mut EditorState, position: DVec3) -> usize {
    let boundary = match state.selection.indices().as_slice() {
        [only] if *only < state.model.anchor_count() => state.model.prim_boundary(*only),
        _ => None,
    };
    let index = edit_model(state, |model| match boundary {
        Some((prim, at_end)) => model.append_anchor(position, Some(prim), at_end),
        None => model.append_anchor(position, None, false),
    });
    state.selection.select_only(index);
    state.selection_box = None;
    log::debug!("Anker {} an {:?} gezeichnet", index, position);
    index
}

/// Fügt einen Anker auf der Kurve ein, ohne die Form zu ändern.
pub fn insert_anchor_on_curve(state: &mut EditorState, prim: usize, u: f64) -> Result<()> {
    ensure_prim(state, prim)?;
    match edit_model(state, |model| model.insert_anchor_on_curve(prim, u)) {
        Some(index) => {
            state.selection.shift_for_insert(index, 1);
            state.selection_box = None;
            log::info!("Anker {} in Prim {} bei u = {:.3} eingefügt", index, prim, u);
        }
        None => log::debug!("Prim {} hat kein Segment zum Teilen", prim),
    }
    Ok(())
}

/// Entfernt ein Prim samt Ankern.
pub fn remove_prim(state: &mut EditorState, prim: usize) -> Result<()> {
    ensure_prim(state, prim)?;
    let removed: Vec<usize> = state.model.prim(prim).range().collect();
    edit_model(state, |model| model.remove_prim(prim));
    state.selection.shift_for_removal(&removed);
    state.selection_box = None;
    log::info!("Prim {} mit {} Ankern entfernt", prim, removed.len());
    Ok(())
}

/// Kehrt die Richtung eines Prims um.
pub fn reverse_prim(state: &mut EditorState, prim: usize) -> Result<()> {
    ensure_prim(state, prim)?;
    let range = state.model.prim(prim).range();
    edit_model(state, |model| model.reverse_prim(prim));
    state.selection.mirror_range(range);
    state.selection_box = None;
    Ok(())
}

/// Macht einen Anker zum Startanker seines Prims.
///
/// Auf offenen Prims sind nur Randanker erlaubt.
pub fn rewire_anchor(state: &mut EditorState, anchor: usize) -> Result<()> {
    ensure_anchor(state, anchor)?;
    let Some(p) = state.model.prim_of(anchor) else {
        bail!("Anker {} liegt in keinem Prim", anchor);
    };
    let prim = state.model.prim(p).clone();
    if !prim.is_closed && anchor != prim.start && anchor != prim.last() {
        bail!(
            "Rewire nur an den Enden des offenen Prims {} möglich (Anker {})",
            p,
            anchor
        );
    }
    // Offene Prims behalten ihre Richtung
    if anchor == prim.start || !prim.is_closed {
        return Ok(());
    }
    let changed = edit_model(state, |model| {
        let version = model.version();
        model.rewire_prim(anchor);
        model.version() != version
    });
    if changed {
        state.selection.rotate_range(prim.range(), anchor - prim.start);
        state.selection_box = None;
        log::info!("Prim {} beginnt jetzt bei Anker {}", p, anchor);
    }
    Ok(())
}

/// Öffnet oder schließt ein Prim.
pub fn set_prim_closed(state: &mut EditorState, prim: usize, closed: bool) -> Result<()> {
    ensure_prim(state, prim)?;
    if state.model.prim(prim).is_closed == closed {
        return Ok(());
    }
    edit_model(state, |model| model.close_prim(prim, closed));
    Ok(())
}

/// Benennt ein Prim um.
pub fn rename_prim(state: &mut EditorState, prim: usize, name: String) -> Result<()> {
    ensure_prim(state, prim)?;
    if state.model.prim(prim).name == name {
        return Ok(());
    }
    edit_model(state, |model| model.rename_prim(prim, name));
    Ok(())
}

/// Dupliziert ein Prim an die Zielposition.
pub fn duplicate_prim(state: &mut EditorState, prim: usize, target: DVec3) -> Result<()> {
    ensure_prim(state, prim)?;
    if state.model.prim(prim).len() < 2 {
        log::debug!("Prim {} hat weniger als zwei Anker, Duplikat entfällt", prim);
        return Ok(());
    }
    match edit_model(state, |model| model.duplicate_prim(prim, target)) {
        Some(copy) => log::info!("Prim {} als Prim {} dupliziert", prim, copy),
        None => log::debug!("Prim {} hat weniger als zwei Anker, Duplikat entfällt", prim),
    }
    Ok(())
}

/// Registriert (oder ersetzt) eine Vorlage.
pub fn register_shape(state: &mut EditorState, name: String, shape: CustomShape) -> Result<()> {
    if shape.anchors.is_empty() {
        bail!("Vorlage {} hat keine Anker", name);
    }
    log::info!("Vorlage {} mit {} Ankern registriert", name, shape.anchors.len());
    state.custom_shapes.insert(name, shape);
    Ok(())
}

/// Stempelt eine registrierte Vorlage und merkt sie als letzte Vorlage.
pub fn insert_shape(
    state: &mut EditorState,
    name: &str,
    target: DVec3,
    normal: Option<DVec3>,
) -> Result<()> {
    let Some(shape) = state.custom_shapes.get(name).cloned() else {
        bail!("Unbekannte Vorlage: {}", name);
    };
    let plane = state.projection;
    let prim = edit_model(state, |model| {
        model.insert_custom_shape(&shape, name, target, normal, plane)
    });
    state.last_shape = Some(name.to_string());
    log::info!("Vorlage {} als Prim {} eingefügt", name, prim);
    Ok(())
}

/// Stempelt die zuletzt genutzte Vorlage erneut.
pub fn insert_last_shape(state: &mut EditorState, target: DVec3, normal: Option<DVec3>) -> Result<()> {
    let Some(name) = state.last_shape.clone() else {
        log::debug!("Noch keine Vorlage gestempelt");
        return Ok(());
    };
    insert_shape(state, &name, target, normal)
}

/// Setzt die Projektionsebene für Vorlagen.
pub fn set_projection_plane(state: &mut EditorState, plane: ProjectionPlane) {
    state.projection = plane;
}
