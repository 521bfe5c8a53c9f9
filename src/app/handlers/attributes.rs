//! Handler für Attribut-Definitionen und -Werte.

use anyhow::{bail, Result};

use super::{edit_model, ensure_anchors};
use crate::app::EditorState;
use crate::core::{AttributeType, AttributeValue};

/// Fügt ein Attribut hinzu oder ändert dessen Typ.
pub fn add_attribute(state: &mut EditorState, name: &str, ty: AttributeType) {
    if edit_model(state, |model| model.add_attribute(name, ty)) {
        log::info!("Attribut {} ({:?}) hinzugefügt", name, ty);
    }
}

/// Entfernt ein Attribut.
pub fn remove_attribute(state: &mut EditorState, name: &str) {
    if edit_model(state, |model| model.remove_attribute(name)) {
        log::info!("Attribut {} entfernt", name);
    } else {
        log::debug!("Attribut {} nicht entfernt", name);
    }
}

/// Gleicht die Definitionen mit einer externen Liste ab.
pub fn sync_attributes(state: &mut EditorState, defs: &[(String, AttributeType)]) {
    edit_model(state, |model| model.sync_attribute_defs(defs));
}

/// Setzt einen Attributwert auf mehreren Ankern (ein Undo-Schritt).
pub fn set_attribute_value(
    state: &mut EditorState,
    anchors: &[usize],
    name: &str,
    value: AttributeValue,
) -> Result<()> {
    ensure_anchors(state, anchors)?;
    let Some(ty) = state.model.attribute_type(name) else {
        bail!("Unbekanntes Attribut: {}", name);
    };
    if !ty.accepts(&value) {
        bail!("Wert {:?} passt nicht zu Attribut {} ({:?})", value, name, ty);
    }
    edit_model(state, |model| {
        anchors
            .iter()
            .try_for_each(|&anchor| model.set_attribute_value(anchor, name, value.clone()))
    })
}
