//! Writer für das Kurven-Dokument.

use anyhow::{Context, Result};

use super::{AnchorRecord, CurveDocument};
use crate::core::CurveModel;

/// Schreibt Modell und Auswahl als JSON-Dokument.
pub fn write_curve_document(model: &CurveModel, selection: &[usize]) -> Result<String> {
    let anchors = model
        .anchors()
        .iter()
        .map(|anchor| {
            let attribs = anchor
                .attributes
                .iter()
                .map(|(name, value)| Ok((name.clone(), serde_json::to_value(value)?)))
                .collect::<Result<_, serde_json::Error>>()?;
            Ok(AnchorRecord {
                controls: anchor.controls().map(|p| p.to_array()),
                flag: anchor.anchor_type.flag(),
                tag: anchor.tag.clone(),
                attribs,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()
        .context("Attributwerte nicht serialisierbar")?;

    let document = CurveDocument {
        anchors,
        attrib_meta: model
            .attribute_defs()
            .iter()
            .map(|(name, ty)| (name.clone(), ty.code()))
            .collect(),
        prims: model
            .prims()
            .iter()
            .map(|p| (p.start, p.end, p.is_closed, p.name.clone()))
            .collect(),
        selection: selection.to_vec(),
    };

    serde_json::to_string(&document).context("Kurven-Dokument nicht serialisierbar")
}
