//! Parser für das Kurven-Dokument.

use anyhow::{bail, Context, Result};
use glam::DVec3;
use indexmap::IndexMap;
use serde_json::Value;

use super::{AnchorRecord, CurveDocument};
use crate::core::{Anchor, AnchorType, AttributeType, AttributeValue, CurveModel, ExportedGeometry, Prim};

/// Ergebnis des Parsens: Modell plus gespeicherte Auswahl.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub model: CurveModel,
    /// Auswahl in gespeicherter Reihenfolge (ungültige Indizes verworfen)
    pub selection: Vec<usize>,
}

/// Parsed ein Kurven-Dokument aus einem JSON-String.
///
/// Leerer Text oder ein Dokument ohne Anker ergibt ein leeres Modell.
pub fn parse_curve_document(text: &str) -> Result<ParsedDocument> {
    if text.trim().is_empty() {
        return Ok(ParsedDocument {
            model: CurveModel::new(),
            selection: Vec::new(),
        });
    }

    let document: CurveDocument =
        serde_json::from_str(text).context("Kurven-Dokument ist kein gültiges JSON")?;
    if document.anchors.is_empty() {
        log::debug!("Dokument ohne Anker, leeres Modell");
        return Ok(ParsedDocument {
            model: CurveModel::new(),
            selection: Vec::new(),
        });
    }

    let mut attribute_defs = IndexMap::with_capacity(document.attrib_meta.len());
    for (name, code) in &document.attrib_meta {
        let Some(ty) = AttributeType::from_code(*code) else {
            bail!("Unbekannter Attribut-Typcode {} für {}", code, name);
        };
        attribute_defs.insert(name.clone(), ty);
    }

    let anchors = document
        .anchors
        .iter()
        .enumerate()
        .map(|(i, record)| {
            parse_anchor(record, &attribute_defs).with_context(|| format!("Anker {}", i))
        })
        .collect::<Result<Vec<_>>>()?;

    let prims = document
        .prims
        .iter()
        .map(|(start, end, is_closed, name)| Prim {
            start: *start,
            end: *end,
            is_closed: *is_closed,
            name: name.clone(),
        })
        .collect();

    let anchor_count = anchors.len();
    let mut model = CurveModel::new();
    model
        .replace_with(anchors, prims, attribute_defs)
        .context("Ungültige Prim-Bereiche im Dokument")?;

    let mut selection = Vec::with_capacity(document.selection.len());
    for index in document.selection {
        if index < anchor_count {
            selection.push(index);
        } else {
            log::warn!(
                "Auswahl-Index {} außerhalb von {} Ankern wird verworfen",
                index,
                anchor_count
            );
        }
    }

    log::info!(
        "Dokument geladen: {} Anker, {} Prims, {} Attribute",
        model.anchor_count(),
        model.prim_count(),
        model.attribute_defs().len()
    );

    Ok(ParsedDocument { model, selection })
}

/// Parsed und exportiert in einem Schritt.
pub fn export_document(text: &str) -> Result<ExportedGeometry> {
    Ok(parse_curve_document(text)?.model.export())
}

fn parse_anchor(record: &AnchorRecord, defs: &IndexMap<String, AttributeType>) -> Result<Anchor> {
    let Some(anchor_type) = AnchorType::from_flag(record.flag) else {
        bail!("Unbekanntes Anker-Flag {}", record.flag);
    };
    let [in_control, position, out_control] = record.controls.map(DVec3::from_array);

    let mut anchor = Anchor::corner(position);
    anchor.in_control = in_control;
    anchor.out_control = out_control;
    anchor.anchor_type = anchor_type;
    anchor.tag = record.tag.clone();

    for (name, ty) in defs {
        let value = match record.attribs.get(name) {
            Some(raw) => parse_value(*ty, raw).with_context(|| format!("Attribut {}", name))?,
            None => ty.default_value(),
        };
        anchor.attributes.insert(name.clone(), value);
    }
    Ok(anchor)
}

/// Liest einen Wert in der Form, die der Typ erwartet.
fn parse_value(ty: AttributeType, raw: &Value) -> Result<AttributeValue> {
    let value = match ty.default_value() {
        AttributeValue::Int(_) => match (raw.as_i64(), raw.as_f64()) {
            (Some(v), _) => AttributeValue::Int(v),
            (None, Some(v)) => AttributeValue::Int(v.round() as i64),
            _ => bail!("Zahl erwartet, war {}", raw),
        },
        AttributeValue::Float(_) => match raw.as_f64() {
            Some(v) => AttributeValue::Float(v),
            None => bail!("Zahl erwartet, war {}", raw),
        },
        AttributeValue::Pair(_) => AttributeValue::Pair(number_array(raw)?),
        AttributeValue::Vector(_) => AttributeValue::Vector(number_array(raw)?),
    };
    Ok(value)
}

fn number_array<const N: usize>(raw: &Value) -> Result<[f64; N]> {
    let Some(items) = raw.as_array().filter(|items| items.len() == N) else {
        bail!("Liste mit {} Zahlen erwartet, war {}", N, raw);
    };
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .with_context(|| format!("Zahl erwartet, war {}", item))?;
    }
    Ok(out)
}
