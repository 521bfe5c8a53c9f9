//! Darstellungs-Caches, gültig solange sich `CurveModel::version()` nicht ändert.
//!
//! Der Host fragt pro Frame Geometrie, Labels und Pick-Index ab; neu
//! berechnet wird nur nach einer Mutation des Modells.

use std::sync::Arc;

use glam::DVec3;

use crate::core::{AnchorSpatialIndex, CurveModel, ExportedGeometry, PSCALE_ROLL_ATTRIBUTE};

/// Export-Snapshot für den Renderer.
#[derive(Default)]
pub struct GeometryCache {
    version: Option<u64>,
    geometry: Arc<ExportedGeometry>,
}

impl GeometryCache {
    /// Liefert den Export-Snapshot, baut ihn bei neuer Modell-Version neu.
    pub fn get(&mut self, model: &CurveModel) -> Arc<ExportedGeometry> {
        if self.version != Some(model.version()) {
            self.geometry = Arc::new(model.export());
            self.version = Some(model.version());
            log::debug!(
                "Geometrie-Cache neu aufgebaut (Version {}, {} Punkte)",
                model.version(),
                self.geometry.point_count()
            );
        }
        self.geometry.clone()
    }
}

/// Art eines Labels.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelKind {
    /// Wert des angezeigten Attributs an einem Anker
    AttributeValue { anchor: usize },
    /// Tag eines Ankers
    Tag { anchor: usize },
    /// Name eines Prims
    PrimName { prim: usize },
}

/// Text an einer Weltposition.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub kind: LabelKind,
    pub position: DVec3,
    pub text: String,
}

/// Labels für Attributwerte, Tags und Prim-Namen.
#[derive(Default)]
pub struct LabelCache {
    key: Option<(u64, Option<String>)>,
    labels: Arc<Vec<Label>>,
}

impl LabelCache {
    /// Liefert die Labels; `attribute` wählt das angezeigte Attribut.
    ///
    /// `__pr` wird nie als Wert-Label angezeigt.
    pub fn get(&mut self, model: &CurveModel, attribute: Option<&str>) -> Arc<Vec<Label>> {
        let attribute = attribute.filter(|name| *name != PSCALE_ROLL_ATTRIBUTE);
        let key = (model.version(), attribute.map(str::to_string));
        if self.key.as_ref() != Some(&key) {
            self.labels = Arc::new(build_labels(model, attribute));
            self.key = Some(key);
        }
        self.labels.clone()
    }
}

fn build_labels(model: &CurveModel, attribute: Option<&str>) -> Vec<Label> {
    let mut labels = Vec::new();
    for (index, anchor) in model.anchors().iter().enumerate() {
        if let Some(value) = attribute.and_then(|name| anchor.attributes.get(name)) {
            labels.push(Label {
                kind: LabelKind::AttributeValue { anchor: index },
                position: anchor.position,
                text: value.format_value(),
            });
        }
        if !anchor.tag.is_empty() {
            labels.push(Label {
                kind: LabelKind::Tag { anchor: index },
                position: anchor.position,
                text: anchor.tag.clone(),
            });
        }
    }
    for (prim, p) in model.prims().iter().enumerate() {
        labels.push(Label {
            kind: LabelKind::PrimName { prim },
            position: model.label_position(prim),
            text: p.name.clone(),
        });
    }
    labels
}

/// KD-Tree über die Ankerpositionen für Picks.
#[derive(Default)]
pub struct SpatialCache {
    version: Option<u64>,
    index: Option<AnchorSpatialIndex>,
}

impl SpatialCache {
    /// Liefert den Index, baut ihn bei neuer Modell-Version neu.
    pub fn get(&mut self, model: &CurveModel) -> &AnchorSpatialIndex {
        if self.version != Some(model.version()) {
            self.index = None;
        }
        self.version = Some(model.version());
        self.index
            .get_or_insert_with(|| AnchorSpatialIndex::from_model(model))
    }
}

/// Alle Darstellungs-Caches des Editors.
#[derive(Default)]
pub struct PresentationCache {
    pub geometry: GeometryCache,
    pub labels: LabelCache,
    pub spatial: SpatialCache,
}

impl PresentationCache {
    /// Verwirft alle Caches (z.B. nach Undo oder Laden).
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }
}
