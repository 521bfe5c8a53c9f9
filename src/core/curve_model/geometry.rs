//! Abgeleitete Geometrie für die Darstellung: Tangenten, Pfeilspitzen, Label-Positionen.

use glam::DVec3;
use serde::Serialize;

use super::CurveModel;
use crate::core::anchor::AnchorType;
use crate::shared::spline_geometry::bounding_box;

/// Richtungsmarker am Ende eines Prims.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrowhead {
    /// Prim-Index
    pub prim: usize,
    /// Spitze (Ankerposition)
    pub position: DVec3,
    /// Normierte Einlaufrichtung
    pub direction: DVec3,
}

impl CurveModel {
    /// Normierte Tangente eines Ankers.
    ///
    /// Smooth/Untied: Richtung In → Out. Corner (oder kollabierte Handles):
    /// Richtung Vorgänger → Nachfolger, einseitig am Rand; Fallback `+Z`.
    pub fn anchor_tangent(&self, anchor: usize) -> DVec3 {
        let a = &self.anchors[anchor];
        if a.anchor_type != AnchorType::Corner {
            let tangent = (a.out_control - a.in_control).normalize_or_zero();
            if tangent != DVec3::ZERO {
                return tangent;
            }
        }
        let prev = self
            .prev_index(anchor)
            .map_or(a.position, |i| self.anchors[i].position);
        let next = self
            .next_index(anchor)
            .map_or(a.position, |i| self.anchors[i].position);
        let tangent = (next - prev).normalize_or_zero();
        if tangent == DVec3::ZERO {
            DVec3::Z
        } else {
            tangent
        }
    }

    /// Pfeilspitze eines Prims: offen am letzten, geschlossen am ersten Anker.
    ///
    /// `None` für Prims mit weniger als zwei Ankern.
    pub fn arrowhead(&self, prim: usize) -> Option<Arrowhead> {
        let p = &self.prims[prim];
        if p.len() < 2 {
            return None;
        }
        let tip = if p.is_closed { p.start } else { p.last() };
        let anchor = &self.anchors[tip];
        let mut direction = (anchor.position - anchor.in_control).normalize_or_zero();
        if direction == DVec3::ZERO {
            // Kollabierter In-Handle: aus dem Out-Handle des Vorgängers
            let prev = self.prev_index(tip)?;
            direction = (anchor.position - self.anchors[prev].out_control).normalize_or_zero();
        }
        if direction == DVec3::ZERO {
            direction = self.anchor_tangent(tip);
        }
        Some(Arrowhead {
            prim,
            position: anchor.position,
            direction,
        })
    }

    /// Position des Prim-Namens.
    ///
    /// Geschlossen: Mitte der Bounding-Box aller Kurvenpunkte; offen: Kurvenmitte;
    /// einzelner Anker: dessen Position.
    pub fn label_position(&self, prim: usize) -> DVec3 {
        let p = &self.prims[prim];
        if p.len() < 2 {
            return self.anchors[p.start].position;
        }
        if p.is_closed {
            let points = self.anchors[p.range()].iter().flat_map(|a| a.controls());
            if let Some((min, max)) = bounding_box(points) {
                return (min + max) * 0.5;
            }
        }
        self.evaluate(prim, 0.5)
    }

    /// Schwerpunkt der Ankerpositionen eines Prims.
    pub fn prim_centroid(&self, prim: usize) -> DVec3 {
        let p = &self.prims[prim];
        let sum: DVec3 = self.anchors[p.range()].iter().map(|a| a.position).sum();
        sum / p.len() as f64
    }
}
