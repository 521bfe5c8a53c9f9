//! Einweg-Export der Kurven als Bezier-Punktlisten für den Renderer.

use glam::DVec3;
use indexmap::IndexMap;
use serde::Serialize;

use super::anchor::ControlPoint;
use super::attribute::{AttributeType, AttributeValue};
use super::curve_model::{Arrowhead, CurveModel};

/// Ein exportierter Bezier-Punkt mit seinen Attributwerten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedPoint {
    /// Weltposition
    pub position: DVec3,
    /// Quell-Anker
    pub anchor: usize,
    /// Welcher der drei Ankerpunkte
    pub control: ControlPoint,
    /// Tag des Ankers (nur auf Positionspunkten)
    pub tag: String,
    /// Attributwerte an diesem Punkt
    pub attribs: IndexMap<String, AttributeValue>,
}

/// Ein exportiertes kubisches Bezier-Prim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedPrim {
    /// Index des Quell-Prims
    pub source_prim: usize,
    /// Prim-Name
    pub name: String,
    /// Geschlossen (Renderer schließt die Kurve)
    pub is_closed: bool,
    /// Punkte in Bezier-Reihenfolge
    pub points: Vec<ExportedPoint>,
}

/// Gesamter Export-Snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExportedGeometry {
    /// Alle Attributnamen in Definitionsreihenfolge
    pub attribute_names: Vec<String>,
    /// VectorUp-Attribute (Detail-Attribut des Hosts)
    pub roll_attribs: Vec<String>,
    /// Orientation-Attribute (Detail-Attribut des Hosts)
    pub orient_attribs: Vec<String>,
    /// Exportierte Prims (einzelne Anker fehlen)
    pub prims: Vec<ExportedPrim>,
    /// Richtungsmarker pro Kurve
    pub arrowheads: Vec<Arrowhead>,
}

impl ExportedGeometry {
    /// Gesamtzahl exportierter Punkte.
    pub fn point_count(&self) -> usize {
        self.prims.iter().map(|p| p.points.len()).sum()
    }
}

impl CurveModel {
    /// Erzeugt den Export-Snapshot.
    ///
    /// Punktreihenfolge offen: `pos0, out0, in1, pos1, …, inN, posN`;
    /// geschlossen zusätzlich `outN, in0`. Prims mit einem Anker entfallen.
    pub fn export(&self) -> ExportedGeometry {
        let names_of = |wanted: AttributeType| -> Vec<String> {
            self.attribute_defs()
                .iter()
                .filter(|(_, ty)| **ty == wanted)
                .map(|(name, _)| name.clone())
                .collect()
        };

        let prims = self
            .prims()
            .iter()
            .enumerate()
            .filter(|(_, prim)| prim.len() > 1)
            .map(|(index, prim)| {
                let mut points: Vec<ExportedPoint> = prim
                    .range()
                    .flat_map(|a| ControlPoint::ALL.map(|c| (a, c)))
                    .map(|(a, c)| self.export_point(a, c))
                    .collect();
                // Erster In- und letzter Out-Handle liegen außerhalb der offenen Kurve
                let last_out = points.pop();
                let first_in = points.remove(0);
                if prim.is_closed {
                    points.extend(last_out);
                    points.push(first_in);
                }
                ExportedPrim {
                    source_prim: index,
                    name: prim.name.clone(),
                    is_closed: prim.is_closed,
                    points,
                }
            })
            .collect();

        ExportedGeometry {
            attribute_names: self.attribute_defs().keys().cloned().collect(),
            roll_attribs: names_of(AttributeType::VectorUp),
            orient_attribs: names_of(AttributeType::Orientation),
            prims,
            arrowheads: (0..self.prim_count())
                .filter_map(|p| self.arrowhead(p))
                .collect(),
        }
    }

    fn export_point(&self, anchor: usize, control: ControlPoint) -> ExportedPoint {
        let a = self.anchor(anchor);
        let attribs = self
            .attribute_defs()
            .keys()
            .filter_map(|name| Some((name.clone(), a.value_at(name, control)?.clone())))
            .collect();
        ExportedPoint {
            position: a.point(control),
            anchor,
            control,
            tag: if control == ControlPoint::Position {
                a.tag.clone()
            } else {
                String::new()
            },
            attribs,
        }
    }
}
