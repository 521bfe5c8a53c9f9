//! Neue Prims aus bestehenden Kurven oder Vorlagen erzeugen.

use glam::DVec3;

use super::CurveModel;
use crate::core::anchor::Anchor;
use crate::core::custom_shape::{CustomShape, ProjectionPlane};
use crate::shared::rotation::rotate_z_to_axis;

impl CurveModel {
    /// Dupliziert ein Prim, zentriert auf `target` (Schwerpunkt → Ziel).
    ///
    /// Geometrie und Attribute werden explizit kopiert, Tags nicht.
    /// Das neue Prim wird hinten angehängt; Rückgabe ist dessen Index.
    /// `None` für Prims mit weniger als zwei Ankern.
    pub fn duplicate_prim(&mut self, prim: usize, target: DVec3) -> Option<usize> {
        if self.prims[prim].len() < 2 {
            return None;
        }
        let offset = target - self.prim_centroid(prim);
        let source = &self.prims[prim];
        let anchors: Vec<Anchor> = self.anchors[source.range()]
            .iter()
            .map(|a| Anchor::duplicate_from(a, offset))
            .collect();
        let (name, is_closed) = (source.name.clone(), source.is_closed);
        let new_prim = self.push_prim(anchors, name, is_closed);
        self.finish_topology_edit();
        Some(new_prim)
    }

    /// Stempelt eine Vorlage an `target`.
    ///
    /// Mit `normal` wird die `+Z`-Achse der Vorlage auf die Normale gedreht,
    /// sonst bestimmt die Projektionsebene die Orientierung.
    pub fn insert_custom_shape(
        &mut self,
        shape: &CustomShape,
        name: &str,
        target: DVec3,
        normal: Option<DVec3>,
        plane: ProjectionPlane,
    ) -> usize {
        assert!(!shape.anchors.is_empty(), "Leere Vorlage {}", name);
        let rotation = match normal {
            Some(n) => rotate_z_to_axis(n),
            None => plane.rotation(),
        };
        let anchors: Vec<Anchor> = shape
            .anchors
            .iter()
            .map(|template| {
                let mut anchor = self.new_anchor(target + rotation * template.position);
                anchor.in_control = target + rotation * template.in_control;
                anchor.out_control = target + rotation * template.out_control;
                anchor.anchor_type = template.anchor_type;
                anchor
            })
            .collect();
        let new_prim = self.push_prim(anchors, name.to_string(), shape.is_closed);
        self.finish_topology_edit();
        new_prim
    }
}
