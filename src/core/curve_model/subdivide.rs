//! Auswertung und De-Casteljau-Teilung der Bezier-Segmente eines Prims.

use glam::DVec3;

use super::CurveModel;
use crate::core::anchor::{Anchor, AnchorType};
use crate::shared::spline_geometry::{cubic_bezier, split_cubic};

impl CurveModel {
    /// Bildet den Prim-Parameter `u` ∈ [0, 1] auf (Start-Anker, lokales t) ab.
    fn locate_segment(&self, prim: usize, u: f64) -> Option<(usize, f64)> {
        let p = &self.prims[prim];
        let segments = p.segment_count();
        if segments == 0 {
            return None;
        }
        let scaled = u.clamp(0.0, 1.0) * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        Some((p.start + segment, scaled - segment as f64))
    }

    /// Punkt auf der Bezier-Kette eines Prims beim Parameter `u` ∈ [0, 1].
    ///
    /// Ein Prim mit einem Anker liefert dessen Position.
    pub fn evaluate(&self, prim: usize, u: f64) -> DVec3 {
        match self.locate_segment(prim, u) {
            Some((from, t)) => self.evaluate_segment(from, t),
            None => self.anchors[self.prims[prim].start].position,
        }
    }

    /// Punkt auf dem Segment, das bei Anker `from` beginnt.
    pub fn evaluate_segment(&self, from: usize, t: f64) -> DVec3 {
        let to = self
            .next_index(from)
            .unwrap_or_else(|| panic!("Anker {} beginnt kein Segment", from));
        let a = &self.anchors[from];
        let b = &self.anchors[to];
        cubic_bezier(a.position, a.out_control, b.in_control, b.position, t)
    }

    /// Fügt einen Anker beim Prim-Parameter `u` ein, ohne die Kurvenform zu ändern.
    ///
    /// `None` für Prims mit weniger als zwei Ankern.
    pub fn insert_anchor_on_curve(&mut self, prim: usize, u: f64) -> Option<usize> {
        let (from, t) = self.locate_segment(prim, u)?;
        Some(self.split_segment(from, t))
    }

    /// Teilt das bei Anker `prev` beginnende Segment bei `t` (De Casteljau).
    ///
    /// Die angrenzenden Handles der Nachbarn werden gekürzt, der neue Anker
    /// erhält interpolierte Attribute und einen per Toleranz klassifizierten Typ.
    pub fn split_segment(&mut self, prev: usize, t: f64) -> usize {
        let next = self
            .next_index(prev)
            .unwrap_or_else(|| panic!("Anker {} beginnt kein Segment", prev));
        let prev_prev = self.prev_index(prev).unwrap_or(prev);
        let next_next = self.next_index(next).unwrap_or(next);

        let (a, b) = (&self.anchors[prev], &self.anchors[next]);
        let split = split_cubic(a.position, a.out_control, b.in_control, b.position, t);

        let mut anchor = Anchor::corner(split.split_position);
        anchor.in_control = split.split_in;
        anchor.out_control = split.split_out;
        anchor.anchor_type = AnchorType::classify(
            split.split_in,
            split.split_position,
            split.split_out,
            self.settings.untie_tolerance,
            self.settings.corner_tolerance,
        );
        anchor.attributes = self
            .attribute_defs
            .iter()
            .map(|(name, ty)| {
                let value_of = |i: usize| {
                    self.anchors[i]
                        .attributes
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| ty.default_value())
                };
                let value = ty.subdivide(
                    &value_of(prev_prev),
                    &value_of(prev),
                    &value_of(next),
                    &value_of(next_next),
                    t,
                );
                (name.clone(), value)
            })
            .collect();

        self.anchors[prev].out_control = split.start_out;
        self.anchors[next].in_control = split.end_in;

        // Auch das schließende Segment eines geschlossenen Prims endet hinter `prev`
        let index = prev + 1;
        let p = self.owning_prim(prev);
        self.splice_into_prim(p, index, vec![anchor]);
        self.finish_topology_edit();
        index
    }
}
