//! Transformations-Box über eine Mehrfachauswahl von Ankern.
//!
//! Die Box merkt sich beim Aufbau die Versätze aller Ankerpunkte zur
//! Box-Mitte. `apply` skaliert, rotiert und verschiebt diese Versätze
//! immer ausgehend vom Ausgangszustand, so dass wiederholtes Ziehen
//! an den Box-Handles nicht driftet.

use glam::DVec3;

use super::curve_model::CurveModel;
use crate::shared::rotation::quat_from_euler_degrees;
use crate::shared::spline_geometry::bounding_box;

/// Achsenparallele Box mit gespeicherten Anker-Versätzen.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBox {
    /// Box-Mitte beim Aufbau
    pub center: DVec3,
    /// Box-Ausdehnung beim Aufbau
    pub size: DVec3,
    offsets: Vec<(usize, [DVec3; 3])>,
}

impl SelectionBox {
    /// Baut die Box über die Positionen der Anker.
    ///
    /// `None` bei weniger als zwei Ankern.
    pub fn from_anchors(model: &CurveModel, anchors: &[usize]) -> Option<Self> {
        if anchors.len() < 2 {
            return None;
        }
        let (min, max) = bounding_box(anchors.iter().map(|&i| model.anchor(i).position))?;
        let center = (min + max) * 0.5;
        let offsets = anchors
            .iter()
            .map(|&i| (i, model.anchor(i).controls().map(|p| p - center)))
            .collect();
        Some(Self {
            center,
            size: max - min,
            offsets,
        })
    }

    /// Indizes der erfassten Anker.
    pub fn anchors(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().map(|(i, _)| *i)
    }

    /// Pro-Achse-Skalierung zur neuen Größe (1.0 bei degenerierter Ausgangsgröße).
    pub fn scale_for(&self, size: DVec3, tolerance: f64) -> DVec3 {
        let axis = |new: f64, orig: f64| if orig.abs() < tolerance { 1.0 } else { new / orig };
        DVec3::new(
            axis(size.x, self.size.x),
            axis(size.y, self.size.y),
            axis(size.z, self.size.z),
        )
    }

    /// Wendet Skalierung, Rotation (Euler-Grad) und neue Mitte auf die Anker an.
    pub fn apply(
        &self,
        model: &mut CurveModel,
        center: DVec3,
        size: DVec3,
        rotation_deg: [f64; 3],
        tolerance: f64,
    ) {
        let scale = self.scale_for(size, tolerance);
        let rotation = quat_from_euler_degrees(rotation_deg);
        let updates: Vec<(usize, [DVec3; 3])> = self
            .offsets
            .iter()
            .map(|(i, offsets)| (*i, offsets.map(|o| center + rotation * (o * scale))))
            .collect();
        model.set_anchor_controls(&updates);
    }
}
