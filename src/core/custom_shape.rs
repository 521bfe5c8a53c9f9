//! Unveränderliche Kurven-Vorlagen zum Stempeln und die Projektionsebene.

use glam::{DQuat, DVec3};

use super::anchor::AnchorType;
use crate::shared::spline_geometry::bounding_box;

/// Orientierung beim Einfügen ohne Oberflächen-Normale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectionPlane {
    /// XY-Ebene (Vorlage unverändert)
    #[default]
    Xy,
    /// XZ-Ebene (90° um X)
    Xz,
    /// YZ-Ebene (90° um Y)
    Yz,
    /// Beliebige Orientierung (z.B. Konstruktionsebene)
    Free(DQuat),
}

impl ProjectionPlane {
    /// Rotation, die die Vorlage (in XY) in diese Ebene dreht.
    pub fn rotation(self) -> DQuat {
        match self {
            Self::Xy => DQuat::IDENTITY,
            Self::Xz => DQuat::from_rotation_x(std::f64::consts::FRAC_PI_2),
            Self::Yz => DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
            Self::Free(rotation) => rotation,
        }
    }

    /// Normale der Ebene.
    pub fn normal(self) -> DVec3 {
        self.rotation() * DVec3::Z
    }
}

/// Ein Anker der Vorlage, relativ zum Vorlagen-Ursprung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomShapeAnchor {
    pub in_control: DVec3,
    pub position: DVec3,
    pub out_control: DVec3,
    pub anchor_type: AnchorType,
}

/// Vorlage: geordnete Anker plus Schließ-Flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomShape {
    pub anchors: Vec<CustomShapeAnchor>,
    pub is_closed: bool,
}

impl CustomShape {
    /// Erstellt eine Vorlage aus fertigen Ankern.
    pub fn new(anchors: Vec<CustomShapeAnchor>, is_closed: bool) -> Self {
        Self { anchors, is_closed }
    }

    /// Liest eine Vorlage aus der Bezier-Punktliste einer Host-Kurve.
    ///
    /// Erwartet offen `pos0, out0, in1, pos1, …, posN` bzw. geschlossen
    /// zusätzlich `outN, in0`. Die Punkte werden auf die Bounding-Box-Mitte
    /// zentriert, offene Enden erhalten gespiegelte Handles.
    pub fn from_bezier_points(
        points: &[DVec3],
        is_closed: bool,
        untie_tolerance: f64,
        corner_tolerance: f64,
    ) -> anyhow::Result<Self> {
        let Some((min, max)) = bounding_box(points.iter().copied()) else {
            anyhow::bail!("Vorlage ohne Punkte");
        };
        let center = (min + max) * 0.5;
        let mut local: Vec<DVec3> = points.iter().map(|p| *p - center).collect();

        if is_closed {
            // Der letzte Punkt ist der In-Handle des ersten Ankers
            local.rotate_right(1);
        } else if local.len() == 1 {
            local = vec![local[0]; 3];
        } else {
            let n = local.len();
            let first_in = 2.0 * local[0] - local[1];
            let last_out = 2.0 * local[n - 1] - local[n - 2];
            local.insert(0, first_in);
            local.push(last_out);
        }

        if local.len() % 3 != 0 {
            anyhow::bail!(
                "{} Bezier-Punkte ergeben keine ganzen Anker ({})",
                points.len(),
                if is_closed { "geschlossen" } else { "offen" }
            );
        }

        let anchors = local
            .chunks_exact(3)
            .map(|c| CustomShapeAnchor {
                in_control: c[0],
                position: c[1],
                out_control: c[2],
                anchor_type: AnchorType::classify(c[0], c[1], c[2], untie_tolerance, corner_tolerance),
            })
            .collect();

        Ok(Self { anchors, is_closed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn open_curve_gets_mirrored_end_handles() {
        // Zwei Anker: pos0, out0, in1, pos1
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ];
        let shape = CustomShape::from_bezier_points(&points, false, 1e-4, 1e-7).unwrap();

        assert_eq!(shape.anchors.len(), 2);
        let first = shape.anchors[0];
        assert_relative_eq!(first.position.x, -2.0);
        assert_relative_eq!(first.in_control.x, -3.0);
        assert_eq!(first.anchor_type, AnchorType::Smooth);
        assert_relative_eq!(shape.anchors[1].out_control.x, 3.0);
    }

    #[test]
    fn closed_curve_moves_last_point_to_front() {
        // Quadrat mit kollabierten Handles: 2 Anker × 3 Punkte
        let a = DVec3::new(-1.0, 0.0, 0.0);
        let b = DVec3::new(1.0, 0.0, 0.0);
        let points = [a, a, b, b, b, a];
        let shape = CustomShape::from_bezier_points(&points, true, 1e-4, 1e-7).unwrap();

        assert_eq!(shape.anchors.len(), 2);
        assert!(shape
            .anchors
            .iter()
            .all(|anchor| anchor.anchor_type == AnchorType::Corner));
        assert_eq!(shape.anchors[0].position, a);
        assert_eq!(shape.anchors[1].position, b);
    }

    #[test]
    fn partial_anchor_is_rejected() {
        let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        assert!(CustomShape::from_bezier_points(&points, true, 1e-4, 1e-7).is_err());
        assert!(CustomShape::from_bezier_points(&[], false, 1e-4, 1e-7).is_err());
    }

    #[test]
    fn projection_planes_have_axis_normals() {
        assert_relative_eq!(ProjectionPlane::Xy.normal().distance(DVec3::Z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ProjectionPlane::Xz.normal().y.abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ProjectionPlane::Yz.normal().distance(DVec3::X), 0.0, epsilon = 1e-12);
    }
}
