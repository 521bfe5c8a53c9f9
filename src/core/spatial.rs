//! Spatial-Index (KD-Tree) für schnelle Anker-Abfragen.

use glam::DVec3;
use kiddo::{KdTree, SquaredEuclidean};

use super::curve_model::CurveModel;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorMatch {
    /// Index des gefundenen Ankers
    pub anchor: usize,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über allen Ankerpositionen eines Modells.
#[derive(Debug, Clone)]
pub struct AnchorSpatialIndex {
    tree: KdTree<f64, 3>,
    positions: Vec<DVec3>,
}

impl AnchorSpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            positions: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den Ankerpositionen (Item = Anker-Index).
    pub fn from_model(model: &CurveModel) -> Self {
        let positions: Vec<DVec3> = model.anchors().iter().map(|a| a.position).collect();
        let entries: Vec<[f64; 3]> = positions.iter().map(|p| p.to_array()).collect();
        Self {
            tree: (&entries).into(),
            positions,
        }
    }

    /// Gibt die Anzahl indexierter Anker zurück.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Gibt `true` zurück, wenn keine Anker im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Findet den nächsten Anker zur gegebenen Weltposition.
    pub fn nearest(&self, query: DVec3) -> Option<AnchorMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&query.to_array());
        Some(AnchorMatch {
            anchor: result.item as usize,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Anker innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: DVec3, radius: f64) -> Vec<AnchorMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&query.to_array(), radius * radius)
            .into_iter()
            .map(|entry| AnchorMatch {
                anchor: entry.item as usize,
                distance: entry.distance.sqrt(),
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.anchor.cmp(&b.anchor)));
        results
    }

    /// Findet alle Anker innerhalb einer achsenparallelen Box (aufsteigend sortiert).
    ///
    /// Nutzt den KD-Tree mit einer umschließenden Kugelabfrage + Nachfilterung.
    pub fn within_box(&self, min: DVec3, max: DVec3) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }

        let center = (min + max) * 0.5;
        let radius_sq = ((max - min) * 0.5).length_squared();

        let mut ids: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&center.to_array(), radius_sq)
            .into_iter()
            .map(|entry| entry.item as usize)
            .filter(|&i| {
                let p = self.positions[i];
                p.cmpge(min).all() && p.cmple(max).all()
            })
            .collect();
        ids.sort_unstable();
        ids
    }
}
