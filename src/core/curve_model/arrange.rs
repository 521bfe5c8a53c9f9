//! Ausrichten von Ankern: Begradigen, an Achsen ausrichten, auf Ebenen projizieren.

use glam::DVec3;

use super::CurveModel;
use crate::core::anchor::AnchorType;

/// Weltachse für das Ausrichten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Zielwert beim Ausrichten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    /// Kleinster Wert der Auswahl
    Min,
    /// Größter Wert der Auswahl
    Max,
    /// Mittelwert der Auswahl
    Average,
}

impl CurveModel {
    /// Begradigt einen zusammenhängenden Lauf von Ankern eines Prims.
    ///
    /// Innere Anker werden gleichmäßig auf die Strecke erster → letzter Anker
    /// verteilt. Nicht-Corner-Anker werden `Untied` und erhalten zum Lauf hin
    /// Handles auf der Strecke mit einem Drittel der Segmentlänge;
    /// Corner-Anker behalten kollabierte Handles.
    pub fn straighten_run(&mut self, run: &[usize]) {
        assert!(run.len() >= 2, "Begradigen braucht mindestens zwei Anker");
        let prim = self.owning_prim(run[0]);
        for pair in run.windows(2) {
            assert!(
                pair[1] == pair[0] + 1 && self.prims[prim].contains(pair[1]),
                "Anker {:?} bilden keinen zusammenhängenden Lauf",
                run
            );
        }

        let first = run[0];
        let last = run[run.len() - 1];
        let start = self.anchors[first].position;
        let line = self.anchors[last].position - start;
        let segments = (run.len() - 1) as f64;
        let segment = line / segments;
        let gradient = line.normalize_or_zero() * (line.length() / segments / 3.0);

        for (k, &i) in run.iter().enumerate() {
            let anchor = &mut self.anchors[i];
            if i != first && i != last {
                anchor.position = start + segment * k as f64;
            }
            if anchor.anchor_type == AnchorType::Corner {
                anchor.collapse();
                continue;
            }
            anchor.anchor_type = AnchorType::Untied;
            if i != first {
                anchor.in_control = anchor.position - gradient;
            }
            if i != last {
                anchor.out_control = anchor.position + gradient;
            }
        }
        self.bump();
    }

    /// Zerlegt eine beliebige Auswahl in maximale Läufe und begradigt jeden.
    ///
    /// Gibt die Anzahl begradigter Läufe zurück.
    pub fn straighten_anchors(&mut self, anchors: &[usize]) -> usize {
        let mut sorted = anchors.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut runs: Vec<Vec<usize>> = Vec::new();
        for i in sorted {
            let prim = self.owning_prim(i);
            match runs.last_mut() {
                Some(run)
                    if run.last().is_some_and(|&l| l + 1 == i)
                        && self.prims[prim].contains(run[0]) =>
                {
                    run.push(i)
                }
                _ => runs.push(vec![i]),
            }
        }

        let mut count = 0;
        for run in runs.iter().filter(|r| r.len() >= 2) {
            self.straighten_run(run);
            count += 1;
        }
        count
    }

    /// Setzt Position und beide Handles auf einer Achse auf einen gemeinsamen Wert.
    pub fn align_anchors(&mut self, anchors: &[usize], axis: Axis, mode: AlignMode) {
        if anchors.is_empty() {
            return;
        }
        let k = axis.index();
        let values = anchors.iter().map(|&i| self.anchors[i].position[k]);
        let target = match mode {
            AlignMode::Min => values.fold(f64::INFINITY, f64::min),
            AlignMode::Max => values.fold(f64::NEG_INFINITY, f64::max),
            AlignMode::Average => values.sum::<f64>() / anchors.len() as f64,
        };
        for &i in anchors {
            let anchor = &mut self.anchors[i];
            anchor.position[k] = target;
            anchor.in_control[k] = target;
            anchor.out_control[k] = target;
        }
        self.bump();
    }

    /// Projiziert Position und Handles orthogonal auf eine Ebene.
    ///
    /// Eine Null-Normale ist ein No-op.
    pub fn project_anchors(&mut self, anchors: &[usize], origin: DVec3, normal: DVec3) {
        let normal = normal.normalize_or_zero();
        if normal == DVec3::ZERO || anchors.is_empty() {
            return;
        }
        let project = |p: DVec3| p - normal * (p - origin).dot(normal);
        for &i in anchors {
            let anchor = &mut self.anchors[i];
            anchor.position = project(anchor.position);
            anchor.in_control = project(anchor.in_control);
            anchor.out_control = project(anchor.out_control);
        }
        self.bump();
    }
}
