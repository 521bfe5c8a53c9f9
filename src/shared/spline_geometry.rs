//! Reine Geometrie-Funktionen für kubische Bezier-Segmente und Catmull-Rom.
//!
//! Layer-neutral: wird von `core` (Subdivision, Export) und `app`
//! (Presentation-Caches) gleichermaßen genutzt.

use glam::DVec3;

/// Berechnet einen skalaren Catmull-Rom-Wert (t ∈ [0, 1]).
///
/// Die Kurve verläuft von `p1` nach `p2`; `p0`/`p3` sind die äußeren Stützwerte.
pub fn catmull_rom_scalar(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Wertet ein kubisches Bezier-Segment bei `t` aus.
///
/// `p0`/`p3` sind die Ankerpositionen, `c1`/`c2` die inneren Kontrollpunkte.
pub fn cubic_bezier(p0: DVec3, c1: DVec3, c2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t * p3
}

/// Ergebnis einer De-Casteljau-Teilung eines kubischen Segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSplit {
    /// Gekürzter Out-Handle des Start-Ankers
    pub start_out: DVec3,
    /// In-Handle des neuen Ankers
    pub split_in: DVec3,
    /// Position des neuen Ankers (= Kurvenpunkt bei `t`)
    pub split_position: DVec3,
    /// Out-Handle des neuen Ankers
    pub split_out: DVec3,
    /// Gekürzter In-Handle des End-Ankers
    pub end_in: DVec3,
}

/// Teilt ein kubisches Segment bei `t` (De Casteljau).
///
/// Beide Teilkurven zusammen beschreiben exakt dieselbe Kurve wie das Original.
pub fn split_cubic(p0: DVec3, c1: DVec3, c2: DVec3, p3: DVec3, t: f64) -> CubicSplit {
    let a = p0.lerp(c1, t);
    let b = c1.lerp(c2, t);
    let c = c2.lerp(p3, t);
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    CubicSplit {
        start_out: a,
        split_in: ab,
        split_position: ab.lerp(bc, t),
        split_out: bc,
        end_in: c,
    }
}

/// Achsenparallele Bounding-Box einer Punktmenge als `(min, max)`.
///
/// Gibt `None` zurück, wenn keine Punkte übergeben wurden.
pub fn bounding_box(points: impl IntoIterator<Item = DVec3>) -> Option<(DVec3, DVec3)> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
}
