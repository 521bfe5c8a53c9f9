//! Kurven-Primitive als zusammenhängender Bereich der Ankerliste.

use std::ops::Range;

/// Ein Kurven-Prim: halboffener Bereich `[start, end)` in der flachen Ankerliste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prim {
    /// Erster Anker-Index
    pub start: usize,
    /// Ein Index hinter dem letzten Anker
    pub end: usize,
    /// Ob die Kurve vom letzten Anker zum ersten zurückläuft
    pub is_closed: bool,
    /// Anzeigename
    pub name: String,
}

impl Prim {
    /// Erstellt ein offenes Prim.
    pub fn new(start: usize, end: usize, name: impl Into<String>) -> Self {
        Self {
            start,
            end,
            is_closed: false,
            name: name.into(),
        }
    }

    /// Anzahl Anker im Prim.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Gibt `true` zurück, wenn das Prim keine Anker enthält.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Prüft, ob der Anker-Index im Bereich liegt.
    pub fn contains(&self, anchor: usize) -> bool {
        anchor >= self.start && anchor < self.end
    }

    /// Index-Bereich als `Range`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Letzter Anker-Index (nur für nicht-leere Prims sinnvoll).
    pub fn last(&self) -> usize {
        self.end - 1
    }

    /// Anzahl Bezier-Segmente (geschlossen: eines mehr, einzelner Anker: keines).
    pub fn segment_count(&self) -> usize {
        match self.len() {
            0 | 1 => 0,
            n if self.is_closed => n,
            n => n - 1,
        }
    }

    /// Verschiebt den Bereich um `delta` Positionen.
    pub(crate) fn shift(&mut self, delta: isize) {
        self.start = self.start.wrapping_add_signed(delta);
        self.end = self.end.wrapping_add_signed(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_count_depends_on_closure() {
        let mut prim = Prim::new(2, 6, "curve");
        assert_eq!(prim.len(), 4);
        assert_eq!(prim.segment_count(), 3);
        prim.is_closed = true;
        assert_eq!(prim.segment_count(), 4);

        let single = Prim::new(0, 1, "dot");
        assert_eq!(single.segment_count(), 0);
    }

    #[test]
    fn contains_is_half_open() {
        let prim = Prim::new(3, 5, "curve");
        assert!(!prim.contains(2));
        assert!(prim.contains(3));
        assert!(prim.contains(4));
        assert!(!prim.contains(5));
        assert_eq!(prim.last(), 4);
    }
}
