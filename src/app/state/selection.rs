use indexmap::IndexSet;
use std::ops::Range;
use std::sync::Arc;

/// Auswahlbezogener Anwendungszustand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selektierte Anker-Indizes in Klick-Reihenfolge (Arc für O(1)-Snapshots)
    pub selected_anchors: Arc<IndexSet<usize>>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self {
            selected_anchors: Arc::new(IndexSet::new()),
        }
    }

    /// Erstellt eine Selektion aus gespeicherten Indizes.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            selected_anchors: Arc::new(indices.into_iter().collect()),
        }
    }

    /// Gibt eine mutable Referenz auf das IndexSet zurück (CoW: klont nur wenn nötig).
    #[inline]
    pub fn ids_mut(&mut self) -> &mut IndexSet<usize> {
        Arc::make_mut(&mut self.selected_anchors)
    }

    pub fn len(&self) -> usize {
        self.selected_anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_anchors.is_empty()
    }

    pub fn contains(&self, anchor: usize) -> bool {
        self.selected_anchors.contains(&anchor)
    }

    /// Erster (ältester) selektierter Anker.
    pub fn first(&self) -> Option<usize> {
        self.selected_anchors.first().copied()
    }

    /// Selektion als Liste in Klick-Reihenfolge.
    pub fn indices(&self) -> Vec<usize> {
        self.selected_anchors.iter().copied().collect()
    }

    /// Ersetzt die Selektion durch genau einen Anker.
    pub fn select_only(&mut self, anchor: usize) {
        let ids = self.ids_mut();
        ids.clear();
        ids.insert(anchor);
    }

    /// Leert die Selektion.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.ids_mut().clear();
        }
    }

    // ── Index-Pflege nach Topologie-Änderungen ──────────────────────

    /// Bildet jeden Index über `f` ab; `None` entfernt ihn aus der Selektion.
    pub fn remap(&mut self, f: impl Fn(usize) -> Option<usize>) {
        let remapped: IndexSet<usize> = self.selected_anchors.iter().filter_map(|&i| f(i)).collect();
        if !remapped.iter().eq(self.selected_anchors.iter()) {
            self.selected_anchors = Arc::new(remapped);
        }
    }

    /// Nach dem Einfügen von `count` Ankern an `index`.
    pub fn shift_for_insert(&mut self, index: usize, count: usize) {
        self.remap(|i| Some(if i >= index { i + count } else { i }));
    }

    /// Nach dem Entfernen der Anker `removed` (beliebige Reihenfolge).
    pub fn shift_for_removal(&mut self, removed: &[usize]) {
        let mut sorted = removed.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        self.remap(|i| match sorted.binary_search(&i) {
            Ok(_) => None,
            Err(below) => Some(i - below),
        });
    }

    /// Nach dem Umkehren eines Prims mit dem Bereich `range`.
    pub fn mirror_range(&mut self, range: Range<usize>) {
        let (start, end) = (range.start, range.end);
        self.remap(|i| Some(if (start..end).contains(&i) { start + end - 1 - i } else { i }));
    }

    /// Nach einer zyklischen Rotation um `offset` nach links innerhalb `range`.
    pub fn rotate_range(&mut self, range: Range<usize>, offset: usize) {
        let (start, len) = (range.start, range.len());
        self.remap(|i| {
            Some(if range.contains(&i) {
                start + (i - start + len - offset) % len
            } else {
                i
            })
        });
    }
}
