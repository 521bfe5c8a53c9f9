//! Zentrales Kurvenmodell: flache Ankerliste, Prim-Bereiche und Attribut-Definitionen.
//!
//! Jede mutierende Operation hält die Prim-Bereiche konsistent
//! (lückenlos, sortiert, Vereinigung = `[0, anchors.len())`) und erhöht
//! den Versionszähler, an dem Presentation-Caches ihre Gültigkeit messen.

mod arrange;
mod attributes;
mod geometry;
mod instancing;
mod subdivide;

#[cfg(test)]
mod tests;

use glam::DVec3;
use indexmap::IndexMap;

use super::anchor::{Anchor, AnchorType, Handle, HandleMove};
use super::attribute::{AttributeType, PSCALE_ROLL_ATTRIBUTE};
use super::prim::Prim;
use crate::shared::options::{CORNER_TOLERANCE, DEFAULT_PRIM_NAME, UNTIE_TOLERANCE};

pub use arrange::{AlignMode, Axis};
pub use geometry::Arrowhead;

/// Einstellungen, die das Modell bei Einfüge-Operationen braucht.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Name für neu angelegte Prims
    pub default_prim_name: String,
    /// Toleranz für Smooth-Klassifizierung
    pub untie_tolerance: f64,
    /// Toleranz für Corner-Klassifizierung
    pub corner_tolerance: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_prim_name: DEFAULT_PRIM_NAME.to_string(),
            untie_tolerance: UNTIE_TOLERANCE,
            corner_tolerance: CORNER_TOLERANCE,
        }
    }
}

/// Container für alle Anker und Prims eines Dokuments.
#[derive(Debug, Clone)]
pub struct CurveModel {
    anchors: Vec<Anchor>,
    prims: Vec<Prim>,
    attribute_defs: IndexMap<String, AttributeType>,
    settings: ModelSettings,
    version: u64,
}

impl Default for CurveModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveModel {
    /// Erstellt ein leeres Modell mit dem eingebauten `__pr`-Attribut.
    pub fn new() -> Self {
        Self::with_settings(ModelSettings::default())
    }

    /// Erstellt ein leeres Modell mit eigenen Einstellungen.
    pub fn with_settings(settings: ModelSettings) -> Self {
        let mut attribute_defs = IndexMap::new();
        attribute_defs.insert(PSCALE_ROLL_ATTRIBUTE.to_string(), AttributeType::PscaleAndRoll);
        Self {
            anchors: Vec::new(),
            prims: Vec::new(),
            attribute_defs,
            settings,
            version: 0,
        }
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Monotoner Versionszähler, steigt bei jeder Mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Aktive Modell-Einstellungen.
    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Ersetzt die Modell-Einstellungen (z.B. nach Options-Änderung).
    pub fn set_settings(&mut self, settings: ModelSettings) {
        self.settings = settings;
    }

    /// Gibt die Anzahl der Anker zurück.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Gibt die Anzahl der Prims zurück.
    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    /// Gibt `true` zurück, wenn keine Anker vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Alle Anker in Index-Reihenfolge.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Alle Prims in Index-Reihenfolge.
    pub fn prims(&self) -> &[Prim] {
        &self.prims
    }

    /// Anker am Index. Panik bei ungültigem Index.
    pub fn anchor(&self, index: usize) -> &Anchor {
        &self.anchors[index]
    }

    /// Prim am Index. Panik bei ungültigem Index.
    pub fn prim(&self, prim: usize) -> &Prim {
        &self.prims[prim]
    }

    /// Attribut-Definitionen in Reihenfolge.
    pub fn attribute_defs(&self) -> &IndexMap<String, AttributeType> {
        &self.attribute_defs
    }

    /// Prim, dessen Bereich den Anker enthält.
    pub fn prim_of(&self, anchor: usize) -> Option<usize> {
        let candidate = self.prims.partition_point(|p| p.end <= anchor);
        self.prims
            .get(candidate)
            .filter(|p| p.contains(anchor))
            .map(|_| candidate)
    }

    /// Wie `prim_of`, aber ein Anker außerhalb aller Prims ist ein Programmierfehler.
    fn owning_prim(&self, anchor: usize) -> usize {
        self.prim_of(anchor)
            .unwrap_or_else(|| panic!("Anker {} liegt in keinem Prim", anchor))
    }

    /// Vorgänger im selben Prim (geschlossen: zyklisch), `None` am offenen Rand.
    pub fn prev_index(&self, anchor: usize) -> Option<usize> {
        let prim = &self.prims[self.owning_prim(anchor)];
        if anchor > prim.start {
            Some(anchor - 1)
        } else if prim.is_closed && prim.len() > 1 {
            Some(prim.last())
        } else {
            None
        }
    }

    /// Nachfolger im selben Prim (geschlossen: zyklisch), `None` am offenen Rand.
    pub fn next_index(&self, anchor: usize) -> Option<usize> {
        let prim = &self.prims[self.owning_prim(anchor)];
        if anchor + 1 < prim.end {
            Some(anchor + 1)
        } else if prim.is_closed && prim.len() > 1 {
            Some(prim.start)
        } else {
            None
        }
    }

    /// Offenes Prim, an dessen Rand der Anker liegt, und ob es das Ende ist.
    ///
    /// Wird vom Zeichenwerkzeug genutzt, um eine Kurve zu verlängern.
    pub fn prim_boundary(&self, anchor: usize) -> Option<(usize, bool)> {
        let p = self.prim_of(anchor)?;
        let prim = &self.prims[p];
        if prim.is_closed {
            return None;
        }
        if anchor == prim.last() {
            Some((p, true))
        } else if anchor == prim.start {
            Some((p, false))
        } else {
            None
        }
    }

    // ── Interne Helfer ──────────────────────────────────────────────

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Neuer Corner-Anker mit Standardwerten aller definierten Attribute.
    fn new_anchor(&self, position: DVec3) -> Anchor {
        let mut anchor = Anchor::corner(position);
        anchor.attributes = self
            .attribute_defs
            .iter()
            .map(|(name, ty)| (name.clone(), ty.default_value()))
            .collect();
        anchor
    }

    /// Verschiebt alle Prims hinter `prim` um `delta`.
    fn shift_prims_after(&mut self, prim: usize, delta: isize) {
        for p in &mut self.prims[prim + 1..] {
            p.shift(delta);
        }
    }

    /// Fügt Anker an `index` in das Prim `prim` ein (ohne Version/Cache).
    fn splice_into_prim(&mut self, prim: usize, index: usize, anchors: Vec<Anchor>) {
        let count = anchors.len();
        self.anchors.splice(index..index, anchors);
        self.prims[prim].end += count;
        self.shift_prims_after(prim, count as isize);
    }

    /// Hängt ein neues Prim mit den Ankern ans Ende der Liste an.
    fn push_prim(&mut self, anchors: Vec<Anchor>, name: String, is_closed: bool) -> usize {
        let start = self.anchors.len();
        self.anchors.extend(anchors);
        self.prims.push(Prim {
            start,
            end: self.anchors.len(),
            is_closed,
            name,
        });
        self.prims.len() - 1
    }

    /// Entfernt einen Anker ohne Version/Cache-Aktualisierung.
    fn detach_anchor(&mut self, index: usize) -> Anchor {
        let p = self.owning_prim(index);
        let anchor = self.anchors.remove(index);
        self.prims[p].end -= 1;
        self.shift_prims_after(p, -1);
        if self.prims[p].is_empty() {
            self.prims.remove(p);
        }
        anchor
    }

    /// Abschluss einer strukturellen Änderung.
    fn finish_topology_edit(&mut self) {
        self.refresh_interpolation();
        self.bump();
    }

    // ── Struktur ────────────────────────────────────────────────────

    /// Fügt einen Corner-Anker an `position` ein.
    ///
    /// `None` legt ein neues Prim am Ende an; `Some(prim)` verlängert das Prim
    /// am Anfang oder (`at_end`) am Ende. Geschlossene Prims sind nicht erlaubt.
    pub fn append_anchor(&mut self, position: DVec3, at_prim: Option<usize>, at_end: bool) -> usize {
        let anchor = self.new_anchor(position);
        let index = match at_prim {
            None => {
                let name = self.settings.default_prim_name.clone();
                let p = self.push_prim(vec![anchor], name, false);
                self.prims[p].start
            }
            Some(p) => {
                let prim = &self.prims[p];
                assert!(!prim.is_closed, "Anker an geschlossenes Prim {} angehängt", p);
                let index = if at_end { prim.end } else { prim.start };
                self.splice_into_prim(p, index, vec![anchor]);
                index
            }
        };
        self.finish_topology_edit();
        index
    }

    /// Entfernt einen Anker; ein leer gewordenes Prim wird gelöscht.
    pub fn remove_anchor(&mut self, index: usize) -> Anchor {
        let anchor = self.detach_anchor(index);
        self.finish_topology_edit();
        anchor
    }

    /// Entfernt mehrere Anker als ein Schritt (absteigend, eine Versions-Erhöhung).
    pub fn remove_anchors(&mut self, indices: &[usize]) -> usize {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        if let Some(&max) = sorted.first() {
            assert!(max < self.anchors.len(), "Anker-Index {} außerhalb", max);
        } else {
            return 0;
        }
        for &index in &sorted {
            self.detach_anchor(index);
        }
        self.finish_topology_edit();
        sorted.len()
    }

    /// Entfernt ein Prim samt aller Anker.
    pub fn remove_prim(&mut self, prim: usize) {
        let removed = self.prims.remove(prim);
        self.anchors.drain(removed.range());
        for p in &mut self.prims[prim..] {
            p.shift(-(removed.len() as isize));
        }
        self.finish_topology_edit();
    }

    /// Kehrt die Ankerreihenfolge eines Prims um und tauscht alle Handles.
    pub fn reverse_prim(&mut self, prim: usize) {
        let range = self.prims[prim].range();
        if range.len() < 2 {
            log::debug!("Prim {} hat weniger als zwei Anker, Umkehr entfällt", prim);
            return;
        }
        let slice = &mut self.anchors[range];
        slice.reverse();
        slice.iter_mut().for_each(Anchor::swap_handles);
        self.finish_topology_edit();
    }

    /// Macht `anchor` zum Startanker seines Prims.
    ///
    /// Geschlossen: zyklische Rotation. Offen: Randanker sind ein No-op,
    /// innere Anker ein Programmierfehler.
    pub fn rewire_prim(&mut self, anchor: usize) {
        let p = self.owning_prim(anchor);
        let prim = &self.prims[p];
        if anchor == prim.start || prim.len() < 2 {
            return;
        }
        if !prim.is_closed {
            assert!(
                anchor == prim.last(),
                "Rewire auf inneren Anker {} des offenen Prims {}",
                anchor,
                p
            );
            log::debug!("Rewire am Ende des offenen Prims {} ignoriert", p);
            return;
        }
        let offset = anchor - prim.start;
        let range = prim.range();
        self.anchors[range].rotate_left(offset);
        self.finish_topology_edit();
    }

    /// Öffnet oder schließt ein Prim (Geometrie bleibt unverändert).
    pub fn close_prim(&mut self, prim: usize, closed: bool) {
        if self.prims[prim].is_closed == closed {
            return;
        }
        self.prims[prim].is_closed = closed;
        self.finish_topology_edit();
    }

    /// Benennt ein Prim um.
    pub fn rename_prim(&mut self, prim: usize, name: impl Into<String>) {
        self.prims[prim].name = name.into();
        self.bump();
    }

    /// Setzt das Label eines Ankers.
    pub fn set_tag(&mut self, anchor: usize, tag: impl Into<String>) {
        self.anchors[anchor].tag = tag.into();
        self.bump();
    }

    // ── Anker-Bearbeitung ───────────────────────────────────────────

    /// Setzt den Handle-Typ.
    ///
    /// Corner kollabiert beide Handles, Smooth berechnet die Catmull-Rom-Tangente
    /// neu, Untied lässt die Handles unverändert.
    pub fn set_anchor_type(&mut self, anchor: usize, anchor_type: AnchorType) {
        match anchor_type {
            AnchorType::Corner => self.anchors[anchor].collapse(),
            AnchorType::Smooth => self.apply_auto_tangent(anchor),
            AnchorType::Untied => {}
        }
        self.anchors[anchor].anchor_type = anchor_type;
        self.bump();
    }

    /// Schaltet zwischen Corner und Smooth um (Untied → Corner).
    pub fn toggle_anchor_smoothness(&mut self, anchor: usize) {
        let next = match self.anchors[anchor].anchor_type {
            AnchorType::Corner => AnchorType::Smooth,
            AnchorType::Smooth | AnchorType::Untied => AnchorType::Corner,
        };
        self.set_anchor_type(anchor, next);
    }

    /// Catmull-Rom-Auto-Tangente: Gradient = next − prev, Handles = pos ∓ Gradient/4.
    fn apply_auto_tangent(&mut self, anchor: usize) {
        let position = self.anchors[anchor].position;
        let prev = self
            .prev_index(anchor)
            .map_or(position, |i| self.anchors[i].position);
        let next = self
            .next_index(anchor)
            .map_or(position, |i| self.anchors[i].position);
        let quarter = (next - prev) * 0.25;
        let a = &mut self.anchors[anchor];
        a.in_control = position - quarter;
        a.out_control = position + quarter;
    }

    /// Verschiebt einen Handle; siehe [`Anchor::move_handle`].
    pub fn move_control(&mut self, anchor: usize, handle: Handle, new_position: DVec3, mode: HandleMove) {
        self.anchors[anchor].move_handle(handle, new_position, mode);
        self.bump();
    }

    /// Verschiebt einen Anker starr (Position und Handles).
    pub fn move_anchor(&mut self, anchor: usize, new_position: DVec3) {
        self.anchors[anchor].translate_to(new_position);
        self.bump();
    }

    /// Verschiebt mehrere Anker starr um `delta`.
    pub fn move_anchors(&mut self, anchors: &[usize], delta: DVec3) {
        if anchors.is_empty() {
            return;
        }
        for &i in anchors {
            self.anchors[i].translate(delta);
        }
        self.bump();
    }

    /// Setzt `[in, pos, out]` mehrerer Anker in einem Schritt.
    pub fn set_anchor_controls(&mut self, updates: &[(usize, [DVec3; 3])]) {
        if updates.is_empty() {
            return;
        }
        for &(i, [in_control, position, out_control]) in updates {
            let anchor = &mut self.anchors[i];
            anchor.in_control = in_control;
            anchor.position = position;
            anchor.out_control = out_control;
        }
        self.bump();
    }

    // ── Laden ───────────────────────────────────────────────────────

    /// Ersetzt den gesamten Inhalt in einem Schritt (z.B. beim Laden).
    ///
    /// Prüft die Prim-Bereiche und gleicht die Ankerattribute mit den
    /// Definitionen ab; bei Fehlern bleibt das Modell unverändert.
    pub fn replace_with(
        &mut self,
        mut anchors: Vec<Anchor>,
        prims: Vec<Prim>,
        mut attribute_defs: IndexMap<String, AttributeType>,
    ) -> anyhow::Result<()> {
        validate_prims(&prims, anchors.len())?;

        match attribute_defs.get(PSCALE_ROLL_ATTRIBUTE) {
            Some(AttributeType::PscaleAndRoll) => {}
            Some(other) => anyhow::bail!(
                "Attribut {} muss Typ PscaleAndRoll haben, war {:?}",
                PSCALE_ROLL_ATTRIBUTE,
                other
            ),
            None => {
                attribute_defs.shift_insert(
                    0,
                    PSCALE_ROLL_ATTRIBUTE.to_string(),
                    AttributeType::PscaleAndRoll,
                );
            }
        }

        for anchor in &mut anchors {
            conform_attributes(anchor, &attribute_defs);
        }

        self.anchors = anchors;
        self.prims = prims;
        self.attribute_defs = attribute_defs;
        self.finish_topology_edit();
        Ok(())
    }
}

/// Prüft, dass die Prims lückenlos und sortiert genau `[0, anchor_count)` abdecken.
fn validate_prims(prims: &[Prim], anchor_count: usize) -> anyhow::Result<()> {
    let mut expected_start = 0;
    for (i, prim) in prims.iter().enumerate() {
        if prim.start != expected_start {
            anyhow::bail!(
                "Prim {} beginnt bei {}, erwartet {}",
                i,
                prim.start,
                expected_start
            );
        }
        if prim.end <= prim.start {
            anyhow::bail!("Prim {} ist leer ({}..{})", i, prim.start, prim.end);
        }
        expected_start = prim.end;
    }
    if expected_start != anchor_count {
        anyhow::bail!(
            "Prims decken {} Anker ab, vorhanden sind {}",
            expected_start,
            anchor_count
        );
    }
    Ok(())
}

/// Ergänzt fehlende Attribute, setzt Typ-Abweichungen zurück, verwirft Unbekanntes.
fn conform_attributes(anchor: &mut Anchor, defs: &IndexMap<String, AttributeType>) {
    let mut conformed = IndexMap::with_capacity(defs.len());
    for (name, ty) in defs {
        let value = match anchor.attributes.swap_remove(name) {
            Some(v) if ty.accepts(&v) => v,
            _ => ty.default_value(),
        };
        conformed.insert(name.clone(), value);
    }
    anchor.attributes = conformed;
}
