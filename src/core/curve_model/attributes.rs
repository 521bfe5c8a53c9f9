//! Attribut-Verwaltung und Interpolations-Cache.

use indexmap::IndexMap;

use super::{conform_attributes, CurveModel};
use crate::core::attribute::{AttributeType, AttributeValue, PSCALE_ROLL_ATTRIBUTE};

/// Faktor, mit dem der eigene Wert zum Nachbarn überblendet wird (Handle bei 1/3).
const NEIGHBOUR_BLEND: f64 = 1.0 / 3.0;

impl CurveModel {
    /// Typ eines definierten Attributs.
    pub fn attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attribute_defs.get(name).copied()
    }

    /// Fügt ein Attribut hinzu oder ändert dessen Typ.
    ///
    /// Alle Anker erhalten den Standardwert. `__pr` ist reserviert.
    /// Gibt `false` zurück, wenn nichts geändert wurde.
    pub fn add_attribute(&mut self, name: &str, ty: AttributeType) -> bool {
        if name == PSCALE_ROLL_ATTRIBUTE || ty == AttributeType::PscaleAndRoll {
            log::warn!("Attribut {} ({:?}) ist reserviert", name, ty);
            return false;
        }
        if self.attribute_defs.get(name) == Some(&ty) {
            return false;
        }
        self.attribute_defs.insert(name.to_string(), ty);
        let default = ty.default_value();
        for anchor in &mut self.anchors {
            anchor.attributes.insert(name.to_string(), default.clone());
        }
        self.finish_topology_edit();
        true
    }

    /// Entfernt ein Attribut von allen Ankern (nie `__pr`).
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        if name == PSCALE_ROLL_ATTRIBUTE || self.attribute_defs.shift_remove(name).is_none() {
            return false;
        }
        for anchor in &mut self.anchors {
            anchor.attributes.shift_remove(name);
        }
        self.finish_topology_edit();
        true
    }

    /// Gleicht die Definitionen mit einer externen Liste ab.
    ///
    /// Fehlende werden ergänzt, Typ-Abweichungen auf Standardwerte
    /// zurückgesetzt, nicht gelistete entfernt (außer `__pr`).
    pub fn sync_attribute_defs(&mut self, defs: &[(String, AttributeType)]) {
        let mut synced = IndexMap::with_capacity(defs.len() + 1);
        synced.insert(PSCALE_ROLL_ATTRIBUTE.to_string(), AttributeType::PscaleAndRoll);
        for (name, ty) in defs {
            if name == PSCALE_ROLL_ATTRIBUTE || *ty == AttributeType::PscaleAndRoll {
                continue;
            }
            synced.insert(name.clone(), *ty);
        }
        if synced == self.attribute_defs {
            return;
        }

        // Typ-Wechsel: Werte verwerfen, damit sie auf den Standard fallen
        for (name, ty) in &synced {
            if self.attribute_defs.get(name).is_some_and(|old| old != ty) {
                for anchor in &mut self.anchors {
                    anchor.attributes.shift_remove(name);
                }
            }
        }
        for anchor in &mut self.anchors {
            conform_attributes(anchor, &synced);
        }
        log::info!(
            "Attribute synchronisiert: {} Definitionen",
            synced.len()
        );
        self.attribute_defs = synced;
        self.finish_topology_edit();
    }

    /// Setzt einen Attributwert (typgeprüft).
    pub fn set_attribute_value(
        &mut self,
        anchor: usize,
        name: &str,
        value: AttributeValue,
    ) -> anyhow::Result<()> {
        let Some(ty) = self.attribute_type(name) else {
            anyhow::bail!("Unbekanntes Attribut: {}", name);
        };
        if !ty.accepts(&value) {
            anyhow::bail!(
                "Wert {:?} passt nicht zu Attribut {} ({:?})",
                value,
                name,
                ty
            );
        }
        self.anchors[anchor]
            .attributes
            .insert(name.to_string(), value);
        self.finish_topology_edit();
        Ok(())
    }

    /// Berechnet das Interpolations-Tripel aller Anker neu.
    ///
    /// Nicht-Leitern: (1/3 Richtung Vorgänger, eigener Wert, 1/3 Richtung Nachfolger),
    /// ohne Nachbar der eigene Wert. Integer-Leitern: (Wert des Vorgängers oder eigener, eigener, eigener).
    pub(crate) fn refresh_interpolation(&mut self) {
        let caches: Vec<IndexMap<String, [AttributeValue; 3]>> = (0..self.anchors.len())
            .map(|i| {
                let prev = self.prev_index(i).map(|p| &self.anchors[p]);
                let next = self.next_index(i).map(|n| &self.anchors[n]);
                let own_anchor = &self.anchors[i];
                self.attribute_defs
                    .iter()
                    .filter_map(|(name, ty)| {
                        let own = own_anchor.attributes.get(name)?;
                        let prev_val = prev.and_then(|a| a.attributes.get(name));
                        let next_val = next.and_then(|a| a.attributes.get(name));
                        let triple = if ty.is_stepped() {
                            [prev_val.unwrap_or(own).clone(), own.clone(), own.clone()]
                        } else {
                            let blend = |other: Option<&AttributeValue>| match other {
                                Some(v) => ty.interpolate(own, v, NEIGHBOUR_BLEND),
                                None => own.clone(),
                            };
                            [blend(prev_val), own.clone(), blend(next_val)]
                        };
                        Some((name.clone(), triple))
                    })
                    .collect()
            })
            .collect();

        for (anchor, cache) in self.anchors.iter_mut().zip(caches) {
            anchor.interpolated = cache;
        }
    }
}
