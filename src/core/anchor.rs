//! Repräsentiert einen Anker (Kurvenpunkt mit zwei Bezier-Handles).

use glam::DVec3;
use indexmap::IndexMap;
use serde::Serialize;

use super::attribute::AttributeValue;
use crate::shared::rotation::rotation_between;

/// Kopplung der beiden Handles eines Ankers (Host-Flag in Klammern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum AnchorType {
    /// Handles kollinear, werden gespiegelt geführt (0)
    Smooth,
    /// Beide Handles liegen auf der Position (1)
    #[default]
    Corner,
    /// Handles unabhängig (2)
    Untied,
}

impl AnchorType {
    /// Liefert den Typ zum Host-Flag.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Self::Smooth),
            1 => Some(Self::Corner),
            2 => Some(Self::Untied),
            _ => None,
        }
    }

    /// Host-Flag (wie im Dokument `flag`).
    pub fn flag(self) -> i64 {
        match self {
            Self::Smooth => 0,
            Self::Corner => 1,
            Self::Untied => 2,
        }
    }

    /// Klassifiziert ein Handle-Tripel anhand der Toleranzen.
    ///
    /// - Summe der quadrierten Handle-Längen unter `corner_tolerance` → `Corner`
    /// - normierte In-/Out-Richtungen mit |dot − 1| unter `untie_tolerance` → `Smooth`
    /// - sonst `Untied`
    pub fn classify(
        in_control: DVec3,
        position: DVec3,
        out_control: DVec3,
        untie_tolerance: f64,
        corner_tolerance: f64,
    ) -> Self {
        let in_vec = position - in_control;
        let out_vec = out_control - position;
        if in_vec.length_squared() + out_vec.length_squared() < corner_tolerance {
            return Self::Corner;
        }
        let dot = in_vec.normalize_or_zero().dot(out_vec.normalize_or_zero());
        if (dot - 1.0).abs() < untie_tolerance {
            Self::Smooth
        } else {
            Self::Untied
        }
    }

    /// Anzeigename für Labels und Logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Corner => "corner",
            Self::Untied => "untied",
        }
    }
}

/// Einer der drei Punkte eines Ankers, in Dokument-Reihenfolge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPoint {
    /// Eingehender Handle (Index 0)
    In,
    /// Ankerposition (Index 1)
    Position,
    /// Ausgehender Handle (Index 2)
    Out,
}

impl ControlPoint {
    /// Alle Punkte in Dokument-Reihenfolge.
    pub const ALL: [ControlPoint; 3] = [ControlPoint::In, ControlPoint::Position, ControlPoint::Out];

    /// Index im `controls`-Tripel.
    pub fn index(self) -> usize {
        match self {
            Self::In => 0,
            Self::Position => 1,
            Self::Out => 2,
        }
    }
}

/// Einer der beiden Handles eines Ankers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Eingehender Handle
    In,
    /// Ausgehender Handle
    Out,
}

impl Handle {
    /// Der gegenüberliegende Handle.
    pub fn opposite(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

/// Modus beim Ziehen eines Handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleMove {
    /// Gegenüberliegenden Handle auf den Gegenstrahl projizieren
    pub aligned: bool,
    /// Gegenüberliegenden Handle auf die neue Länge setzen (nur mit `aligned`)
    pub symmetric: bool,
    /// Gegenüberliegenden Handle um den Anker mitrotieren (hat Vorrang)
    pub rotate_about_anchor: bool,
}

impl Default for HandleMove {
    fn default() -> Self {
        Self {
            aligned: true,
            symmetric: false,
            rotate_about_anchor: false,
        }
    }
}

/// Ein Anker auf einer stückweise kubischen Bezier-Kurve.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Position des Ankers
    pub position: DVec3,
    /// Eingehender Handle
    pub in_control: DVec3,
    /// Ausgehender Handle
    pub out_control: DVec3,
    /// Handle-Kopplung
    pub anchor_type: AnchorType,
    /// Freies Label
    pub tag: String,
    /// Attributwerte (Reihenfolge = Attribut-Definitionen)
    pub attributes: IndexMap<String, AttributeValue>,
    /// Cache: (Richtung Vorgänger, eigener Wert, Richtung Nachfolger) pro Attribut
    pub(crate) interpolated: IndexMap<String, [AttributeValue; 3]>,
}

impl Anchor {
    /// Erstellt einen Corner-Anker ohne Attribute; beide Handles liegen auf `position`.
    pub fn corner(position: DVec3) -> Self {
        Self {
            position,
            in_control: position,
            out_control: position,
            anchor_type: AnchorType::Corner,
            tag: String::new(),
            attributes: IndexMap::new(),
            interpolated: IndexMap::new(),
        }
    }

    /// Explizite Kopie mit Versatz: Geometrie und Attribute, ohne Tag.
    pub fn duplicate_from(source: &Anchor, offset: DVec3) -> Self {
        Self {
            position: source.position + offset,
            in_control: source.in_control + offset,
            out_control: source.out_control + offset,
            anchor_type: source.anchor_type,
            tag: String::new(),
            attributes: source
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            interpolated: IndexMap::new(),
        }
    }

    /// Liefert einen der drei Punkte.
    pub fn point(&self, which: ControlPoint) -> DVec3 {
        match which {
            ControlPoint::In => self.in_control,
            ControlPoint::Position => self.position,
            ControlPoint::Out => self.out_control,
        }
    }

    /// Alle drei Punkte in Dokument-Reihenfolge `[in, pos, out]`.
    pub fn controls(&self) -> [DVec3; 3] {
        [self.in_control, self.position, self.out_control]
    }

    /// Liefert einen Handle.
    pub fn handle(&self, handle: Handle) -> DVec3 {
        match handle {
            Handle::In => self.in_control,
            Handle::Out => self.out_control,
        }
    }

    fn handle_mut(&mut self, handle: Handle) -> &mut DVec3 {
        match handle {
            Handle::In => &mut self.in_control,
            Handle::Out => &mut self.out_control,
        }
    }

    /// Gecachtes Interpolations-Tripel eines Attributs.
    pub fn interpolated(&self, name: &str) -> Option<&[AttributeValue; 3]> {
        self.interpolated.get(name)
    }

    /// Wert eines Attributs am Exportpunkt `which`.
    ///
    /// Fällt auf den eigenen Wert zurück, solange der Cache leer ist.
    pub fn value_at(&self, name: &str, which: ControlPoint) -> Option<&AttributeValue> {
        match self.interpolated.get(name) {
            Some(triple) => Some(&triple[which.index()]),
            None => self.attributes.get(name),
        }
    }

    /// Verschiebt Position und beide Handles starr auf `position`.
    pub fn translate_to(&mut self, position: DVec3) {
        let delta = position - self.position;
        self.translate(delta);
    }

    /// Verschiebt Position und beide Handles um `delta`.
    pub fn translate(&mut self, delta: DVec3) {
        self.position += delta;
        self.in_control += delta;
        self.out_control += delta;
    }

    /// Kollabiert beide Handles auf die Position.
    pub fn collapse(&mut self) {
        self.in_control = self.position;
        self.out_control = self.position;
    }

    /// Tauscht In- und Out-Handle (Richtungsumkehr).
    pub fn swap_handles(&mut self) {
        std::mem::swap(&mut self.in_control, &mut self.out_control);
    }

    /// Setzt einen Handle und führt den gegenüberliegenden gemäß `mode` nach.
    ///
    /// - `rotate_about_anchor`: Gegen-Handle wird mit der minimalen Rotation
    ///   alte → neue Handle-Richtung um die Position gedreht (Längen bleiben).
    /// - `aligned`: Gegen-Handle liegt danach auf dem Gegenstrahl, mit eigener
    ///   Länge oder (bei `symmetric`) mit der neuen Länge.
    /// - sonst: freie Bewegung, der Anker wird `Untied`.
    ///
    /// Null-Richtungen lassen den Gegen-Handle unverändert.
    pub fn move_handle(&mut self, handle: Handle, new_position: DVec3, mode: HandleMove) {
        let old = self.handle(handle);
        let position = self.position;
        *self.handle_mut(handle) = new_position;
        let opposite = handle.opposite();

        if mode.rotate_about_anchor {
            let rotation = rotation_between(old - position, new_position - position);
            let current = self.handle(opposite);
            *self.handle_mut(opposite) = position + rotation * (current - position);
        } else if mode.aligned {
            let direction = (position - new_position).normalize_or_zero();
            if direction != DVec3::ZERO {
                let length = if mode.symmetric {
                    new_position.distance(position)
                } else {
                    self.handle(opposite).distance(position)
                };
                *self.handle_mut(opposite) = position + direction * length;
            }
        } else {
            self.anchor_type = AnchorType::Untied;
        }

        // Ein gezogener Handle hebt den Corner-Kollaps auf
        if self.anchor_type == AnchorType::Corner && new_position != position {
            self.anchor_type = AnchorType::Untied;
        }
    }
}
