//! Attribut-Typen und -Werte der Anker inklusive Interpolationsregeln.

use glam::{DQuat, DVec3};
use serde::Serialize;

use crate::shared::rotation::{euler_degrees_from_quat, quat_from_euler_degrees, rotation_between};
use crate::shared::spline_geometry::catmull_rom_scalar;

/// Reservierter Name des eingebauten Pscale/Roll-Attributs.
pub const PSCALE_ROLL_ATTRIBUTE: &str = "__pr";

/// Typ eines Anker-Attributs (Host-Typcode in Klammern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Pscale + Roll als Paar (−1), eingebaut
    PscaleAndRoll,
    /// Ganzzahlige Leiter-Stufe (0)
    IntegerLadder,
    /// Gleitkomma-Leiter (1)
    FloatLadder,
    /// Roll-Winkel (2)
    FloatRoll,
    /// Skalierung (3)
    FloatScale,
    /// Up-Vektor-Roll (4), wird als Detail-Attribut exportiert
    VectorUp,
    /// Beliebiger Richtungsvektor (5), rotierend interpoliert
    VectorArbitrary,
    /// Orientierung als Euler-Winkel in Grad (6), rotierend interpoliert
    Orientation,
}

impl AttributeType {
    /// Alle Typen in Host-Reihenfolge.
    pub const ALL: [AttributeType; 8] = [
        AttributeType::PscaleAndRoll,
        AttributeType::IntegerLadder,
        AttributeType::FloatLadder,
        AttributeType::FloatRoll,
        AttributeType::FloatScale,
        AttributeType::VectorUp,
        AttributeType::VectorArbitrary,
        AttributeType::Orientation,
    ];

    /// Liefert den Typ zum Host-Typcode.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Host-Typcode (wie im Dokument `attrib_meta`).
    pub fn code(self) -> i64 {
        match self {
            Self::PscaleAndRoll => -1,
            Self::IntegerLadder => 0,
            Self::FloatLadder => 1,
            Self::FloatRoll => 2,
            Self::FloatScale => 3,
            Self::VectorUp => 4,
            Self::VectorArbitrary => 5,
            Self::Orientation => 6,
        }
    }

    /// Standardwert neuer Anker.
    pub fn default_value(self) -> AttributeValue {
        match self {
            Self::PscaleAndRoll => AttributeValue::Pair([1.0, 0.0]),
            Self::IntegerLadder => AttributeValue::Int(0),
            Self::FloatLadder => AttributeValue::Float(1.0),
            Self::FloatRoll => AttributeValue::Float(0.0),
            Self::FloatScale => AttributeValue::Float(1.0),
            Self::VectorUp => AttributeValue::Float(0.0),
            Self::VectorArbitrary => AttributeValue::Vector([0.0, 1.0, 0.0]),
            Self::Orientation => AttributeValue::Vector([0.0, 0.0, 0.0]),
        }
    }

    /// Stufenweise (nicht überblendet) interpolierte Attribute.
    ///
    /// Nur die Integer-Leiter; die Gleitkomma-Leiter läuft über den Skalar-Pfad.
    pub fn is_stepped(self) -> bool {
        matches!(self, Self::IntegerLadder)
    }

    /// Rotations-Attribute werden sphärisch interpoliert.
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::VectorArbitrary | Self::Orientation)
    }

    /// Prüft, ob `value` die zum Typ passende Form hat.
    pub fn accepts(self, value: &AttributeValue) -> bool {
        std::mem::discriminant(&self.default_value()) == std::mem::discriminant(value)
    }

    /// Interpoliert von `from` nach `to` mit `factor` ∈ [0, 1].
    ///
    /// Passen die Wertformen nicht zum Typ, bleibt `from` unverändert.
    pub fn interpolate(self, from: &AttributeValue, to: &AttributeValue, factor: f64) -> AttributeValue {
        use AttributeValue::*;
        match (self, from, to) {
            (Self::VectorArbitrary, Vector(a), Vector(b)) => {
                let a = DVec3::from_array(*a);
                let q = DQuat::IDENTITY.slerp(rotation_between(a, DVec3::from_array(*b)), factor);
                Vector((q * a).to_array())
            }
            (Self::Orientation, Vector(a), Vector(b)) => {
                let q = quat_from_euler_degrees(*a).slerp(quat_from_euler_degrees(*b), factor);
                Vector(euler_degrees_from_quat(q))
            }
            (_, Int(a), Int(b)) => {
                Int((*a as f64 + (*b - *a) as f64 * factor).round_ties_even() as i64)
            }
            (_, Float(a), Float(b)) => Float(a + (b - a) * factor),
            (_, Pair(a), Pair(b)) => Pair([
                a[0] + (b[0] - a[0]) * factor,
                a[1] + (b[1] - a[1]) * factor,
            ]),
            (_, Vector(a), Vector(b)) => Vector(
                (DVec3::from_array(*a).lerp(DVec3::from_array(*b), factor)).to_array(),
            ),
            _ => from.clone(),
        }
    }

    /// Wert eines bei `t` eingefügten Ankers zwischen `prev` und `next`.
    ///
    /// `prev_prev`/`next_next` fallen am Rand auf `prev`/`next` zurück.
    /// Integer-Leitern übernehmen `prev`, Rotationen werden sphärisch überblendet,
    /// alles andere läuft über einen gleichförmigen Catmull-Rom-Spline.
    pub fn subdivide(
        self,
        prev_prev: &AttributeValue,
        prev: &AttributeValue,
        next: &AttributeValue,
        next_next: &AttributeValue,
        t: f64,
    ) -> AttributeValue {
        if self.is_stepped() {
            return prev.clone();
        }
        if self.is_rotation() {
            return self.interpolate(prev, next, t);
        }
        use AttributeValue::*;
        let cr = |a: f64, b: f64, c: f64, d: f64| catmull_rom_scalar(a, b, c, d, t);
        match (prev_prev, prev, next, next_next) {
            (Int(a), Int(b), Int(c), Int(d)) => {
                Int(cr(*a as f64, *b as f64, *c as f64, *d as f64).round_ties_even() as i64)
            }
            (Float(a), Float(b), Float(c), Float(d)) => Float(cr(*a, *b, *c, *d)),
            (Pair(a), Pair(b), Pair(c), Pair(d)) => {
                Pair(std::array::from_fn(|k| cr(a[k], b[k], c[k], d[k])))
            }
            (Vector(a), Vector(b), Vector(c), Vector(d)) => {
                Vector(std::array::from_fn(|k| cr(a[k], b[k], c[k], d[k])))
            }
            _ => prev.clone(),
        }
    }
}

/// Typisierter Attributwert eines Ankers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Ganzzahl (Integer-Leiter)
    Int(i64),
    /// Skalar
    Float(f64),
    /// Zwei Skalare (Pscale/Roll)
    Pair([f64; 2]),
    /// Drei Skalare (Vektor oder Euler-Winkel)
    Vector([f64; 3]),
}

impl AttributeValue {
    /// Label-Text für die Anzeige neben dem Anker.
    pub fn format_value(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format!("{:.2}", v),
            Self::Pair([a, b]) => format!("({:.2}, {:.2})", a, b),
            Self::Vector([a, b, c]) => format!("({:.2}, {:.2}, {:.2})", a, b, c),
        }
    }
}
