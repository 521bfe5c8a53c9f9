//! Rotations-Hilfen auf Basis von `glam::DQuat`.
//!
//! Euler-Winkel werden in Grad und in der Host-Reihenfolge `xyz`
//! (erst X, dann Y, dann Z) geführt.

use glam::{DQuat, DVec3, EulerRot};

/// Minimale Rotation, die die Richtung `from` auf die Richtung `to` dreht.
///
/// Degenerierte Eingaben (Nullvektoren) ergeben die Identität.
pub fn rotation_between(from: DVec3, to: DVec3) -> DQuat {
    let from = from.normalize_or_zero();
    let to = to.normalize_or_zero();
    if from == DVec3::ZERO || to == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    DQuat::from_rotation_arc(from, to)
}

/// Rotation, die die lokale `+Z`-Achse auf `axis` ausrichtet.
pub fn rotate_z_to_axis(axis: DVec3) -> DQuat {
    rotation_between(DVec3::Z, axis)
}

/// Baut eine Rotation aus Euler-Winkeln `[x, y, z]` in Grad.
pub fn quat_from_euler_degrees(angles: [f64; 3]) -> DQuat {
    DQuat::from_euler(
        EulerRot::ZYX,
        angles[2].to_radians(),
        angles[1].to_radians(),
        angles[0].to_radians(),
    )
}

/// Zerlegt eine Rotation in Euler-Winkel `[x, y, z]` in Grad.
pub fn euler_degrees_from_quat(rotation: DQuat) -> [f64; 3] {
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    [x.to_degrees(), y.to_degrees(), z.to_degrees()]
}
