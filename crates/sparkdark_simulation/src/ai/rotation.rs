//! Snap rotation: ghost смотрит в одну из 4 сторон
//!
//! Yaw = atan2(x, z) + 90°, округлённый к ближайшему кратному 90°.
//! Ничьи (ровно между двумя сторонами) округляются к чётному кратному:
//! 135° → 180°, 45° → 0°, -45° → 0°.

use bevy::prelude::*;

/// Смещение лица модели относительно направления движения
pub const FACING_OFFSET_DEGREES: f32 = 90.0;

pub const SNAP_INCREMENT_DEGREES: f32 = 90.0;

/// Минимальное смещение за тик, при котором считаем что ghost двигается
pub const MOVEMENT_EPSILON: f32 = 0.001;

/// Snapped yaw (градусы, [0, 360)) для направления движения
pub fn snapped_yaw_degrees(movement: Vec3) -> f32 {
    let angle = movement.x.atan2(movement.z).to_degrees() + FACING_OFFSET_DEGREES;
    let snapped = (angle / SNAP_INCREMENT_DEGREES).round_ties_even() * SNAP_INCREMENT_DEGREES;
    snapped.rem_euclid(360.0)
}

/// Один шаг интерполяции поворота к snapped yaw
///
/// None: ghost стоит на месте, поворот не трогаем.
pub fn snap_rotation_step(current: Quat, movement: Vec3, rotation_speed: f32, delta: f32) -> Option<Quat> {
    if movement.length() <= MOVEMENT_EPSILON {
        return None;
    }

    let target = Quat::from_rotation_y(snapped_yaw_degrees(movement).to_radians());
    let t = (rotation_speed * delta).clamp(0.0, 1.0);
    Some(current.lerp(target, t))
}
