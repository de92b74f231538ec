use bevy::prelude::*;

use crate::body::SwingGroundHit;
use crate::config::SwingGroundAlignmentConfig;
use crate::util::{approach_rotation, yaw_of};

/// The rotation that stands the character on the slope under it, keeping its yaw.
///
/// Pitch and roll follow the surface normal, measured in the character's yaw frame. When the
/// character moves, it additionally leans into the slope: forward when going uphill, backward when
/// going downhill. Without a ground hit the character is stood upright.
pub fn slope_target_rotation(
    current_rotation: Quat,
    ground: Option<&SwingGroundHit>,
    velocity: Vec3,
    config: &SwingGroundAlignmentConfig,
) -> Quat {
    let yaw = yaw_of(current_rotation);
    let Some(ground) = ground else {
        return Quat::from_rotation_y(yaw);
    };

    let yaw_rotation = Quat::from_rotation_y(yaw);
    let forward = yaw_rotation * Vec3::NEG_Z;
    let right = yaw_rotation * Vec3::X;
    let normal = *ground.normal;

    let mut pitch = f32::atan2(-normal.dot(forward), normal.y);
    let roll = f32::atan2(-normal.dot(right), normal.y);

    let horizontal_velocity = Vec3::new(velocity.x, 0.0, velocity.z);
    if let Some(movement_direction) = horizontal_velocity.try_normalize() {
        let slope_influence = movement_direction.dot(normal);
        pitch += (slope_influence * config.slope_lean_gain)
            .clamp(-config.max_slope_lean, config.max_slope_lean);
    }

    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}

/// One frame of smoothly rotating the character toward [`slope_target_rotation`].
pub fn align_to_ground(
    current_rotation: Quat,
    ground: Option<&SwingGroundHit>,
    velocity: Vec3,
    config: &SwingGroundAlignmentConfig,
    frame_duration: f32,
) -> Quat {
    let target = slope_target_rotation(current_rotation, ground, velocity, config);
    approach_rotation(
        current_rotation,
        target,
        config.smoothing_rate,
        frame_duration,
    )
}
