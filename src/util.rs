use bevy::prelude::*;

/// Below this, a frame duration is treated as zero and steps that divide by it are skipped.
pub const SMALL_FRAME_DURATION: f32 = 1.0e-4;

/// Fraction of the remaining distance to cover this frame when approaching a target at `rate`
/// (per second).
///
/// Frame-rate independent: two frames of `dt` cover the same distance as one frame of `2 * dt`.
/// An infinite rate snaps to the target.
pub fn smoothing_factor(rate: f32, frame_duration: f32) -> f32 {
    if frame_duration <= 0.0 {
        return 0.0;
    }
    if rate == f32::INFINITY {
        return 1.0;
    }
    (1.0 - (-rate * frame_duration).exp()).clamp(0.0, 1.0)
}

/// Approach `target` from `current` exponentially.
pub fn approach(current: f32, target: f32, rate: f32, frame_duration: f32) -> f32 {
    current + (target - current) * smoothing_factor(rate, frame_duration)
}

/// Rotate `current` toward `target` exponentially.
pub fn approach_rotation(current: Quat, target: Quat, rate: f32, frame_duration: f32) -> Quat {
    let factor = smoothing_factor(rate, frame_duration);
    if 1.0 <= factor {
        return target;
    }
    current.slerp(target, factor).normalize()
}

/// Hermite ease-in/ease-out of `t`, clamped to `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The rotation around the up axis, in radians, that makes the character's negative Z face
/// `forward`.
///
/// Returns `None` if `forward` has no horizontal component.
pub fn yaw_facing(forward: Vec3) -> Option<f32> {
    let horizontal = Vec3::new(forward.x, 0.0, forward.z);
    if horizontal.length_squared() < 1.0e-8 {
        return None;
    }
    Some(f32::atan2(-horizontal.x, -horizontal.z))
}

/// The rotation around the up axis, in radians, of `rotation`.
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    yaw
}
