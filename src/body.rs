use bevy::prelude::*;
use bevy_pole_swing_physics_integration_layer::data_for_backends::{
    SwingBodyTracker, SwingMotor, SwingMovementMode, SwingMovementSettings,
};

use crate::pole::SwingPoleSnapshot;

/// The character body, as seen by the swing controller.
///
/// The body belongs to the host. The controller reads it and writes new values through it every
/// frame, but never owns it.
pub trait SwingBody {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn velocity(&self) -> Vec3;
    fn is_grounded(&self) -> bool;
    /// World-space position of the hand/grip attachment, if the character has one.
    fn grip_point(&self) -> Option<Vec3>;

    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn set_gravity_scale(&mut self, gravity_scale: f32);
    fn set_movement_mode(&mut self, movement_mode: SwingMovementMode);
    fn air_braking_deceleration(&self) -> f32;
    fn set_air_braking_deceleration(&mut self, deceleration: f32);
    /// Zero the body's velocity.
    fn stop_movement(&mut self);
    /// Replace the body's velocity.
    fn launch(&mut self, velocity: Vec3);
}

/// Ground found under the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingGroundHit {
    pub point: Vec3,
    pub normal: Dir3,
}

/// The world queries the swing controller depends on.
pub trait SwingWorld {
    /// Poles whose segment is within `radius` of `origin`, in no particular order.
    fn nearby_poles(&self, origin: Vec3, radius: f32) -> Vec<SwingPoleSnapshot>;

    /// Ground directly below `origin`, no further than `max_distance`.
    fn ground_below(&self, origin: Vec3, max_distance: f32) -> Option<SwingGroundHit>;
}

/// [`SwingBody`] over the ECS components shared with the physics backend.
///
/// Writes go to the [`SwingMotor`] for the backend to apply, and are also reflected in subsequent
/// reads during the same frame.
pub struct SwingBodyLens<'a> {
    tracker: &'a SwingBodyTracker,
    settings: &'a mut SwingMovementSettings,
    motor: &'a mut SwingMotor,
}

impl<'a> SwingBodyLens<'a> {
    /// Wrap the components. The motor is reset - it only carries this frame's instructions.
    pub fn new(
        tracker: &'a SwingBodyTracker,
        settings: &'a mut SwingMovementSettings,
        motor: &'a mut SwingMotor,
    ) -> Self {
        *motor = SwingMotor::default();
        Self {
            tracker,
            settings,
            motor,
        }
    }
}

impl SwingBody for SwingBodyLens<'_> {
    fn position(&self) -> Vec3 {
        self.motor.position.unwrap_or(self.tracker.translation)
    }

    fn rotation(&self) -> Quat {
        self.motor.rotation.unwrap_or(self.tracker.rotation)
    }

    fn velocity(&self) -> Vec3 {
        if let Some(launch) = self.motor.launch {
            launch
        } else if self.motor.stop_movement {
            Vec3::ZERO
        } else {
            self.tracker.velocity
        }
    }

    fn is_grounded(&self) -> bool {
        self.tracker.grounded
    }

    fn grip_point(&self) -> Option<Vec3> {
        self.tracker.grip_point
    }

    fn set_position(&mut self, position: Vec3) {
        self.motor.position = Some(position);
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.motor.rotation = Some(rotation);
    }

    fn set_gravity_scale(&mut self, gravity_scale: f32) {
        self.settings.gravity_scale = gravity_scale;
    }

    fn set_movement_mode(&mut self, movement_mode: SwingMovementMode) {
        self.settings.movement_mode = movement_mode;
    }

    fn air_braking_deceleration(&self) -> f32 {
        self.settings.air_braking_deceleration
    }

    fn set_air_braking_deceleration(&mut self, deceleration: f32) {
        self.settings.air_braking_deceleration = deceleration;
    }

    fn stop_movement(&mut self) {
        self.motor.stop_movement = true;
        self.motor.launch = None;
    }

    fn launch(&mut self, velocity: Vec3) {
        self.motor.launch = Some(velocity);
    }
}
