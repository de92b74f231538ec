use bevy::prelude::*;

/// Allows disabling the swing controller for a specific entity.
///
/// This can be used to let some other system temporarily take control over a character.
///
/// This component is not mandatory - if omitted, the controller will just assume it is enabled for
/// that entity.
#[derive(Component, Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SwingToggle {
    /// Do not update the sensors, and do not apply the motor.
    ///
    /// The controller system will also not run and won't update the motor or the state stored in
    /// the `SwingController` component. They will retain their last value from before
    /// `SwingToggle::Disabled` was set.
    Disabled,
    /// Update the sensors and run the controller, but do not apply the motor.
    SenseOnly,
    #[default]
    /// The backend behaves normally - it updates the sensors and applies the motor.
    Enabled,
}

/// Snapshot of the character body, taken from the physics engine.
///
/// The physics backend is responsible for updating this component during
/// [`SwingPipelineSystems::Sensors`](crate::SwingPipelineSystems::Sensors).
#[derive(Component, Debug, Clone)]
pub struct SwingBodyTracker {
    pub translation: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Whether the body currently stands on the ground.
    pub grounded: bool,
    /// World-space position of the hand/grip attachment, if the character has one.
    ///
    /// See [`SwingGripAnchor`].
    pub grip_point: Option<Vec3>,
}

impl Default for SwingBodyTracker {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            grounded: false,
            grip_point: None,
        }
    }
}

/// Where the character's hands are, relative to the body origin in the body's local frame.
///
/// Usually kept in sync by the animation rig (e.g. from a hand bone). When missing, grip-relative
/// rotation degrades to swinging around the body center.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SwingGripAnchor(pub Vec3);

/// A ray cast straight down from the character, used for grounding and slope alignment.
///
/// The physics backend is responsible for updating [`output`](Self::output) during
/// [`SwingPipelineSystems::Sensors`](crate::SwingPipelineSystems::Sensors). The controller keeps
/// [`cast_range`](Self::cast_range) in sync with its configuration.
#[derive(Component, Debug)]
pub struct SwingGroundSensor {
    /// The cast origin in the entity's coord system.
    pub cast_origin: Vec3,
    pub cast_range: f32,
    /// Hits closer than this (measured from the cast origin) mark the body as grounded.
    pub grounded_distance: f32,
    pub output: Option<SwingGroundSensorOutput>,
}

impl Default for SwingGroundSensor {
    fn default() -> Self {
        Self {
            cast_origin: Vec3::ZERO,
            cast_range: 200.0,
            grounded_distance: 100.0,
            output: None,
        }
    }
}

/// Information from [`SwingGroundSensor`] that has detected the ground.
#[derive(Debug, Clone)]
pub struct SwingGroundSensorOutput {
    /// The entity of the collider detected by the ray.
    pub entity: Entity,
    /// The distance from the cast origin to the hit point.
    pub proximity: f32,
    pub point: Vec3,
    /// The normal from the detected collider's surface where the ray hits.
    pub normal: Dir3,
}

/// Locomotion mode of the host character controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SwingMovementMode {
    #[default]
    Walking,
    Falling,
    /// Gravity-free mode used while the swing controller drives the body.
    Flying,
}

/// Movement flags the swing controller toggles on the host's locomotion.
///
/// Unlike [`SwingMotor`], these persist across frames. The backend applies
/// [`gravity_scale`](Self::gravity_scale); the other fields are for the host's own locomotion
/// systems to read.
#[derive(Component, Debug, Clone)]
pub struct SwingMovementSettings {
    pub gravity_scale: f32,
    pub movement_mode: SwingMovementMode,
    /// Horizontal braking applied by the host while airborne.
    pub air_braking_deceleration: f32,
}

impl Default for SwingMovementSettings {
    fn default() -> Self {
        Self {
            gravity_scale: 1.0,
            movement_mode: SwingMovementMode::Walking,
            air_braking_deceleration: 1500.0,
        }
    }
}

/// Instructions for the physics backend, rewritten by the controller every frame.
///
/// The physics backend is responsible for reading this component during
/// [`SwingPipelineSystems::Motors`](crate::SwingPipelineSystems::Motors) and applying it to the
/// rigid body.
#[derive(Component, Default, Debug, Clone)]
pub struct SwingMotor {
    /// Teleport the body to this position.
    pub position: Option<Vec3>,
    /// Set the body rotation.
    pub rotation: Option<Quat>,
    /// Zero the body velocity before applying [`launch`](Self::launch).
    pub stop_movement: bool,
    /// Replace the body velocity.
    pub launch: Option<Vec3>,
}

impl SwingMotor {
    pub fn is_idle(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && !self.stop_movement
            && self.launch.is_none()
    }
}

/// Thrown when pole geometry violates its invariants.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SwingPoleError {
    #[error("pole half-length must be positive, got {0}")]
    NonPositiveHalfLength(f32),
}

/// Marks a grabbable horizontal pole.
///
/// The pole is a segment centered on the entity's position, running along
/// [`local_axis`](Self::local_axis) (rotated by the entity's rotation) for
/// [`half_length`](Self::half_length) in each direction. The entity also needs a collider the
/// backend's overlap query can find - usually a sensor sphere around the pole.
#[derive(Component, Debug, Clone, Copy)]
pub struct SwingPole {
    half_length: f32,
    pub local_axis: Dir3,
}

impl SwingPole {
    pub fn new(half_length: f32) -> Result<Self, SwingPoleError> {
        if half_length > 0.0 {
            Ok(Self {
                half_length,
                local_axis: Dir3::Z,
            })
        } else {
            Err(SwingPoleError::NonPositiveHalfLength(half_length))
        }
    }

    pub fn with_local_axis(mut self, local_axis: Dir3) -> Self {
        self.local_axis = local_axis;
        self
    }

    pub fn half_length(&self) -> f32 {
        self.half_length
    }
}
