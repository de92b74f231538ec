use std::f32::consts::PI;

use crate::release::SwingReleaseModel;

/// What keeps the swing going.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum SwingInputMode {
    /// Energy is pumped automatically in the direction of motion. The player can only let go.
    #[default]
    Auto,
    /// The swing is driven by [`SwingController::set_swing_input_axis`](crate::SwingController::set_swing_input_axis).
    Manual,
}

/// Which point of the character is pinned to the pole.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum SwingRotationMode {
    /// The body center moves along the arc below the pivot.
    #[default]
    BodyCenter,
    /// The character hangs from its grip point (see
    /// [`SwingGripAnchor`](crate::SwingGripAnchor)), rotated so the grip stays on the pole.
    GripPivot,
}

/// Tunables for aligning the character with the slope it walks on.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingGroundAlignmentConfig {
    pub enabled: bool,

    /// How far below the character to look for ground.
    pub trace_distance: f32,

    /// How fast (per second) the character rotates toward the slope.
    pub smoothing_rate: f32,

    /// Extra pitch, in radians, per unit of alignment between the movement direction and the
    /// surface normal. Makes the character lean into uphill movement.
    pub slope_lean_gain: f32,

    /// Cap, in radians, for the movement-based lean.
    pub max_slope_lean: f32,
}

impl Default for SwingGroundAlignmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trace_distance: 200.0,
            smoothing_rate: 5.0,
            slope_lean_gain: 45f32.to_radians(),
            max_slope_lean: 30f32.to_radians(),
        }
    }
}

/// Configuration of a [`SwingController`](crate::SwingController).
///
/// The defaults assume world units are centimeters. Use
/// [`with_length_scale`](Self::with_length_scale) for other units.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingConfig {
    /// Radius around the character in which poles can be grabbed.
    pub grab_detection_radius: f32,

    /// Duration, in seconds, of the transition from the grab point to the hanging position.
    pub grab_transition_time: f32,

    /// The gravity used for the pendulum.
    ///
    /// This is not the world's gravity - it only shapes the swing period.
    pub gravity_constant: f32,

    /// Angular acceleration (radians per second squared) pumped into the swing in
    /// [`SwingInputMode::Auto`].
    pub auto_swing_force: f32,

    /// Below this angular speed the auto-pump pushes away from equilibrium instead of along the
    /// motion.
    pub auto_swing_velocity_threshold: f32,

    /// Angular acceleration for a full input axis in [`SwingInputMode::Manual`].
    pub manual_swing_force: f32,

    /// Angular velocity retention per 1/60 of a second. `1.0` means no damping.
    pub damping: f32,

    /// The pendulum angle is clamped to `[-max_angle, max_angle]`.
    pub max_angle: f32,

    /// The hang length never goes below this, even when the character grabs at pole height.
    pub min_hang_length: f32,

    /// Multiplies the launch velocity on release.
    pub launch_speed_multiplier: f32,

    /// How fast (per second) the character rotates toward the swing facing.
    pub rotation_smoothing_rate: f32,

    /// Lean toward the pivot, in radians per radian of swing angle, in
    /// [`SwingRotationMode::GripPivot`]. `1.0` points the grip straight at the pivot.
    pub grip_lean_factor: f32,

    pub input_mode: SwingInputMode,
    pub release_model: SwingReleaseModel,
    pub rotation_mode: SwingRotationMode,
    pub ground_alignment: SwingGroundAlignmentConfig,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            grab_detection_radius: 220.0,
            grab_transition_time: 0.18,
            gravity_constant: 980.0,
            auto_swing_force: 3.0,
            auto_swing_velocity_threshold: 0.05,
            manual_swing_force: 6.0,
            damping: 0.985,
            max_angle: 2.2,
            min_hang_length: 60.0,
            launch_speed_multiplier: 1.1,
            rotation_smoothing_rate: 12.0,
            grip_lean_factor: 0.8,
            input_mode: SwingInputMode::Auto,
            release_model: SwingReleaseModel::Measured,
            rotation_mode: SwingRotationMode::BodyCenter,
            ground_alignment: Default::default(),
        }
    }
}

/// Thrown by [`SwingConfig::validate`] for tunables the controller cannot work with.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SwingConfigError {
    #[error("gravity_constant must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("damping must be in (0, 1], got {0}")]
    DampingOutOfRange(f32),
    #[error("max_angle must be in (0, PI], got {0}")]
    MaxAngleOutOfRange(f32),
    #[error("min_hang_length must be positive, got {0}")]
    NonPositiveMinHangLength(f32),
    #[error("grab_transition_time must not be negative, got {0}")]
    NegativeTransitionTime(f32),
    #[error("{field} must not be negative, got {value}")]
    NegativeTunable { field: &'static str, value: f32 },
}

impl SwingConfig {
    pub fn validate(&self) -> Result<(), SwingConfigError> {
        if !(self.gravity_constant > 0.0) {
            return Err(SwingConfigError::NonPositiveGravity(self.gravity_constant));
        }
        if !(0.0 < self.damping && self.damping <= 1.0) {
            return Err(SwingConfigError::DampingOutOfRange(self.damping));
        }
        if !(0.0 < self.max_angle && self.max_angle <= PI) {
            return Err(SwingConfigError::MaxAngleOutOfRange(self.max_angle));
        }
        if !(self.min_hang_length > 0.0) {
            return Err(SwingConfigError::NonPositiveMinHangLength(
                self.min_hang_length,
            ));
        }
        if !(self.grab_transition_time >= 0.0) {
            return Err(SwingConfigError::NegativeTransitionTime(
                self.grab_transition_time,
            ));
        }
        for (field, value) in [
            ("grab_detection_radius", self.grab_detection_radius),
            ("auto_swing_force", self.auto_swing_force),
            ("auto_swing_velocity_threshold", self.auto_swing_velocity_threshold),
            ("manual_swing_force", self.manual_swing_force),
            ("launch_speed_multiplier", self.launch_speed_multiplier),
            ("rotation_smoothing_rate", self.rotation_smoothing_rate),
            ("ground_alignment.trace_distance", self.ground_alignment.trace_distance),
            ("ground_alignment.smoothing_rate", self.ground_alignment.smoothing_rate),
            ("ground_alignment.max_slope_lean", self.ground_alignment.max_slope_lean),
        ] {
            if !(value >= 0.0) {
                return Err(SwingConfigError::NegativeTunable { field, value });
            }
        }
        Ok(())
    }

    /// Scale every length-bearing tunable by `scale`.
    ///
    /// The defaults are in centimeters, so `SwingConfig::default().with_length_scale(0.01)` gives
    /// a configuration for a world measured in meters.
    pub fn with_length_scale(mut self, scale: f32) -> Self {
        self.grab_detection_radius *= scale;
        self.gravity_constant *= scale;
        self.min_hang_length *= scale;
        self.ground_alignment.trace_distance *= scale;
        self
    }
}
