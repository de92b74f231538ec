use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;
use bevy_pole_swing_physics_integration_layer::data_for_backends::{
    SwingBodyTracker, SwingGroundSensor, SwingMotor, SwingMovementMode, SwingMovementSettings,
    SwingToggle,
};
use bevy_pole_swing_physics_integration_layer::pole_radar::SwingPoleRadar;
use bevy_pole_swing_physics_integration_layer::{SwingPipelineSystems, SwingSystems};

use crate::animating_helper::{update_swing_animating_state_system, SwingAnimatingState};
use crate::body::{SwingBody, SwingBodyLens, SwingWorld};
use crate::config::{SwingConfig, SwingConfigError, SwingInputMode, SwingRotationMode};
use crate::grab_scanner::try_grab;
use crate::ground_alignment::align_to_ground;
use crate::pendulum::{SwingDrive, SwingPendulum, SwingPendulumParams};
use crate::pole::SwingPoleSnapshot;
use crate::util::{approach_rotation, smoothstep, yaw_facing, yaw_of, SMALL_FRAME_DURATION};
use crate::world_lens::SwingWorldLens;
use crate::SwingUserControlsSystems;

const MIN_GRAB_TRANSITION_TIME: f32 = 1.0e-4;
const GRIP_OFFSET_TOLERANCE: f32 = 1.0e-4;

/// The main plugin for the swing controller.
///
/// This plugin does not include a physics backend - that must be added separately (e.g.
/// `SwingAvian3dPlugin` from `bevy-pole-swing-avian3d`), and both must use the same schedule.
pub struct SwingControllerPlugin {
    schedule: InternedScheduleLabel,
}

impl SwingControllerPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for SwingControllerPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for SwingControllerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            self.schedule,
            (
                SwingPipelineSystems::Sensors,
                SwingUserControlsSystems,
                SwingPipelineSystems::Logic,
                SwingPipelineSystems::Motors,
            )
                .chain()
                .in_set(SwingSystems),
        );
        app.add_systems(
            self.schedule,
            (
                apply_swing_controller_system,
                update_swing_animating_state_system,
            )
                .chain()
                .in_set(SwingPipelineSystems::Logic),
        );
    }
}

/// Where the character is in the grab/swing/release cycle.
///
/// Releasing is instantaneous, so there is no state for it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum SwingState {
    #[default]
    Idle,
    /// Moving from where the pole was grabbed to the hanging position.
    Grabbing,
    /// Hanging from the pole as a pendulum.
    Swinging,
}

/// Progress of the move from where the pole was grabbed to the hanging position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingGrabTransition {
    /// From 0.0 when grabbing to 1.0 when hanging.
    pub alpha: f32,
    pub start_position: Vec3,
    pub target_position: Vec3,
}

/// What a grab/release intent ended up doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingIntentOutcome {
    Grabbed { pole: SwingPoleSnapshot },
    /// Idle, but grounded or no pole in reach.
    NothingToGrab,
    Released { launch_velocity: Vec3 },
    /// The intent came in the middle of the grab transition.
    Ignored,
}

impl SwingIntentOutcome {
    /// Whether the intent was used by the swing controller. If not, the host may use it for
    /// something else (e.g. a regular jump).
    pub fn was_consumed(&self) -> bool {
        match self {
            SwingIntentOutcome::Grabbed { .. } => true,
            SwingIntentOutcome::NothingToGrab => false,
            SwingIntentOutcome::Released { .. } => true,
            SwingIntentOutcome::Ignored => true,
        }
    }
}

/// The swing state machine of a single character.
///
/// Feed it input with [`grab_or_release_pressed`](Self::grab_or_release_pressed) (and, in
/// [`SwingInputMode::Manual`], [`set_swing_input_axis`](Self::set_swing_input_axis)) from a system
/// in [`SwingUserControlsSystems`]. The [`SwingControllerPlugin`] ticks it once per frame.
///
/// Hosts that do not use the ECS components can drive it directly with
/// [`grab_or_release`](Self::grab_or_release) and [`tick`](Self::tick).
#[derive(Component, Debug, Clone)]
#[require(
    SwingBodyTracker,
    SwingMovementSettings,
    SwingMotor,
    SwingAnimatingState
)]
pub struct SwingController {
    config: SwingConfig,
    state: SwingState,
    is_swinging: bool,
    pendulum: SwingPendulum,
    grip_local_offset: Vec3,
    cached_velocity: Vec3,
    grab_transition: Option<SwingGrabTransition>,
    current_pole: Option<SwingPoleSnapshot>,
    saved_air_braking_deceleration: f32,
    air_braking_restore_pending: bool,
    grab_or_release_queued: bool,
    swing_input_axis: f32,
}

impl Default for SwingController {
    fn default() -> Self {
        Self {
            config: SwingConfig::default(),
            state: SwingState::Idle,
            is_swinging: false,
            pendulum: SwingPendulum::default(),
            grip_local_offset: Vec3::ZERO,
            cached_velocity: Vec3::ZERO,
            grab_transition: None,
            current_pole: None,
            saved_air_braking_deceleration: 0.0,
            air_braking_restore_pending: false,
            grab_or_release_queued: false,
            swing_input_axis: 0.0,
        }
    }
}

impl SwingController {
    pub fn new(config: SwingConfig) -> Result<Self, SwingConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &SwingConfig {
        &self.config
    }

    pub fn state(&self) -> SwingState {
        self.state
    }

    /// `true` whenever the state is not [`SwingState::Idle`], as of the last tick.
    pub fn is_swinging(&self) -> bool {
        self.is_swinging
    }

    pub fn pendulum(&self) -> &SwingPendulum {
        &self.pendulum
    }

    pub fn angle(&self) -> f32 {
        self.pendulum.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.pendulum.angular_velocity
    }

    /// The point the character swings around. Use it as the hands' IK target.
    pub fn pivot(&self) -> Vec3 {
        self.pendulum.pivot
    }

    pub fn current_pole(&self) -> Option<&SwingPoleSnapshot> {
        self.current_pole.as_ref()
    }

    /// Only available during [`SwingState::Grabbing`].
    pub fn grab_transition(&self) -> Option<&SwingGrabTransition> {
        self.grab_transition.as_ref()
    }

    /// The velocity the character moved at during the last swinging frame.
    pub fn cached_velocity(&self) -> Vec3 {
        self.cached_velocity
    }

    /// The grip point in the character's local frame, captured when grabbing.
    pub fn grip_local_offset(&self) -> Vec3 {
        self.grip_local_offset
    }

    /// Whether the air braking will be restored once the character lands.
    pub fn air_braking_restore_pending(&self) -> bool {
        self.air_braking_restore_pending
    }

    /// Queue a grab (when idle) or release (when swinging) for the next tick.
    pub fn grab_or_release_pressed(&mut self) {
        self.grab_or_release_queued = true;
    }

    /// Only used in [`SwingInputMode::Manual`]. Clamped to `[-1, 1]`.
    pub fn set_swing_input_axis(&mut self, value: f32) {
        self.swing_input_axis = if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    /// Grab a pole when idle, or let go of it when swinging.
    ///
    /// Intents during the grab transition are ignored.
    pub fn grab_or_release(
        &mut self,
        body: &mut impl SwingBody,
        world: &impl SwingWorld,
    ) -> SwingIntentOutcome {
        match self.state {
            SwingState::Idle => self.try_grab_pole(body, world),
            SwingState::Grabbing => SwingIntentOutcome::Ignored,
            SwingState::Swinging => SwingIntentOutcome::Released {
                launch_velocity: self.release(body),
            },
        }
    }

    /// Advance the state machine by `frame_duration` seconds.
    pub fn tick(
        &mut self,
        frame_duration: f32,
        body: &mut impl SwingBody,
        world: &impl SwingWorld,
    ) {
        if std::mem::take(&mut self.grab_or_release_queued) {
            self.grab_or_release(body, world);
        }

        match self.state {
            SwingState::Idle => self.tick_idle(frame_duration, body, world),
            SwingState::Grabbing => self.tick_grabbing(frame_duration, body),
            SwingState::Swinging => self.tick_swinging(frame_duration, body),
        }

        self.is_swinging = self.state != SwingState::Idle;
    }

    fn try_grab_pole(
        &mut self,
        body: &mut impl SwingBody,
        world: &impl SwingWorld,
    ) -> SwingIntentOutcome {
        let position = body.position();
        let is_grounded = body.is_grounded();
        let candidates = if is_grounded {
            Vec::new()
        } else {
            world.nearby_poles(position, self.config.grab_detection_radius)
        };
        let Some(pole) = try_grab(position, is_grounded, &candidates).copied() else {
            debug!(
                "Nothing to grab at {position} (grounded: {is_grounded}, candidates: {})",
                candidates.len()
            );
            return SwingIntentOutcome::NothingToGrab;
        };
        self.grab(pole, body);
        SwingIntentOutcome::Grabbed { pole }
    }

    fn grab(&mut self, pole: SwingPoleSnapshot, body: &mut impl SwingBody) {
        let position = body.position();
        let pivot = pole.closest_point(position);

        self.grip_local_offset = match self.config.rotation_mode {
            SwingRotationMode::BodyCenter => Vec3::ZERO,
            SwingRotationMode::GripPivot => body
                .grip_point()
                .map(|grip_point| body.rotation().inverse() * (grip_point - position))
                .unwrap_or(Vec3::ZERO),
        };

        self.pendulum = SwingPendulum::from_grab(pivot, position, self.config.min_hang_length);
        self.cached_velocity = Vec3::ZERO;

        if !self.air_braking_restore_pending {
            self.saved_air_braking_deceleration = body.air_braking_deceleration();
        }
        body.stop_movement();
        body.set_gravity_scale(0.0);
        body.set_movement_mode(SwingMovementMode::Flying);

        self.grab_transition = Some(SwingGrabTransition {
            alpha: 0.0,
            start_position: position,
            target_position: self.pendulum.arc_position(),
        });
        self.current_pole = Some(pole);
        self.state = SwingState::Grabbing;

        debug!(
            "Grabbed pole {:?} at {pivot} (hang length {}, angle {})",
            pole.entity, self.pendulum.hang_length, self.pendulum.angle
        );
    }

    fn release(&mut self, body: &mut impl SwingBody) -> Vec3 {
        self.state = SwingState::Idle;

        body.set_gravity_scale(1.0);
        body.set_movement_mode(SwingMovementMode::Falling);
        // Keep the horizontal momentum for the whole flight
        body.set_air_braking_deceleration(0.0);
        self.air_braking_restore_pending = true;

        let launch_velocity = self.config.release_model.launch_velocity(
            &self.pendulum,
            self.cached_velocity,
            self.config.launch_speed_multiplier,
        );
        body.launch(launch_velocity);
        self.current_pole = None;

        debug!("Released pole with launch velocity {launch_velocity}");
        launch_velocity
    }

    fn tick_idle(&mut self, frame_duration: f32, body: &mut impl SwingBody, world: &impl SwingWorld) {
        if !body.is_grounded() {
            return;
        }

        if self.air_braking_restore_pending {
            body.set_air_braking_deceleration(self.saved_air_braking_deceleration);
            self.air_braking_restore_pending = false;
            debug!(
                "Landed - air braking restored to {}",
                self.saved_air_braking_deceleration
            );
        }

        let ground_alignment = &self.config.ground_alignment;
        if ground_alignment.enabled {
            let ground = world.ground_below(body.position(), ground_alignment.trace_distance);
            let rotation = align_to_ground(
                body.rotation(),
                ground.as_ref(),
                body.velocity(),
                ground_alignment,
                frame_duration,
            );
            body.set_rotation(rotation);
        }
    }

    fn tick_grabbing(&mut self, frame_duration: f32, body: &mut impl SwingBody) {
        let Some(transition) = self.grab_transition.as_mut() else {
            error!("Grab transition missing while grabbing");
            self.state = SwingState::Swinging;
            return;
        };

        transition.alpha = (transition.alpha
            + frame_duration / self.config.grab_transition_time.max(MIN_GRAB_TRANSITION_TIME))
        .min(1.0);
        body.set_position(
            transition
                .start_position
                .lerp(transition.target_position, smoothstep(transition.alpha)),
        );

        if 1.0 <= transition.alpha {
            self.grab_transition = None;
            self.state = SwingState::Swinging;
            debug!("Grab transition finished, swinging");
        }
    }

    fn tick_swinging(&mut self, frame_duration: f32, body: &mut impl SwingBody) {
        let drive = match self.config.input_mode {
            SwingInputMode::Auto => SwingDrive::Auto {
                force: self.config.auto_swing_force,
                velocity_threshold: self.config.auto_swing_velocity_threshold,
            },
            SwingInputMode::Manual => SwingDrive::Manual {
                force: self.config.manual_swing_force,
                axis: self.swing_input_axis,
            },
        };
        self.pendulum.step(
            &SwingPendulumParams {
                gravity_constant: self.config.gravity_constant,
                damping: self.config.damping,
                max_angle: self.config.max_angle,
                drive,
            },
            frame_duration,
        );

        let old_position = body.position();
        let current_rotation = body.rotation();
        let target_rotation = self.swing_target_rotation(current_rotation);

        let new_position = if self.pins_grip_point() {
            self.pendulum.pivot - target_rotation * self.grip_local_offset
        } else {
            self.pendulum.arc_position()
        };

        if SMALL_FRAME_DURATION < frame_duration {
            self.cached_velocity = (new_position - old_position) / frame_duration;
        }

        body.set_position(new_position);
        body.set_rotation(approach_rotation(
            current_rotation,
            target_rotation,
            self.config.rotation_smoothing_rate,
            frame_duration,
        ));
    }

    fn pins_grip_point(&self) -> bool {
        self.config.rotation_mode == SwingRotationMode::GripPivot
            && !self
                .grip_local_offset
                .abs_diff_eq(Vec3::ZERO, GRIP_OFFSET_TOLERANCE)
    }

    /// Face along the horizontal part of the swing motion. When pinning the grip point, also turn
    /// the character so the grip points up at the pole, leaning toward the pivot with the swing.
    fn swing_target_rotation(&self, current_rotation: Quat) -> Quat {
        let direction = if 0.0 <= self.pendulum.angular_velocity {
            1.0
        } else {
            -1.0
        };
        let facing_yaw = yaw_facing(Vec3::X * self.pendulum.angle.cos() * direction);

        if self.pins_grip_point() {
            let yaw = facing_yaw.unwrap_or_else(|| yaw_of(current_rotation));
            let grip_up = Quat::from_rotation_arc(self.grip_local_offset.normalize(), Vec3::Y);
            let lean = Quat::from_rotation_z(self.pendulum.angle * self.config.grip_lean_factor);
            lean * Quat::from_rotation_y(yaw) * grip_up
        } else if let Some(yaw) = facing_yaw {
            Quat::from_rotation_y(yaw)
        } else {
            current_rotation
        }
    }
}

#[allow(clippy::type_complexity)]
fn apply_swing_controller_system(
    time: Res<Time>,
    mut query: Query<(
        &mut SwingController,
        &SwingBodyTracker,
        &mut SwingMovementSettings,
        &mut SwingMotor,
        Option<&mut SwingPoleRadar>,
        Option<&mut SwingGroundSensor>,
        Option<&SwingToggle>,
    )>,
) {
    let frame_duration = time.delta_secs();
    if frame_duration == 0.0 {
        return;
    }
    for (mut controller, tracker, mut settings, mut motor, mut radar, mut ground_sensor, toggle) in
        query.iter_mut()
    {
        match toggle.copied().unwrap_or_default() {
            SwingToggle::Disabled => continue,
            SwingToggle::SenseOnly => {}
            SwingToggle::Enabled => {}
        }
        let controller = controller.as_mut();

        // Sensor ranges for the next frame
        if let Some(radar) = radar.as_mut() {
            radar.radius = controller.config.grab_detection_radius;
        }
        if let Some(ground_sensor) = ground_sensor.as_mut() {
            ground_sensor.cast_range = controller
                .config
                .ground_alignment
                .trace_distance
                .max(ground_sensor.grounded_distance);
        }

        let mut body = SwingBodyLens::new(tracker, settings.as_mut(), motor.as_mut());
        let world = SwingWorldLens::new(radar.as_deref(), ground_sensor.as_deref());
        controller.tick(frame_duration, &mut body, &world);
    }
}
