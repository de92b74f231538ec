//! # avian3d Integration for bevy-pole-swing
//!
//! In addition to the instruction in bevy-pole-swing's documentation:
//!
//! * Add [`SwingAvian3dPlugin`] to the Bevy app.
//! * Give every [`SwingPole`] entity a collider (usually a sensor) so the pole radar's overlap
//!   query can find it.
use avian3d::prelude::*;
use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

use bevy_pole_swing_physics_integration_layer::data_for_backends::{
    SwingBodyTracker, SwingGripAnchor, SwingGroundSensor, SwingGroundSensorOutput, SwingMotor,
    SwingMovementSettings, SwingPole, SwingToggle,
};
use bevy_pole_swing_physics_integration_layer::pole_radar::{SwingPoleBlip, SwingPoleRadar};
use bevy_pole_swing_physics_integration_layer::{SwingPipelineSystems, SwingSystems};

pub mod prelude {
    pub use crate::SwingAvian3dPlugin;
}

/// Add this plugin to use avian3d as a physics backend.
///
/// This plugin should be used in addition to `SwingControllerPlugin`, and both plugins must use the
/// same schedule - which should match the schedule Avian runs in. By default, Avian runs in
/// [`FixedPostUpdate`] - which means this plugin and `SwingControllerPlugin` should run in
/// [`FixedUpdate`].
pub struct SwingAvian3dPlugin {
    schedule: InternedScheduleLabel,
}

impl SwingAvian3dPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Plugin for SwingAvian3dPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<SwingMotor, LinearVelocity>()
            .register_required_components::<SwingMotor, GravityScale>();
        app.configure_sets(
            self.schedule,
            SwingSystems
                .before(PhysicsSet::Prepare)
                .run_if(|physics_time: Res<Time<Physics>>| !physics_time.is_paused()),
        );
        app.add_systems(
            self.schedule,
            (
                update_body_trackers_system,
                update_ground_sensors_system,
                update_pole_radars_system,
            )
                .chain()
                .in_set(SwingPipelineSystems::Sensors),
        );
        app.add_systems(
            self.schedule,
            apply_motors_system.in_set(SwingPipelineSystems::Motors),
        );
    }
}

#[allow(clippy::type_complexity)]
fn update_body_trackers_system(
    mut query: Query<(
        &Position,
        &Rotation,
        &LinearVelocity,
        &mut SwingBodyTracker,
        Option<&SwingGripAnchor>,
        Option<&SwingToggle>,
    )>,
) {
    for (position, rotation, linear_velocity, mut tracker, grip_anchor, swing_toggle) in
        query.iter_mut()
    {
        match swing_toggle.copied().unwrap_or_default() {
            SwingToggle::Disabled => continue,
            SwingToggle::SenseOnly => {}
            SwingToggle::Enabled => {}
        }
        *tracker = SwingBodyTracker {
            translation: position.0,
            rotation: rotation.0,
            velocity: linear_velocity.0,
            // Filled by the ground sensors, which run right after
            grounded: false,
            grip_point: grip_anchor.map(|anchor| position.0 + rotation.0 * anchor.0),
        };
    }
}

#[allow(clippy::type_complexity)]
fn update_ground_sensors_system(
    spatial_query: SpatialQuery,
    mut query: Query<(
        Entity,
        &Position,
        &Rotation,
        &mut SwingGroundSensor,
        Option<&mut SwingBodyTracker>,
        Option<&SwingToggle>,
    )>,
    poles_query: Query<(), With<SwingPole>>,
) {
    for (owner_entity, position, rotation, mut sensor, tracker, swing_toggle) in query.iter_mut() {
        match swing_toggle.copied().unwrap_or_default() {
            SwingToggle::Disabled => continue,
            SwingToggle::SenseOnly => {}
            SwingToggle::Enabled => {}
        }
        let cast_origin = position.0 + rotation.0 * sensor.cast_origin;
        let filter = SpatialQueryFilter::default().with_excluded_entities([owner_entity]);
        // Pole colliders are there for the radar, not for standing on
        let predicate = |entity: Entity| !poles_query.contains(entity);

        sensor.output = spatial_query
            .cast_ray_predicate(
                cast_origin,
                Dir3::NEG_Y,
                sensor.cast_range,
                true,
                &filter,
                &predicate,
            )
            .map(|hit| SwingGroundSensorOutput {
                entity: hit.entity,
                proximity: hit.distance,
                point: cast_origin + hit.distance * Vec3::NEG_Y,
                normal: Dir3::new(hit.normal).unwrap_or(Dir3::Y),
            });

        if let Some(mut tracker) = tracker {
            tracker.grounded = sensor
                .output
                .as_ref()
                .is_some_and(|output| output.proximity <= sensor.grounded_distance);
        }
    }
}

fn update_pole_radars_system(
    spatial_query: SpatialQuery,
    mut radars_query: Query<(Entity, &Position, &mut SwingPoleRadar, Option<&SwingToggle>)>,
    poles_query: Query<(&SwingPole, &Position, &Rotation)>,
) {
    if radars_query.is_empty() {
        return;
    }
    for (radar_owner_entity, radar_position, mut radar, swing_toggle) in radars_query.iter_mut() {
        match swing_toggle.copied().unwrap_or_default() {
            SwingToggle::Disabled => continue,
            SwingToggle::SenseOnly => {}
            SwingToggle::Enabled => {}
        }
        radar.pre_marking_update(radar_position.0);
        let filter = SpatialQueryFilter::default().with_excluded_entities([radar_owner_entity]);
        for pole_entity in spatial_query.shape_intersections(
            &Collider::sphere(radar.radius),
            radar_position.0,
            Quat::IDENTITY,
            &filter,
        ) {
            let Ok((pole, pole_position, pole_rotation)) = poles_query.get(pole_entity) else {
                continue;
            };
            radar.mark_seen(SwingPoleBlip {
                entity: pole_entity,
                position: pole_position.0,
                axis: pole_rotation.0 * pole.local_axis,
                half_length: pole.half_length(),
            });
        }
    }
}

#[allow(clippy::type_complexity)]
fn apply_motors_system(
    mut query: Query<(
        &SwingMotor,
        &SwingMovementSettings,
        &mut Position,
        &mut Rotation,
        &mut LinearVelocity,
        &mut GravityScale,
        Option<&SwingToggle>,
    )>,
) {
    for (
        motor,
        settings,
        mut position,
        mut rotation,
        mut linear_velocity,
        mut gravity_scale,
        swing_toggle,
    ) in query.iter_mut()
    {
        match swing_toggle.copied().unwrap_or_default() {
            SwingToggle::Disabled | SwingToggle::SenseOnly => continue,
            SwingToggle::Enabled => {}
        }
        gravity_scale.0 = settings.gravity_scale;
        if motor.stop_movement {
            linear_velocity.0 = Vec3::ZERO;
        }
        if let Some(new_position) = motor.position {
            position.0 = new_position;
            linear_velocity.0 = Vec3::ZERO;
        }
        if let Some(new_rotation) = motor.rotation {
            rotation.0 = new_rotation;
        }
        if let Some(launch) = motor.launch {
            linear_velocity.0 = launch;
        }
    }
}
