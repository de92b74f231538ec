//! Components and system sets shared between `bevy-pole-swing` and its physics backends.
//!
//! The swing controller never talks to a physics engine directly. A backend fills the sensor
//! components during [`SwingPipelineSystems::Sensors`] and applies whatever the controller wrote
//! into [`SwingMotor`](data_for_backends::SwingMotor) during [`SwingPipelineSystems::Motors`].
use bevy::prelude::*;

pub mod data_for_backends;
pub mod pole_radar;

/// Umbrella system set for [`SwingPipelineSystems`].
///
/// The physics backends' plugins are responsible for preventing this entire system set from
/// running when the physics backend itself is paused.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct SwingSystems;

/// The various stages of the swing pipeline.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SwingPipelineSystems {
    /// Data is read from the physics backend.
    Sensors,
    /// The swing state machine advances and decides how the body should move.
    Logic,
    /// Position, rotation and velocity changes are applied in the physics backend.
    Motors,
}
