//! # Pole swinging for Bevy characters
//!
//! A character in the air can grab a horizontal pole above it, hang from it as a damped driven
//! pendulum, and let go to be launched with the swing's momentum. While idle on the ground, the
//! character is smoothly tilted to stand on the slope under it.
//!
//! ## Getting started
//!
//! Add [`SwingControllerPlugin`] together with a physics backend plugin (e.g.
//! `SwingAvian3dPlugin` from `bevy-pole-swing-avian3d`), both on the same schedule:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_pole_swing::prelude::*;
//! # let mut app = App::new();
//! app.add_plugins(SwingControllerPlugin::new(FixedUpdate));
//! ```
//!
//! Give the character a [`SwingController`] (which brings in the components the backend fills),
//! a [`SwingPoleRadar`] for finding poles and a [`SwingGroundSensor`]. Poles are entities with a
//! [`SwingPole`] and a collider.
//!
//! Feed the input from a system in [`SwingUserControlsSystems`]:
//!
//! ```no_run
//! # use bevy::prelude::*;
//! # use bevy_pole_swing::prelude::*;
//! # #[derive(Resource)]
//! # struct PlayerInput { grab_just_pressed: bool, horizontal: f32 }
//! fn player_control_system(
//!     input: Res<PlayerInput>,
//!     mut query: Query<&mut SwingController>,
//! ) {
//!     for mut controller in query.iter_mut() {
//!         if input.grab_just_pressed {
//!             controller.grab_or_release_pressed();
//!         }
//!         // Only matters in `SwingInputMode::Manual`
//!         controller.set_swing_input_axis(input.horizontal);
//!     }
//! }
//! ```
//!
//! Read [`SwingAnimatingState`] for animating the character.
//!
//! Hosts that manage the character outside the ECS can implement [`SwingBody`] and
//! [`SwingWorld`] and drive the [`SwingController`] directly with
//! [`tick`](SwingController::tick).
mod animating_helper;
mod body;
mod config;
mod controller;
mod grab_scanner;
mod ground_alignment;
mod pendulum;
mod pole;
mod release;
pub mod util;
mod world_lens;

pub use animating_helper::{SwingAnimatingState, SwingAnimatingStateDirective};
pub use body::{SwingBody, SwingBodyLens, SwingGroundHit, SwingWorld};
pub use config::{
    SwingConfig, SwingConfigError, SwingGroundAlignmentConfig, SwingInputMode, SwingRotationMode,
};
pub use controller::{
    SwingController, SwingControllerPlugin, SwingGrabTransition, SwingIntentOutcome, SwingState,
};
pub use grab_scanner::try_grab;
pub use ground_alignment::{align_to_ground, slope_target_rotation};
pub use pendulum::{SwingDrive, SwingPendulum, SwingPendulumParams};
pub use pole::{closest_point_on_pole, SwingPoleSnapshot};
pub use release::SwingReleaseModel;
pub use world_lens::SwingWorldLens;

pub use bevy_pole_swing_physics_integration_layer::data_for_backends::*;
pub use bevy_pole_swing_physics_integration_layer::pole_radar::*;
pub use bevy_pole_swing_physics_integration_layer::{SwingPipelineSystems, SwingSystems};

use bevy::prelude::*;

pub mod prelude {
    pub use crate::{
        SwingAnimatingState, SwingAnimatingStateDirective, SwingConfig, SwingController,
        SwingControllerPlugin, SwingGripAnchor, SwingGroundSensor, SwingInputMode, SwingPole,
        SwingPoleRadar, SwingReleaseModel, SwingRotationMode, SwingState, SwingToggle,
        SwingUserControlsSystems,
    };
}

/// The user controls should be applied in this system set.
#[derive(SystemSet, Clone, PartialEq, Eq, Debug, Hash)]
pub struct SwingUserControlsSystems;
