use bevy::prelude::*;

use crate::controller::{SwingController, SwingState};
use crate::util::approach;

const IK_WEIGHT_BLEND_IN_RATE: f32 = 8.0;
const IK_WEIGHT_BLEND_OUT_RATE: f32 = 5.0;

/// What the animation layer should read every frame.
///
/// Updated by the [`SwingControllerPlugin`](crate::SwingControllerPlugin) right after the
/// controller. Animation systems should run after [`SwingPipelineSystems::Logic`](crate::SwingPipelineSystems::Logic).
///
/// ```no_run
/// # use bevy::prelude::*;
/// # use bevy_pole_swing::prelude::*;
/// fn animate_swing(query: Query<&SwingAnimatingState>) {
///     for animating_state in query.iter() {
///         if let SwingAnimatingStateDirective::Alter { old_state } = animating_state.directive() {
///             info!("{old_state:?} -> {:?}", animating_state.state());
///         }
///         let _hand_target = animating_state.pivot();
///         let _hand_ik_weight = animating_state.ik_weight();
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Default)]
pub struct SwingAnimatingState {
    state: Option<SwingState>,
    directive: SwingAnimatingStateDirective,
    ik_weight: f32,
    angle: f32,
    angular_velocity: f32,
    pivot: Vec3,
}

/// Whether the animation needs to change this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SwingAnimatingStateDirective {
    /// The state is the same as last frame.
    #[default]
    Maintain,
    /// The state has changed. `old_state` is `None` on the first update.
    Alter { old_state: Option<SwingState> },
}

impl SwingAnimatingState {
    /// Record the controller's state and blend the IK weight for a frame of `frame_duration`.
    pub fn update(
        &mut self,
        controller: &SwingController,
        frame_duration: f32,
    ) -> SwingAnimatingStateDirective {
        let new_state = controller.state();
        let old_state = self.state.replace(new_state);
        self.directive = if old_state == Some(new_state) {
            SwingAnimatingStateDirective::Maintain
        } else {
            SwingAnimatingStateDirective::Alter { old_state }
        };

        let (target, rate) = if controller.is_swinging() {
            (1.0, IK_WEIGHT_BLEND_IN_RATE)
        } else {
            (0.0, IK_WEIGHT_BLEND_OUT_RATE)
        };
        self.ik_weight = approach(self.ik_weight, target, rate, frame_duration).clamp(0.0, 1.0);

        self.angle = controller.angle();
        self.angular_velocity = controller.angular_velocity();
        self.pivot = controller.pivot();

        self.directive
    }

    /// `None` before the first update.
    pub fn state(&self) -> Option<SwingState> {
        self.state
    }

    /// The directive from the last update.
    pub fn directive(&self) -> SwingAnimatingStateDirective {
        self.directive
    }

    /// Blend weight, between 0.0 and 1.0, for the hands' IK toward [`pivot`](Self::pivot).
    pub fn ik_weight(&self) -> f32 {
        self.ik_weight
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }
}

pub(crate) fn update_swing_animating_state_system(
    time: Res<Time>,
    mut query: Query<(&SwingController, &mut SwingAnimatingState)>,
) {
    let frame_duration = time.delta_secs();
    for (controller, mut animating_state) in query.iter_mut() {
        animating_state.update(controller, frame_duration);
    }
}
