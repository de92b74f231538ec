use bevy::prelude::*;

use crate::pendulum::SwingPendulum;

/// How the launch velocity is derived when letting go of the pole.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum SwingReleaseModel {
    /// Use the character's actual motion during the last swinging frame.
    ///
    /// Includes whatever the position solve produced - in
    /// [`GripPivot`](crate::SwingRotationMode::GripPivot) mode that means rotation-driven motion
    /// as well.
    #[default]
    Measured,
    /// Use the tangential velocity of the pendulum arm, `angular_velocity * hang_length`, along
    /// the arc tangent.
    Analytic,
}

impl SwingReleaseModel {
    /// The velocity to launch the character with.
    ///
    /// `measured_velocity` is only used by [`Measured`](Self::Measured).
    pub fn launch_velocity(
        &self,
        pendulum: &SwingPendulum,
        measured_velocity: Vec3,
        launch_speed_multiplier: f32,
    ) -> Vec3 {
        let velocity = match self {
            SwingReleaseModel::Measured => measured_velocity,
            SwingReleaseModel::Analytic => pendulum.tangential_velocity(),
        };
        velocity * launch_speed_multiplier
    }
}
