use bevy::prelude::*;

/// Damping is specified per frame at this rate, and scaled to the actual frame duration.
const DAMPING_REFERENCE_RATE: f32 = 60.0;

/// Angular state of the character hanging from a pole.
///
/// The pendulum swings in the world X/Y plane. An angle of 0 means hanging straight down, positive
/// angles are toward positive X.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SwingPendulum {
    /// Radians.
    pub angle: f32,
    /// Radians per second.
    pub angular_velocity: f32,
    /// Length of the pendulum arm.
    pub hang_length: f32,
    /// World point the pendulum swings around. Fixed for the duration of a grab.
    pub pivot: Vec3,
}

impl Default for SwingPendulum {
    fn default() -> Self {
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            hang_length: 120.0,
            pivot: Vec3::ZERO,
        }
    }
}

/// What drives the pendulum beyond gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingDrive {
    /// Pure damped pendulum.
    None,
    /// Push along the motion, or away from equilibrium when nearly stationary.
    Auto {
        force: f32,
        velocity_threshold: f32,
    },
    /// Push according to a player input axis in `[-1, 1]`.
    Manual { force: f32, axis: f32 },
}

/// Parameters of a single [`SwingPendulum::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPendulumParams {
    pub gravity_constant: f32,
    pub damping: f32,
    pub max_angle: f32,
    pub drive: SwingDrive,
}

impl SwingPendulum {
    /// Set up the pendulum for a character at `character_position` grabbing at `pivot`.
    ///
    /// The hang length is the vertical distance to the pivot, but never less than
    /// `min_hang_length`.
    pub fn from_grab(pivot: Vec3, character_position: Vec3, min_hang_length: f32) -> Self {
        let offset = character_position - pivot;
        Self {
            angle: f32::atan2(offset.x, -offset.y),
            angular_velocity: 0.0,
            hang_length: (pivot.y - character_position.y).abs().max(min_hang_length),
            pivot,
        }
    }

    /// Offset of the arc position from the pivot.
    pub fn arc_offset(&self) -> Vec3 {
        self.hang_length * Vec3::new(self.angle.sin(), -self.angle.cos(), 0.0)
    }

    /// Where the end of the pendulum arm is.
    pub fn arc_position(&self) -> Vec3 {
        self.pivot + self.arc_offset()
    }

    /// Linear velocity of the end of the pendulum arm.
    pub fn tangential_velocity(&self) -> Vec3 {
        self.angular_velocity
            * self.hang_length
            * Vec3::new(self.angle.cos(), self.angle.sin(), 0.0)
    }

    /// Advance the pendulum by `frame_duration` seconds.
    ///
    /// Restoring torque is integrated into the angular velocity first, followed by the drive and
    /// the damping, and only then the angle moves (semi-implicit Euler). The angle is clamped to
    /// `max_angle` but the velocity is kept as is when hitting the clamp.
    pub fn step(&mut self, params: &SwingPendulumParams, frame_duration: f32) {
        let angular_acceleration =
            -(params.gravity_constant / self.hang_length) * self.angle.sin();
        self.angular_velocity += angular_acceleration * frame_duration;

        match params.drive {
            SwingDrive::None => {}
            SwingDrive::Auto {
                force,
                velocity_threshold,
            } => {
                let direction = if self.angular_velocity.abs() > velocity_threshold {
                    sign(self.angular_velocity)
                } else {
                    sign(self.angle)
                };
                self.angular_velocity += direction * force * frame_duration;
            }
            SwingDrive::Manual { force, axis } => {
                self.angular_velocity += axis.clamp(-1.0, 1.0) * force * frame_duration;
            }
        }

        self.angular_velocity *= params
            .damping
            .powf(frame_duration * DAMPING_REFERENCE_RATE);

        self.angle = (self.angle + self.angular_velocity * frame_duration)
            .clamp(-params.max_angle, params.max_angle);
    }
}

// `f32::signum` gives 1.0 for 0.0, which would make a pendulum at rest start pumping.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
