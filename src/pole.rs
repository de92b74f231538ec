use bevy::prelude::*;
use bevy_pole_swing_physics_integration_layer::data_for_backends::SwingPoleError;
use bevy_pole_swing_physics_integration_layer::pole_radar::SwingPoleBlip;

/// Read-only geometry of a grabbable pole, captured for the current frame.
///
/// Poles are owned by the world. The controller only keeps a snapshot of the pole it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPoleSnapshot {
    /// The pole entity, when the snapshot came from the ECS world.
    pub entity: Option<Entity>,
    /// Midpoint of the pole segment.
    pub position: Vec3,
    pub axis: Dir3,
    half_length: f32,
}

impl SwingPoleSnapshot {
    pub fn new(position: Vec3, axis: Dir3, half_length: f32) -> Result<Self, SwingPoleError> {
        if half_length > 0.0 {
            Ok(Self {
                entity: None,
                position,
                axis,
                half_length,
            })
        } else {
            Err(SwingPoleError::NonPositiveHalfLength(half_length))
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn half_length(&self) -> f32 {
        self.half_length
    }

    /// One end of the pole. Distances along the pole are measured from here.
    pub fn segment_start(&self) -> Vec3 {
        self.position - *self.axis * self.half_length
    }

    /// Where hands would attach when grabbing from `query_point`.
    ///
    /// See [`closest_point_on_pole`].
    pub fn closest_point(&self, query_point: Vec3) -> Vec3 {
        closest_point_on_pole(self.position, self.axis, self.half_length, query_point)
    }

    /// Straight-line distance from `point` to the pole segment.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        let along = (point - self.segment_start())
            .dot(*self.axis)
            .clamp(0.0, 2.0 * self.half_length);
        point.distance(self.segment_start() + *self.axis * along)
    }
}

impl TryFrom<&SwingPoleBlip> for SwingPoleSnapshot {
    type Error = SwingPoleError;

    fn try_from(blip: &SwingPoleBlip) -> Result<Self, Self::Error> {
        Ok(Self::new(blip.position, blip.axis, blip.half_length)?.with_entity(blip.entity))
    }
}

/// The point on the pole segment closest to `query_point`, at the pole's own height.
///
/// The projection along `axis` is clamped to the segment, and the vertical coordinate is always
/// that of `pole_position` - hands hang at pole height even when the query point is off-axis
/// vertically.
///
/// # Panics
///
/// Panics if `half_length` is negative or NaN. [`SwingPoleSnapshot::closest_point`] never does,
/// since snapshots can only be built with a positive half-length.
///
/// ```
/// # use bevy::prelude::*;
/// # use bevy_pole_swing::closest_point_on_pole;
/// let attach = closest_point_on_pole(Vec3::new(0.0, 200.0, 0.0), Dir3::Z, 150.0, Vec3::new(30.0, 0.0, 500.0));
/// assert_eq!(attach, Vec3::new(0.0, 200.0, 150.0));
/// ```
pub fn closest_point_on_pole(
    pole_position: Vec3,
    axis: Dir3,
    half_length: f32,
    query_point: Vec3,
) -> Vec3 {
    let segment_start = pole_position - *axis * half_length;
    let along = (query_point - segment_start)
        .dot(*axis)
        .clamp(0.0, 2.0 * half_length);
    let closest = segment_start + *axis * along;
    Vec3::new(closest.x, pole_position.y, closest.z)
}
