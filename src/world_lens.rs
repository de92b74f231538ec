use bevy::prelude::*;
use bevy_pole_swing_physics_integration_layer::data_for_backends::SwingGroundSensor;
use bevy_pole_swing_physics_integration_layer::pole_radar::SwingPoleRadar;

use crate::body::{SwingGroundHit, SwingWorld};
use crate::pole::SwingPoleSnapshot;

/// [`SwingWorld`] over the sensors the physics backend has filled this frame.
///
/// The sensors were already cast from the character, with ranges the controller keeps in sync with
/// its configuration, so the queries only filter what the backend reported. The radar is cast with
/// last frame's radius, and poles beyond the requested radius are dropped here.
pub struct SwingWorldLens<'a> {
    radar: Option<&'a SwingPoleRadar>,
    ground_sensor: Option<&'a SwingGroundSensor>,
}

impl<'a> SwingWorldLens<'a> {
    pub fn new(
        radar: Option<&'a SwingPoleRadar>,
        ground_sensor: Option<&'a SwingGroundSensor>,
    ) -> Self {
        Self {
            radar,
            ground_sensor,
        }
    }
}

impl SwingWorld for SwingWorldLens<'_> {
    fn nearby_poles(&self, origin: Vec3, radius: f32) -> Vec<SwingPoleSnapshot> {
        let Some(radar) = self.radar else {
            return Vec::new();
        };
        radar
            .iter_blips()
            .filter_map(|blip| match SwingPoleSnapshot::try_from(blip) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    warn!("Ignoring pole {:?}: {err}", blip.entity);
                    None
                }
            })
            .filter(|snapshot| snapshot.distance_to(origin) <= radius)
            .collect()
    }

    fn ground_below(&self, _origin: Vec3, max_distance: f32) -> Option<SwingGroundHit> {
        let output = self.ground_sensor?.output.as_ref()?;
        if max_distance < output.proximity {
            return None;
        }
        Some(SwingGroundHit {
            point: output.point,
            normal: output.normal,
        })
    }
}
