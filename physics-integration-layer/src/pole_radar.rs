use bevy::prelude::*;

/// Nearby poles, as reported by the physics backend's overlap query.
///
/// The backend calls [`pre_marking_update`](Self::pre_marking_update) and then
/// [`mark_seen`](Self::mark_seen) for every pole inside [`radius`](Self::radius) during
/// [`SwingPipelineSystems::Sensors`](crate::SwingPipelineSystems::Sensors).
#[derive(Component, Debug)]
pub struct SwingPoleRadar {
    pub radius: f32,
    tracked_position: Vec3,
    blips: Vec<SwingPoleBlip>,
}

/// World-space geometry of a pole seen by the [`SwingPoleRadar`].
#[derive(Debug, Clone, Copy)]
pub struct SwingPoleBlip {
    pub entity: Entity,
    /// Midpoint of the pole segment.
    pub position: Vec3,
    pub axis: Dir3,
    pub half_length: f32,
}

impl Default for SwingPoleRadar {
    fn default() -> Self {
        Self::new(220.0)
    }
}

impl SwingPoleRadar {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            tracked_position: Vec3::NAN,
            blips: Default::default(),
        }
    }

    pub fn pre_marking_update(&mut self, tracked_position: Vec3) {
        self.tracked_position = tracked_position;
        self.blips.clear();
    }

    pub fn mark_seen(&mut self, blip: SwingPoleBlip) {
        if let Some(existing) = self.blips.iter_mut().find(|b| b.entity == blip.entity) {
            *existing = blip;
        } else {
            self.blips.push(blip);
        }
    }

    pub fn tracked_position(&self) -> Vec3 {
        self.tracked_position
    }

    /// Blips in the order the backend reported them.
    pub fn iter_blips(&self) -> impl '_ + Iterator<Item = &SwingPoleBlip> {
        self.blips.iter()
    }

    pub fn has_blip(&self, entity: Entity) -> bool {
        self.blips.iter().any(|blip| blip.entity == entity)
    }
}
