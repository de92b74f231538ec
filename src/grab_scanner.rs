use bevy::prelude::*;

use crate::pole::SwingPoleSnapshot;

/// Pick the pole to grab from `candidates`, or `None` if grabbing is not possible.
///
/// Grabbing only happens in the air. Poles that are not strictly above the character are ignored,
/// and among the rest the one whose midpoint is nearest to `character_position` wins. On a tie the
/// first candidate is kept.
///
/// `candidates` are expected to be already filtered by distance (e.g. by the
/// [`SwingPoleRadar`](crate::SwingPoleRadar) overlap query).
pub fn try_grab<'a>(
    character_position: Vec3,
    is_grounded: bool,
    candidates: impl IntoIterator<Item = &'a SwingPoleSnapshot>,
) -> Option<&'a SwingPoleSnapshot> {
    if is_grounded {
        return None;
    }
    let mut best: Option<(&SwingPoleSnapshot, f32)> = None;
    for pole in candidates {
        if pole.position.y <= character_position.y {
            continue;
        }
        let distance = character_position.distance(pole.position);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((pole, distance));
        }
    }
    best.map(|(pole, _)| pole)
}
