//! Collision-avoiding spawn placement shared by both managers.

use slime_core::{RandomSource, SpawnArea, Vec2};

/// Random positions tried before a spawn is given up
pub const MAX_PLACEMENT_ATTEMPTS: usize = 20;

/// Minimum distance between two agents at spawn time
pub const AGENT_MIN_SEPARATION: f64 = 30.0;

/// Minimum distance between two resources at spawn time
pub const RESOURCE_MIN_SEPARATION: f64 = 20.0;

/// Try up to [`MAX_PLACEMENT_ATTEMPTS`] random points in `area` and return
/// the first one at least `min_separation` away from every point in
/// `existing`. Each attempt draws x then y.
pub fn find_position<I>(
    area: &SpawnArea,
    existing: I,
    min_separation: f64,
    rng: &mut RandomSource,
) -> Option<Vec2>
where
    I: Iterator<Item = Vec2> + Clone,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = rng.float_range(area.min_x, area.max_x);
        let y = rng.float_range(area.min_y, area.max_y);
        let candidate = Vec2::new(x, y);

        let clear = existing
            .clone()
            .all(|other| other.distance(&candidate) >= min_separation);
        if clear {
            return Some(candidate);
        }
    }
    None
}
