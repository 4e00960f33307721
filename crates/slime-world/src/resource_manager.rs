//! Resource field bookkeeping and spawn scheduling.

use crate::placement::{find_position, RESOURCE_MIN_SEPARATION};
use crate::resource::{Resource, ResourceType};
use slime_core::{RandomSource, ResourceConfig, ResourceId, Result, WorldBounds};
use tracing::{debug, info, instrument};

pub struct ResourceManager {
    resources: Vec<Resource>,
    config: ResourceConfig,
    bounds: WorldBounds,
    time_since_last_spawn: f64,
}

impl ResourceManager {
    pub fn new(config: ResourceConfig, bounds: WorldBounds) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            resources: Vec::new(),
            config,
            bounds,
            time_since_last_spawn: 0.0,
        })
    }

    /// Drop every resource and spawn the initial field.
    #[instrument(skip(self, rng), fields(initial_count = self.config.initial_count))]
    pub fn initialize(&mut self, rng: &mut RandomSource) -> &[Resource] {
        self.resources.clear();
        self.time_since_last_spawn = 0.0;

        for _ in 0..self.config.initial_count {
            self.spawn_resource(rng);
        }

        info!(
            event = "resources_initialized",
            count = self.resources.len(),
            "Initial resources spawned"
        );
        &self.resources
    }

    /// Accumulate `dt` milliseconds and spawn one resource per elapsed
    /// interval while below the cap. Returns the resources spawned by this call.
    pub fn update(&mut self, dt: f64, rng: &mut RandomSource) -> &[Resource] {
        let before = self.resources.len();

        if self.resources.len() < self.config.max_count {
            self.time_since_last_spawn += dt;

            let spawn_interval = self.spawn_interval();
            while self.time_since_last_spawn >= spawn_interval
                && self.resources.len() < self.config.max_count
            {
                self.time_since_last_spawn -= spawn_interval;
                if !self.spawn_resource(rng) {
                    break;
                }
            }
        }

        &self.resources[before..]
    }

    pub fn spawn_interval(&self) -> f64 {
        1000.0 / self.config.spawn_rate
    }

    fn spawn_resource(&mut self, rng: &mut RandomSource) -> bool {
        let area = self.bounds.padded(self.config.spawn_area_padding);
        let existing = self.resources.iter().map(|r| r.position);

        let Some(position) = find_position(&area, existing, RESOURCE_MIN_SEPARATION, rng) else {
            debug!(
                event = "spawn_skipped",
                kind = "resource",
                count = self.resources.len(),
                "No free spawn position found"
            );
            return false;
        };

        let resource_type = self.determine_type(rng);
        self.resources
            .push(Resource::new(resource_type, position, rng));
        true
    }

    /// One uniform draw against the cumulative special/premium thresholds
    fn determine_type(&self, rng: &mut RandomSource) -> ResourceType {
        let roll = rng.uniform();
        if roll < self.config.special_chance {
            ResourceType::Special
        } else if roll < self.config.special_chance + self.config.premium_chance {
            ResourceType::Premium
        } else {
            ResourceType::Basic
        }
    }

    /// Remove a resource by id; unknown ids are ignored.
    pub fn remove_resource(&mut self, id: ResourceId) -> Option<Resource> {
        let index = self.resources.iter().position(|r| r.id == id)?;
        Some(self.resources.remove(index))
    }

    /// Drop every consumed resource and return their ids in field order.
    pub fn remove_consumed(&mut self) -> Vec<ResourceId> {
        let mut removed = Vec::new();
        self.resources.retain(|r| {
            if r.is_consumed() {
                removed.push(r.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn count(&self) -> usize {
        self.resources.len()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id == id)
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: ResourceConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use slime_core::Error;
    use std::collections::HashMap;

    fn manager(initial: usize, rate: f64, max: usize) -> ResourceManager {
        ResourceManager::new(
            ResourceConfig {
                initial_count: initial,
                spawn_rate: rate,
                max_count: max,
                ..Default::default()
            },
            WorldBounds::new(800.0, 600.0),
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_creates_initial_field() {
        let mut rng = RandomSource::from_seed_str("test-seed");
        let mut mgr = manager(40, 0.3, 60);
        assert_eq!(mgr.initialize(&mut rng).len(), 40);
        assert_eq!(mgr.count(), 40);
        assert!(mgr.resources().iter().all(|r| !r.is_consumed()));
    }

    #[test]
    fn test_spawn_draw_order() {
        // Empty field: two placement draws, one type draw, one size draw.
        let mut rng = RandomSource::from_seed_str("test-seed");
        let mut mgr = manager(1, 1.0, 10);
        mgr.initialize(&mut rng);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_large_dt_never_exceeds_max() {
        let mut rng = RandomSource::from_seed_str("test-seed");
        let mut mgr = manager(8, 1.0, 10);
        mgr.initialize(&mut rng);
        assert_eq!(mgr.update(100_000.0, &mut rng).len(), 2);
        assert_eq!(mgr.count(), 10);
        assert!(mgr.update(100_000.0, &mut rng).is_empty());
    }

    #[test]
    fn test_type_thresholds() {
        let mut rng = RandomSource::from_seed_str("types");
        let mut all_special = ResourceManager::new(
            ResourceConfig {
                special_chance: 1.0,
                premium_chance: 0.0,
                ..Default::default()
            },
            WorldBounds::new(800.0, 600.0),
        )
        .unwrap();
        all_special.initialize(&mut rng);
        assert!(all_special
            .resources()
            .iter()
            .all(|r| r.resource_type() == ResourceType::Special));

        let mut all_basic = ResourceManager::new(
            ResourceConfig {
                special_chance: 0.0,
                premium_chance: 0.0,
                ..Default::default()
            },
            WorldBounds::new(800.0, 600.0),
        )
        .unwrap();
        all_basic.initialize(&mut rng);
        assert!(all_basic
            .resources()
            .iter()
            .all(|r| r.resource_type() == ResourceType::Basic));
    }

    #[test]
    fn test_type_distribution_roughly_matches_chances() {
        let mut rng = RandomSource::from_seed_str("distribution");
        let mgr = manager(0, 1.0, 10);
        let mut counts: HashMap<ResourceType, usize> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(mgr.determine_type(&mut rng)).or_default() += 1;
        }
        let special = counts[&ResourceType::Special] as f64 / 10_000.0;
        let premium = counts[&ResourceType::Premium] as f64 / 10_000.0;
        assert!((special - 0.05).abs() < 0.02);
        assert!((premium - 0.15).abs() < 0.03);
    }

    #[test]
    fn test_remove_consumed() {
        let mut rng = RandomSource::from_seed_str("test-seed");
        let mut mgr = manager(5, 1.0, 10);
        mgr.initialize(&mut rng);
        let eaten = mgr.resources()[2].id;
        mgr.get_mut(eaten).unwrap().consume();

        assert_eq!(mgr.remove_consumed(), vec![eaten]);
        assert_eq!(mgr.count(), 4);
        assert!(mgr.remove_consumed().is_empty());
    }

    #[test]
    fn test_remove_resource_unknown_id() {
        let mut rng = RandomSource::from_seed_str("test-seed");
        let mut mgr = manager(3, 1.0, 10);
        mgr.initialize(&mut rng);
        let id = mgr.resources()[0].id;
        assert!(mgr.remove_resource(id).is_some());
        assert!(mgr.remove_resource(id).is_none());
        assert!(mgr.remove_resource(ResourceId::new()).is_none());
        assert_eq!(mgr.count(), 2);
    }

    #[test]
    fn test_invalid_chances_fail_fast() {
        let result = ResourceManager::new(
            ResourceConfig {
                special_chance: 0.7,
                premium_chance: 0.6,
                ..Default::default()
            },
            WorldBounds::new(800.0, 600.0),
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    proptest! {
        #[test]
        fn prop_spawns_keep_separation(seed in any::<u32>()) {
            let mut rng = RandomSource::from_seed(seed);
            let mut mgr = manager(40, 3.0, 80);
            mgr.initialize(&mut rng);
            mgr.update(20_000.0, &mut rng);

            let resources = mgr.resources();
            prop_assert!(resources.len() <= 80);
            for (i, a) in resources.iter().enumerate() {
                for b in &resources[i + 1..] {
                    prop_assert!(a.position.distance(&b.position) >= RESOURCE_MIN_SEPARATION);
                }
            }
        }
    }
}
