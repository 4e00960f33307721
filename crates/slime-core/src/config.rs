//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::WorldBounds;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the simulated area in pixels
    pub width: f64,
    /// Height of the simulated area in pixels
    pub height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WorldConfig {
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "world width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "world height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

/// Per-agent energy, movement and lifecycle constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Energy capacity
    pub max_energy: f64,
    /// Energy every new agent starts with
    pub initial_energy: f64,
    /// Base metabolic cost per simulated millisecond
    pub metabolic_rate: f64,
    /// Extra cost of moving, as a fraction of the base cost per unit of speed gene
    pub movement_cost_factor: f64,
    /// Velocity in pixels per second at speed gene 1.0
    pub base_speed: f64,
    /// Collision radius at size gene 1.0
    pub radius: f64,
    /// Gap kept between an agent and the world edge
    pub boundary_padding: f64,
    pub sprint_speed_multiplier: f64,
    pub sprint_energy_multiplier: f64,
    /// Minimum energy ratio required to enter sprint mode
    pub sprint_min_energy_ratio: f64,
    /// Energy ratio at or below which an agent is hungry
    pub hungry_threshold: f64,
    /// Energy ratio at or below which an agent is starving
    pub starving_threshold: f64,
    /// Duration of the death fade in milliseconds
    pub death_fade_ms: f64,
    /// Mutation rate used by reproduction
    pub mutation_rate: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            initial_energy: 50.0,
            metabolic_rate: 0.005,
            movement_cost_factor: 0.5,
            base_speed: 50.0,
            radius: 12.0,
            boundary_padding: 10.0,
            sprint_speed_multiplier: 1.5,
            sprint_energy_multiplier: 2.5,
            sprint_min_energy_ratio: 0.2,
            hungry_threshold: 0.30,
            starving_threshold: 0.15,
            death_fade_ms: 1000.0,
            mutation_rate: 0.05,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_energy.is_finite() && self.max_energy > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_energy must be positive, got {}",
                self.max_energy
            )));
        }
        if !(0.0..=self.max_energy).contains(&self.initial_energy) {
            return Err(Error::InvalidConfig(format!(
                "initial_energy must lie in [0, {}], got {}",
                self.max_energy, self.initial_energy
            )));
        }
        if !(self.metabolic_rate >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "metabolic_rate must not be negative, got {}",
                self.metabolic_rate
            )));
        }
        if !(self.starving_threshold <= self.hungry_threshold) {
            return Err(Error::InvalidConfig(format!(
                "starving_threshold ({}) must not exceed hungry_threshold ({})",
                self.starving_threshold, self.hungry_threshold
            )));
        }
        if !(self.death_fade_ms >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "death_fade_ms must not be negative, got {}",
                self.death_fade_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Spawn parameters for the agent population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub initial_population: usize,
    /// Agents per second
    pub spawn_rate: f64,
    pub max_population: usize,
    /// Fraction of each world edge kept free of spawns (0 to 0.5)
    pub spawn_area_padding: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_population: 20,
            spawn_rate: 0.2, // one agent every 5 seconds
            max_population: 100,
            spawn_area_padding: 0.1,
        }
    }
}

impl PopulationConfig {
    pub fn validate(&self) -> Result<()> {
        validate_spawning(
            "population",
            self.initial_population,
            self.spawn_rate,
            self.max_population,
            self.spawn_area_padding,
        )
    }
}

/// Spawn parameters for food resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub initial_count: usize,
    /// Resources per second
    pub spawn_rate: f64,
    pub max_count: usize,
    /// Fraction of each world edge kept free of spawns (0 to 0.5)
    pub spawn_area_padding: f64,
    /// Probability of a special resource
    pub special_chance: f64,
    /// Probability of a premium resource; the remaining mass is basic
    pub premium_chance: f64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            initial_count: 40,
            spawn_rate: 0.3,
            max_count: 60,
            spawn_area_padding: 0.1,
            special_chance: 0.05,
            premium_chance: 0.15,
        }
    }
}

impl ResourceConfig {
    pub fn validate(&self) -> Result<()> {
        validate_spawning(
            "resources",
            self.initial_count,
            self.spawn_rate,
            self.max_count,
            self.spawn_area_padding,
        )?;

        for (name, chance) in [
            ("special_chance", self.special_chance),
            ("premium_chance", self.premium_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(Error::InvalidConfig(format!(
                    "resources: {} must lie in [0, 1], got {}",
                    name, chance
                )));
            }
        }
        if self.special_chance + self.premium_chance > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "resources: special_chance + premium_chance must not exceed 1, got {}",
                self.special_chance + self.premium_chance
            )));
        }
        Ok(())
    }
}

fn validate_spawning(
    scope: &str,
    initial: usize,
    spawn_rate: f64,
    max: usize,
    padding: f64,
) -> Result<()> {
    if !(spawn_rate.is_finite() && spawn_rate > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "{}: spawn_rate must be positive, got {}",
            scope, spawn_rate
        )));
    }
    if initial > max {
        return Err(Error::InvalidConfig(format!(
            "{}: initial count {} exceeds maximum {}",
            scope, initial, max
        )));
    }
    if !(0.0..0.5).contains(&padding) {
        return Err(Error::InvalidConfig(format!(
            "{}: spawn_area_padding must lie in [0, 0.5), got {}",
            scope, padding
        )));
    }
    Ok(())
}

/// Full simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed string for reproducible runs; `None` falls back to entropy
    pub seed: Option<String>,
    pub world: WorldConfig,
    pub agent: AgentConfig,
    pub population: PopulationConfig,
    pub resources: ResourceConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.agent.validate()?;
        self.population.validate()?;
        self.resources.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
