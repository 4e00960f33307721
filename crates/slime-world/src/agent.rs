//! Agent (slime) state and per-tick lifecycle.
//!
//! An agent wanders randomly, burns energy every tick, eats resources it is
//! reported to touch, and dies once its energy hits zero. Death is a flip
//! followed by a fixed-length fade advanced by later ticks.

use crate::genome::Genome;
use crate::resource::{Consumption, Resource};
use serde::{Deserialize, Serialize};
use slime_core::{AgentConfig, AgentId, Direction, RandomSource, Vec2, WorldBounds};
use tracing::debug;

/// Classification of the energy ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HungerState {
    Satisfied,
    Hungry,
    Starving,
}

impl HungerState {
    /// Probability that a direction change also starts movement
    pub fn move_probability(&self) -> f64 {
        match self {
            HungerState::Satisfied => 0.8,
            HungerState::Hungry => 0.95,
            HungerState::Starving => 1.0,
        }
    }

    /// Range (ms) the time until the next direction change is drawn from
    pub fn direction_change_range(&self) -> (f64, f64) {
        match self {
            HungerState::Satisfied => (1000.0, 5000.0),
            HungerState::Hungry => (800.0, 3000.0),
            HungerState::Starving => (500.0, 2000.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    Normal,
    Sprint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifePhase {
    Alive,
    /// Fading out; `elapsed_ms` counts up to the configured fade duration
    Dying { elapsed_ms: f64 },
    Removed,
}

/// What happened to an agent during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    /// Energy reached zero during this tick
    JustDied,
    Dying,
    /// The death fade finished during this tick; the owner should drop the agent
    FadeCompleted,
    /// Already removed; the tick did nothing
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    genome: Genome,
    position: Vec2,
    direction: Direction,
    moving: bool,
    mode: MovementMode,
    energy: f64,
    hunger: HungerState,
    phase: LifePhase,
    movement_timer: f64,
    movement_change_duration: f64,
    config: AgentConfig,
}

impl Agent {
    pub fn new(genome: Genome, position: Vec2, config: AgentConfig) -> Self {
        let mut agent = Self {
            id: AgentId::new(),
            genome,
            position,
            direction: Direction::Down,
            moving: false,
            mode: MovementMode::Normal,
            energy: config.initial_energy,
            hunger: HungerState::Satisfied,
            phase: LifePhase::Alive,
            movement_timer: 0.0,
            movement_change_duration: 0.0,
            config,
        };
        agent.update_hunger_state();
        agent
    }

    /// Agent with a freshly drawn genome
    pub fn random(position: Vec2, config: AgentConfig, rng: &mut RandomSource) -> Self {
        Self::new(Genome::random(rng), position, config)
    }

    /// Advance the agent by `dt` simulated milliseconds.
    ///
    /// Live agents run random movement, energy accounting and boundary
    /// containment, in that order. Dying agents only advance their fade.
    pub fn tick(&mut self, dt: f64, rng: &mut RandomSource, bounds: &WorldBounds) -> TickOutcome {
        match self.phase {
            LifePhase::Removed => TickOutcome::Removed,
            LifePhase::Dying { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt;
                if elapsed_ms >= self.config.death_fade_ms {
                    self.phase = LifePhase::Removed;
                    debug!(event = "agent_removed", agent_id = %self.id, "Death fade completed");
                    TickOutcome::FadeCompleted
                } else {
                    self.phase = LifePhase::Dying { elapsed_ms };
                    TickOutcome::Dying
                }
            }
            LifePhase::Alive => {
                self.update_random_movement(dt, rng);
                if self.update_energy(dt) {
                    return TickOutcome::JustDied;
                }
                self.check_boundaries(bounds);
                TickOutcome::Alive
            }
        }
    }

    fn update_random_movement(&mut self, dt: f64, rng: &mut RandomSource) {
        self.movement_timer += dt;
        if self.movement_timer >= self.movement_change_duration {
            self.change_random_movement(rng);
        }
    }

    /// Draw a new direction, a move decision and the time until the next change.
    fn change_random_movement(&mut self, rng: &mut RandomSource) {
        let direction = Direction::from_index(rng.int_range(0, 3));

        // Starving agents always move and skip the draw.
        let should_move = match self.hunger {
            HungerState::Starving => true,
            hunger => rng.uniform() < hunger.move_probability(),
        };
        self.move_in_direction(direction, should_move);

        let (min, max) = self.hunger.direction_change_range();
        self.movement_change_duration = rng.float_range(min, max);
        self.movement_timer = 0.0;
    }

    /// Apply metabolic and movement costs. Returns `true` if the agent died.
    fn update_energy(&mut self, dt: f64) -> bool {
        let rate = self.config.metabolic_rate;
        self.energy -= rate * dt;

        if self.moving {
            let mut multiplier = self.genome.speed() * self.config.movement_cost_factor;
            if self.mode == MovementMode::Sprint {
                multiplier *= self.config.sprint_energy_multiplier;
            }
            self.energy -= rate * dt * multiplier;
        }

        self.energy = self.energy.max(0.0);
        self.update_hunger_state();

        if self.energy == 0.0 && self.phase == LifePhase::Alive {
            self.die();
            return true;
        }
        false
    }

    fn update_hunger_state(&mut self) {
        self.hunger = self.classify_hunger(self.energy);
    }

    fn classify_hunger(&self, energy: f64) -> HungerState {
        let ratio = energy / self.config.max_energy;
        if ratio <= self.config.starving_threshold {
            HungerState::Starving
        } else if ratio <= self.config.hungry_threshold {
            HungerState::Hungry
        } else {
            HungerState::Satisfied
        }
    }

    /// Keep the agent inside the world, turning it back inwards at an edge.
    fn check_boundaries(&mut self, bounds: &WorldBounds) {
        let padding = self.config.boundary_padding;
        let radius = self.effective_radius();

        if self.position.x > bounds.width - padding - radius {
            self.position.x = bounds.width - padding - radius;
            self.turn_back(Direction::Left);
        }
        if self.position.x < padding + radius {
            self.position.x = padding + radius;
            self.turn_back(Direction::Right);
        }
        if self.position.y > bounds.height - padding - radius {
            self.position.y = bounds.height - padding - radius;
            self.turn_back(Direction::Up);
        }
        if self.position.y < padding + radius {
            self.position.y = padding + radius;
            self.turn_back(Direction::Down);
        }
    }

    fn turn_back(&mut self, direction: Direction) {
        self.move_in_direction(direction, true);
        self.movement_timer = 0.0;
    }

    fn die(&mut self) {
        self.phase = LifePhase::Dying { elapsed_ms: 0.0 };
        self.moving = false;
        debug!(
            event = "agent_died",
            agent_id = %self.id,
            speed = self.genome.speed(),
            size = self.genome.size(),
            "Agent starved"
        );
    }

    /// Eat a resource the host reports this agent is touching.
    ///
    /// Returns the energy gained; zero if the resource was already eaten or
    /// the agent is no longer alive.
    pub fn on_resource_contact(&mut self, resource: &mut Resource) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }
        let value = match resource.consume() {
            Consumption::Consumed(value) => value,
            Consumption::AlreadyConsumed => return 0.0,
        };

        let before = self.energy;
        let gain = value * self.genome.energy_efficiency();
        self.energy = (self.energy + gain).min(self.config.max_energy);
        self.update_hunger_state();
        self.energy - before
    }

    /// Face `direction`; move along it when `should_move` is set, otherwise idle.
    pub fn move_in_direction(&mut self, direction: Direction, should_move: bool) {
        self.direction = direction;
        self.moving = should_move;
    }

    pub fn stop_moving(&mut self) {
        self.moving = false;
    }

    /// Request a movement mode. Sprinting below the energy floor is silently ignored.
    pub fn set_movement_mode(&mut self, mode: MovementMode) {
        if mode == MovementMode::Sprint
            && self.energy < self.config.max_energy * self.config.sprint_min_energy_ratio
        {
            return;
        }
        self.mode = mode;
    }

    pub fn toggle_sprint(&mut self) {
        let mode = match self.mode {
            MovementMode::Normal => MovementMode::Sprint,
            MovementMode::Sprint => MovementMode::Normal,
        };
        self.set_movement_mode(mode);
    }

    /// Velocity in pixels per second
    pub fn velocity(&self) -> Vec2 {
        if !self.moving || !self.is_alive() {
            return Vec2::ZERO;
        }
        let mut speed = self.config.base_speed * self.genome.speed();
        if self.mode == MovementMode::Sprint {
            speed *= self.config.sprint_speed_multiplier;
        }
        self.direction.to_unit().scale(speed)
    }

    /// Move along the current velocity for `dt` milliseconds
    pub fn integrate(&mut self, dt: f64) {
        self.position = self.position.add(self.velocity().scale(dt / 1000.0));
    }

    /// Offspring of this agent and `other`, placed at this agent's position
    pub fn reproduce(&self, other: &Agent, rng: &mut RandomSource) -> Agent {
        let genome = Genome::combine(&self.genome, &other.genome, self.config.mutation_rate, rng);
        Agent::new(genome, self.position, self.config)
    }

    /// Collision radius scaled by the size gene
    pub fn effective_radius(&self) -> f64 {
        self.config.radius * self.genome.size()
    }

    /// Render opacity: 1 while alive, fading to 0 over the death fade
    pub fn opacity(&self) -> f64 {
        match self.phase {
            LifePhase::Alive => 1.0,
            LifePhase::Dying { elapsed_ms } => {
                if self.config.death_fade_ms <= 0.0 {
                    0.0
                } else {
                    (1.0 - elapsed_ms / self.config.death_fade_ms).clamp(0.0, 1.0)
                }
            }
            LifePhase::Removed => 0.0,
        }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn max_energy(&self) -> f64 {
        self.config.max_energy
    }

    pub fn hunger_state(&self) -> HungerState {
        self.hunger
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger != HungerState::Satisfied
    }

    pub fn energy_efficiency(&self) -> f64 {
        self.genome.energy_efficiency()
    }

    pub fn sense_radius(&self) -> f64 {
        self.genome.sense_radius()
    }

    pub fn phase(&self) -> LifePhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase == LifePhase::Alive
    }

    /// True once death has been triggered, including after removal
    pub fn is_dying(&self) -> bool {
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GeneKind;
    use crate::resource::ResourceType;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0)
    }

    fn agent_with_speed(speed: f64) -> Agent {
        let genome = Genome::baseline().with_gene(GeneKind::Speed, speed);
        Agent::new(genome, Vec2::new(400.0, 300.0), AgentConfig::default())
    }

    /// Agent that will not change direction during the test
    fn frozen_agent(speed: f64, moving: bool) -> Agent {
        let mut agent = agent_with_speed(speed);
        agent.movement_change_duration = f64::INFINITY;
        agent.moving = moving;
        agent
    }

    #[test]
    fn test_agent_creation() {
        let agent = agent_with_speed(1.0);
        assert_eq!(agent.energy(), 50.0);
        assert_eq!(agent.max_energy(), 100.0);
        assert_eq!(agent.hunger_state(), HungerState::Satisfied);
        assert!(agent.is_alive());
        assert!(!agent.is_dying());
        assert!(!agent.is_moving());
        assert_eq!(agent.movement_mode(), MovementMode::Normal);
        assert_eq!(agent.opacity(), 1.0);
    }

    #[test]
    fn test_idle_energy_decrease() {
        let mut agent = frozen_agent(1.0, false);
        let mut rng = RandomSource::from_seed_str("test-seed");
        assert_eq!(agent.tick(1000.0, &mut rng, &bounds()), TickOutcome::Alive);
        assert!((agent.energy() - (50.0 - 0.005 * 1000.0)).abs() < EPS);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_moving_energy_decrease() {
        let speed = 1.2;
        let mut agent = frozen_agent(speed, true);
        let mut rng = RandomSource::from_seed_str("test-seed");
        agent.tick(1000.0, &mut rng, &bounds());
        let expected = 50.0 - 0.005 * 1000.0 * (1.0 + 0.5 * speed);
        assert!((agent.energy() - expected).abs() < EPS);
    }

    #[test]
    fn test_sprint_energy_decrease() {
        let speed = 1.0;
        let mut agent = frozen_agent(speed, true);
        agent.set_movement_mode(MovementMode::Sprint);
        assert_eq!(agent.movement_mode(), MovementMode::Sprint);

        let mut rng = RandomSource::from_seed_str("test-seed");
        agent.tick(1000.0, &mut rng, &bounds());
        let expected = 50.0 - 0.005 * 1000.0 - 0.005 * 1000.0 * speed * 0.5 * 2.5;
        assert!((agent.energy() - expected).abs() < EPS);
    }

    #[test]
    fn test_sprint_idle_costs_base_only() {
        let mut agent = frozen_agent(1.0, false);
        agent.set_movement_mode(MovementMode::Sprint);
        agent.update_energy(1000.0);
        assert!((agent.energy() - 45.0).abs() < EPS);
    }

    #[test]
    fn test_energy_never_negative() {
        let mut agent = frozen_agent(1.0, true);
        agent.energy = 0.001;
        agent.update_energy(10_000.0);
        assert_eq!(agent.energy(), 0.0);
    }

    #[test]
    fn test_hunger_thresholds_at_boundaries() {
        let agent = agent_with_speed(1.0);
        assert_eq!(agent.classify_hunger(100.0), HungerState::Satisfied);
        assert_eq!(agent.classify_hunger(30.000001), HungerState::Satisfied);
        assert_eq!(agent.classify_hunger(30.0), HungerState::Hungry);
        assert_eq!(agent.classify_hunger(20.0), HungerState::Hungry);
        assert_eq!(agent.classify_hunger(15.000001), HungerState::Hungry);
        assert_eq!(agent.classify_hunger(15.0), HungerState::Starving);
        assert_eq!(agent.classify_hunger(0.0), HungerState::Starving);
    }

    #[test]
    fn test_hunger_updates_with_energy() {
        let mut agent = frozen_agent(1.0, false);
        agent.energy = 31.0;
        agent.update_energy(400.0); // -2 energy
        assert_eq!(agent.hunger_state(), HungerState::Hungry);
        assert!(agent.is_hungry());

        agent.energy = 16.0;
        agent.update_energy(400.0);
        assert_eq!(agent.hunger_state(), HungerState::Starving);
    }

    #[test]
    fn test_death_fires_once_and_fades() {
        let mut agent = frozen_agent(1.0, true);
        let mut rng = RandomSource::from_seed_str("test-seed");
        agent.energy = 0.1;

        assert_eq!(agent.tick(100.0, &mut rng, &bounds()), TickOutcome::JustDied);
        assert!(!agent.is_alive());
        assert!(agent.is_dying());
        assert!(!agent.is_moving());
        assert_eq!(agent.velocity(), Vec2::ZERO);
        assert_eq!(agent.energy(), 0.0);

        assert_eq!(agent.tick(400.0, &mut rng, &bounds()), TickOutcome::Dying);
        assert!((agent.opacity() - 0.6).abs() < EPS);
        assert_eq!(agent.tick(500.0, &mut rng, &bounds()), TickOutcome::Dying);
        assert_eq!(agent.tick(100.0, &mut rng, &bounds()), TickOutcome::FadeCompleted);
        assert_eq!(agent.phase(), LifePhase::Removed);
        assert_eq!(agent.tick(100.0, &mut rng, &bounds()), TickOutcome::Removed);
        assert_eq!(agent.opacity(), 0.0);

        // A dead agent never draws from the random source.
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_zero_energy_dies_on_next_update() {
        let mut agent = frozen_agent(1.0, false);
        agent.energy = 0.0;
        assert!(agent.update_energy(100.0));
        assert!(!agent.update_energy(100.0));
    }

    #[test]
    fn test_direction_change_draws() {
        let mut rng = RandomSource::from_seed_str("walk");

        let mut agent = agent_with_speed(1.0);
        agent.change_random_movement(&mut rng);
        assert_eq!(rng.draws(), 3);
        let (min, max) = HungerState::Satisfied.direction_change_range();
        assert!(agent.movement_change_duration >= min && agent.movement_change_duration < max);

        agent.energy = 10.0;
        agent.update_hunger_state();
        agent.change_random_movement(&mut rng);
        assert_eq!(rng.draws(), 5);
        assert!(agent.is_moving());
        assert!(agent.movement_change_duration >= 500.0 && agent.movement_change_duration < 2000.0);
    }

    #[test]
    fn test_hungry_agents_move_more_often() {
        let mut rng = RandomSource::from_seed_str("restless");
        let mut moves = |energy: f64| {
            let mut agent = agent_with_speed(1.0);
            agent.energy = energy;
            agent.update_hunger_state();
            (0..2000)
                .filter(|_| {
                    agent.change_random_movement(&mut rng);
                    agent.is_moving()
                })
                .count()
        };
        let satisfied = moves(80.0);
        let hungry = moves(25.0);
        let starving = moves(5.0);
        assert!(satisfied > 1400 && satisfied < 1800);
        assert!(hungry > satisfied);
        assert_eq!(starving, 2000);
    }

    #[test]
    fn test_first_tick_picks_movement() {
        let mut agent = agent_with_speed(1.0);
        let mut rng = RandomSource::from_seed_str("first");
        agent.tick(16.0, &mut rng, &bounds());
        assert_eq!(rng.draws(), 3);
        assert!(agent.movement_change_duration >= 1000.0);
        assert_eq!(agent.movement_timer, 0.0);
    }

    #[test]
    fn test_velocity_scales_with_speed_and_sprint() {
        let mut agent = agent_with_speed(1.2);
        agent.move_in_direction(Direction::Right, true);
        assert!((agent.velocity().x - 60.0).abs() < EPS);
        assert_eq!(agent.velocity().y, 0.0);

        agent.set_movement_mode(MovementMode::Sprint);
        assert!((agent.velocity().x - 90.0).abs() < EPS);

        agent.move_in_direction(Direction::Up, true);
        assert!((agent.velocity().y + 90.0).abs() < EPS);

        agent.move_in_direction(Direction::Up, false);
        assert_eq!(agent.velocity(), Vec2::ZERO);
        assert_eq!(agent.direction(), Direction::Up);
    }

    #[test]
    fn test_cannot_sprint_with_low_energy() {
        let mut agent = agent_with_speed(1.0);
        agent.energy = 19.9;
        agent.set_movement_mode(MovementMode::Sprint);
        assert_eq!(agent.movement_mode(), MovementMode::Normal);

        agent.energy = 20.0;
        agent.set_movement_mode(MovementMode::Sprint);
        assert_eq!(agent.movement_mode(), MovementMode::Sprint);
    }

    #[test]
    fn test_toggle_sprint() {
        let mut agent = agent_with_speed(1.0);
        agent.toggle_sprint();
        assert_eq!(agent.movement_mode(), MovementMode::Sprint);
        agent.toggle_sprint();
        assert_eq!(agent.movement_mode(), MovementMode::Normal);

        agent.energy = 5.0;
        agent.toggle_sprint();
        assert_eq!(agent.movement_mode(), MovementMode::Normal);
    }

    #[test]
    fn test_integrate_moves_along_velocity() {
        let mut agent = agent_with_speed(1.0);
        agent.move_in_direction(Direction::Down, true);
        agent.integrate(500.0);
        assert!((agent.position().y - 325.0).abs() < EPS);
        assert_eq!(agent.position().x, 400.0);
    }

    #[test]
    fn test_boundary_containment() {
        let mut rng = RandomSource::from_seed_str("edge");
        let mut agent = frozen_agent(1.0, true);
        agent.move_in_direction(Direction::Right, true);
        agent.set_position(Vec2::new(900.0, 300.0));
        agent.movement_timer = 123.0;

        agent.tick(0.0, &mut rng, &bounds());
        // radius 12 * size 1.0, padding 10
        assert_eq!(agent.position().x, 800.0 - 10.0 - 12.0);
        assert_eq!(agent.direction(), Direction::Left);
        assert!(agent.is_moving());
        assert_eq!(agent.movement_timer, 0.0);

        agent.set_position(Vec2::new(-5.0, -5.0));
        agent.tick(0.0, &mut rng, &bounds());
        assert_eq!(agent.position(), Vec2::new(22.0, 22.0));
        assert_eq!(agent.direction(), Direction::Down);
    }

    #[test]
    fn test_boundary_uses_scaled_radius() {
        let mut rng = RandomSource::from_seed_str("edge");
        let genome = Genome::baseline().with_gene(GeneKind::Size, 2.0);
        let mut agent = Agent::new(genome, Vec2::new(400.0, 1000.0), AgentConfig::default());
        agent.movement_change_duration = f64::INFINITY;

        agent.tick(0.0, &mut rng, &bounds());
        assert_eq!(agent.position().y, 600.0 - 10.0 - 24.0);
        assert_eq!(agent.direction(), Direction::Up);
    }

    #[test]
    fn test_consume_resource_gains_energy() {
        let mut rng = RandomSource::from_seed_str("food");
        let genome = Genome::baseline().with_gene(GeneKind::EnergyEfficiency, 1.5);
        let mut agent = Agent::new(genome, Vec2::ZERO, AgentConfig::default());
        agent.energy = 20.0;
        agent.update_hunger_state();

        let mut food = Resource::new(ResourceType::Basic, Vec2::ZERO, &mut rng);
        let gained = agent.on_resource_contact(&mut food);
        assert!((gained - 15.0).abs() < EPS);
        assert!((agent.energy() - 35.0).abs() < EPS);
        assert_eq!(agent.hunger_state(), HungerState::Satisfied);

        // Already eaten
        assert_eq!(agent.on_resource_contact(&mut food), 0.0);
        assert!((agent.energy() - 35.0).abs() < EPS);
    }

    #[test]
    fn test_consume_resource_caps_at_max() {
        let mut rng = RandomSource::from_seed_str("food");
        let mut agent = agent_with_speed(1.0);
        agent.energy = 95.0;
        let mut food = Resource::new(ResourceType::Special, Vec2::ZERO, &mut rng);
        let gained = agent.on_resource_contact(&mut food);
        assert_eq!(agent.energy(), 100.0);
        assert!((gained - 5.0).abs() < EPS);
    }

    #[test]
    fn test_dying_agent_ignores_resources() {
        let mut rng = RandomSource::from_seed_str("food");
        let mut agent = agent_with_speed(1.0);
        agent.die();
        let mut food = Resource::new(ResourceType::Premium, Vec2::ZERO, &mut rng);
        assert_eq!(agent.on_resource_contact(&mut food), 0.0);
        assert!(!food.is_consumed());
    }

    #[test]
    fn test_reproduce_combines_parents() {
        let mut rng = RandomSource::from_seed_str("family");
        let a = Agent::random(Vec2::new(100.0, 100.0), AgentConfig::default(), &mut rng);
        let b = Agent::random(Vec2::new(200.0, 200.0), AgentConfig::default(), &mut rng);
        let child = a.reproduce(&b, &mut rng);

        assert_ne!(child.id, a.id);
        assert_eq!(child.energy(), 50.0);
        assert_eq!(child.position(), a.position());
        for kind in GeneKind::ALL {
            let v = child.genome().value(kind);
            let profile = kind.profile();
            assert!(v >= profile.min && v <= profile.max);
        }
    }

    #[test]
    fn test_reproduce_without_mutation_inherits_exactly() {
        let mut rng = RandomSource::from_seed_str("clone");
        let config = AgentConfig {
            mutation_rate: 0.0,
            ..Default::default()
        };
        let a = Agent::random(Vec2::ZERO, config, &mut rng);
        let child = a.reproduce(&a, &mut rng);
        assert_eq!(child.genome(), a.genome());
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_range(seed in any::<u32>(), dts in proptest::collection::vec(0.0f64..500.0, 1..200)) {
            let mut rng = RandomSource::from_seed(seed);
            let mut agent = Agent::random(Vec2::new(400.0, 300.0), AgentConfig::default(), &mut rng);
            for dt in dts {
                agent.tick(dt, &mut rng, &bounds());
                agent.integrate(dt);
                prop_assert!(agent.energy() >= 0.0 && agent.energy() <= agent.max_energy());
            }
        }
    }
}
