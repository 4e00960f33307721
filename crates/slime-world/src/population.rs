//! Agent population bookkeeping and spawn scheduling.

use crate::agent::Agent;
use crate::placement::{find_position, AGENT_MIN_SEPARATION};
use slime_core::{AgentConfig, AgentId, PopulationConfig, RandomSource, Result, WorldBounds};
use tracing::{debug, info, instrument};

pub struct PopulationManager {
    agents: Vec<Agent>,
    config: PopulationConfig,
    agent_config: AgentConfig,
    bounds: WorldBounds,
    time_since_last_spawn: f64,
}

impl PopulationManager {
    /// Create a manager; fails on invalid spawn configuration.
    pub fn new(
        config: PopulationConfig,
        agent_config: AgentConfig,
        bounds: WorldBounds,
    ) -> Result<Self> {
        config.validate()?;
        agent_config.validate()?;

        Ok(Self {
            agents: Vec::new(),
            config,
            agent_config,
            bounds,
            time_since_last_spawn: 0.0,
        })
    }

    /// Drop every agent and spawn the initial population.
    ///
    /// Spawns that cannot be placed are skipped, so fewer than
    /// `initial_population` agents may be returned in a crowded world.
    #[instrument(skip(self, rng), fields(initial_population = self.config.initial_population))]
    pub fn initialize(&mut self, rng: &mut RandomSource) -> &[Agent] {
        self.agents.clear();
        self.time_since_last_spawn = 0.0;

        for _ in 0..self.config.initial_population {
            self.spawn_agent(rng);
        }

        info!(
            event = "population_initialized",
            population = self.agents.len(),
            "Initial population spawned"
        );
        &self.agents
    }

    /// Accumulate `dt` milliseconds and spawn one agent per elapsed spawn
    /// interval while below the population cap. Returns the agents spawned
    /// by this call.
    pub fn update(&mut self, dt: f64, rng: &mut RandomSource) -> &[Agent] {
        let before = self.agents.len();

        if self.agents.len() < self.config.max_population {
            self.time_since_last_spawn += dt;

            let spawn_interval = self.spawn_interval();
            while self.time_since_last_spawn >= spawn_interval
                && self.agents.len() < self.config.max_population
            {
                self.time_since_last_spawn -= spawn_interval;
                if !self.spawn_agent(rng) {
                    break;
                }
            }
        }

        &self.agents[before..]
    }

    /// Milliseconds between two spawns
    pub fn spawn_interval(&self) -> f64 {
        1000.0 / self.config.spawn_rate
    }

    fn spawn_agent(&mut self, rng: &mut RandomSource) -> bool {
        let area = self.bounds.padded(self.config.spawn_area_padding);
        let existing = self.agents.iter().map(|a| a.position());

        let Some(position) = find_position(&area, existing, AGENT_MIN_SEPARATION, rng) else {
            debug!(
                event = "spawn_skipped",
                kind = "agent",
                population = self.agents.len(),
                "No free spawn position found"
            );
            return false;
        };

        let mut agent = Agent::random(position, self.agent_config, rng);
        agent.stop_moving();
        self.agents.push(agent);
        true
    }

    /// Take over an agent created elsewhere (e.g. offspring).
    /// Returns `false` and drops it when the population is full.
    pub fn adopt(&mut self, agent: Agent) -> bool {
        if self.agents.len() >= self.config.max_population {
            return false;
        }
        self.agents.push(agent);
        true
    }

    /// Remove an agent by id; unknown ids are ignored.
    pub fn remove_agent(&mut self, id: AgentId) -> Option<Agent> {
        let index = self.agents.iter().position(|a| a.id == id)?;
        Some(self.agents.remove(index))
    }

    pub fn count(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    pub fn agent_config(&self) -> &AgentConfig {
        &self.agent_config
    }

    /// Replace the spawn configuration after validating it
    pub fn update_config(&mut self, config: PopulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
