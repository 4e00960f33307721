//! Frame driver tying agents, resources and the random source together.

use crate::agent::{Agent, HungerState, TickOutcome};
use crate::contact::Contact;
use crate::population::PopulationManager;
use crate::presentation::PresentationSink;
use crate::resource_manager::ResourceManager;
use serde::{Deserialize, Serialize};
use slime_core::{AgentId, RandomSource, Result, SimulationConfig, WorldBounds};
use tracing::{debug, event, info, instrument, Level};

/// Frames between two population metrics snapshots (about 10 s at 60 fps)
pub const METRICS_INTERVAL_FRAMES: u64 = 600;

/// What happened during one [`Simulation::step`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub agents_spawned: usize,
    pub resources_spawned: usize,
    pub deaths: usize,
    pub agents_removed: usize,
    pub resources_consumed: usize,
    pub energy_gained: f64,
}

pub struct Simulation {
    rng: RandomSource,
    population: PopulationManager,
    resources: ResourceManager,
    bounds: WorldBounds,
    seed: Option<String>,
    frame: u64,
    elapsed_ms: f64,
    // Lifetime totals for metrics
    total_agents_spawned: u64,
    total_resources_spawned: u64,
    total_deaths: u64,
    total_resources_consumed: u64,
    total_offspring: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = RandomSource::from_optional_seed(config.seed.as_deref());
        let bounds = config.world.bounds();
        let population = PopulationManager::new(config.population, config.agent, bounds)?;
        let resources = ResourceManager::new(config.resources, bounds)?;

        Ok(Self {
            rng,
            population,
            resources,
            bounds,
            seed: config.seed,
            frame: 0,
            elapsed_ms: 0.0,
            total_agents_spawned: 0,
            total_resources_spawned: 0,
            total_deaths: 0,
            total_resources_consumed: 0,
            total_offspring: 0,
        })
    }

    /// Spawn the initial agents, then the initial resources.
    #[instrument(skip(self, sink), fields(seed = ?self.seed))]
    pub fn initialize<S: PresentationSink + ?Sized>(&mut self, sink: &mut S) {
        self.frame = 0;
        self.elapsed_ms = 0.0;

        for agent in self.population.initialize(&mut self.rng) {
            sink.agent_spawned(agent);
        }
        for resource in self.resources.initialize(&mut self.rng) {
            sink.resource_spawned(resource);
        }

        self.total_agents_spawned += self.population.count() as u64;
        self.total_resources_spawned += self.resources.count() as u64;

        info!(
            event = "simulation_initialized",
            deterministic = self.rng.is_deterministic(),
            population = self.population.count(),
            resources = self.resources.count(),
            width = self.bounds.width,
            height = self.bounds.height,
            "Simulation initialized"
        );
    }

    /// Advance every entity by `dt` milliseconds.
    ///
    /// `contacts` are the agent/resource overlaps the host observed this
    /// frame. Agents tick first, then move, then eat; spawning follows, and
    /// agents whose death fade finished are removed last.
    pub fn step<S: PresentationSink + ?Sized>(
        &mut self,
        dt: f64,
        contacts: &[Contact],
        sink: &mut S,
    ) -> StepReport {
        let mut report = StepReport::default();
        let mut faded: Vec<AgentId> = Vec::new();

        for agent in self.population.agents_mut() {
            match agent.tick(dt, &mut self.rng, &self.bounds) {
                TickOutcome::JustDied => report.deaths += 1,
                TickOutcome::FadeCompleted | TickOutcome::Removed => faded.push(agent.id),
                TickOutcome::Alive | TickOutcome::Dying => {}
            }
        }

        for agent in self.population.agents_mut() {
            agent.integrate(dt);
        }

        for contact in contacts {
            let (Some(agent), Some(resource)) = (
                self.population.get_mut(contact.agent),
                self.resources.get_mut(contact.resource),
            ) else {
                continue;
            };

            let was_consumed = resource.is_consumed();
            let gained = agent.on_resource_contact(resource);
            if !was_consumed && resource.is_consumed() {
                report.resources_consumed += 1;
                report.energy_gained += gained;
            }
        }
        for id in self.resources.remove_consumed() {
            sink.resource_removed(id);
        }

        for agent in self.population.agents() {
            if !faded.contains(&agent.id) {
                sink.agent_changed(agent);
            }
        }

        let spawned = self.population.update(dt, &mut self.rng);
        report.agents_spawned = spawned.len();
        for agent in spawned {
            sink.agent_spawned(agent);
        }

        let spawned = self.resources.update(dt, &mut self.rng);
        report.resources_spawned = spawned.len();
        for resource in spawned {
            sink.resource_spawned(resource);
        }

        for id in faded {
            if self.population.remove_agent(id).is_some() {
                debug!(event = "agent_dropped", agent_id = %id, frame = self.frame, "Agent removed from population");
                sink.agent_removed(id);
                report.agents_removed += 1;
            }
        }

        self.frame += 1;
        self.elapsed_ms += dt;
        self.total_agents_spawned += report.agents_spawned as u64;
        self.total_resources_spawned += report.resources_spawned as u64;
        self.total_deaths += report.deaths as u64;
        self.total_resources_consumed += report.resources_consumed as u64;

        if self.frame % METRICS_INTERVAL_FRAMES == 0 {
            self.emit_population_metrics();
        }

        report
    }

    /// Breed two live agents; the child joins the population at the first
    /// parent's position. Returns `None` if either parent is missing or
    /// dead, or the population is full.
    pub fn reproduce<S: PresentationSink + ?Sized>(
        &mut self,
        parent: AgentId,
        other: AgentId,
        sink: &mut S,
    ) -> Option<AgentId> {
        let a = self.population.get(parent).filter(|a| a.is_alive())?;
        let b = self.population.get(other).filter(|b| b.is_alive())?;

        let child = a.reproduce(b, &mut self.rng);
        let child_id = child.id;
        if !self.population.adopt(child) {
            debug!(event = "reproduction_skipped", population = self.population.count(), "Population full");
            return None;
        }

        if let Some(child) = self.population.get(child_id) {
            sink.agent_spawned(child);
        }
        self.total_offspring += 1;
        self.total_agents_spawned += 1;
        Some(child_id)
    }

    fn emit_population_metrics(&self) {
        let agents = self.population.agents();
        let alive: Vec<_> = agents.iter().filter(|a| a.is_alive()).collect();
        let dying = agents.iter().filter(|a| a.is_dying()).count();
        let hungry = alive
            .iter()
            .filter(|a| a.hunger_state() == HungerState::Hungry)
            .count();
        let starving = alive
            .iter()
            .filter(|a| a.hunger_state() == HungerState::Starving)
            .count();

        let avg_energy = mean_of(&alive, |a| a.energy());
        let avg_speed = mean_of(&alive, |a| a.genome().speed());
        let avg_size = mean_of(&alive, |a| a.genome().size());

        info!(
            event = "population_metrics",
            frame = self.frame,
            elapsed_ms = self.elapsed_ms,
            alive = alive.len(),
            dying = dying,
            hungry = hungry,
            starving = starving,
            avg_energy = format!("{:.2}", avg_energy),
            avg_speed = format!("{:.3}", avg_speed),
            avg_size = format!("{:.3}", avg_size),
            resources = self.resources.count(),
            total_deaths = self.total_deaths,
            total_resources_consumed = self.total_resources_consumed,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_alive",
            gauge_value = alive.len(),
            frame = self.frame,
            "Population gauge"
        );
        event!(
            Level::INFO,
            gauge_name = "resource_count",
            gauge_value = self.resources.count(),
            frame = self.frame,
            "Resource gauge"
        );
    }

    /// Aggregate statistics for the run so far
    pub fn summary(&self) -> SimulationSummary {
        let alive: Vec<_> = self
            .population
            .agents()
            .iter()
            .filter(|a| a.is_alive())
            .collect();

        SimulationSummary {
            seed: self.seed.clone(),
            deterministic: self.rng.is_deterministic(),
            frames: self.frame,
            elapsed_ms: self.elapsed_ms,
            final_population: alive.len(),
            final_resources: self.resources.count(),
            total_agents_spawned: self.total_agents_spawned,
            total_resources_spawned: self.total_resources_spawned,
            total_deaths: self.total_deaths,
            total_resources_consumed: self.total_resources_consumed,
            total_offspring: self.total_offspring,
            avg_energy: mean_of(&alive, |a| a.energy()),
            avg_speed: mean_of(&alive, |a| a.genome().speed()),
            avg_size: mean_of(&alive, |a| a.genome().size()),
            avg_energy_efficiency: mean_of(&alive, |a| a.genome().energy_efficiency()),
        }
    }

    /// Log the end-of-run summary
    pub fn emit_summary(&self) {
        let summary = self.summary();
        info!(
            event = "run_summary",
            frames = summary.frames,
            elapsed_ms = summary.elapsed_ms,
            final_population = summary.final_population,
            final_resources = summary.final_resources,
            total_agents_spawned = summary.total_agents_spawned,
            total_deaths = summary.total_deaths,
            total_resources_consumed = summary.total_resources_consumed,
            total_offspring = summary.total_offspring,
            avg_speed = format!("{:.3}", summary.avg_speed),
            avg_size = format!("{:.3}", summary.avg_size),
            "Run complete"
        );
    }

    pub fn population(&self) -> &PopulationManager {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut PopulationManager {
        &mut self.population
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn rng(&self) -> &RandomSource {
        &self.rng
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

fn mean_of(agents: &[&Agent], value: impl Fn(&Agent) -> f64) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(|a| value(a)).sum::<f64>() / agents.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: Option<String>,
    pub deterministic: bool,
    pub frames: u64,
    pub elapsed_ms: f64,
    pub final_population: usize,
    pub final_resources: usize,
    pub total_agents_spawned: u64,
    pub total_resources_spawned: u64,
    pub total_deaths: u64,
    pub total_resources_consumed: u64,
    pub total_offspring: u64,
    pub avg_energy: f64,
    pub avg_speed: f64,
    pub avg_size: f64,
    pub avg_energy_efficiency: f64,
}
