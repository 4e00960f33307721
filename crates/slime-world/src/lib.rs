//! Slime ecosystem simulation.
//!
//! Agents with heritable genomes wander a bounded world, burn energy and
//! eat resources; two managers keep both populations topped up. Every
//! random decision draws from one explicit [`slime_core::RandomSource`], so a
//! seed string reproduces a whole run.

pub mod agent;
pub mod contact;
pub mod genome;
pub mod placement;
pub mod population;
pub mod presentation;
pub mod resource;
pub mod resource_manager;
pub mod simulation;

pub use agent::{Agent, HungerState, LifePhase, MovementMode, TickOutcome};
pub use contact::{detect_contacts, Contact};
pub use genome::{Gene, GeneKind, Genome};
pub use population::PopulationManager;
pub use presentation::{NullSink, PresentationSink, RecordingSink, SinkEvent};
pub use resource::{Consumption, Resource, ResourceType};
pub use resource_manager::ResourceManager;
pub use simulation::{Simulation, SimulationSummary, StepReport};
