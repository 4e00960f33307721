//! Hooks through which a host mirrors entity lifecycles in its own scene.

use crate::agent::Agent;
use crate::resource::Resource;
use slime_core::{AgentId, ResourceId};

/// Receives entity lifecycle notifications from the simulation driver.
///
/// Every method defaults to a no-op so a host only implements what it renders.
pub trait PresentationSink {
    fn agent_spawned(&mut self, _agent: &Agent) {}

    /// Position, energy or fade opacity of a live or dying agent changed
    fn agent_changed(&mut self, _agent: &Agent) {}

    fn agent_removed(&mut self, _id: AgentId) {}

    fn resource_spawned(&mut self, _resource: &Resource) {}

    fn resource_removed(&mut self, _id: ResourceId) {}
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    AgentSpawned(AgentId),
    AgentChanged(AgentId),
    AgentRemoved(AgentId),
    ResourceSpawned(ResourceId),
    ResourceRemoved(ResourceId),
}

/// Keeps every notification in arrival order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, excluding the per-tick `AgentChanged` noise
    pub fn lifecycle_events(&self) -> impl Iterator<Item = &SinkEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, SinkEvent::AgentChanged(_)))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationSink for RecordingSink {
    fn agent_spawned(&mut self, agent: &Agent) {
        self.events.push(SinkEvent::AgentSpawned(agent.id));
    }

    fn agent_changed(&mut self, agent: &Agent) {
        self.events.push(SinkEvent::AgentChanged(agent.id));
    }

    fn agent_removed(&mut self, id: AgentId) {
        self.events.push(SinkEvent::AgentRemoved(id));
    }

    fn resource_spawned(&mut self, resource: &Resource) {
        self.events.push(SinkEvent::ResourceSpawned(resource.id));
    }

    fn resource_removed(&mut self, id: ResourceId) {
        self.events.push(SinkEvent::ResourceRemoved(id));
    }
}
