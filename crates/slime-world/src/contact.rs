//! Circle-overlap contact detection for hosts without a physics engine.

use crate::agent::Agent;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use slime_core::{AgentId, ResourceId};

/// An agent touching a resource during the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub agent: AgentId,
    pub resource: ResourceId,
}

impl Contact {
    pub fn new(agent: AgentId, resource: ResourceId) -> Self {
        Self { agent, resource }
    }
}

/// Every (live agent, uneaten resource) pair whose circles overlap, in
/// agent order then resource order.
///
/// Agent circles use the size-scaled radius; a resource's size is its diameter.
pub fn detect_contacts(agents: &[Agent], resources: &[Resource]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for agent in agents.iter().filter(|a| a.is_alive()) {
        let reach = agent.effective_radius();
        for resource in resources.iter().filter(|r| !r.is_consumed()) {
            let distance = agent.position().distance(&resource.position);
            if distance <= reach + resource.size() / 2.0 {
                contacts.push(Contact::new(agent.id, resource.id));
            }
        }
    }
    contacts
}
