//! Food resources that agents consume.

use serde::{Deserialize, Serialize};
use slime_core::{RandomSource, ResourceId, Rgb, Vec2};
use tracing::trace;

/// Resource kind, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Basic,
    Premium,
    Special,
}

impl ResourceType {
    pub fn nutritional_value(&self) -> f64 {
        match self {
            ResourceType::Basic => 10.0,
            ResourceType::Premium => 25.0,
            ResourceType::Special => 50.0,
        }
    }

    /// Half-open range the visual diameter is drawn from
    pub fn size_range(&self) -> (f64, f64) {
        match self {
            ResourceType::Basic => (5.0, 8.0),
            ResourceType::Premium => (8.0, 11.0),
            ResourceType::Special => (11.0, 15.0),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            ResourceType::Basic => Rgb::new(76, 175, 80),
            ResourceType::Premium => Rgb::new(255, 193, 7),
            ResourceType::Special => Rgb::new(156, 39, 176),
        }
    }
}

/// Result of a consumption attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Consumption {
    /// First consumption; carries the nutritional value
    Consumed(f64),
    AlreadyConsumed,
}

impl Consumption {
    pub fn value(&self) -> f64 {
        match self {
            Consumption::Consumed(value) => *value,
            Consumption::AlreadyConsumed => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub position: Vec2,
    resource_type: ResourceType,
    nutritional_value: f64,
    size: f64,
    being_consumed: bool,
}

impl Resource {
    /// Create a resource; draws its visual size from the random source.
    pub fn new(resource_type: ResourceType, position: Vec2, rng: &mut RandomSource) -> Self {
        let (min, max) = resource_type.size_range();
        let size = rng.float_range(min, max);
        Self {
            id: ResourceId::new(),
            position,
            resource_type,
            nutritional_value: resource_type.nutritional_value(),
            size,
            being_consumed: false,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn nutritional_value(&self) -> f64 {
        self.nutritional_value
    }

    /// Visual diameter in pixels
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn is_consumed(&self) -> bool {
        self.being_consumed
    }

    /// One-shot consumption: the first call yields the nutritional value,
    /// every later call yields [`Consumption::AlreadyConsumed`].
    pub fn consume(&mut self) -> Consumption {
        if self.being_consumed {
            return Consumption::AlreadyConsumed;
        }
        self.being_consumed = true;

        trace!(
            event = "resource_consumed",
            resource_id = %self.id,
            resource_type = ?self.resource_type,
            value = self.nutritional_value,
            "Resource consumed"
        );
        Consumption::Consumed(self.nutritional_value)
    }
}
