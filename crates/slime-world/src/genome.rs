//! Heritable traits of an agent.
//!
//! A genome is a fixed set of five bounded genes. Genomes are values: they
//! are never mutated in place, combination always builds a new one.

use serde::{Deserialize, Serialize};
use slime_core::{Error, RandomSource, Result, Rgb};

/// The closed set of genes every genome carries, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneKind {
    Speed,
    Size,
    EnergyEfficiency,
    Color,
    SenseRadius,
}

/// Distribution and bounds a gene is drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneProfile {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl GeneKind {
    pub const ALL: [GeneKind; 5] = [
        GeneKind::Speed,
        GeneKind::Size,
        GeneKind::EnergyEfficiency,
        GeneKind::Color,
        GeneKind::SenseRadius,
    ];

    pub fn profile(&self) -> GeneProfile {
        let (mean, std_dev, min, max) = match self {
            GeneKind::Speed => (0.5, 0.3, 0.1, 1.5),
            GeneKind::Size => (1.0, 0.3, 0.5, 2.0),
            GeneKind::EnergyEfficiency => (1.0, 0.2, 0.5, 1.5),
            GeneKind::Color => (0.5, 0.5, 0.0, 1.0),
            GeneKind::SenseRadius => (100.0, 30.0, 50.0, 200.0),
        };
        GeneProfile {
            mean,
            std_dev,
            min,
            max,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GeneKind::Speed => "Speed",
            GeneKind::Size => "Size",
            GeneKind::EnergyEfficiency => "Energy Efficiency",
            GeneKind::Color => "Color",
            GeneKind::SenseRadius => "Sense Radius",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One bounded trait value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl Gene {
    fn new(kind: GeneKind, value: f64) -> Self {
        let profile = kind.profile();
        Self {
            value: value.min(profile.max).max(profile.min),
            min: profile.min,
            max: profile.max,
        }
    }
}

/// Serialized form: gene name to `{value, min, max}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomeData {
    pub speed: Gene,
    pub size: Gene,
    pub energy_efficiency: Gene,
    pub color: Gene,
    pub sense_radius: Gene,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenomeData", into = "GenomeData")]
pub struct Genome {
    genes: [Gene; 5],
}

impl Genome {
    /// Draw every gene from its clamped normal distribution
    pub fn random(rng: &mut RandomSource) -> Self {
        let genes = GeneKind::ALL.map(|kind| {
            let profile = kind.profile();
            Gene::new(kind, rng.normal(profile.mean, profile.std_dev, profile.min, profile.max))
        });
        Self { genes }
    }

    /// Genome with every gene at its mean
    pub fn baseline() -> Self {
        Self {
            genes: GeneKind::ALL.map(|kind| Gene::new(kind, kind.profile().mean)),
        }
    }

    /// Copy of this genome with one gene replaced; the value is clamped into bounds
    pub fn with_gene(&self, kind: GeneKind, value: f64) -> Self {
        let mut genes = self.genes;
        genes[kind.index()] = Gene::new(kind, value);
        Self { genes }
    }

    /// Build a child genome.
    ///
    /// For each gene in order: one draw picks the parent (`a` below 0.5),
    /// one draw decides mutation, and a mutating gene takes a third draw for
    /// a shift of up to 10% of its range.
    pub fn combine(a: &Genome, b: &Genome, mutation_rate: f64, rng: &mut RandomSource) -> Genome {
        let mut genes = a.genes;
        for kind in GeneKind::ALL {
            let i = kind.index();
            let parent = if rng.uniform() < 0.5 { a.genes[i] } else { b.genes[i] };

            let mut value = parent.value;
            if rng.uniform() < mutation_rate {
                let shift = (parent.max - parent.min) * 0.1 * (rng.uniform() * 2.0 - 1.0);
                value = (value + shift).min(parent.max).max(parent.min);
            }
            genes[i] = Gene { value, ..parent };
        }
        Genome { genes }
    }

    pub fn gene(&self, kind: GeneKind) -> &Gene {
        &self.genes[kind.index()]
    }

    pub fn value(&self, kind: GeneKind) -> f64 {
        self.genes[kind.index()].value
    }

    pub fn speed(&self) -> f64 {
        self.value(GeneKind::Speed)
    }

    pub fn size(&self) -> f64 {
        self.value(GeneKind::Size)
    }

    pub fn energy_efficiency(&self) -> f64 {
        self.value(GeneKind::EnergyEfficiency)
    }

    pub fn sense_radius(&self) -> f64 {
        self.value(GeneKind::SenseRadius)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeneKind, &Gene)> + '_ {
        GeneKind::ALL.iter().map(move |kind| (*kind, self.gene(*kind)))
    }

    /// Body colour: the colour gene is the hue at full saturation and 0.7 lightness
    pub fn color(&self) -> Rgb {
        let h = self.value(GeneKind::Color) * 360.0;
        let s = 1.0;
        let l = 0.7;

        let c = (1.0 - (2.0 * l - 1.0_f64).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Nested mapping of gene name to `{value, min, max}`
    pub fn serialize(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn deserialize(data: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<Genome> for GenomeData {
    fn from(genome: Genome) -> Self {
        let [speed, size, energy_efficiency, color, sense_radius] = genome.genes;
        Self {
            speed,
            size,
            energy_efficiency,
            color,
            sense_radius,
        }
    }
}

impl TryFrom<GenomeData> for Genome {
    type Error = Error;

    fn try_from(data: GenomeData) -> Result<Self> {
        let stored = [
            data.speed,
            data.size,
            data.energy_efficiency,
            data.color,
            data.sense_radius,
        ];

        let mut genes = [Gene::new(GeneKind::Speed, 0.0); 5];
        for (kind, gene) in GeneKind::ALL.into_iter().zip(stored) {
            let profile = kind.profile();
            if gene.min != profile.min || gene.max != profile.max {
                return Err(Error::Validation(format!(
                    "gene {} has bounds [{}, {}], expected [{}, {}]",
                    kind.display_name(),
                    gene.min,
                    gene.max,
                    profile.min,
                    profile.max
                )));
            }
            if !gene.value.is_finite() {
                return Err(Error::Validation(format!(
                    "gene {} has non-finite value {}",
                    kind.display_name(),
                    gene.value
                )));
            }
            genes[kind.index()] = Gene::new(kind, gene.value);
        }
        Ok(Genome { genes })
    }
}
