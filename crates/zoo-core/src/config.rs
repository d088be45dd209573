//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Dimensions of the simulated area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
}

impl AreaConfig {
    pub fn cells(&self) -> u64 {
        self.width.max(0) as u64 * self.height.max(0) as u64
    }
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

/// Which species a predator may eat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreyConfig {
    /// Every configured species, the predator's own included
    Any,
    /// Only the listed species names
    Only(Vec<String>),
}

impl PreyConfig {
    pub fn only(names: &[&str]) -> Self {
        PreyConfig::Only(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Predation parameters of a species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntingConfig {
    /// Half-width of the square hunting neighborhood
    pub radius: i32,
    pub prey: PreyConfig,
}

/// Initial population and behavior of one species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub name: String,
    /// Number of animals placed before the first tick
    pub count: u32,
    /// Maximum displacement per axis in a single move
    pub velocity: i32,
    /// Whether animals carry a gender and can mate
    #[serde(default)]
    pub has_gender: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunting: Option<HuntingConfig>,
}

impl SpeciesConfig {
    pub fn new(name: impl Into<String>, count: u32, velocity: i32, has_gender: bool) -> Self {
        Self {
            name: name.into(),
            count,
            velocity,
            has_gender,
            hunting: None,
        }
    }

    pub fn with_hunting(mut self, radius: i32, prey: PreyConfig) -> Self {
        self.hunting = Some(HuntingConfig { radius, prey });
        self
    }
}

/// Complete configuration of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub area: AreaConfig,
    /// Species in registry order
    pub species: Vec<SpeciesConfig>,
    /// Number of ticks to run the simulation
    pub total_ticks: u64,
    /// Half-width of the square neighborhood searched for mates
    pub mating_radius: i32,
    /// Random seed for reproducibility; a fresh seed is drawn when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            area: AreaConfig::default(),
            species: vec![
                SpeciesConfig::new("sheep", 30, 2, true),
                SpeciesConfig::new("cow", 10, 2, true),
                SpeciesConfig::new("chicken", 10, 1, false),
                SpeciesConfig::new("cockerel", 10, 1, false),
                SpeciesConfig::new("wolf", 10, 3, true)
                    .with_hunting(4, PreyConfig::only(&["sheep", "chicken", "cockerel"])),
                SpeciesConfig::new("lion", 8, 4, true)
                    .with_hunting(5, PreyConfig::only(&["cow", "sheep"])),
                SpeciesConfig::new("hunter", 1, 1, false).with_hunting(8, PreyConfig::Any),
            ],
            total_ticks: 1000,
            mating_radius: 3,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading simulation config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sum of the initial counts of every species
    pub fn initial_population(&self) -> u64 {
        self.species.iter().map(|s| u64::from(s.count)).sum()
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.area.width <= 0 || self.area.height <= 0 {
            return Err(Error::Validation(format!(
                "Area must be at least 1x1, got {}x{}",
                self.area.width, self.area.height
            )));
        }

        if self.species.is_empty() {
            return Err(Error::Validation("No species configured".to_string()));
        }

        if self.mating_radius < 0 {
            return Err(Error::Validation(format!(
                "Mating radius must not be negative, got {}",
                self.mating_radius
            )));
        }

        let mut names = HashSet::new();
        for species in &self.species {
            if species.name.is_empty() {
                return Err(Error::Validation("Species name must not be empty".to_string()));
            }
            if !names.insert(species.name.as_str()) {
                return Err(Error::Validation(format!(
                    "Species '{}' is configured more than once",
                    species.name
                )));
            }
            if species.velocity < 0 {
                return Err(Error::Validation(format!(
                    "Species '{}' has negative velocity {}",
                    species.name, species.velocity
                )));
            }
        }

        for species in &self.species {
            let Some(hunting) = &species.hunting else {
                continue;
            };
            if hunting.radius < 0 {
                return Err(Error::Validation(format!(
                    "Species '{}' has negative hunting radius {}",
                    species.name, hunting.radius
                )));
            }
            if let PreyConfig::Only(prey) = &hunting.prey {
                if let Some(unknown) = prey.iter().find(|p| !names.contains(p.as_str())) {
                    return Err(Error::NotFound(format!(
                        "Prey species '{}' hunted by '{}'",
                        unknown, species.name
                    )));
                }
            }
        }

        let population = self.initial_population();
        if population > self.area.cells() {
            return Err(Error::Validation(format!(
                "Initial population {} does not fit into {} cells",
                population,
                self.area.cells()
            )));
        }

        Ok(())
    }
}
