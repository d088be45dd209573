//! Species registry: the immutable description of every animal type.

use crate::config::{PreyConfig, SpeciesConfig};
use crate::error::{Error, Result};
use crate::types::SpeciesId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The species a predator can eat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prey {
    Any,
    Only(BTreeSet<SpeciesId>),
}

impl Prey {
    pub fn contains(&self, species: SpeciesId) -> bool {
        match self {
            Prey::Any => true,
            Prey::Only(set) => set.contains(&species),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunting {
    pub radius: i32,
    pub prey: Prey,
}

/// Static description of one species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub velocity: i32,
    pub gendered: bool,
    pub hunting: Option<Hunting>,
}

impl Species {
    pub fn hunting_radius(&self) -> Option<i32> {
        self.hunting.as_ref().map(|h| h.radius)
    }

    pub fn can_hunt(&self, prey: SpeciesId) -> bool {
        self.hunting
            .as_ref()
            .is_some_and(|hunting| hunting.prey.contains(prey))
    }
}

/// All species of a simulation, indexed by [`SpeciesId`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    species: Vec<Species>,
}

impl Registry {
    /// Build the registry, resolving prey names to ids.
    ///
    /// Species keep the order of `configs`, so `configs[i]` becomes `SpeciesId(i)`.
    pub fn from_configs(configs: &[SpeciesConfig]) -> Result<Self> {
        let lookup = |name: &str| {
            configs
                .iter()
                .position(|c| c.name == name)
                .map(SpeciesId)
                .ok_or_else(|| Error::NotFound(format!("Species '{}'", name)))
        };

        let mut species = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            if lookup(config.name.as_str())? != SpeciesId(index) {
                return Err(Error::Validation(format!(
                    "Species '{}' is configured more than once",
                    config.name
                )));
            }

            let hunting = match &config.hunting {
                Some(hunting) => {
                    let prey = match &hunting.prey {
                        PreyConfig::Any => Prey::Any,
                        PreyConfig::Only(names) => Prey::Only(
                            names
                                .iter()
                                .map(|name| lookup(name.as_str()))
                                .collect::<Result<BTreeSet<_>>>()?,
                        ),
                    };
                    Some(Hunting {
                        radius: hunting.radius,
                        prey,
                    })
                }
                None => None,
            };

            species.push(Species {
                id: SpeciesId(index),
                name: config.name.clone(),
                velocity: config.velocity,
                gendered: config.has_gender,
                hunting,
            });
        }

        Ok(Self { species })
    }

    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: SpeciesId) -> &Species {
        &self.species[id.index()]
    }

    pub fn name(&self, id: SpeciesId) -> &str {
        &self.get(id).name
    }

    pub fn by_name(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
