//! Live per-species counts.

use serde::{Deserialize, Serialize};
use zoo_core::{Registry, SpeciesId, SpeciesPopulation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationTable {
    counts: Vec<u64>,
}

impl PopulationTable {
    pub fn new(species: usize) -> Self {
        Self {
            counts: vec![0; species],
        }
    }

    pub fn get(&self, species: SpeciesId) -> u64 {
        self.counts[species.index()]
    }

    pub fn increment(&mut self, species: SpeciesId) {
        self.counts[species.index()] += 1;
    }

    /// Panics if the count is already zero: the table and the grid have diverged.
    pub fn decrement(&mut self, species: SpeciesId) {
        let count = &mut self.counts[species.index()];
        *count = count
            .checked_sub(1)
            .unwrap_or_else(|| panic!("population of species {:?} would drop below zero", species));
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Named counts in registry order
    pub fn snapshot(&self, registry: &Registry) -> Vec<SpeciesPopulation> {
        registry
            .iter()
            .map(|species| SpeciesPopulation {
                species: species.name.clone(),
                count: self.get(species.id),
            })
            .collect()
    }
}
