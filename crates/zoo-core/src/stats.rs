//! Event counters and run results.

use crate::types::RunId;
use serde::{Deserialize, Serialize};

/// Aggregate event counters of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotals {
    pub matings: u64,
    pub huntings: u64,
}

impl EventTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_matings(&mut self, count: u64) {
        self.matings += count;
    }

    pub fn record_huntings(&mut self, count: u64) {
        self.huntings += count;
    }

    /// True when neither mating nor hunting ever happened
    pub fn is_quiet(&self) -> bool {
        self.matings == 0 && self.huntings == 0
    }
}

/// Live count of a single species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesPopulation {
    pub species: String,
    pub count: u64,
}

/// Final state of a finished simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub run_id: RunId,
    pub seed: u64,
    pub ticks: u64,
    /// Per-species counts in registry order
    pub populations: Vec<SpeciesPopulation>,
    pub total_population: u64,
    pub totals: EventTotals,
}

/// Means over several independent runs of the same configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: u32,
    /// Mean final count per species, in registry order
    pub mean_populations: Vec<(String, f64)>,
    pub mean_total_population: f64,
    pub min_total_population: u64,
    pub max_total_population: u64,
    pub mean_matings: f64,
    pub mean_huntings: f64,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more run into the summary
    pub fn update(&mut self, result: &SimulationResult) {
        let n = self.runs as f64;
        let new_n = n + 1.0;
        let mean = |previous: f64, value: f64| (previous * n + value) / new_n;

        if self.runs == 0 {
            self.mean_populations = result
                .populations
                .iter()
                .map(|p| (p.species.clone(), 0.0))
                .collect();
            self.min_total_population = result.total_population;
            self.max_total_population = result.total_population;
        }

        for (entry, population) in self.mean_populations.iter_mut().zip(&result.populations) {
            entry.1 = mean(entry.1, population.count as f64);
        }

        self.mean_total_population = mean(self.mean_total_population, result.total_population as f64);
        self.mean_matings = mean(self.mean_matings, result.totals.matings as f64);
        self.mean_huntings = mean(self.mean_huntings, result.totals.huntings as f64);
        self.min_total_population = self.min_total_population.min(result.total_population);
        self.max_total_population = self.max_total_population.max(result.total_population);

        self.runs += 1;
    }
}
