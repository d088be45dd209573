//! Several independent runs of the same configuration.

use crate::events::EventSink;
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};
use tracing::info;
use zoo_core::{BatchSummary, Error, Result, SimulationConfig, SimulationResult};

/// A batch of runs that share one configuration.
///
/// With a configured seed `s`, run `i` uses seed `s + i`; otherwise every run
/// draws its own seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub config: SimulationConfig,
    pub runs: u32,
}

/// Every run's result plus their aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<SimulationResult>,
    pub summary: BatchSummary,
}

impl Batch {
    pub fn new(config: SimulationConfig, runs: u32) -> Result<Self> {
        if runs == 0 {
            return Err(Error::Validation("A batch needs at least one run".to_string()));
        }
        config.validate()?;
        Ok(Self { config, runs })
    }

    /// Configuration of the `index`-th run
    pub fn run_config(&self, index: u32) -> SimulationConfig {
        let mut config = self.config.clone();
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(u64::from(index)));
        config
    }

    /// Execute every run in order
    pub fn execute(&self, sink: &mut dyn EventSink) -> Result<BatchOutcome> {
        let mut results = Vec::with_capacity(self.runs as usize);
        let mut summary = BatchSummary::new();

        for index in 0..self.runs {
            let mut simulation = Simulation::new(self.run_config(index))?;
            let result = simulation.run_with(sink)?;

            info!(
                run = index + 1,
                runs = self.runs,
                seed = result.seed,
                total_population = result.total_population,
                "Run finished"
            );

            summary.update(&result);
            results.push(result);
        }

        Ok(BatchOutcome { results, summary })
    }
}
