//! Simulation engine: the fixed-length tick loop.

use crate::events::{EventSink, NullSink};
use crate::movement::{self, MovementOutcome};
use crate::world::World;
use crate::{hunting, mating, populate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use zoo_core::{EventTotals, Result, RunId, SimulationConfig, SimulationResult};

/// Ticks between population snapshots in the log
const METRICS_INTERVAL: u64 = 100;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub movement: MovementOutcome,
    pub matings: u64,
    pub huntings: u64,
}

pub struct Simulation {
    world: World,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    seed: u64,
    run_id: RunId,
    tick: u64,
    totals: EventTotals,
}

impl Simulation {
    /// Validate the configuration, seed the generator and place the initial population
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut world = World::from_config(&config)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let counts: Vec<u32> = config.species.iter().map(|s| s.count).collect();
        populate::populate(&mut world, &counts, &mut rng)?;

        debug!(
            seed = seed,
            population = world.population().total(),
            width = world.width(),
            height = world.height(),
            "Simulation populated"
        );

        Ok(Self::from_world(config, world, rng, seed))
    }

    /// Start from an already arranged world; nothing is placed.
    pub fn with_world(config: SimulationConfig, world: World, seed: u64) -> Self {
        Self::from_world(config, world, ChaCha8Rng::seed_from_u64(seed), seed)
    }

    fn from_world(config: SimulationConfig, world: World, rng: ChaCha8Rng, seed: u64) -> Self {
        Self {
            world,
            config,
            rng,
            seed,
            run_id: RunId::new(),
            tick: 0,
            totals: EventTotals::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Number of ticks executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn totals(&self) -> EventTotals {
        self.totals
    }

    /// Run the simulation for the configured number of ticks
    pub fn run(&mut self) -> Result<SimulationResult> {
        self.run_with(&mut NullSink)
    }

    /// Run the simulation, forwarding every mating and hunting event to `sink`
    #[instrument(skip(self, sink), fields(run_id = %self.run_id, seed = self.seed, total_ticks = self.config.total_ticks))]
    pub fn run_with(&mut self, sink: &mut dyn EventSink) -> Result<SimulationResult> {
        info!("Starting simulation for {} ticks", self.config.total_ticks);

        while self.tick < self.config.total_ticks {
            self.step(sink)?;

            if self.tick % METRICS_INTERVAL == 0 {
                if cfg!(debug_assertions) {
                    self.world.assert_consistent();
                }
                self.emit_population_metrics();
            }
        }

        self.world.assert_consistent();
        self.emit_episode_summary();

        Ok(self.result())
    }

    /// Execute one tick: a move, a mating pass and a hunting pass, in that order.
    ///
    /// When the grid runs out of room the tick is abandoned with the error; matings
    /// made before that are already in the totals.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Result<TickReport> {
        let movement = movement::step(&mut self.world, &mut self.rng);
        let matings = mating::resolve(
            &mut self.world,
            self.config.mating_radius,
            &mut self.rng,
            &mut self.totals,
            sink,
        )?;
        let huntings = hunting::resolve(&mut self.world, sink);

        self.totals.record_huntings(huntings);
        self.tick += 1;

        Ok(TickReport {
            tick: self.tick,
            movement,
            matings,
            huntings,
        })
    }

    /// Current populations and totals as a result record
    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            run_id: self.run_id,
            seed: self.seed,
            ticks: self.tick,
            populations: self.world.population().snapshot(self.world.registry()),
            total_population: self.world.population().total(),
            totals: self.totals,
        }
    }

    fn emit_population_metrics(&self) {
        let registry = self.world.registry();
        let counts = registry
            .iter()
            .map(|s| format!("{}={}", s.name, self.world.population().get(s.id)))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            event = "population_metrics",
            tick = self.tick,
            total_population = self.world.population().total(),
            matings = self.totals.matings,
            huntings = self.totals.huntings,
            counts = %counts,
            "Population metrics snapshot"
        );
    }

    fn emit_episode_summary(&self) {
        info!(
            event = "episode_summary",
            run_id = %self.run_id,
            seed = self.seed,
            total_ticks = self.tick,
            final_population = self.world.population().total(),
            total_matings = self.totals.matings,
            total_huntings = self.totals.huntings,
            "Simulation complete"
        );
    }
}
