//! The grid together with its population table.
//!
//! Every mutation goes through [`World`], which keeps the per-species counts equal
//! to what the grid actually holds.

use crate::animal::Animal;
use crate::grid::Grid;
use crate::population::PopulationTable;
use rand_chacha::ChaCha8Rng;
use zoo_core::{Position, Registry, Result, SimulationConfig};

#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    population: PopulationTable,
    registry: Registry,
}

impl World {
    pub fn new(registry: Registry, width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            population: PopulationTable::new(registry.len()),
            registry,
        }
    }

    /// An empty world for a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let registry = Registry::from_configs(&config.species)?;
        Ok(Self::new(registry, config.area.width, config.area.height))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn population(&self) -> &PopulationTable {
        &self.population
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn get(&self, pos: Position) -> Option<Animal> {
        self.grid.get(pos)
    }

    /// Put a new animal on an empty cell and count it.
    ///
    /// Panics when the cell is occupied or outside the grid.
    pub fn spawn(&mut self, pos: Position, animal: Animal) {
        assert!(
            self.grid.is_empty(pos),
            "cannot spawn {} at occupied or out-of-bounds cell {}",
            self.registry.name(animal.species),
            pos
        );
        self.grid.set(pos, Some(animal));
        self.population.increment(animal.species);
    }

    /// Remove the animal at `pos` for good
    pub fn remove(&mut self, pos: Position) -> Option<Animal> {
        let animal = self.grid.take(pos)?;
        self.population.decrement(animal.species);
        Some(animal)
    }

    /// Move an animal to an empty cell; counts are unchanged.
    ///
    /// Panics when `from` is empty or `to` is occupied.
    pub fn relocate(&mut self, from: Position, to: Position) {
        assert!(self.grid.is_empty(to), "cannot relocate onto occupied cell {}", to);
        let animal = self
            .grid
            .take(from)
            .unwrap_or_else(|| panic!("no animal to relocate at {}", from));
        self.grid.set(to, Some(animal));
    }

    /// Number of cells without an animal
    pub fn free_cells(&self) -> u64 {
        self.grid.cell_count() as u64 - self.population.total()
    }

    pub fn random_empty_cell(&self, rng: &mut ChaCha8Rng) -> Result<Position> {
        self.grid.random_empty_cell(rng)
    }

    /// Count animals per species by scanning the whole grid
    pub fn census(&self) -> Vec<u64> {
        let mut counts = vec![0; self.registry.len()];
        for (_, animal) in self.grid.iter() {
            counts[animal.species.index()] += 1;
        }
        counts
    }

    /// Panics if the population table disagrees with the grid
    pub fn assert_consistent(&self) {
        let census = self.census();
        assert_eq!(
            census.as_slice(),
            self.population.counts(),
            "population table diverged from grid contents"
        );
    }
}
