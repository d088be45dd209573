//! World simulation engine.
//!
//! This crate implements the bounded 2D grid where animals move, mate and hunt.

pub mod animal;
pub mod batch;
pub mod events;
pub mod grid;
pub mod hunting;
pub mod mating;
pub mod movement;
pub mod populate;
pub mod population;
pub mod simulation;
pub mod world;

pub use animal::{Animal, Gender};
pub use batch::{Batch, BatchOutcome};
pub use events::{EventSink, NullSink, SimulationEvent};
pub use grid::Grid;
pub use movement::MovementOutcome;
pub use population::PopulationTable;
pub use simulation::{Simulation, TickReport};
pub use world::World;
