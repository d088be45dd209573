//! Core types and utilities for the zoo population simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod species;
pub mod stats;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use species::*;
pub use stats::*;
