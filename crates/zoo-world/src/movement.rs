//! The single random move made on every tick.

use crate::world::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use zoo_core::{Position, SpeciesId};

/// What the movement step did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementOutcome {
    /// The chosen species has no living animals
    Idle { species: SpeciesId },
    Moved {
        species: SpeciesId,
        from: Position,
        to: Position,
    },
    /// Destination was occupied, so the move was dropped
    Blocked {
        species: SpeciesId,
        from: Position,
        to: Position,
    },
}

/// Move one random animal of a uniformly chosen species.
///
/// The species is picked without regard to population size. Each axis moves by a
/// uniform offset in `[-velocity, velocity]`, the target is clamped into the grid,
/// and the move only happens if the target cell is empty.
pub fn step(world: &mut World, rng: &mut ChaCha8Rng) -> MovementOutcome {
    let species_index = rng.gen_range(0..world.registry().len());
    let species = world.registry().get(SpeciesId(species_index));
    let (id, velocity) = (species.id, species.velocity);

    let positions = world.grid().positions_of(id);
    let Some(&from) = positions.choose(rng) else {
        return MovementOutcome::Idle { species: id };
    };

    let dx = rng.gen_range(-velocity..=velocity);
    let dy = rng.gen_range(-velocity..=velocity);
    let to = world.grid().clamp(from.add(dx, dy));

    if world.grid().is_empty(to) {
        world.relocate(from, to);
        trace!(species = world.registry().name(id), %from, %to, "Animal moved");
        MovementOutcome::Moved {
            species: id,
            from,
            to,
        }
    } else {
        MovementOutcome::Blocked {
            species: id,
            from,
            to,
        }
    }
}
