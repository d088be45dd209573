//! Initial placement of every configured animal.

use crate::animal::Animal;
use crate::world::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use zoo_core::{Result, SpeciesId};

/// Place `counts[i]` animals of species `i` on random, distinct empty cells.
///
/// Species are populated in registry order. Panics if `counts` does not have one
/// entry per species.
pub fn populate(world: &mut World, counts: &[u32], rng: &mut ChaCha8Rng) -> Result<()> {
    assert_eq!(
        counts.len(),
        world.registry().len(),
        "one initial count per species is required"
    );

    for (index, &count) in counts.iter().enumerate() {
        let id = SpeciesId(index);
        for i in 0..count {
            let animal = Animal::initial(world.registry().get(id), i, count);
            let pos = world.random_empty_cell(rng)?;
            world.spawn(pos, animal);
        }

        debug!(
            species = world.registry().name(id),
            count = count,
            "Placed initial population"
        );
    }

    Ok(())
}
