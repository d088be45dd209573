//! Predation.

use crate::events::{EventSink, SimulationEvent};
use crate::world::World;
use tracing::trace;
use zoo_core::Position;

/// Run one hunting pass over the whole grid and return the number of kills.
///
/// Every predator, in row-major order, eats each prey animal inside its square
/// hunting neighborhood. Kills take effect immediately, so a predator that was
/// eaten earlier in the pass never gets to hunt.
pub fn resolve(world: &mut World, sink: &mut dyn EventSink) -> u64 {
    let mut huntings = 0;

    for y in 0..world.height() {
        for x in 0..world.width() {
            let predator_at = Position::new(x, y);
            let Some(predator) = world.get(predator_at) else {
                continue;
            };
            let Some(radius) = world.registry().get(predator.species).hunting_radius() else {
                continue;
            };

            for prey_at in world.grid().neighbors(predator_at, radius) {
                let Some(prey) = world.get(prey_at) else {
                    continue;
                };
                if !world.registry().get(predator.species).can_hunt(prey.species) {
                    continue;
                }

                world.remove(prey_at);
                huntings += 1;

                let predator_name = world.registry().name(predator.species);
                let prey_name = world.registry().name(prey.species);
                trace!(
                    predator = predator_name,
                    prey = prey_name,
                    %predator_at,
                    %prey_at,
                    "Prey hunted"
                );
                sink.record(&SimulationEvent::Hunting {
                    predator: predator_name.to_string(),
                    prey: prey_name.to_string(),
                    predator_at,
                    prey_at,
                });
            }
        }
    }

    huntings
}
