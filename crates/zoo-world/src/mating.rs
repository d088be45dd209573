//! Reproduction between nearby animals of the same species.

use crate::animal::Animal;
use crate::events::{EventSink, SimulationEvent};
use crate::world::World;
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use zoo_core::{Error, EventTotals, Position, Result};

/// Run one mating pass over the whole grid and return the number of matings.
///
/// Cells are scanned row by row. A gendered animal mates with every animal of the
/// same species and opposite gender found within `radius` cells on both axes. Each
/// mating places an offspring on a random empty cell and then moves the partner to
/// another random empty cell, so the same pair does not mate again on the next
/// tick. The grid is changed in place: cells scanned later see animals that were
/// born or moved earlier in the same pass.
///
/// Every mating is added to `totals` as soon as it happens. A mating needs two
/// empty cells; when fewer are left the pass stops with
/// [`Error::ResourceExhausted`] before touching the grid, and the matings already
/// made stay counted.
pub fn resolve(
    world: &mut World,
    radius: i32,
    rng: &mut ChaCha8Rng,
    totals: &mut EventTotals,
    sink: &mut dyn EventSink,
) -> Result<u64> {
    let mut matings = 0;

    for y in 0..world.height() {
        for x in 0..world.width() {
            let at = Position::new(x, y);
            let Some(parent) = world.get(at) else {
                continue;
            };
            if !parent.gender.is_gendered() {
                continue;
            }

            for partner_pos in world.grid().neighbors(at, radius) {
                let Some(partner) = world.get(partner_pos) else {
                    continue;
                };
                if !parent.can_mate_with(&partner) {
                    continue;
                }

                if world.free_cells() < 2 {
                    return Err(Error::ResourceExhausted(format!(
                        "mating at {} needs two empty cells, {} left",
                        at,
                        world.free_cells()
                    )));
                }

                let offspring = Animal::offspring(world.registry().get(parent.species), rng);
                let offspring_pos = world.random_empty_cell(rng)?;
                world.spawn(offspring_pos, offspring);

                let relocated_to = world.random_empty_cell(rng)?;
                world.relocate(partner_pos, relocated_to);

                matings += 1;
                totals.record_matings(1);

                let species = world.registry().name(parent.species);
                trace!(
                    species = species,
                    %at,
                    partner = %partner_pos,
                    offspring = %offspring_pos,
                    relocated_to = %relocated_to,
                    "Mating occurred"
                );
                sink.record(&SimulationEvent::Mating {
                    species: species.to_string(),
                    at,
                    partner: partner_pos,
                    offspring: offspring_pos,
                    partner_relocated_to: relocated_to,
                });
            }
        }
    }

    Ok(matings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Gender;
    use rand::SeedableRng;
    use zoo_core::{AreaConfig, SimulationConfig, SpeciesConfig, SpeciesId};

    fn sheep_world(width: i32, height: i32) -> World {
        let config = SimulationConfig {
            area: AreaConfig { width, height },
            species: vec![
                SpeciesConfig::new("sheep", 0, 2, true),
                SpeciesConfig::new("chicken", 0, 1, false),
            ],
            ..Default::default()
        };
        World::from_config(&config).unwrap()
    }

    fn place(world: &mut World, species: usize, gender: Gender, x: i32, y: i32) {
        let animal = Animal::new(world.registry().get(SpeciesId(species)), gender);
        world.spawn(Position::new(x, y), animal);
    }

    fn run_pass(
        world: &mut World,
        radius: i32,
        seed: u64,
    ) -> (Result<u64>, EventTotals, Vec<SimulationEvent>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut totals = EventTotals::new();
        let mut events: Vec<SimulationEvent> = Vec::new();
        let result = resolve(world, radius, &mut rng, &mut totals, &mut events);
        (result, totals, events)
    }

    #[test]
    fn test_adjacent_pair_mates() {
        let adjacent_pair = || {
            let mut world = sheep_world(10, 10);
            place(&mut world, 0, Gender::Male, 0, 0);
            place(&mut world, 0, Gender::Female, 0, 1);
            world
        };

        // The offspring and the moved partner land on random cells. Some seeds put
        // them next to an opposite-gender sheep and chain more matings; take the
        // first seed that yields a single one.
        let (seed, world, totals, events) = (0..64)
            .map(|seed| {
                let mut world = adjacent_pair();
                let (result, totals, events) = run_pass(&mut world, 3, seed);
                assert_eq!(result.unwrap(), events.len() as u64);
                (seed, world, totals, events)
            })
            .find(|(_, _, _, events)| events.len() == 1)
            .expect("a seed with a single mating");

        assert_eq!(totals.matings, 1, "seed {}", seed);
        assert_eq!(world.population().get(SpeciesId(0)), 3);
        assert_eq!(world.grid().positions_of(SpeciesId(0)).len(), 3);
        assert_eq!(world.grid().occupied_count(), 3);
        assert_eq!(world.get(Position::new(0, 0)).unwrap().gender, Gender::Male);
        assert_eq!(world.get(Position::new(0, 1)), None);
        world.assert_consistent();

        let SimulationEvent::Mating {
            species,
            at,
            partner,
            offspring,
            partner_relocated_to,
        } = &events[0]
        else {
            panic!("unexpected event {:?}", events[0]);
        };
        assert_eq!(species, "sheep");
        assert_eq!(*at, Position::new(0, 0));
        assert_eq!(*partner, Position::new(0, 1));
        assert_ne!(*offspring, Position::new(0, 0));
        assert_ne!(*offspring, Position::new(0, 1));
        assert_ne!(*partner_relocated_to, Position::new(0, 1));
        assert_ne!(*partner_relocated_to, *offspring);
        assert_eq!(world.get(*offspring).unwrap().species, SpeciesId(0));
        assert_eq!(world.get(*partner_relocated_to).unwrap().gender, Gender::Female);
    }

    #[test]
    fn test_exactly_one_mating_when_partner_is_moved_far() {
        let mut world = sheep_world(400, 400);
        place(&mut world, 0, Gender::Male, 0, 0);
        place(&mut world, 0, Gender::Female, 0, 1);

        let (result, totals, events) = run_pass(&mut world, 3, 7);

        assert_eq!(result.unwrap(), 1);
        assert_eq!(totals.matings, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(world.population().get(SpeciesId(0)), 3);
        assert_eq!(world.get(Position::new(0, 0)).unwrap().gender, Gender::Male);
        assert_eq!(world.get(Position::new(0, 1)), None);
        world.assert_consistent();
    }

    #[test]
    fn test_same_gender_never_mates() {
        let mut world = sheep_world(10, 10);
        place(&mut world, 0, Gender::Female, 4, 4);
        place(&mut world, 0, Gender::Female, 5, 4);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut totals = EventTotals::new();
        let mut events: Vec<SimulationEvent> = Vec::new();
        for _ in 0..100 {
            assert_eq!(resolve(&mut world, 3, &mut rng, &mut totals, &mut events).unwrap(), 0);
        }
        assert!(events.is_empty());
        assert!(totals.is_quiet());
        assert_eq!(world.population().get(SpeciesId(0)), 2);
    }

    #[test]
    fn test_ungendered_species_never_mates() {
        let mut world = sheep_world(10, 10);
        place(&mut world, 1, Gender::Ungendered, 2, 2);
        place(&mut world, 1, Gender::Ungendered, 3, 2);

        let (result, _, _) = run_pass(&mut world, 3, 1);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(world.population().get(SpeciesId(1)), 2);
    }

    #[test]
    fn test_partner_out_of_range_does_not_mate() {
        let mut world = sheep_world(20, 20);
        place(&mut world, 0, Gender::Male, 0, 0);
        place(&mut world, 0, Gender::Female, 4, 0);

        assert_eq!(run_pass(&mut world, 3, 3).0.unwrap(), 0);
        assert!(run_pass(&mut world, 4, 3).0.unwrap() >= 1);
    }

    #[test]
    fn test_full_grid_reports_exhaustion() {
        let mut world = sheep_world(2, 1);
        place(&mut world, 0, Gender::Male, 0, 0);
        place(&mut world, 0, Gender::Female, 1, 0);

        let (result, totals, events) = run_pass(&mut world, 3, 3);
        assert!(matches!(result, Err(Error::ResourceExhausted(_))));
        assert!(totals.is_quiet());
        assert!(events.is_empty());
        assert_eq!(world.population().get(SpeciesId(0)), 2);
    }

    #[test]
    fn test_single_free_cell_leaves_world_untouched() {
        let mut world = sheep_world(3, 1);
        place(&mut world, 0, Gender::Male, 0, 0);
        place(&mut world, 0, Gender::Female, 1, 0);

        let (result, totals, events) = run_pass(&mut world, 3, 11);
        assert!(matches!(result, Err(Error::ResourceExhausted(_))));
        assert!(totals.is_quiet());
        assert!(events.is_empty());
        assert_eq!(world.population().get(SpeciesId(0)), 2);
        assert_eq!(world.get(Position::new(0, 0)).unwrap().gender, Gender::Male);
        assert_eq!(world.get(Position::new(1, 0)).unwrap().gender, Gender::Female);
        assert_eq!(world.get(Position::new(2, 0)), None);
        world.assert_consistent();
    }

    #[test]
    fn test_matings_before_exhaustion_stay_counted() {
        // Two free cells: the first mating fills one with the offspring and moves
        // the female to the other, right of the male, where the scan finds her again.
        let mut world = sheep_world(4, 1);
        place(&mut world, 0, Gender::Male, 0, 0);
        place(&mut world, 0, Gender::Female, 1, 0);

        let (result, totals, events) = run_pass(&mut world, 3, 5);
        assert!(matches!(result, Err(Error::ResourceExhausted(_))));
        assert_eq!(totals.matings, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(world.population().get(SpeciesId(0)), 2 + totals.matings);
        assert_eq!(world.free_cells(), 1);
        world.assert_consistent();
    }
}
