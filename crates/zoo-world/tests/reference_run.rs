use zoo_core::{SimulationConfig, SimulationResult};
use zoo_world::{Simulation, SimulationEvent};

fn reference_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn reference_zoo_keeps_counts_consistent_for_1000_ticks() {
    let mut sim = Simulation::new(reference_config(2024)).unwrap();
    assert_eq!(sim.world().population().total(), 79);

    let mut events: Vec<SimulationEvent> = Vec::new();
    for tick in 1..=1000u64 {
        sim.step(&mut events).unwrap();

        assert_eq!(
            sim.world().population().total() as usize,
            sim.world().grid().occupied_count(),
            "grid and population table diverged at tick {}",
            tick
        );
        if tick % 250 == 0 {
            sim.world().assert_consistent();
        }
    }

    let result = sim.result();
    assert_eq!(result.ticks, 1000);
    assert_eq!(
        result.total_population,
        79 + result.totals.matings - result.totals.huntings
    );
    assert_eq!(
        events.len() as u64,
        result.totals.matings + result.totals.huntings
    );
}

#[test]
fn reference_run_result_is_reportable() {
    let mut config = reference_config(77);
    config.total_ticks = 300;

    let result = Simulation::new(config).unwrap().run().unwrap();
    let names: Vec<_> = result.populations.iter().map(|p| p.species.as_str()).collect();
    assert_eq!(
        names,
        ["sheep", "cow", "chicken", "cockerel", "wolf", "lion", "hunter"]
    );
    assert_eq!(
        result.total_population,
        result.populations.iter().map(|p| p.count).sum::<u64>()
    );

    let json = serde_json::to_string(&result).unwrap();
    let parsed: SimulationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}

#[test]
fn dense_zoo_never_breaks_invariants() {
    let config = SimulationConfig {
        area: zoo_core::AreaConfig {
            width: 80,
            height: 80,
        },
        total_ticks: 400,
        seed: Some(31),
        ..Default::default()
    };
    let mut sim = Simulation::new(config).unwrap();

    for _ in 0..400 {
        sim.step(&mut zoo_world::NullSink).unwrap();
        sim.world().assert_consistent();
    }
    assert_eq!(sim.tick(), 400);
}
