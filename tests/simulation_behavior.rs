//! End-to-end behavior of the simulation core through its public API

use fielddrift::config::SimulationConfig;
use fielddrift::physics::boundary::BoundaryMode;
use fielddrift::physics::energy::EnergySample;
use fielddrift::physics::field::OscillatingField;
use fielddrift::physics::math::{Scalar, Vector};
use fielddrift::physics::simulation::{ParticleState, Simulation, SimulationError};

const EPSILON: Scalar = 1e-9;

fn simulation_with(configure: impl FnOnce(&mut SimulationConfig)) -> Simulation {
    let mut config = SimulationConfig::default();
    configure(&mut config);
    Simulation::from_config(&config).unwrap()
}

fn run(simulation: &mut Simulation, ticks: usize) -> Vec<(ParticleState, EnergySample)> {
    (0..ticks)
        .map(|_| {
            let report = simulation.tick().unwrap();
            (*simulation.particle(), report.energy)
        })
        .collect()
}

#[test]
fn test_single_tick_from_rest_matches_closed_form() {
    let mut simulation = Simulation::from_config(&SimulationConfig::default()).unwrap();
    simulation.tick().unwrap();

    let envelope = (1.0_f64 / 50.0).sin();
    let expected_velocity = Vector::new(
        (400.0_f64 / 50.0).cos() * envelope * 0.1,
        (300.0_f64 / 50.0).cos() * envelope * 0.1,
    );
    let particle = simulation.particle();

    assert!((particle.velocity.x - expected_velocity.x).abs() < EPSILON);
    assert!((particle.velocity.y - expected_velocity.y).abs() < EPSILON);

    // Symplectic Euler moves with the already-updated velocity
    let expected_position = Vector::new(400.0, 300.0) + expected_velocity;
    assert!((particle.position.x - expected_position.x).abs() < EPSILON);
    assert!((particle.position.y - expected_position.y).abs() < EPSILON);

    let energy = simulation.history().latest().unwrap();
    let expected_kinetic = 0.5 * expected_velocity.length_squared();
    assert!((energy.kinetic - expected_kinetic).abs() < EPSILON);
}

#[test]
fn test_runs_are_deterministic() {
    let mut first = Simulation::from_config(&SimulationConfig::default()).unwrap();
    let mut second = Simulation::from_config(&SimulationConfig::default()).unwrap();

    assert_eq!(run(&mut first, 2_000), run(&mut second, 2_000));
}

#[test]
fn test_history_is_bounded_by_capacity() {
    let mut simulation = simulation_with(|config| config.history.capacity = 7);

    for ticks in 1..=20 {
        simulation.tick().unwrap();
        assert_eq!(simulation.history().len(), ticks.min(7));
        assert_eq!(
            simulation.history().kinetic().len(),
            simulation.history().potential().len()
        );
    }
}

#[test]
fn test_history_keeps_most_recent_samples_in_order() {
    let mut reference = simulation_with(|config| config.history.capacity = 100);
    let expected: Vec<EnergySample> = run(&mut reference, 8)
        .into_iter()
        .map(|(_, energy)| energy)
        .collect();

    let mut simulation = simulation_with(|config| config.history.capacity = 5);
    run(&mut simulation, 8);

    let retained: Vec<EnergySample> = simulation.history().iter().collect();
    assert_eq!(retained, expected[3..]);
}

#[test]
fn test_particle_stays_inside_world_when_clamped() {
    let mut simulation = simulation_with(|config| {
        config.physics.charge = 50.0;
        config.physics.boundary = BoundaryMode::ClampAndReflect;
    });

    for _ in 0..5_000 {
        simulation.tick().unwrap();
        assert!(simulation.boundary().contains(simulation.particle().position));
    }
}

#[test]
fn test_reflection_flips_outward_velocity() {
    // Start beyond the right wall so the first tick must reflect on x
    let mut simulation = simulation_with(|config| {
        config.physics.start_x = 900.0;
        config.physics.boundary = BoundaryMode::Reflect;
    });

    let field = simulation.field().field_at(Vector::new(900.0, 300.0), 1.0);
    let report = simulation.tick().unwrap();

    assert!(report.reflection.x);
    let unreflected_vx = field.x * 0.1;
    assert!((simulation.particle().velocity.x + unreflected_vx).abs() < EPSILON);
}

#[test]
fn test_zero_charge_never_moves() {
    let mut simulation = simulation_with(|config| config.physics.charge = 0.0);

    for (particle, energy) in run(&mut simulation, 500) {
        assert_eq!(particle, ParticleState::at_rest(Vector::new(400.0, 300.0)));
        assert_eq!(energy.kinetic, 0.0);
    }
}

#[test]
fn test_field_components_are_axis_separable() {
    let field = OscillatingField::default();
    let time = 37.0;

    let base = field.field_at(Vector::new(120.0, 80.0), time);
    let moved_y = field.field_at(Vector::new(120.0, 510.0), time);
    let moved_x = field.field_at(Vector::new(333.0, 80.0), time);

    assert_eq!(base.x, moved_y.x);
    assert_eq!(base.y, moved_x.y);
}

#[test]
fn test_field_is_zero_whenever_envelope_vanishes() {
    let field = OscillatingField::default();
    let position = Vector::new(17.0, 250.0);

    assert_eq!(field.field_at(position, 0.0), Vector::ZERO);
    assert_eq!(field.potential_at(position, 0.0), 0.0);
}

#[test]
fn test_reset_is_idempotent() {
    let start = ParticleState::at_rest(Vector::new(400.0, 300.0));

    // 800 ticks runs past the default capacity of 780
    for ticks in [0, 1, 42, 779, 780, 800] {
        let mut simulation = Simulation::from_config(&SimulationConfig::default()).unwrap();
        run(&mut simulation, ticks);

        simulation.reset();
        let once = (*simulation.particle(), simulation.clock(), simulation.history().len());
        simulation.reset();
        let twice = (*simulation.particle(), simulation.clock(), simulation.history().len());

        assert_eq!(once, twice, "reset after {ticks} ticks");
        assert_eq!(once, (start, 0, 0), "reset after {ticks} ticks");
        assert_eq!(simulation.history().capacity(), 780);
    }
}

#[test]
fn test_reset_replays_identical_trajectory() {
    let mut simulation = Simulation::from_config(&SimulationConfig::default()).unwrap();
    let first = run(&mut simulation, 300);

    simulation.reset();
    let second = run(&mut simulation, 300);

    assert_eq!(first, second);
}

#[test]
fn test_stop_is_final() {
    let mut simulation = Simulation::from_config(&SimulationConfig::default()).unwrap();
    run(&mut simulation, 3);
    simulation.stop();

    assert_eq!(simulation.tick(), Err(SimulationError::Stopped { clock: 3 }));
    assert_eq!(simulation.clock(), 3);
}

#[test]
fn test_snapshot_mirrors_state() {
    let mut simulation = Simulation::from_config(&SimulationConfig::default()).unwrap();
    run(&mut simulation, 10);

    let snapshot = simulation.snapshot();
    assert_eq!(snapshot.clock, 10);
    assert_eq!(snapshot.position, simulation.particle().position);
    assert_eq!(snapshot.velocity, simulation.particle().velocity);
    assert_eq!(snapshot.kinetic.len(), 10);
    assert_eq!(snapshot.potential.len(), 10);
}
