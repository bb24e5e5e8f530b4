//! End-to-end runs of the frame loop against the embedded periodic table.

use atom_chemistry::{ChemistryError, PeriodicTable};
use atom_physics::PhysicsWorld;
use atom_simulation::{
    AtomSimulation, SimulationError, SimulationParams, VisualKind, VisualizationMode,
};
use glam::Quat;
use std::f32::consts::TAU;

fn table() -> PeriodicTable {
    PeriodicTable::load().expect("embedded table loads")
}

fn seeded(mut params: SimulationParams, seed: u64) -> SimulationParams {
    params.seed = Some(seed);
    params
}

#[test]
fn helium_stays_bound_for_ten_seconds() {
    let params = seeded(SimulationParams::free_electrons("Helium"), 42);
    let mut sim = AtomSimulation::new(params, table()).unwrap();

    let mut max_nucleus = 0.0f32;
    for _ in 0..600 {
        let report = sim.step();
        max_nucleus = max_nucleus.max(report.max_nucleon_radius);
        assert!(report.max_nucleon_radius.is_finite());
        assert!(report.max_electron_radius.is_finite());
    }

    println!("Largest nucleon distance over 600 frames: {:.3}", max_nucleus);
    assert!(max_nucleus < 7.0);

    for particle in sim.atom().particles() {
        let body = sim.world().body(particle.body).unwrap();
        assert!(body.is_finite(), "{:?} went non-finite", particle.kind);
    }
    for instance in sim.scene().instances() {
        assert!(instance.position().is_finite());
        assert!(instance.rotation().is_finite());
    }

    let report = sim.run(0);
    assert_eq!(report.frame, 600);
    assert!((report.time - 10.0).abs() < 1e-3);
}

#[test]
fn carbon_nucleons_tumble_as_they_pack() {
    let params = seeded(SimulationParams::free_electrons("Carbon"), 600);
    let mut sim = AtomSimulation::new(params, table()).unwrap();
    sim.run(600);

    let scene = sim.scene();
    let rotated = sim
        .atom()
        .particles()
        .filter(|particle| particle.kind.is_nucleon())
        .filter_map(|particle| scene.get(particle.visual))
        .filter(|visual| visual.rotation().angle_between(Quat::IDENTITY) > 1e-3)
        .count();
    println!("Rotated nucleons: {rotated} of 12");
    assert!(rotated > 0);
}

#[test]
fn helium_electrons_orbit_the_shell() {
    let params = seeded(SimulationParams::free_electrons("Helium"), 5);
    let mut sim = AtomSimulation::new(params, table()).unwrap();
    let report = sim.run(300);

    assert_eq!(sim.atom().electrons().len(), 2);
    assert!(report.max_electron_radius > 5.0);
    assert!(report.max_electron_radius < 40.0);
}

#[test]
fn neon_rings_place_eight_electrons_on_the_second_shell() {
    let params = seeded(SimulationParams::rings("Neon"), 1);
    let sim = AtomSimulation::new(params, table()).unwrap();

    let rings = sim.rings().expect("ring mode builds rings");
    let ring = rings.ring(1).expect("second shell is occupied");
    assert_eq!(ring.electrons().len(), 8);
    assert!((ring.shell.ring_radius - 10.0).abs() < 1e-6);
    assert!(rings.ring(2).is_none());

    for (i, offset) in ring.electron_offsets().enumerate() {
        let angle = offset.y.atan2(offset.x).rem_euclid(TAU);
        let expected = i as f32 * TAU / 8.0;
        let diff = (angle - expected).abs();
        assert!(diff < 1e-4 || (TAU - diff) < 1e-4);
    }

    let center = sim.atom().center.position;
    for handle in ring.electrons() {
        let position = sim.scene().get(*handle).unwrap().position();
        assert!((position.distance(center) - 10.0).abs() < 1e-3);
    }

    assert_eq!(sim.scene().count_of(VisualKind::Ring), 2);
    assert_eq!(sim.scene().count_of(VisualKind::Electron), 10);
}

#[test]
fn ring_mode_runs_with_packed_nucleus() {
    let params = seeded(SimulationParams::rings("Oxygen"), 3);
    let mut sim = AtomSimulation::new(params, table()).unwrap();
    assert_eq!(sim.params().mode, VisualizationMode::Rings);

    let report = sim.run(120);
    assert!(report.max_nucleon_radius.is_finite());
    assert_eq!(report.max_electron_radius, 0.0);

    let rings = sim.rings().unwrap();
    let first = rings.ring(0).unwrap();
    assert!((first.spin - 120.0 * 0.014).abs() < 1e-3);
}

#[test]
fn change_element_rebuilds_everything() {
    let params = seeded(SimulationParams::rings("Neon"), 9);
    let mut sim = AtomSimulation::new(params, table()).unwrap();
    sim.run(10);

    sim.change_element("Sodium").unwrap();
    assert_eq!(sim.label(), "Sodium");
    assert_eq!(sim.params().element, "Sodium");
    assert_eq!(sim.world().len(), 23);
    // 23 nucleons, three rings, eleven ring electrons
    assert_eq!(sim.scene().len(), 23 + 3 + 11);
    assert!(sim.rings().unwrap().ring(2).is_some());

    sim.change_element("Hydrogen").unwrap();
    assert_eq!(sim.world().len(), 1);
    assert_eq!(sim.scene().len(), 1 + 1 + 1);
    sim.run(10);
}

#[test]
fn unknown_element_aborts_setup() {
    let params = seeded(SimulationParams::free_electrons("Adamantium"), 0);
    match AtomSimulation::new(params, table()) {
        Err(SimulationError::Chemistry(ChemistryError::ElementNotFound { name })) => {
            assert_eq!(name, "Adamantium");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("lookup should fail"),
    }
}

#[test]
fn negative_neutron_count_aborts_setup() {
    let json = r#"{"elements": [{
        "name": "Lightium",
        "symbol": "Lt",
        "number": 3,
        "atomic_mass": 1.2,
        "electron_configuration": "1s2 2s1"
    }]}"#;
    let table = PeriodicTable::from_json(json).unwrap();
    let params = seeded(SimulationParams::free_electrons("Lightium"), 0);

    match AtomSimulation::new(params, table) {
        Err(SimulationError::NegativeNeutronCount { element, count }) => {
            assert_eq!(element, "Lightium");
            assert_eq!(count, -2);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("negative neutron count should fail"),
    }
}
