//! Frame loop
//!
//! [`AtomSimulation`] owns the physics world, the scene and the atom built for
//! the selected element, and advances them one fixed frame at a time.

use crate::atom::{Atom, AtomCenter, ParticleCounts, TickPolicy};
use crate::factory::ParticleFactory;
use crate::params::{ConfigError, SimulationParams, VisualizationMode};
use crate::rings::{occupied_shells, ElectronRings};
use crate::scene::{InstanceScene, Scene};
use atom_chemistry::{ChemistryError, ElementRecord, PeriodicTable};
use atom_physics::{PhysicsWorld, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Frames between debug summaries
const SUMMARY_INTERVAL: u64 = 60;

#[derive(Debug)]
pub enum SimulationError {
    Chemistry(ChemistryError),
    Config(ConfigError),
    /// The record's rounded mass is below its atomic number
    NegativeNeutronCount { element: String, count: i64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Chemistry(error) => write!(formatter, "{}", error),
            SimulationError::Config(error) => write!(formatter, "{}", error),
            SimulationError::NegativeNeutronCount { element, count } => write!(
                formatter,
                "Element '{}' has a negative neutron count ({})",
                element, count
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Chemistry(error) => Some(error),
            SimulationError::Config(error) => Some(error),
            SimulationError::NegativeNeutronCount { .. } => None,
        }
    }
}

impl From<ChemistryError> for SimulationError {
    fn from(error: ChemistryError) -> Self {
        SimulationError::Chemistry(error)
    }
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::Config(error)
    }
}

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Frames completed, including this one
    pub frame: u64,
    /// Simulated seconds
    pub time: f32,
    pub max_nucleon_radius: f32,
    /// Zero in ring mode
    pub max_electron_radius: f32,
    pub contacts: usize,
}

/// One atom driven frame by frame
pub struct AtomSimulation<W: PhysicsWorld = World, S: Scene = InstanceScene> {
    params: SimulationParams,
    table: PeriodicTable,
    factory: ParticleFactory,
    world: W,
    scene: S,
    rng: StdRng,
    seed: u64,
    atom: Atom,
    rings: Option<ElectronRings>,
    label: String,
    frame: u64,
}

impl AtomSimulation {
    /// Build the element named in `params` with the built-in engine and scene.
    pub fn new(params: SimulationParams, table: PeriodicTable) -> Result<Self, SimulationError> {
        let world = World::new(params.world);
        Self::with_engines(params, table, world, InstanceScene::new())
    }
}

impl<W: PhysicsWorld, S: Scene> AtomSimulation<W, S> {
    /// Build the element named in `params` into the given world and scene.
    pub fn with_engines(
        params: SimulationParams,
        table: PeriodicTable,
        mut world: W,
        mut scene: S,
    ) -> Result<Self, SimulationError> {
        params.validate()?;

        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        log::info!("Simulation seed: {}", seed);

        let factory = ParticleFactory::from_params(&params);
        let record = table.find(&params.element)?;
        let (atom, rings) = populate(
            record,
            AtomCenter::default(),
            &params,
            &factory,
            &mut world,
            &mut scene,
            &mut rng,
        )?;
        let label = record.name.clone();

        Ok(Self {
            params,
            table,
            factory,
            world,
            scene,
            rng,
            seed,
            atom,
            rings,
            label,
            frame: 0,
        })
    }

    /// Advance one frame: forces, center and ring spin, physics step, visuals
    pub fn step(&mut self) -> FrameReport {
        self.atom.simulate(&mut self.world);
        self.atom.center.spin(self.params.center_spin);
        if let Some(rings) = &mut self.rings {
            rings.advance();
        }

        let step = self.world.step(self.params.timestep);

        self.atom.sync_visuals(&self.world, &mut self.scene);
        if let Some(rings) = &self.rings {
            rings.sync_visuals(&self.atom.center, &mut self.scene);
        }

        self.frame += 1;
        let report = FrameReport {
            frame: self.frame,
            time: self.time(),
            max_nucleon_radius: self.atom.max_radius(&self.world, true),
            max_electron_radius: self.atom.max_radius(&self.world, false),
            contacts: step.contacts,
        };

        if self.frame % SUMMARY_INTERVAL == 0 {
            log::debug!(
                "Frame {}: nucleus radius {:.3}, electron radius {:.3}, {} contacts",
                report.frame,
                report.max_nucleon_radius,
                report.max_electron_radius,
                report.contacts
            );
        }

        report
    }

    /// Run `frames` frames and return the last report
    pub fn run(&mut self, frames: u64) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            time: self.time(),
            ..Default::default()
        };
        for _ in 0..frames {
            report = self.step();
        }
        report
    }

    /// Replace the current atom with another element.
    ///
    /// The lookup happens first, so an unknown name leaves the current atom in place.
    pub fn change_element(&mut self, name: &str) -> Result<(), SimulationError> {
        let record = self.table.find(name)?;
        let (atom, rings) = populate(
            record,
            self.atom.center,
            &self.params,
            &self.factory,
            &mut self.world,
            &mut self.scene,
            &mut self.rng,
        )?;
        let label = record.name.clone();

        let old = std::mem::replace(&mut self.atom, atom);
        old.teardown(&mut self.world, &mut self.scene);
        if let Some(old) = std::mem::replace(&mut self.rings, rings) {
            old.teardown(&mut self.scene);
        }

        log::info!("Switched element from {} to {}", self.label, label);
        self.params.element = label.clone();
        self.label = label;
        Ok(())
    }

    /// Name of the element being shown
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f32 {
        self.frame as f32 * self.params.timestep
    }

    pub fn atom(&self) -> &Atom {
        &self.atom
    }

    pub fn rings(&self) -> Option<&ElectronRings> {
        self.rings.as_ref()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }
}

/// Build an atom for `record` and, in ring mode, its electron rings
fn populate<W: PhysicsWorld, S: Scene>(
    record: &ElementRecord,
    center: AtomCenter,
    params: &SimulationParams,
    factory: &ParticleFactory,
    world: &mut W,
    scene: &mut S,
    rng: &mut StdRng,
) -> Result<(Atom, Option<ElectronRings>), SimulationError> {
    let neutrons = record.neutron_count();
    if neutrons < 0 {
        return Err(SimulationError::NegativeNeutronCount {
            element: record.name.clone(),
            count: neutrons,
        });
    }

    let free = params.mode == VisualizationMode::FreeElectrons;
    let counts = ParticleCounts {
        protons: record.proton_count() as usize,
        neutrons: neutrons as usize,
        electrons: if free {
            record.electron_count() as usize
        } else {
            0
        },
    };
    let policy = TickPolicy {
        nucleon_damping: params.nucleon_damping,
        electron_shell_distance: params.electron_shell_distance,
        electron_damping: params.electron_damping,
    };

    log::info!(
        "Building {} ({:?} mode): {} protons, {} neutrons, {} electrons",
        record.name,
        params.mode,
        counts.protons,
        counts.neutrons,
        record.electron_count()
    );

    let atom = Atom::build(counts, center, policy, factory, world, scene, rng);

    let rings = match params.mode {
        VisualizationMode::FreeElectrons => {
            atom.set_initial_electron_impulse(
                world,
                params.electron_start_speed,
                params.impulse_axis,
            );
            None
        }
        VisualizationMode::Rings => {
            let shells = occupied_shells(&record.shells(), &params.rings);
            let rings = ElectronRings::build(&shells, &params.rings, &params.electron, scene);
            rings.sync_visuals(&atom.center, scene);
            Some(rings)
        }
    };

    atom.sync_visuals(world, scene);
    Ok((atom, rings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PeriodicTable {
        PeriodicTable::load().unwrap()
    }

    fn seeded(mut params: SimulationParams) -> SimulationParams {
        params.seed = Some(7);
        params
    }

    #[test]
    fn helium_free_mode_builds() {
        let sim = AtomSimulation::new(seeded(SimulationParams::default()), table()).unwrap();
        assert_eq!(sim.label(), "Helium");
        assert_eq!(sim.atom().protons().len(), 2);
        assert_eq!(sim.atom().neutrons().len(), 2);
        assert_eq!(sim.atom().electrons().len(), 2);
        assert!(sim.rings().is_none());
        assert_eq!(sim.world().len(), 6);
        assert_eq!(sim.scene().len(), 6);
    }

    #[test]
    fn ring_mode_has_no_electron_bodies() {
        let params = seeded(SimulationParams::rings("Neon"));
        let sim = AtomSimulation::new(params, table()).unwrap();
        assert!(sim.atom().electrons().is_empty());
        assert_eq!(sim.world().len(), 20);
        let rings = sim.rings().unwrap();
        assert_eq!(rings.electron_count(), 10);
        assert!(rings.ring(2).is_none());
    }

    #[test]
    fn unknown_element_is_lookup_error() {
        let params = seeded(SimulationParams::free_electrons("Unobtainium"));
        let err = AtomSimulation::new(params, table()).err().unwrap();
        assert!(matches!(
            err,
            SimulationError::Chemistry(ChemistryError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = seeded(SimulationParams::default());
        params.timestep = -1.0;
        let err = AtomSimulation::new(params, table()).err().unwrap();
        assert!(matches!(err, SimulationError::Config(_)));
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = AtomSimulation::new(seeded(SimulationParams::default()), table()).unwrap();
        let mut b = AtomSimulation::new(seeded(SimulationParams::default()), table()).unwrap();
        let ra = a.run(30);
        let rb = b.run(30);
        assert_eq!(ra, rb);
        assert_eq!(a.scene().instances(), b.scene().instances());
    }

    #[test]
    fn frames_advance_time() {
        let mut sim = AtomSimulation::new(seeded(SimulationParams::default()), table()).unwrap();
        let report = sim.run(60);
        assert_eq!(report.frame, 60);
        assert!((report.time - 1.0).abs() < 1e-4);
        assert_eq!(sim.run(0).frame, 60);
    }

    #[test]
    fn failed_change_keeps_atom() {
        let mut sim = AtomSimulation::new(seeded(SimulationParams::default()), table()).unwrap();
        assert!(sim.change_element("Kryptonite").is_err());
        assert_eq!(sim.label(), "Helium");
        assert_eq!(sim.world().len(), 6);
    }
}
