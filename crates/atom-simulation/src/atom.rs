//! The atom aggregate
//!
//! Owns the particle collections for one element and applies the per-kind
//! tick policy every frame:
//!
//! - protons and neutrons are always pulled to the center, then damped
//! - free electrons are pulled in from beyond the shell distance and pushed
//!   out from inside it, which keeps them oscillating around that radius
//!
//! The center is read on every tick and never written here, so the caller may
//! move or rotate it between frames.

use crate::factory::{Particle, ParticleFactory};
use crate::scene::{Scene, Transform};
use atom_physics::{damp, pull, push, tangential_direction, ParticleKind, PhysicsWorld};
use glam::{Quat, Vec3};
use rand::Rng;

/// Position the particles are drawn to, plus the orientation rings hang from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomCenter {
    pub position: Vec3,
    pub rotation: Quat,
}

impl AtomCenter {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Rotate about the world Y axis
    pub fn spin(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }
}

impl Default for AtomCenter {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Force settings applied every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPolicy {
    pub nucleon_damping: f32,
    pub electron_shell_distance: f32,
    /// `None` leaves electrons undamped
    pub electron_damping: Option<f32>,
}

/// How many particles of each kind to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticleCounts {
    pub protons: usize,
    pub neutrons: usize,
    pub electrons: usize,
}

#[derive(Debug)]
pub struct Atom {
    pub center: AtomCenter,
    policy: TickPolicy,
    protons: Vec<Particle>,
    neutrons: Vec<Particle>,
    electrons: Vec<Particle>,
}

impl Atom {
    /// Spawn every particle into `world` and `scene`.
    pub fn build<W: PhysicsWorld, S: Scene, R: Rng>(
        counts: ParticleCounts,
        center: AtomCenter,
        policy: TickPolicy,
        factory: &ParticleFactory,
        world: &mut W,
        scene: &mut S,
        rng: &mut R,
    ) -> Self {
        let at = center.position;
        let protons = (0..counts.protons)
            .map(|_| factory.make_proton(at, world, scene, rng))
            .collect();
        let neutrons = (0..counts.neutrons)
            .map(|_| factory.make_neutron(at, world, scene, rng))
            .collect();
        let electrons = (0..counts.electrons)
            .map(|_| factory.make_electron(at, world, scene, rng))
            .collect();

        log::debug!(
            "Built atom: {} protons, {} neutrons, {} free electrons",
            counts.protons,
            counts.neutrons,
            counts.electrons
        );

        Self {
            center,
            policy,
            protons,
            neutrons,
            electrons,
        }
    }

    pub fn protons(&self) -> &[Particle] {
        &self.protons
    }

    pub fn neutrons(&self) -> &[Particle] {
        &self.neutrons
    }

    pub fn electrons(&self) -> &[Particle] {
        &self.electrons
    }

    /// Every particle in tick order: protons, neutrons, electrons
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.protons
            .iter()
            .chain(self.neutrons.iter())
            .chain(self.electrons.iter())
    }

    /// Accumulate this tick's forces. Call right before the physics step.
    pub fn simulate<W: PhysicsWorld>(&self, world: &mut W) {
        let center = self.center.position;
        let policy = self.policy;

        for particle in self.particles() {
            let body = particle.body;
            match particle.kind {
                ParticleKind::Proton | ParticleKind::Neutron => {
                    pull(world, body, center, 0.0);
                    damp(world, body, policy.nucleon_damping);
                }
                ParticleKind::Electron => {
                    pull(world, body, center, policy.electron_shell_distance);
                    push(world, body, center, policy.electron_shell_distance);
                    if let Some(factor) = policy.electron_damping {
                        damp(world, body, factor);
                    }
                }
            }
        }
    }

    /// Copy integrated positions and orientations to the visuals.
    /// Call after the physics step and before rendering.
    pub fn sync_visuals<W: PhysicsWorld, S: Scene>(&self, world: &W, scene: &mut S) {
        for particle in self.particles() {
            if let Some(body) = world.body(particle.body) {
                scene.set_transform(
                    particle.visual,
                    Transform {
                        position: body.position,
                        rotation: body.orientation,
                    },
                );
            }
        }
    }

    /// Kick every electron sideways so it circles the center instead of only
    /// bouncing through the shell radially.
    pub fn set_initial_electron_impulse<W: PhysicsWorld>(&self, world: &mut W, speed: f32, axis: Vec3) {
        let center = self.center.position;
        for electron in &self.electrons {
            if let Some(body) = world.body(electron.body) {
                let impulse = tangential_direction(body.position, center, axis) * speed;
                world.apply_impulse(electron.body, impulse);
            }
        }
    }

    /// Largest distance from the center among particles of the given kinds
    pub fn max_radius<W: PhysicsWorld>(&self, world: &W, nucleons: bool) -> f32 {
        let center = self.center.position;
        self.particles()
            .filter(|p| p.kind.is_nucleon() == nucleons)
            .filter_map(|p| world.body(p.body))
            .map(|b| b.distance_to(center))
            .fold(0.0, f32::max)
    }

    /// Remove every body and visual this atom created.
    pub fn teardown<W: PhysicsWorld, S: Scene>(self, world: &mut W, scene: &mut S) {
        let count = self.protons.len() + self.neutrons.len() + self.electrons.len();
        for particle in self.particles() {
            world.remove(particle.body);
            scene.remove(particle.visual);
        }
        log::debug!("Tore down atom with {} particles", count);
    }
}
