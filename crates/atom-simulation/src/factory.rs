//! Particle construction
//!
//! Each particle is a body in the physics world paired with a sphere in the
//! scene. The factory only knows the per-kind template; where the atom center
//! is and which world and scene to use come from the caller.

use crate::params::{ParticleParams, SimulationParams};
use crate::scene::{Mesh, Scene, Shape, VisualHandle, VisualKind};
use atom_physics::{BodyHandle, ParticleKind, PhysicsWorld};
use glam::Vec3;
use rand::Rng;

/// A simulated particle: physics body plus its visual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub body: BodyHandle,
    pub visual: VisualHandle,
}

/// Builds protons, neutrons and electrons from their templates
#[derive(Debug, Clone)]
pub struct ParticleFactory {
    proton: ParticleParams,
    neutron: ParticleParams,
    electron: ParticleParams,
}

impl ParticleFactory {
    pub fn new(proton: ParticleParams, neutron: ParticleParams, electron: ParticleParams) -> Self {
        Self {
            proton,
            neutron,
            electron,
        }
    }

    pub fn from_params(params: &SimulationParams) -> Self {
        Self::new(params.proton, params.neutron, params.electron)
    }

    pub fn template(&self, kind: ParticleKind) -> &ParticleParams {
        match kind {
            ParticleKind::Proton => &self.proton,
            ParticleKind::Neutron => &self.neutron,
            ParticleKind::Electron => &self.electron,
        }
    }

    pub fn make_proton<W: PhysicsWorld, S: Scene, R: Rng>(
        &self,
        center: Vec3,
        world: &mut W,
        scene: &mut S,
        rng: &mut R,
    ) -> Particle {
        self.make(ParticleKind::Proton, center, world, scene, rng)
    }

    pub fn make_neutron<W: PhysicsWorld, S: Scene, R: Rng>(
        &self,
        center: Vec3,
        world: &mut W,
        scene: &mut S,
        rng: &mut R,
    ) -> Particle {
        self.make(ParticleKind::Neutron, center, world, scene, rng)
    }

    pub fn make_electron<W: PhysicsWorld, S: Scene, R: Rng>(
        &self,
        center: Vec3,
        world: &mut W,
        scene: &mut S,
        rng: &mut R,
    ) -> Particle {
        self.make(ParticleKind::Electron, center, world, scene, rng)
    }

    /// Spawn a body in the template's band around `center` and a matching sphere
    pub fn make<W: PhysicsWorld, S: Scene, R: Rng>(
        &self,
        kind: ParticleKind,
        center: Vec3,
        world: &mut W,
        scene: &mut S,
        rng: &mut R,
    ) -> Particle {
        let template = self.template(kind);
        let body = template.spec.spawn(center, rng);
        let visual = scene.add(Mesh {
            kind: visual_kind(kind),
            shape: Shape::Sphere {
                radius: template.visual_radius,
            },
            color: template.color,
        });

        Particle {
            kind,
            body: world.add(body),
            visual,
        }
    }
}

pub fn visual_kind(kind: ParticleKind) -> VisualKind {
    match kind {
        ParticleKind::Proton => VisualKind::Proton,
        ParticleKind::Neutron => VisualKind::Neutron,
        ParticleKind::Electron => VisualKind::Electron,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::InstanceScene;
    use atom_physics::World;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn particles_get_kind_specific_bodies() {
        let params = SimulationParams::default();
        let factory = ParticleFactory::from_params(&params);
        let mut world = World::default();
        let mut scene = InstanceScene::new();
        let mut rng = StdRng::seed_from_u64(3);

        let proton = factory.make_proton(Vec3::ZERO, &mut world, &mut scene, &mut rng);
        let neutron = factory.make_neutron(Vec3::ZERO, &mut world, &mut scene, &mut rng);
        let electron = factory.make_electron(Vec3::ZERO, &mut world, &mut scene, &mut rng);

        let p = world.body(proton.body).unwrap();
        assert!((p.mass - params.proton.spec.mass).abs() < 1e-5);
        assert_eq!(p.radius, params.proton.spec.collision_radius);
        assert!(p.position.length() <= params.proton.spec.spawn_outer + 1e-4);

        assert_eq!(neutron.kind, ParticleKind::Neutron);

        let e = world.body(electron.body).unwrap();
        assert!((e.mass - params.electron.spec.mass).abs() < 1e-5);
        let r = e.position.length();
        assert!(r >= params.electron.spec.spawn_inner - 1e-4);
        assert!(r <= params.electron.spec.spawn_outer + 1e-4);

        assert_eq!(scene.len(), 3);
        let visual = scene.get(electron.visual).unwrap();
        assert_eq!(visual.kind, VisualKind::Electron as u32);
        assert_eq!(visual.radius, params.electron.visual_radius);
        assert_eq!(visual.color, params.electron.color);
    }
}
