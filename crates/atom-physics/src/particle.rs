//! Particle kinds, spawn specs and random placement

use crate::body::Body;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Particle types making up an atom
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Proton = 0,
    Neutron = 1,
    Electron = 2,
}

impl ParticleKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Proton),
            1 => Some(Self::Neutron),
            2 => Some(Self::Electron),
            _ => None,
        }
    }

    pub fn is_nucleon(self) -> bool {
        matches!(self, Self::Proton | Self::Neutron)
    }
}

/// Physical properties and spawn band shared by every particle of a kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub mass: f32,
    pub collision_radius: f32,
    /// Inner radius of the spawn band around the atom center
    pub spawn_inner: f32,
    /// Outer radius of the spawn band around the atom center
    pub spawn_outer: f32,
}

impl ParticleSpec {
    pub fn nucleon() -> Self {
        Self {
            mass: NUCLEON_MASS,
            collision_radius: NUCLEON_COLLISION_RADIUS,
            spawn_inner: 0.0,
            spawn_outer: NUCLEON_SPAWN_OUTER,
        }
    }

    /// Heavier-packed nucleus used alongside electron rings
    pub fn ring_nucleon() -> Self {
        Self {
            mass: RING_NUCLEON_MASS,
            collision_radius: RING_NUCLEON_COLLISION_RADIUS,
            spawn_inner: RING_NUCLEON_SPAWN_INNER,
            spawn_outer: RING_NUCLEON_SPAWN_OUTER,
        }
    }

    pub fn electron() -> Self {
        Self {
            mass: ELECTRON_MASS,
            collision_radius: ELECTRON_COLLISION_RADIUS,
            spawn_inner: ELECTRON_SPAWN_INNER,
            spawn_outer: ELECTRON_SPAWN_OUTER,
        }
    }

    /// Body at a random point of the spawn band around `center`
    pub fn spawn<R: Rng>(&self, center: Vec3, rng: &mut R) -> Body {
        let offset = random_position(rng, self.spawn_inner, self.spawn_outer);
        Body::new(self.mass, self.collision_radius, center + offset)
    }
}

/// Random point whose distance from the origin lies in `[inner, outer]`
///
/// The direction comes from a point sampled in the cube [-1, 1]³ and
/// normalized, and the radius is uniform over the band. Radii are therefore
/// uniform, not volume-weighted, and the nucleus reads as a dense core.
pub fn random_position<R: Rng>(rng: &mut R, inner: f32, outer: f32) -> Vec3 {
    let direction = loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        // A corner-case sample at the origin has no direction
        if candidate.length_squared() > 1.0e-12 {
            break candidate.normalize();
        }
    };

    let radius = rng.random::<f32>() * (outer - inner) + inner;
    direction * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn kind_round_trips_through_u32() {
        for kind in [ParticleKind::Proton, ParticleKind::Neutron, ParticleKind::Electron] {
            assert_eq!(ParticleKind::from_u32(kind as u32), Some(kind));
        }
        assert_eq!(ParticleKind::from_u32(7), None);
    }

    #[test]
    fn random_position_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for (inner, outer) in [(0.0, 6.0), (5.0, 10.0), (0.1, 0.2), (3.0, 3.0)] {
            for _ in 0..2_000 {
                let r = random_position(&mut rng, inner, outer).length();
                assert!(
                    r >= inner - 1e-4 && r <= outer + 1e-4,
                    "radius {r} outside [{inner}, {outer}]"
                );
            }
        }
    }

    #[test]
    fn random_direction_has_no_bias() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = 20_000;
        let sum: Vec3 = (0..samples)
            .map(|_| random_position(&mut rng, 1.0, 1.0).normalize())
            .sum();
        let mean = sum / samples as f32;
        assert!(mean.length() < 0.03, "mean direction {mean:?} too far from zero");
    }

    #[test]
    fn spawn_offsets_from_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let center = Vec3::new(10.0, -4.0, 2.0);
        let spec = ParticleSpec::electron();
        for _ in 0..100 {
            let body = spec.spawn(center, &mut rng);
            let d = body.distance_to(center);
            assert!(d >= spec.spawn_inner - 1e-3 && d <= spec.spawn_outer + 1e-3);
            assert_eq!(body.mass, ELECTRON_MASS);
            assert_eq!(body.velocity, Vec3::ZERO);
        }
    }
}
