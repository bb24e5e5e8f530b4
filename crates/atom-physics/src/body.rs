//! Rigid sphere bodies as seen from outside the engine

use glam::{Quat, Vec3};
use rapier3d::prelude::RigidBodyHandle;

/// Stable reference to a body stored in a [`crate::PhysicsWorld`]
///
/// Rapier handles carry a generation, so a handle kept after its body was
/// removed never reaches a body added later into the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// A sphere with mass: the description handed to the world on insertion and
/// the snapshot read back from it
///
/// `force` is what has been accumulated since the last step. A mass of zero
/// makes the body static.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f32,
    /// Collision sphere radius
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    pub angular_velocity: Vec3,
    pub force: Vec3,
}

impl Body {
    pub fn new(mass: f32, radius: f32, position: Vec3) -> Self {
        Self {
            mass,
            radius,
            position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// True when every component of the state is finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.force.is_finite()
            && self.orientation.is_finite()
    }
}
