//! Force model driving particles relative to the atom center
//!
//! Forces are linear in distance (springs), not inverse-square. Every function
//! here reads the center it is given and never moves it.

use crate::body::BodyHandle;
use crate::world::PhysicsWorld;
use glam::Vec3;

/// Force pulling a particle at `position` towards `center`
///
/// Zero while the particle is closer than `threshold`. Not normalized: the
/// pull grows with distance.
pub fn pull_force(position: Vec3, center: Vec3, threshold: f32) -> Vec3 {
    if position.distance(center) < threshold {
        return Vec3::ZERO;
    }
    center - position
}

/// Force pushing a particle at `position` away from `center`
///
/// Zero once the particle is farther than `threshold`.
pub fn push_force(position: Vec3, center: Vec3, threshold: f32) -> Vec3 {
    if position.distance(center) > threshold {
        return Vec3::ZERO;
    }
    position - center
}

/// Accumulate the pull towards `center` on the body behind `handle`.
///
/// Returns false when the body sits inside the dead zone or is unknown.
pub fn pull<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    handle: BodyHandle,
    center: Vec3,
    threshold: f32,
) -> bool {
    let Some(body) = world.body(handle) else {
        return false;
    };
    if body.distance_to(center) < threshold {
        return false;
    }
    world.add_force(handle, pull_force(body.position, center, threshold))
}

/// Accumulate the push away from `center` on the body behind `handle`.
///
/// Returns false when the body is beyond `threshold` or is unknown.
pub fn push<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    handle: BodyHandle,
    center: Vec3,
    threshold: f32,
) -> bool {
    let Some(body) = world.body(handle) else {
        return false;
    };
    if body.distance_to(center) > threshold {
        return false;
    }
    world.add_force(handle, push_force(body.position, center, threshold))
}

/// Scale the velocity by `factor` (1 keeps it, 0 stops the body)
pub fn damp<W: PhysicsWorld + ?Sized>(world: &mut W, handle: BodyHandle, factor: f32) {
    if let Some(body) = world.body(handle) {
        if body.velocity.length() > 0.0 {
            world.set_velocity(handle, body.velocity * factor);
        }
    }
}

/// Drop the accumulated force while the body is faster than `max_speed`
pub fn limit_velocity<W: PhysicsWorld + ?Sized>(world: &mut W, handle: BodyHandle, max_speed: f32) {
    if let Some(body) = world.body(handle) {
        if body.velocity.length() > max_speed {
            world.reset_force(handle);
        }
    }
}

/// Direction perpendicular to both the radial direction and `axis`
///
/// Zero when the body lies on `axis` through the center.
pub fn tangential_direction(position: Vec3, center: Vec3, axis: Vec3) -> Vec3 {
    (position - center).normalize_or_zero().cross(axis)
}
