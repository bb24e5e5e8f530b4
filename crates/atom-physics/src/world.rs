//! Rigid-body world backed by Rapier
//!
//! [`PhysicsWorld`] is everything the atom needs from an engine: insert and
//! remove spheres, read their state, accumulate forces, apply impulses and
//! velocities, and step. [`World`] implements it over `rapier3d`. Accumulated
//! forces are consumed by one step and then cleared.

use crate::body::{Body, BodyHandle};
use crate::constants::*;
use glam::{Quat, Vec3};
use rapier3d::na as nalgebra;
use rapier3d::prelude::{
    vector, CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryPipeline, Real, RigidBody, RigidBodyBuilder, RigidBodySet, Vector,
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

fn vec3_to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn na_to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Pair-finding strategy used before contact resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Broadphase {
    /// Rapier's hierarchical sweep-and-prune
    #[default]
    #[serde(rename = "sap")]
    SweepAndPrune,
}

/// Tunables of the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity: Vec3,
    pub broadphase: Broadphase,
    pub solver_iterations: usize,
    pub restitution: f32,
    pub friction: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::ZERO,
            broadphase: Broadphase::SweepAndPrune,
            solver_iterations: SOLVER_ITERATIONS,
            restitution: RESTITUTION,
            friction: FRICTION,
        }
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Collider pairs touching after the step
    pub contacts: usize,
}

/// Interface the simulation needs from a physics engine
///
/// Every per-body operation returns `false` (or `None`) for an unknown handle.
pub trait PhysicsWorld {
    fn add(&mut self, body: Body) -> BodyHandle;

    fn remove(&mut self, handle: BodyHandle) -> bool;

    /// Snapshot of the body's current state
    fn body(&self, handle: BodyHandle) -> Option<Body>;

    /// Add to the force consumed by the next step
    fn add_force(&mut self, handle: BodyHandle, force: Vec3) -> bool;

    /// Drop the force accumulated since the last step
    fn reset_force(&mut self, handle: BodyHandle) -> bool;

    /// Instantaneous change of momentum through the center of mass
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> bool;

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool;

    /// Advance every body by `dt`, consuming and clearing accumulated forces
    fn step(&mut self, dt: f32) -> StepReport;
}

/// Sphere world stepped by Rapier's physics pipeline
pub struct World {
    settings: WorldSettings,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    time: f32,
}

impl World {
    pub fn new(settings: WorldSettings) -> Self {
        log::debug!(
            "Physics world: {:?} broadphase, {} solver iterations, restitution {}, friction {}",
            settings.broadphase,
            settings.solver_iterations,
            settings.restitution,
            settings.friction
        );

        let broad_phase = match settings.broadphase {
            Broadphase::SweepAndPrune => DefaultBroadPhase::new(),
        };

        let mut world = Self {
            settings,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase,
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            time: 0.0,
        };
        world.set_solver_iterations(settings.solver_iterations);
        world
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Zero is ignored: the solver always runs at least once
    pub fn set_solver_iterations(&mut self, iterations: usize) {
        if let Some(iterations) = NonZeroUsize::new(iterations) {
            self.settings.solver_iterations = iterations.get();
            self.integration_parameters.num_solver_iterations = iterations;
        }
    }

    /// Move a body without going through the integrator
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rigid_body) => {
                rigid_body.set_translation(vec3_to_na(position), true);
                true
            }
            None => false,
        }
    }

    /// Simulated time elapsed over all steps
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn snapshot(&self, rigid_body: &RigidBody) -> Body {
        let radius = rigid_body
            .colliders()
            .first()
            .and_then(|handle| self.colliders.get(*handle))
            .and_then(|collider| collider.shape().as_ball())
            .map_or(0.0, |ball| ball.radius);
        let rotation = rigid_body.rotation();

        Body {
            mass: if rigid_body.is_dynamic() {
                rigid_body.mass()
            } else {
                0.0
            },
            radius,
            position: na_to_vec3(rigid_body.translation()),
            velocity: na_to_vec3(rigid_body.linvel()),
            orientation: Quat::from_xyzw(rotation.i, rotation.j, rotation.k, rotation.w),
            angular_velocity: na_to_vec3(rigid_body.angvel()),
            force: na_to_vec3(&rigid_body.user_force()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl PhysicsWorld for World {
    fn add(&mut self, body: Body) -> BodyHandle {
        let builder = if body.is_dynamic() {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let mut rigid_body = builder
            .translation(vec3_to_na(body.position))
            .rotation(vec3_to_na(body.orientation.to_scaled_axis()))
            .linvel(vec3_to_na(body.velocity))
            .angvel(vec3_to_na(body.angular_velocity))
            .can_sleep(false)
            .build();
        rigid_body.add_force(vec3_to_na(body.force), true);
        let handle = self.bodies.insert(rigid_body);

        let mut collider = ColliderBuilder::ball(body.radius)
            .restitution(self.settings.restitution)
            .friction(self.settings.friction);
        if body.is_dynamic() {
            collider = collider.mass(body.mass);
        }
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);
        // Mass is read back before the first step
        if let Some(rigid_body) = self.bodies.get_mut(handle) {
            rigid_body.recompute_mass_properties_from_colliders(&self.colliders);
        }

        BodyHandle(handle)
    }

    fn remove(&mut self, handle: BodyHandle) -> bool {
        self.bodies
            .remove(
                handle.0,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn body(&self, handle: BodyHandle) -> Option<Body> {
        self.bodies
            .get(handle.0)
            .map(|rigid_body| self.snapshot(rigid_body))
    }

    fn add_force(&mut self, handle: BodyHandle, force: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rigid_body) => {
                rigid_body.add_force(vec3_to_na(force), true);
                true
            }
            None => false,
        }
    }

    fn reset_force(&mut self, handle: BodyHandle) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rigid_body) => {
                rigid_body.reset_forces(true);
                true
            }
            None => false,
        }
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rigid_body) => {
                rigid_body.apply_impulse(vec3_to_na(impulse), true);
                true
            }
            None => false,
        }
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> bool {
        match self.bodies.get_mut(handle.0) {
            Some(rigid_body) => {
                rigid_body.set_linvel(vec3_to_na(velocity), true);
                true
            }
            None => false,
        }
    }

    fn step(&mut self, dt: f32) -> StepReport {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &vec3_to_na(self.settings.gravity),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        // Rapier keeps user forces across steps; ours last exactly one.
        for (_, rigid_body) in self.bodies.iter_mut() {
            rigid_body.reset_forces(false);
        }

        self.time += dt;
        StepReport {
            contacts: self
                .narrow_phase
                .contact_pairs()
                .filter(|pair| pair.has_any_active_contact)
                .count(),
        }
    }
}
