//! # Atom Simulation
//!
//! Builds an atom from a periodic table record, drives it frame by frame
//! through a [`PhysicsWorld`](atom_physics::PhysicsWorld) and mirrors every
//! particle and electron ring into a [`Scene`].

pub mod atom;
pub mod factory;
pub mod params;
pub mod rings;
pub mod scene;
pub mod simulation;

pub use atom::*;
pub use factory::*;
pub use params::*;
pub use rings::*;
pub use scene::*;
pub use simulation::*;
