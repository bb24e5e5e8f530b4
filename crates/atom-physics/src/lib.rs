//! # Atom Physics
//!
//! Rigid sphere bodies, the world that integrates them, and the force model
//! that holds a nucleus together and keeps electrons on a shell around the
//! atom center.

pub mod body;
pub mod constants;
pub mod forces;
pub mod particle;
pub mod world;

pub use body::*;
pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use world::*;
