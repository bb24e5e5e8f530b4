//! Constants for the atom simulation
//!
//! Arbitrary units chosen for a stable, readable on-screen atom. None of these
//! are physical values: forces are linear springs and masses are picked so the
//! nucleus settles within a few seconds.

/// Fixed physics timestep (one display frame at 60 Hz)
pub const TIMESTEP: f32 = 1.0 / 60.0;

/// Solver iterations per step
pub const SOLVER_ITERATIONS: usize = 5;

/// Bounciness of particle contacts
pub const RESTITUTION: f32 = 0.3;

/// Friction coefficient of particle contacts; tumbles nucleons as they touch
pub const FRICTION: f32 = 0.5;

// Free-electron mode

/// Nucleon mass
pub const NUCLEON_MASS: f32 = 1.0;

/// Nucleon collision sphere radius (a third of its visual size)
pub const NUCLEON_COLLISION_RADIUS: f32 = 1.0 / 3.0;

/// Nucleons spawn anywhere from the center out to this radius
pub const NUCLEON_SPAWN_OUTER: f32 = 6.0;

/// Per-tick velocity scale applied to nucleons
pub const NUCLEON_DAMPING: f32 = 0.95;

/// Electron mass
pub const ELECTRON_MASS: f32 = 0.1;

/// Electron collision sphere radius
pub const ELECTRON_COLLISION_RADIUS: f32 = 0.5;

/// Electron spawn band
pub const ELECTRON_SPAWN_INNER: f32 = 5.0;
pub const ELECTRON_SPAWN_OUTER: f32 = 10.0;

/// Radius of the pull/push equilibrium shell electrons oscillate around
pub const ELECTRON_SHELL_DISTANCE: f32 = 10.0;

/// Tangential speed scale of the initial electron impulse
pub const ELECTRON_START_SPEED: f32 = 1.0;

// Ring mode

/// Nucleon mass when electrons are drawn on rings
pub const RING_NUCLEON_MASS: f32 = 0.5;

/// Nucleon collision radius when electrons are drawn on rings
pub const RING_NUCLEON_COLLISION_RADIUS: f32 = 0.5;

/// Tight spawn band so the nucleus starts packed
pub const RING_NUCLEON_SPAWN_INNER: f32 = 0.1;
pub const RING_NUCLEON_SPAWN_OUTER: f32 = 0.2;

/// Radius of the innermost electron ring
pub const RING_BASE_RADIUS: f32 = 8.0;

/// Radial gap between consecutive rings
pub const RING_GAP: f32 = 2.0;

/// Torus tube thickness
pub const RING_TUBE_RADIUS: f32 = 0.05;

/// Spin of the innermost ring, radians per frame about each of its local Y and Z
pub const RING_SPIN_BASE: f32 = 0.07 / 5.0;

/// Spin lost per shell going outwards
pub const RING_SPIN_FALLOFF: f32 = 0.01 / 5.0;

/// Spin of the atom center about +Y, radians per frame
pub const CENTER_SPIN: f32 = 0.01;

// Visual sizes

/// Nucleon sphere radius for rendering
pub const NUCLEON_SIZE: f32 = 1.0;

/// Electron sphere radius for rendering
pub const ELECTRON_SIZE: f32 = 0.5;
