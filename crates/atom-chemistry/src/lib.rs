//! # Atom Chemistry
//!
//! Periodic table lookup: resolves an element name to its proton, neutron and
//! electron counts and to the electron distribution over principal shells.

pub mod configuration;
pub mod error;
pub mod table;

pub use configuration::*;
pub use error::*;
pub use table::*;
