//! Materials for MPM simulation
//!
//! Two categories on top of the dust-like [`NoStress`]:
//!
//! * `fluids` - Water and other weakly compressible fluids
//! * `solids` - Linear and Neo-Hookean elastic materials

pub mod families;
pub mod fluids;
pub mod material_types;
pub mod solids;
pub mod utils;

// Re-export the model trait and the material list for convenience
pub use families::{FluidParams, SolidParams};
pub use fluids::Water;
pub use material_types::{MaterialLibrary, NoStress, StressModel};
pub use solids::{LinearElastic, NeoHookean};

// Re-export physics utilities for easy access
pub use utils::check;
pub use utils::physics;
