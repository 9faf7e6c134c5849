//! Configuration and parameters
//!
//! Constants, solver settings and run schedules.

pub mod constants;
pub mod solver_params;

pub use constants::*;
pub use solver_params::*;
