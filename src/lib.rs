//! Explicit Material Point Method solver on a 3D background grid.
//!
//! Particles carry the material state; each step scatters mass, momentum
//! and internal force onto the grid, integrates there, and gathers the
//! result back onto particles. See [`crate::core::MpmState`] for the step pipeline.

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod io;
pub mod materials;
pub mod math;
#[cfg(feature = "bevy")]
pub mod plugin;
pub mod solver;

// Public re-exports for clean API
pub use config::{GRAVITY, RunSchedule, SolverParams, VolumePolicy};
pub use crate::core::{
    BoundaryCondition, BoundaryConditions, BoundaryHandling, Face, Grid, MpmState, Particle,
    RunSummary, UniformGrid,
};
pub use diagnostics::ConservationReport;
pub use error::{MpmError, Result};
pub use geometry::{Cuboid, Geometry, ParticleFill, Sphere};
pub use materials::{
    LinearElastic, MaterialLibrary, NeoHookean, NoStress, StressModel, Water,
};
#[cfg(feature = "bevy")]
pub use plugin::MpmPlugin;
