pub mod boundary;
pub mod grid;
pub mod kernel;
pub mod mpm_state;
pub mod nodal_fields;
pub mod particle;

pub use boundary::{BoundaryCondition, BoundaryConditions, BoundaryHandling};
pub use grid::{CORNER_OFFSETS, CellId, Face, Grid, NODES_PER_CELL, UniformGrid};
pub use kernel::{locate_particles, populate_transfer_cache};
pub use mpm_state::{MpmState, RunSummary};
pub use nodal_fields::NodalFields;
pub use particle::Particle;
