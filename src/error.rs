//! Error types for mpm3d.

use std::path::PathBuf;

use thiserror::Error;

use crate::math::Real;

#[derive(Debug, Error)]
pub enum MpmError {
    #[error("particle {index} at ({x}, {y}, {z}) lies outside the grid")]
    ParticleOutsideGrid {
        index: usize,
        x: Real,
        y: Real,
        z: Real,
    },

    #[error("particle {particle} references material {material_id} but only {available} are registered")]
    UnknownMaterial {
        particle: usize,
        material_id: usize,
        available: usize,
    },

    #[error("expected one boundary condition per grid face (6), got {0}")]
    BoundaryCount(usize),

    #[error("particle {index} has degenerate volume {volume} after step {step}")]
    DegenerateParticle {
        index: usize,
        volume: Real,
        step: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("failed to write snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MpmError>;
