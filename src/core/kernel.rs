use rayon::prelude::*;

use crate::core::grid::{CORNER_OFFSETS, Grid};
use crate::core::particle::Particle;
use crate::error::{MpmError, Result};
use crate::math::{Real, Vector};

/// Corner sign (`-1` or `+1`) of node `n` along axis `d`.
#[inline(always)]
fn corner_sign(node: usize, axis: usize) -> Real {
    if CORNER_OFFSETS[node][axis] == 0 { -1.0 } else { 1.0 }
}

/// Trilinear basis values at a point of the reference cell `[-1, 1]³`.
#[inline]
pub fn trilinear_values(reference: &Vector, values: &mut Vec<Real>) {
    values.clear();
    values.extend((0..CORNER_OFFSETS.len()).map(|n| {
        (0..3)
            .map(|d| 0.5 * (1.0 + corner_sign(n, d) * reference[d]))
            .product::<Real>()
    }));
}

/// Trilinear basis gradients in physical space for a cubic cell of width `cell_width`.
#[inline]
pub fn trilinear_gradients(reference: &Vector, cell_width: Real, gradients: &mut Vec<Vector>) {
    // dξ/dx = 2 / h
    let jacobian = 2.0 / cell_width;
    gradients.clear();
    gradients.extend((0..CORNER_OFFSETS.len()).map(|n| {
        let factors = Vector::from_fn(|d, _| 0.5 * (1.0 + corner_sign(n, d) * reference[d]));
        Vector::from_fn(|d, _| {
            let mut g = 0.5 * corner_sign(n, d) * jacobian;
            for e in 0..3 {
                if e != d {
                    g *= factors[e];
                }
            }
            g
        })
    }));
}

/// Populate the cached node ids, basis values and basis gradients for a particle.
#[inline]
pub fn populate_transfer_cache(grid: &dyn Grid, index: usize, particle: &mut Particle) -> Result<()> {
    let cell = grid
        .locate_particle(particle)
        .ok_or(MpmError::ParticleOutsideGrid {
            index,
            x: particle.position.x,
            y: particle.position.y,
            z: particle.position.z,
        })?;

    grid.cell_node_ids(cell, &mut particle.node_ids);
    let reference = grid.map_physical_to_reference_frame(particle, cell);
    grid.shape_function_value(&reference, &mut particle.basis_values);
    grid.shape_function_gradient(&reference, &mut particle.basis_gradients);
    Ok(())
}

/// Stage 1: locate every particle and cache its interpolation data.
pub fn locate_particles(grid: &dyn Grid, particles: &mut [Particle], parallel: bool) -> Result<()> {
    if parallel {
        particles
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, particle)| populate_transfer_cache(grid, index, particle))
    } else {
        particles
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, particle)| populate_transfer_cache(grid, index, particle))
    }
}
