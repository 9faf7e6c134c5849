//! Particle-to-Grid (P2G) transfer operations
//!
//! Splats mass, momentum and internal force from particles onto grid nodes.
//! Every pass zero-fills its target buffer first.

use std::ops::AddAssign;

use rayon::prelude::*;

use crate::core::{BoundaryConditions, Grid, Particle};
use crate::error::{MpmError, Result};
use crate::math::{Real, Vector};

/// Scatter-add every particle's contribution into `field`.
///
/// The parallel path gives each rayon worker a private accumulator and sums
/// the partial buffers afterwards, so no two threads write the same node.
pub fn scatter<T, F>(particles: &[Particle], field: &mut [T], zero: T, parallel: bool, splat: F)
where
    T: Copy + Send + Sync + AddAssign,
    F: Fn(&Particle, &mut [T]) + Send + Sync,
{
    if parallel {
        let len = field.len();
        let summed = particles
            .par_iter()
            .fold(
                || vec![zero; len],
                |mut partial, particle| {
                    splat(particle, &mut partial);
                    partial
                },
            )
            .reduce(
                || vec![zero; len],
                |mut lhs, rhs| {
                    for (a, b) in lhs.iter_mut().zip(rhs) {
                        *a += b;
                    }
                    lhs
                },
            );
        field.copy_from_slice(&summed);
    } else {
        field.fill(zero);
        for particle in particles {
            splat(particle, field);
        }
    }
}

/// Stage 2: `m_n = Σ_p m_p N_n(x_p)`.
pub fn calculate_nodal_mass(particles: &[Particle], node_mass: &mut [Real], parallel: bool) {
    scatter(particles, node_mass, 0.0, parallel, |p, mass| {
        for (&node, &weight) in p.node_ids.iter().zip(&p.basis_values) {
            mass[node] += weight * p.mass;
        }
    });
}

/// `Σ_p m_p v_p N_n(x_p)` without boundary conditions.
pub fn splat_momentum(particles: &[Particle], field: &mut [Vector], parallel: bool) {
    scatter(particles, field, Vector::zeros(), parallel, |p, momentum| {
        let particle_momentum = p.momentum();
        for (&node, &weight) in p.node_ids.iter().zip(&p.basis_values) {
            momentum[node] += particle_momentum * weight;
        }
    });
}

/// Stage 3: nodal momentum followed by the six momentum boundary conditions.
pub fn calculate_nodal_momentum(
    grid: &dyn Grid,
    boundaries: &BoundaryConditions,
    particles: &[Particle],
    node_mass: &[Real],
    node_momentum: &mut [Vector],
    parallel: bool,
) {
    splat_momentum(particles, node_momentum, parallel);
    boundaries.apply_momentum(grid, node_mass, node_momentum);
}

/// Every particle must reference a registered material.
pub fn validate_material_ids(particles: &[Particle], material_count: usize) -> Result<()> {
    match particles
        .iter()
        .position(|p| p.material_id >= material_count)
    {
        Some(index) => Err(MpmError::UnknownMaterial {
            particle: index,
            material_id: particles[index].material_id,
            available: material_count,
        }),
        None => Ok(()),
    }
}

/// Stage 4: `f_n[i] -= V_p Σ_j ∂_j N_n σ_ji`, the negated stress divergence.
pub fn calculate_internal_nodal_forces(
    particles: &[Particle],
    material_count: usize,
    node_force: &mut [Vector],
    parallel: bool,
) -> Result<()> {
    validate_material_ids(particles, material_count)?;

    scatter(particles, node_force, Vector::zeros(), parallel, |p, force| {
        for (&node, gradient) in p.node_ids.iter().zip(&p.basis_gradients) {
            force[node] -= p.stress.tr_mul(gradient) * p.volume;
        }
    });
    Ok(())
}
