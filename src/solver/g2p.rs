//! Grid-to-Particle (G2P) transfer operations
//!
//! Transfers impulse and nodal velocity back onto particles, then updates
//! position, velocity and deformation state.

use rayon::prelude::*;

use crate::config::VolumePolicy;
use crate::core::Particle;
use crate::error::{MpmError, Result};
use crate::math::{Real, Vector, identity_matrix, matrix_determinant, outer_product, zero_matrix};

/// Stage 6: FLIP update of position and velocity from nodal momentum and
/// impulse. Nodes with no mass are skipped.
pub fn update_particle_position_and_velocity(
    particles: &mut [Particle],
    node_mass: &[Real],
    node_momentum: &[Vector],
    impulse: &[Vector],
    dt: Real,
    parallel: bool,
) {
    let update = |particle: &mut Particle| {
        for (&node, &weight) in particle.node_ids.iter().zip(&particle.basis_values) {
            let mass = node_mass[node];
            if mass <= 0.0 {
                continue;
            }
            let scale = weight / mass;
            particle.position += (node_momentum[node] + impulse[node]) * (dt * scale);
            particle.velocity += impulse[node] * scale;
        }
    };

    if parallel {
        particles.par_iter_mut().for_each(update);
    } else {
        particles.iter_mut().for_each(update);
    }
}

/// Stage 8: `L = Σ_n ∇N_n ⊗ v_n`, `F += dt L F`, `V *= det(I + dt L)`.
pub fn update_particle_gradients(
    particles: &mut [Particle],
    node_velocity: &[Vector],
    dt: Real,
    parallel: bool,
) {
    let update = |particle: &mut Particle| {
        let mut velocity_gradient = zero_matrix();
        for (&node, gradient) in particle.node_ids.iter().zip(&particle.basis_gradients) {
            velocity_gradient += outer_product(gradient, &node_velocity[node]);
        }
        particle.velocity_gradient = velocity_gradient;

        let increment = velocity_gradient * dt;
        particle.deformation_gradient += increment * particle.deformation_gradient;
        particle.volume *= matrix_determinant(&(identity_matrix() + increment));
    };

    if parallel {
        particles.par_iter_mut().for_each(update);
    } else {
        particles.iter_mut().for_each(update);
    }
}

fn is_degenerate(particle: &Particle) -> bool {
    !(particle.volume.is_finite() && particle.volume > 0.0)
}

/// Apply the configured policy to particles whose volume is no longer
/// positive and finite.
pub fn check_particle_volumes(particles: &[Particle], policy: VolumePolicy, step: usize) -> Result<()> {
    match policy {
        VolumePolicy::Ignore => Ok(()),
        VolumePolicy::Abort => match particles.iter().position(is_degenerate) {
            Some(index) => Err(MpmError::DegenerateParticle {
                index,
                volume: particles[index].volume,
                step,
            }),
            None => Ok(()),
        },
        VolumePolicy::Warn => {
            let count = particles.iter().filter(|p| is_degenerate(p)).count();
            if count > 0 {
                log::warn!("{count} particles have degenerate volume after step {step}");
            }
            Ok(())
        }
    }
}
