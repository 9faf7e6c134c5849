use rayon::prelude::*;

use crate::core::Particle;
use crate::error::{MpmError, Result};
use crate::materials::MaterialLibrary;

fn update_one(materials: &MaterialLibrary, index: usize, particle: &mut Particle) -> Result<()> {
    let model = materials
        .get(particle.material_id)
        .ok_or(MpmError::UnknownMaterial {
            particle: index,
            material_id: particle.material_id,
            available: materials.len(),
        })?;
    model.calculate_stress(particle);
    Ok(())
}

/// Stage 9: each particle's material recomputes its stress.
pub fn update_particle_stress_strain(
    particles: &mut [Particle],
    materials: &MaterialLibrary,
    parallel: bool,
) -> Result<()> {
    if parallel {
        particles
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, particle)| update_one(materials, index, particle))
    } else {
        particles
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, particle)| update_one(materials, index, particle))
    }
}
