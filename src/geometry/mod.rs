//! Setup-time geometry predicates used to seed particles.

pub mod cuboid;
pub mod sphere;

pub use cuboid::Cuboid;
pub use sphere::Sphere;

use crate::core::Particle;
use crate::math::{Real, Vector, zero_vector};

/// Region of material placed at initialization.
pub trait Geometry: Send + Sync {
    fn particle_in_geometry(&self, particle: &Particle) -> bool;

    /// Assign the region's material state to an accepted candidate.
    fn initialize_particle(&self, particle: &mut Particle);
}

/// Material state written onto every particle a geometry accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFill {
    pub density: Real,
    pub velocity: Vector,
    pub material_id: usize,
}

impl ParticleFill {
    pub fn new(density: Real, material_id: usize) -> Self {
        Self {
            density,
            velocity: zero_vector(),
            material_id,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Mass follows from the candidate's seeded volume.
    pub fn apply(&self, particle: &mut Particle) {
        particle.mass = self.density * particle.volume;
        particle.velocity = self.velocity;
        particle.material_id = self.material_id;
    }
}
