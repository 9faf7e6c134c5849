use crate::core::Particle;
use crate::geometry::{Geometry, ParticleFill};
use crate::math::{Real, Vector};

/// Solid ball, boundary included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector,
    pub radius: Real,
    pub fill: ParticleFill,
}

impl Sphere {
    pub fn new(center: Vector, radius: Real, fill: ParticleFill) -> Self {
        Self {
            center,
            radius,
            fill,
        }
    }
}

impl Geometry for Sphere {
    fn particle_in_geometry(&self, particle: &Particle) -> bool {
        (particle.position - self.center).norm_squared() <= self.radius * self.radius
    }

    fn initialize_particle(&self, particle: &mut Particle) {
        self.fill.apply(particle);
    }
}
