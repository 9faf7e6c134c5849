use crate::core::Particle;
use crate::geometry::{Geometry, ParticleFill};
use crate::math::Vector;

/// Axis-aligned box between two corners, faces included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub min: Vector,
    pub max: Vector,
    pub fill: ParticleFill,
}

impl Cuboid {
    /// Corners may be given in any order.
    pub fn new(a: Vector, b: Vector, fill: ParticleFill) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
            fill,
        }
    }
}

impl Geometry for Cuboid {
    fn particle_in_geometry(&self, particle: &Particle) -> bool {
        (0..3).all(|d| particle.position[d] >= self.min[d] && particle.position[d] <= self.max[d])
    }

    fn initialize_particle(&self, particle: &mut Particle) {
        self.fill.apply(particle);
    }
}
