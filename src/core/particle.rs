//! Material particles for MPM simulation
//!
//! Particles carry position, velocity, mass, volume and deformation state,
//! plus a per-step cache of the grid nodes they interpolate from.

use crate::materials::check;
use crate::math::{
    Matrix, Real, Vector, identity_matrix, matrix_determinant, matrix_is_finite, zero_matrix,
    zero_vector,
};

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector,
    pub velocity: Vector,
    pub mass: Real,
    pub volume: Real,
    pub deformation_gradient: Matrix,
    pub velocity_gradient: Matrix,
    pub stress: Matrix,
    pub material_id: usize,

    // Interpolation cache, refilled at the start of every step
    pub node_ids: Vec<usize>,
    pub basis_values: Vec<Real>,
    pub basis_gradients: Vec<Vector>,
}

impl Default for Particle {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Particle {
    pub fn zeroed() -> Self {
        Self {
            position: zero_vector(),
            velocity: zero_vector(),
            mass: 0.0,
            volume: 0.0,
            deformation_gradient: identity_matrix(),
            velocity_gradient: zero_matrix(),
            stress: zero_matrix(),
            material_id: 0,
            node_ids: Vec::new(),
            basis_values: Vec::new(),
            basis_gradients: Vec::new(),
        }
    }

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            ..Self::zeroed()
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_volume(mut self, volume: Real) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_material(mut self, material_id: usize) -> Self {
        self.material_id = material_id;
        self
    }

    /// Density from the current volume, zero for a degenerate volume.
    #[inline(always)]
    pub fn density(&self) -> Real {
        if self.volume > 0.0 {
            self.mass / self.volume
        } else {
            0.0
        }
    }

    #[inline(always)]
    pub fn jacobian(&self) -> Real {
        matrix_determinant(&self.deformation_gradient)
    }

    #[inline(always)]
    pub fn speed(&self) -> Real {
        self.velocity.norm()
    }

    #[inline(always)]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    #[inline(always)]
    pub fn kinetic_energy(&self) -> Real {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Whether the volume is positive, every tracked quantity is finite and
    /// the deformation Jacobian is within the range the materials accept.
    pub fn is_healthy(&self) -> bool {
        self.volume.is_finite()
            && self.volume > 0.0
            && self.position.iter().all(|x| x.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && matrix_is_finite(&self.deformation_gradient)
            && check::deformation_gradient_ok(self.jacobian())
    }
}
