//! Compressible Neo-Hookean hyperelasticity.

use crate::core::Particle;
use crate::error::Result;
use crate::materials::StressModel;
use crate::materials::families::SolidParams;
use crate::math::{Matrix, Real, identity_matrix, zero_matrix};

#[derive(Debug, Clone, Copy)]
pub struct NeoHookean {
    params: SolidParams,
    lambda: Real,
    mu: Real,
}

impl NeoHookean {
    pub fn new(params: SolidParams) -> Result<Self> {
        params.validate()?;
        let (lambda, mu) = params.lame();
        Ok(Self { params, lambda, mu })
    }

    pub fn params(&self) -> &SolidParams {
        &self.params
    }

    /// Cauchy stress `μ/J (F Fᵀ - I) + λ ln(J)/J I`. Inverted elements carry no stress.
    pub fn stress_for(&self, deformation_gradient: &Matrix) -> Matrix {
        let jacobian = deformation_gradient.determinant();
        if !(jacobian > 0.0 && jacobian.is_finite()) {
            return zero_matrix();
        }

        let left_cauchy_green = deformation_gradient * deformation_gradient.transpose();
        (left_cauchy_green - identity_matrix()) * (self.mu / jacobian)
            + identity_matrix() * (self.lambda * jacobian.ln() / jacobian)
    }
}

impl StressModel for NeoHookean {
    fn calculate_stress(&self, particle: &mut Particle) {
        particle.stress = self.stress_for(&particle.deformation_gradient);
    }

    fn name(&self) -> &str {
        self.params.name
    }
}
