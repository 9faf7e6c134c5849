//! Small-strain isotropic elasticity.

use crate::core::Particle;
use crate::error::Result;
use crate::materials::StressModel;
use crate::materials::families::SolidParams;
use crate::materials::utils::physics;
use crate::math::{Matrix, Real, identity_matrix};

#[derive(Debug, Clone, Copy)]
pub struct LinearElastic {
    params: SolidParams,
    lambda: Real,
    mu: Real,
}

impl LinearElastic {
    pub fn new(params: SolidParams) -> Result<Self> {
        params.validate()?;
        let (lambda, mu) = params.lame();
        Ok(Self { params, lambda, mu })
    }

    pub fn params(&self) -> &SolidParams {
        &self.params
    }

    /// `σ = λ tr(ε) I + 2 μ ε` with `ε = sym(F) - I`.
    pub fn stress_for(&self, deformation_gradient: &Matrix) -> Matrix {
        let strain = physics::small_strain(deformation_gradient);
        identity_matrix() * (self.lambda * strain.trace()) + strain * (2.0 * self.mu)
    }
}

impl StressModel for LinearElastic {
    fn calculate_stress(&self, particle: &mut Particle) {
        particle.stress = self.stress_for(&particle.deformation_gradient);
    }

    fn name(&self) -> &str {
        self.params.name
    }
}
