//! Water fluid material
//!
//! Tait equation of state for pressure plus Newtonian viscosity.

use crate::core::Particle;
use crate::error::Result;
use crate::materials::StressModel;
use crate::materials::families::FluidParams;
use crate::materials::utils::physics;
use crate::math::{Matrix, Real, identity_matrix, zero_matrix};

#[derive(Debug, Clone, Copy)]
pub struct Water {
    params: FluidParams,
}

impl Water {
    pub fn new(params: FluidParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    /// Tait pressure `K ((1/J)^γ - 1)` for a volume ratio `J`.
    pub fn pressure(&self, jacobian: Real) -> Real {
        self.params.bulk_modulus * (jacobian.powf(-self.params.eos_power) - 1.0)
    }
}

impl Default for Water {
    fn default() -> Self {
        Self {
            params: FluidParams::water(),
        }
    }
}

/// Cauchy stress of a weakly compressible Newtonian fluid.
pub fn calculate_stress(particle: &Particle, fluid: &Water) -> Matrix {
    let jacobian = particle.jacobian();
    if !(jacobian > 0.0 && jacobian.is_finite()) {
        return zero_matrix();
    }

    let pressure = fluid.pressure(jacobian);
    let strain_rate = physics::strain_rate(&particle.velocity_gradient);
    let viscous = physics::deviatoric_part(&strain_rate) * (2.0 * fluid.params.dynamic_viscosity);

    identity_matrix() * -pressure + viscous
}

impl StressModel for Water {
    fn calculate_stress(&self, particle: &mut Particle) {
        particle.stress = calculate_stress(particle, self);
    }

    fn name(&self) -> &str {
        self.params.name
    }
}
