//! Shared parameter packs for material families.
//!
//! These structs define the vocabulary we use when configuring families of
//! constitutive models. Validation happens once, when a model is built from
//! a pack.

use crate::config::constants;
use crate::error::{MpmError, Result};
use crate::materials::utils::{check, physics};
use crate::math::Real;

/// Parameters describing a weakly compressible fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidParams {
    pub name: &'static str,
    pub rest_density: Real,
    pub bulk_modulus: Real,
    pub eos_power: Real,
    pub dynamic_viscosity: Real,
}

impl FluidParams {
    pub const fn new(
        name: &'static str,
        rest_density: Real,
        bulk_modulus: Real,
        eos_power: Real,
        dynamic_viscosity: Real,
    ) -> Self {
        Self {
            name,
            rest_density,
            bulk_modulus,
            eos_power,
            dynamic_viscosity,
        }
    }

    pub const fn water() -> Self {
        Self::new(
            "water",
            constants::WATER_REST_DENSITY,
            constants::WATER_BULK_MODULUS,
            constants::WATER_EOS_POWER,
            constants::WATER_DYNAMIC_VISCOSITY,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if !check::density_ok(self.rest_density) {
            return Err(MpmError::InvalidMaterial(format!(
                "{}: rest density {} out of range",
                self.name, self.rest_density
            )));
        }
        if !check::bulk_modulus_ok(self.bulk_modulus) {
            return Err(MpmError::InvalidMaterial(format!(
                "{}: bulk modulus {} must be positive",
                self.name, self.bulk_modulus
            )));
        }
        if !check::viscosity_ok(self.dynamic_viscosity) {
            return Err(MpmError::InvalidMaterial(format!(
                "{}: viscosity {} out of range",
                self.name, self.dynamic_viscosity
            )));
        }
        Ok(())
    }
}

impl Default for FluidParams {
    fn default() -> Self {
        Self::water()
    }
}

/// Parameters describing an isotropic elastic solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidParams {
    pub name: &'static str,
    pub young_modulus: Real,
    pub poisson_ratio: Real,
}

impl SolidParams {
    pub const fn new(name: &'static str, young_modulus: Real, poisson_ratio: Real) -> Self {
        Self {
            name,
            young_modulus,
            poisson_ratio,
        }
    }

    pub const fn rubber() -> Self {
        Self::new(
            "rubber",
            constants::RUBBER_YOUNG_MODULUS,
            constants::RUBBER_POISSON_RATIO,
        )
    }

    /// `(lambda, mu)`
    pub fn lame(&self) -> (Real, Real) {
        physics::lame_lambda_mu(self.young_modulus, self.poisson_ratio)
    }

    pub fn validate(&self) -> Result<()> {
        if !check::young_modulus_ok(self.young_modulus) {
            return Err(MpmError::InvalidMaterial(format!(
                "{}: Young's modulus {} out of range",
                self.name, self.young_modulus
            )));
        }
        if !check::poisson_ratio_ok(self.poisson_ratio) {
            return Err(MpmError::InvalidMaterial(format!(
                "{}: Poisson ratio {} must lie in (-1, 0.5)",
                self.name, self.poisson_ratio
            )));
        }
        Ok(())
    }
}

impl Default for SolidParams {
    fn default() -> Self {
        Self::rubber()
    }
}
