//! Helper functions for materials
//!
//! Math and utility functions that different materials can use.

/// Physics parameter conversions shared by the constitutive models
pub mod physics {
    use crate::math::{Matrix, Real, diagonal_from_value};

    /// Computes the Lamé parameters (lambda, mu) from Young's modulus and Poisson ratio
    #[inline]
    pub fn lame_lambda_mu(young_modulus: Real, poisson_ratio: Real) -> (Real, Real) {
        let lambda =
            young_modulus * poisson_ratio / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio));
        let mu = shear_modulus(young_modulus, poisson_ratio);
        (lambda, mu)
    }

    /// Shear modulus (mu) from Young's modulus and Poisson ratio
    #[inline]
    pub fn shear_modulus(young_modulus: Real, poisson_ratio: Real) -> Real {
        young_modulus / (2.0 * (1.0 + poisson_ratio))
    }

    /// Symmetric part of a velocity gradient
    #[inline]
    pub fn strain_rate(velocity_gradient: &Matrix) -> Matrix {
        (velocity_gradient + velocity_gradient.transpose()) * 0.5
    }

    /// Small-strain tensor `sym(F) - I`
    #[inline]
    pub fn small_strain(deformation_gradient: &Matrix) -> Matrix {
        strain_rate(deformation_gradient) - Matrix::identity()
    }

    /// Extracts deviatoric part of tensor (removes spherical part)
    #[inline]
    pub fn deviatoric_part(tensor: &Matrix) -> Matrix {
        tensor - diagonal_from_value(spherical_part(tensor))
    }

    /// Extracts spherical part of tensor (mean of diagonal)
    #[inline]
    pub fn spherical_part(tensor: &Matrix) -> Real {
        tensor.trace() / 3.0
    }
}

/// Check if material properties make sense
pub mod check {
    use crate::math::Real;

    #[inline]
    pub fn density_ok(density: Real) -> bool {
        density > 0.0 && density < 50000.0 && density.is_finite()
    }

    #[inline]
    pub fn viscosity_ok(viscosity: Real) -> bool {
        viscosity >= 0.0 && viscosity < 1e6 && viscosity.is_finite()
    }

    /// Check if deformation gradient determinant is reasonable
    #[inline]
    pub fn deformation_gradient_ok(det: Real) -> bool {
        det > 1e-6 && det < 1e6 && det.is_finite()
    }

    /// Check if Young's modulus is physically reasonable
    #[inline]
    pub fn young_modulus_ok(e: Real) -> bool {
        e > 0.0 && e < 1e12 && e.is_finite()
    }

    /// Check if Poisson ratio is in valid range
    #[inline]
    pub fn poisson_ratio_ok(nu: Real) -> bool {
        nu > -1.0 && nu < 0.5 && nu.is_finite()
    }

    #[inline]
    pub fn bulk_modulus_ok(k: Real) -> bool {
        k > 0.0 && k.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Matrix, Real};

    #[test]
    fn lame_parameters_for_steel_like_solid() {
        let (lambda, mu) = physics::lame_lambda_mu(200e9, 0.3);
        assert!((mu - 76.923e9).abs() / mu < 1e-4);
        assert!((lambda - 115.385e9).abs() / lambda < 1e-4);
    }

    #[test]
    fn deviatoric_part_is_traceless() {
        let tensor = Matrix::new(3.0, 1.0, 0.0, 1.0, 5.0, 2.0, 0.0, 2.0, 7.0);
        let deviatoric = physics::deviatoric_part(&tensor);

        assert!(deviatoric.trace().abs() < 1e-12);
        assert_eq!(physics::spherical_part(&tensor), 5.0);
        assert_eq!(deviatoric[(0, 1)], 1.0);
    }

    #[test]
    fn checks_reject_nonsense() {
        assert!(!check::poisson_ratio_ok(0.5));
        assert!(!check::young_modulus_ok(-1.0));
        assert!(!check::density_ok(Real::NAN));
        assert!(check::deformation_gradient_ok(1.0));
        assert!(!check::deformation_gradient_ok(0.0));
    }
}
