use nalgebra::{Matrix3, Vector3};

pub type Real = f64;

pub type Vector = Vector3<Real>;
pub type Matrix = Matrix3<Real>;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vector::zeros()
}

#[inline(always)]
pub fn zero_matrix() -> Matrix {
    Matrix::zeros()
}

#[inline(always)]
pub fn identity_matrix() -> Matrix {
    Matrix::identity()
}

#[inline(always)]
pub fn matrix_determinant(m: &Matrix) -> Real {
    m.determinant()
}

#[inline(always)]
pub fn diagonal_from_value(value: Real) -> Matrix {
    Matrix::from_diagonal_element(value)
}

/// `a ⊗ b`, i.e. `a * bᵀ`.
#[inline(always)]
pub fn outer_product(a: &Vector, b: &Vector) -> Matrix {
    a * b.transpose()
}

#[inline(always)]
pub fn matrix_is_finite(m: &Matrix) -> bool {
    m.iter().all(|value| value.is_finite())
}
