// Physical constants for MPM simulation
use crate::math::Real;

// Global physics (magnitude, acts along -z)
pub const GRAVITY: Real = 9.81;

// Default time step and candidate placement
pub const DEFAULT_TIME_STEP: Real = 1.0e-3;
pub const DEFAULT_INTERPOLATION_ORDER: usize = 2;

// Water material constants
pub const WATER_REST_DENSITY: Real = 1000.0;
pub const WATER_BULK_MODULUS: Real = 2.0e5;
pub const WATER_EOS_POWER: Real = 7.0;
pub const WATER_DYNAMIC_VISCOSITY: Real = 1.0e-3;

// Elastic solid constants
pub const RUBBER_DENSITY: Real = 1100.0;
pub const RUBBER_YOUNG_MODULUS: Real = 1.0e6;
pub const RUBBER_POISSON_RATIO: Real = 0.3;
