use std::path::PathBuf;

use crate::config::constants::{DEFAULT_TIME_STEP, GRAVITY};
use crate::error::{MpmError, Result};
use crate::math::Real;

/// What the stepper does when a particle volume stops being positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VolumePolicy {
    /// Fail the step with [`MpmError::DegenerateParticle`].
    #[default]
    Abort,
    /// Log a warning with the number of affected particles and carry on.
    Warn,
    /// Skip the check entirely.
    Ignore,
}

/// Solver parameters for controlling MPM simulation behavior
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Explicit time step size (s)
    pub time_step_size: Real,

    /// Gravitational acceleration magnitude along -z, `None` disables gravity
    pub gravity: Option<Real>,

    /// Run scatter and per-particle stages on the rayon thread pool
    pub parallel: bool,

    /// Handling of non-positive particle volumes after the gradient update
    pub volume_policy: VolumePolicy,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            time_step_size: DEFAULT_TIME_STEP,
            gravity: Some(GRAVITY),
            parallel: false,
            volume_policy: VolumePolicy::Abort,
        }
    }
}

impl SolverParams {
    /// Create solver parameters with standard gravity enabled
    pub fn with_gravity() -> Self {
        Self::default()
    }

    /// Create solver parameters with gravity disabled
    pub fn without_gravity() -> Self {
        Self {
            gravity: None,
            ..Self::default()
        }
    }

    pub fn with_time_step(mut self, time_step_size: Real) -> Self {
        self.time_step_size = time_step_size;
        self
    }

    pub fn with_gravity_magnitude(mut self, gravity: Real) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_volume_policy(mut self, volume_policy: VolumePolicy) -> Self {
        self.volume_policy = volume_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step_size.is_finite() && self.time_step_size > 0.0) {
            return Err(MpmError::InvalidParameter(format!(
                "time step size must be positive and finite, got {}",
                self.time_step_size
            )));
        }
        if let Some(gravity) = self.gravity {
            if !gravity.is_finite() {
                return Err(MpmError::InvalidParameter(format!(
                    "gravity must be finite, got {gravity}"
                )));
            }
        }
        Ok(())
    }
}

/// Length of a run and where its snapshots go.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSchedule {
    pub num_time_steps: usize,
    /// A snapshot is written every `write_frequency` steps
    pub write_frequency: usize,
    /// Base path, snapshots are named `<output_file>.csv.<index>`
    pub output_file: PathBuf,
}

impl RunSchedule {
    pub fn new(num_time_steps: usize, write_frequency: usize, output_file: impl Into<PathBuf>) -> Self {
        Self {
            num_time_steps,
            write_frequency,
            output_file: output_file.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.write_frequency == 0 {
            return Err(MpmError::InvalidParameter(
                "write frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
