//! Boundary conditions applied to nodal fields, one operator per grid face.

use std::sync::Arc;

use crate::core::grid::{Face, Grid};
use crate::error::{MpmError, Result};
use crate::math::{Real, Vector};

/// Per-face operator over nodal vector fields. Both methods mutate `field` in place.
pub trait BoundaryCondition: Send + Sync {
    fn evaluate_momentum_condition(
        &self,
        grid: &dyn Grid,
        face: Face,
        node_mass: &[Real],
        field: &mut [Vector],
    );

    fn evaluate_impulse_condition(
        &self,
        grid: &dyn Grid,
        face: Face,
        node_mass: &[Real],
        impulse: &mut [Vector],
    );
}

// Boundary handling modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryHandling {
    Stick, // No-slip wall, every component vanishes on the face
    Slip,  // Free-slip wall, only the face-normal component vanishes
    None,  // Open face
}

impl BoundaryHandling {
    fn apply(self, grid: &dyn Grid, face: Face, field: &mut [Vector]) {
        match self {
            BoundaryHandling::Stick => {
                for &node in grid.face_node_ids(face) {
                    field[node] = Vector::zeros();
                }
            }
            BoundaryHandling::Slip => {
                let axis = face.axis();
                for &node in grid.face_node_ids(face) {
                    field[node][axis] = 0.0;
                }
            }
            BoundaryHandling::None => {}
        }
    }
}

impl BoundaryCondition for BoundaryHandling {
    fn evaluate_momentum_condition(
        &self,
        grid: &dyn Grid,
        face: Face,
        _node_mass: &[Real],
        field: &mut [Vector],
    ) {
        self.apply(grid, face, field);
    }

    fn evaluate_impulse_condition(
        &self,
        grid: &dyn Grid,
        face: Face,
        _node_mass: &[Real],
        impulse: &mut [Vector],
    ) {
        self.apply(grid, face, impulse);
    }
}

/// Exactly six boundary operators, stored in [`Face::ALL`] order.
#[derive(Clone)]
pub struct BoundaryConditions {
    faces: [Arc<dyn BoundaryCondition>; 6],
}

impl BoundaryConditions {
    pub fn new(faces: [Arc<dyn BoundaryCondition>; 6]) -> Self {
        Self { faces }
    }

    /// Same handling on every face.
    pub fn uniform(handling: BoundaryHandling) -> Self {
        let condition: Arc<dyn BoundaryCondition> = Arc::new(handling);
        Self {
            faces: std::array::from_fn(|_| Arc::clone(&condition)),
        }
    }

    /// Open on every face.
    pub fn open() -> Self {
        Self::uniform(BoundaryHandling::None)
    }

    pub fn set(&mut self, face: Face, condition: Arc<dyn BoundaryCondition>) {
        self.faces[face.index()] = condition;
    }

    pub fn get(&self, face: Face) -> &dyn BoundaryCondition {
        self.faces[face.index()].as_ref()
    }

    pub fn apply_momentum(&self, grid: &dyn Grid, node_mass: &[Real], field: &mut [Vector]) {
        for face in Face::ALL {
            self.get(face)
                .evaluate_momentum_condition(grid, face, node_mass, field);
        }
    }

    pub fn apply_impulse(&self, grid: &dyn Grid, node_mass: &[Real], impulse: &mut [Vector]) {
        for face in Face::ALL {
            self.get(face)
                .evaluate_impulse_condition(grid, face, node_mass, impulse);
        }
    }
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self::open()
    }
}

impl TryFrom<Vec<Arc<dyn BoundaryCondition>>> for BoundaryConditions {
    type Error = MpmError;

    fn try_from(conditions: Vec<Arc<dyn BoundaryCondition>>) -> Result<Self> {
        let count = conditions.len();
        let faces: [Arc<dyn BoundaryCondition>; 6] = conditions
            .try_into()
            .map_err(|_| MpmError::BoundaryCount(count))?;
        Ok(Self { faces })
    }
}
