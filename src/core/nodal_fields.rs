use crate::math::{Real, Vector};

/// Per-step nodal buffers, one entry per grid node.
///
/// Every stage that produces a field zero-fills it before accumulating, so
/// nothing carries over from one step to the next.
#[derive(Clone, Debug, Default)]
pub struct NodalFields {
    pub mass: Vec<Real>,
    pub momentum: Vec<Vector>,
    pub impulse: Vec<Vector>,
    pub internal_force: Vec<Vector>,
    pub velocity: Vec<Vector>,
}

impl NodalFields {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            mass: vec![0.0; num_nodes],
            momentum: vec![Vector::zeros(); num_nodes],
            impulse: vec![Vector::zeros(); num_nodes],
            internal_force: vec![Vector::zeros(); num_nodes],
            velocity: vec![Vector::zeros(); num_nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn total_mass(&self) -> Real {
        self.mass.iter().sum()
    }

    pub fn total_momentum(&self) -> Vector {
        self.momentum.iter().sum()
    }

    /// Number of nodes that received mass this step.
    pub fn active_node_count(&self) -> usize {
        self.mass.iter().filter(|&&m| m > 0.0).count()
    }
}
