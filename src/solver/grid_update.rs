//! Grid-side updates between the two transfers.

use crate::core::{BoundaryConditions, Grid, Particle};
use crate::math::{Real, Vector};
use crate::solver::p2g::splat_momentum;

/// Stage 5: `I_n = dt f_n`, less `dt m_n g` on z when gravity is on, then the
/// impulse boundary conditions.
pub fn calculate_nodal_impulse(
    grid: &dyn Grid,
    boundaries: &BoundaryConditions,
    node_mass: &[Real],
    node_force: &[Vector],
    gravity: Option<Real>,
    dt: Real,
    impulse: &mut [Vector],
) {
    for ((i, &f), &m) in impulse.iter_mut().zip(node_force).zip(node_mass) {
        *i = f * dt;
        if let Some(g) = gravity {
            i.z -= dt * m * g;
        }
    }
    boundaries.apply_impulse(grid, node_mass, impulse);
}

/// Stage 7: re-splat momentum from the updated particle velocities and divide
/// by nodal mass. Massless nodes get zero velocity. Momentum boundary
/// conditions are applied to the result.
pub fn calculate_nodal_velocity(
    grid: &dyn Grid,
    boundaries: &BoundaryConditions,
    particles: &[Particle],
    node_mass: &[Real],
    node_velocity: &mut [Vector],
    parallel: bool,
) {
    splat_momentum(particles, node_velocity, parallel);
    for (v, &m) in node_velocity.iter_mut().zip(node_mass) {
        if m > 0.0 {
            *v /= m;
        } else {
            *v = Vector::zeros();
        }
    }
    boundaries.apply_momentum(grid, node_mass, node_velocity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::locate_particles;
    use crate::core::{BoundaryHandling, Face, UniformGrid};
    use crate::solver::p2g::{calculate_nodal_mass, calculate_nodal_momentum};

    #[test]
    fn impulse_includes_gravity_only_when_enabled() {
        let grid = UniformGrid::new([1, 1, 1], 1.0);
        let n = grid.total_num_nodes();
        let mass = vec![2.0; n];
        let force = vec![Vector::new(1.0, 0.0, 0.0); n];
        let boundaries = BoundaryConditions::open();

        let mut impulse = vec![Vector::zeros(); n];
        calculate_nodal_impulse(&grid, &boundaries, &mass, &force, Some(10.0), 0.1, &mut impulse);
        assert!((impulse[0] - Vector::new(0.1, 0.0, -2.0)).norm() < 1e-12);

        calculate_nodal_impulse(&grid, &boundaries, &mass, &force, None, 0.1, &mut impulse);
        assert!((impulse[0] - Vector::new(0.1, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn impulse_respects_stick_walls() {
        let grid = UniformGrid::new([2, 2, 2], 1.0);
        let n = grid.total_num_nodes();
        let mass = vec![1.0; n];
        let force = vec![Vector::repeat(1.0); n];
        let boundaries = BoundaryConditions::uniform(BoundaryHandling::Stick);
        let mut impulse = vec![Vector::zeros(); n];

        calculate_nodal_impulse(&grid, &boundaries, &mass, &force, Some(9.81), 0.01, &mut impulse);

        for face in Face::ALL {
            for &node in grid.face_node_ids(face) {
                assert_eq!(impulse[node], Vector::zeros());
            }
        }
        // The single interior node of a 2x2x2 grid is untouched.
        let centre = grid.node_id([1, 1, 1]);
        assert!(impulse[centre].norm() > 0.0);
    }

    #[test]
    fn massless_nodes_have_zero_velocity() {
        let grid = UniformGrid::new([2, 1, 1], 1.0);
        let mut particles = vec![
            Particle::new(Vector::new(0.5, 0.5, 0.5))
                .with_mass(1.0)
                .with_velocity(Vector::new(1.0, 2.0, 3.0)),
        ];
        locate_particles(&grid, &mut particles, false).unwrap();

        let n = grid.total_num_nodes();
        let mut mass = vec![0.0; n];
        calculate_nodal_mass(&particles, &mut mass, false);
        let mut velocity = vec![Vector::repeat(7.0); n];
        calculate_nodal_velocity(
            &grid,
            &BoundaryConditions::open(),
            &particles,
            &mass,
            &mut velocity,
            false,
        );

        for node in 0..n {
            if mass[node] > 0.0 {
                assert!((velocity[node] - Vector::new(1.0, 2.0, 3.0)).norm() < 1e-12);
            } else {
                assert_eq!(velocity[node], Vector::zeros());
            }
        }
        assert!(mass.iter().any(|&m| m == 0.0));
    }

    #[test]
    fn velocity_uses_updated_particle_velocities() {
        let grid = UniformGrid::new([2, 1, 1], 1.0);
        let mut particles = vec![
            Particle::new(Vector::new(0.5, 0.5, 0.5))
                .with_mass(1.0)
                .with_velocity(Vector::new(1.0, 0.0, 0.0)),
            Particle::new(Vector::new(1.5, 0.5, 0.5))
                .with_mass(1.0)
                .with_velocity(Vector::new(-1.0, 0.0, 0.0)),
        ];
        locate_particles(&grid, &mut particles, false).unwrap();

        let n = grid.total_num_nodes();
        let boundaries = BoundaryConditions::open();
        let mut mass = vec![0.0; n];
        let mut momentum = vec![Vector::zeros(); n];
        calculate_nodal_mass(&particles, &mut mass, false);
        calculate_nodal_momentum(&grid, &boundaries, &particles, &mass, &mut momentum, false);

        // Stand-in for the FLIP update between the two splats.
        particles[0].velocity = Vector::new(0.0, 0.0, 2.0);
        particles[1].velocity = Vector::new(0.0, 0.0, -2.0);

        let mut velocity = vec![Vector::zeros(); n];
        calculate_nodal_velocity(&grid, &boundaries, &particles, &mass, &mut velocity, false);

        let left = grid.node_id([0, 0, 0]);
        let shared = grid.node_id([1, 0, 0]);
        let right = grid.node_id([2, 0, 0]);
        assert!((velocity[left] - Vector::new(0.0, 0.0, 2.0)).norm() < 1e-12);
        assert!((velocity[right] - Vector::new(0.0, 0.0, -2.0)).norm() < 1e-12);
        assert!(velocity[shared].norm() < 1e-12);
        assert!((momentum[left] / mass[left] - Vector::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }
}
