//! Conservation and health summaries over particles and nodal fields.

use std::fmt;

use crate::core::{NodalFields, Particle};
use crate::math::{Real, Vector, zero_vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConservationReport {
    pub particle_mass: Real,
    pub grid_mass: Real,
    pub particle_momentum: Vector,
    pub grid_momentum: Vector,
    pub kinetic_energy: Real,
    pub total_volume: Real,
    pub active_nodes: usize,
    pub unhealthy_particles: usize,
}

impl ConservationReport {
    pub fn gather(particles: &[Particle], fields: &NodalFields) -> Self {
        let mut report = Self {
            particle_mass: 0.0,
            grid_mass: fields.total_mass(),
            particle_momentum: zero_vector(),
            grid_momentum: fields.total_momentum(),
            kinetic_energy: 0.0,
            total_volume: 0.0,
            active_nodes: fields.active_node_count(),
            unhealthy_particles: 0,
        };
        for p in particles {
            report.particle_mass += p.mass;
            report.particle_momentum += p.momentum();
            report.kinetic_energy += p.kinetic_energy();
            report.total_volume += p.volume;
            if !p.is_healthy() {
                report.unhealthy_particles += 1;
            }
        }
        report
    }

    /// Relative mismatch between particle and grid mass.
    pub fn mass_error(&self) -> Real {
        let scale = self.particle_mass.abs().max(Real::EPSILON);
        (self.particle_mass - self.grid_mass).abs() / scale
    }
}

impl fmt::Display for ConservationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mass {:.6e} (grid {:.6e}), momentum [{:.4e}, {:.4e}, {:.4e}], KE {:.4e}, volume {:.4e}, {} active nodes, {} unhealthy",
            self.particle_mass,
            self.grid_mass,
            self.particle_momentum.x,
            self.particle_momentum.y,
            self.particle_momentum.z,
            self.kinetic_energy,
            self.total_volume,
            self.active_nodes,
            self.unhealthy_particles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_particle_quantities() {
        let particles = vec![
            Particle::new(Vector::zeros())
                .with_mass(2.0)
                .with_volume(0.5)
                .with_velocity(Vector::new(1.0, 0.0, 0.0)),
            Particle::new(Vector::zeros())
                .with_mass(1.0)
                .with_volume(0.5)
                .with_velocity(Vector::new(0.0, 2.0, 0.0)),
        ];
        let mut fields = NodalFields::new(2);
        fields.mass = vec![1.5, 1.5];

        let report = ConservationReport::gather(&particles, &fields);

        assert_eq!(report.particle_mass, 3.0);
        assert_eq!(report.particle_momentum, Vector::new(2.0, 2.0, 0.0));
        assert_eq!(report.kinetic_energy, 3.0);
        assert_eq!(report.total_volume, 1.0);
        assert_eq!(report.active_nodes, 2);
        assert_eq!(report.mass_error(), 0.0);
    }
}
