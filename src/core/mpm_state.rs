use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{RunSchedule, SolverParams};
use crate::diagnostics::ConservationReport;
use crate::error::{MpmError, Result};
use crate::geometry::Geometry;
use crate::io::snapshot;
use crate::materials::MaterialLibrary;
use crate::math::Real;
use crate::solver::{
    calculate_internal_nodal_forces, calculate_nodal_impulse, calculate_nodal_mass,
    calculate_nodal_momentum, calculate_nodal_velocity, check_particle_volumes,
    update_particle_gradients, update_particle_position_and_velocity,
    update_particle_stress_strain,
};

use super::boundary::BoundaryConditions;
use super::grid::Grid;
use super::kernel::locate_particles;
use super::nodal_fields::NodalFields;
use super::particle::Particle;

/// Outcome of [`MpmState::solve`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub final_time: Real,
    pub snapshots: Vec<PathBuf>,
}

/// Aggregate simulation state for the solver.
///
/// Owns the particles and nodal buffers; the grid, boundary set and material
/// library are read-only while stepping.
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct MpmState {
    grid: Arc<dyn Grid>,
    particles: Vec<Particle>,
    boundaries: BoundaryConditions,
    materials: MaterialLibrary,
    params: SolverParams,
    fields: NodalFields,
    time: Real,
    step: usize,
}

impl MpmState {
    pub fn new(grid: Arc<dyn Grid>, params: SolverParams) -> Result<Self> {
        params.validate()?;
        let fields = NodalFields::new(grid.total_num_nodes());
        Ok(Self {
            grid,
            particles: Vec::new(),
            boundaries: BoundaryConditions::default(),
            materials: MaterialLibrary::new(),
            params,
            fields,
            time: 0.0,
            step: 0,
        })
    }

    pub fn set_boundary_conditions(&mut self, boundaries: BoundaryConditions) {
        self.boundaries = boundaries;
    }

    pub fn set_material_models(&mut self, materials: MaterialLibrary) {
        self.materials = materials;
    }

    pub fn with_boundary_conditions(mut self, boundaries: BoundaryConditions) -> Self {
        self.set_boundary_conditions(boundaries);
        self
    }

    pub fn with_material_models(mut self, materials: MaterialLibrary) -> Self {
        self.set_material_models(materials);
        self
    }

    /// Seed particles cell by cell. Each candidate goes to the first geometry
    /// that contains it; candidates outside every geometry are dropped.
    ///
    /// Returns the number of particles added.
    pub fn initialize(&mut self, geometries: &[&dyn Geometry], order: usize) -> Result<usize> {
        if order == 0 {
            return Err(MpmError::InvalidParameter(
                "particle seeding order must be at least 1".to_string(),
            ));
        }

        let expected = self.grid.particles_per_cell(order);
        let mut candidates = Vec::with_capacity(expected);
        let mut committed = 0;

        for cell in 0..self.grid.total_num_cells() {
            self.grid.initialize_particles(cell, order, &mut candidates);
            if candidates.len() != expected {
                return Err(MpmError::InvalidParameter(format!(
                    "cell {cell} produced {} candidates, expected {expected} for order {order}",
                    candidates.len()
                )));
            }

            for mut candidate in candidates.drain(..) {
                if let Some(geometry) = geometries
                    .iter()
                    .find(|geometry| geometry.particle_in_geometry(&candidate))
                {
                    geometry.initialize_particle(&mut candidate);
                    self.particles.push(candidate);
                    committed += 1;
                }
            }
        }

        log::info!(
            "Initialized {committed} particles from {} cells ({expected} candidates per cell)",
            self.grid.total_num_cells()
        );
        Ok(committed)
    }

    /// Advance one explicit time step.
    ///
    /// An `Err` can leave particles partially updated by the stages that
    /// already ran, while `time` and `step_index` keep their old values. The
    /// state should be dropped rather than stepped again.
    pub fn step(&mut self) -> Result<()> {
        let dt = self.params.time_step_size;
        let parallel = self.params.parallel;
        let grid = self.grid.as_ref();
        let fields = &mut self.fields;
        let step = self.step;

        log::trace!("step {step}: locate particles");
        locate_particles(grid, &mut self.particles, parallel)?;

        log::trace!("step {step}: particle to grid");
        calculate_nodal_mass(&self.particles, &mut fields.mass, parallel);
        calculate_nodal_momentum(
            grid,
            &self.boundaries,
            &self.particles,
            &fields.mass,
            &mut fields.momentum,
            parallel,
        );
        calculate_internal_nodal_forces(
            &self.particles,
            self.materials.len(),
            &mut fields.internal_force,
            parallel,
        )?;

        log::trace!("step {step}: grid update");
        calculate_nodal_impulse(
            grid,
            &self.boundaries,
            &fields.mass,
            &fields.internal_force,
            self.params.gravity,
            dt,
            &mut fields.impulse,
        );

        log::trace!("step {step}: grid to particle");
        update_particle_position_and_velocity(
            &mut self.particles,
            &fields.mass,
            &fields.momentum,
            &fields.impulse,
            dt,
            parallel,
        );
        calculate_nodal_velocity(
            grid,
            &self.boundaries,
            &self.particles,
            &fields.mass,
            &mut fields.velocity,
            parallel,
        );
        update_particle_gradients(&mut self.particles, &fields.velocity, dt, parallel);
        check_particle_volumes(&self.particles, self.params.volume_policy, step)?;

        log::trace!("step {step}: stress update");
        update_particle_stress_strain(&mut self.particles, &self.materials, parallel)?;

        self.time += dt;
        self.step += 1;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("step {}: {}", self.step, self.conservation_report());
        }
        Ok(())
    }

    /// Run the schedule: snapshot 0, then a snapshot every `write_frequency`
    /// steps, then one final snapshot.
    pub fn solve(&mut self, schedule: &RunSchedule) -> Result<RunSummary> {
        schedule.validate()?;
        let base = schedule.output_file.as_path();

        let mut snapshots = vec![self.write_time_step_to_file(base, 0)?];
        let mut write_step = 0;

        for step in 0..schedule.num_time_steps {
            self.step()?;
            if (step + 1) % schedule.write_frequency == 0 {
                log::info!(
                    "Time Step {}/{}: {} (s)",
                    step + 1,
                    schedule.num_time_steps,
                    self.time
                );
                write_step += 1;
                snapshots.push(self.write_time_step_to_file(base, write_step)?);
            }
        }
        snapshots.push(self.write_time_step_to_file(base, write_step + 1)?);

        Ok(RunSummary {
            steps: schedule.num_time_steps,
            final_time: self.time,
            snapshots,
        })
    }

    pub fn write_time_step_to_file(&self, base: &Path, step: usize) -> Result<PathBuf> {
        snapshot::write_time_step_to_file(base, step, &self.particles)
    }

    pub fn conservation_report(&self) -> ConservationReport {
        ConservationReport::gather(&self.particles, &self.fields)
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn nodal_fields(&self) -> &NodalFields {
        &self.fields
    }

    pub fn grid(&self) -> &dyn Grid {
        self.grid.as_ref()
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.boundaries
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn time(&self) -> Real {
        self.time
    }

    pub fn step_index(&self) -> usize {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{CellId, Face, UniformGrid};
    use crate::geometry::{Cuboid, ParticleFill, Sphere};
    use crate::materials::NoStress;
    use crate::math::Vector;

    fn state(cells: usize) -> MpmState {
        let grid = Arc::new(UniformGrid::new([cells; 3], 1.0));
        MpmState::new(grid, SolverParams::without_gravity())
            .unwrap()
            .with_material_models(MaterialLibrary::new().with(NoStress).unwrap())
    }

    #[test]
    fn order_zero_is_rejected() {
        let mut state = state(1);
        let cube = Cuboid::new(Vector::zeros(), Vector::repeat(1.0), ParticleFill::new(1.0, 0));
        assert!(matches!(
            state.initialize(&[&cube], 0),
            Err(MpmError::InvalidParameter(_))
        ));
    }

    #[test]
    fn full_cover_keeps_every_candidate() {
        let mut state = state(2);
        let cube = Cuboid::new(Vector::zeros(), Vector::repeat(2.0), ParticleFill::new(10.0, 0));

        let count = state.initialize(&[&cube], 2).unwrap();

        assert_eq!(count, 8 * 8);
        let total_mass: Real = state.particles().iter().map(|p| p.mass).sum();
        assert!((total_mass - 80.0).abs() < 1e-9);
    }

    #[test]
    fn first_matching_geometry_wins() {
        let mut state = state(2);
        let sphere = Sphere::new(Vector::repeat(1.0), 0.6, ParticleFill::new(5.0, 1));
        let cube = Cuboid::new(Vector::zeros(), Vector::repeat(2.0), ParticleFill::new(1.0, 0));

        state.initialize(&[&sphere, &cube], 2).unwrap();

        for p in state.particles() {
            let in_sphere = (p.position - Vector::repeat(1.0)).norm() <= 0.6;
            assert_eq!(p.material_id, usize::from(in_sphere));
        }
        assert!(state.particles().iter().any(|p| p.material_id == 1));
    }

    /// Delegates to a uniform grid but declares one candidate too many.
    struct Miscounting(UniformGrid);

    impl Grid for Miscounting {
        fn particles_per_cell(&self, order: usize) -> usize {
            self.0.particles_per_cell(order) + 1
        }
        fn total_num_cells(&self) -> usize {
            self.0.total_num_cells()
        }
        fn total_num_nodes(&self) -> usize {
            self.0.total_num_nodes()
        }
        fn nodes_per_cell(&self) -> usize {
            self.0.nodes_per_cell()
        }
        fn initialize_particles(&self, cell: CellId, order: usize, candidates: &mut Vec<Particle>) {
            self.0.initialize_particles(cell, order, candidates)
        }
        fn locate_particle(&self, particle: &Particle) -> Option<CellId> {
            self.0.locate_particle(particle)
        }
        fn cell_node_ids(&self, cell: CellId, node_ids: &mut Vec<usize>) {
            self.0.cell_node_ids(cell, node_ids)
        }
        fn map_physical_to_reference_frame(&self, particle: &Particle, cell: CellId) -> Vector {
            self.0.map_physical_to_reference_frame(particle, cell)
        }
        fn shape_function_value(&self, reference: &Vector, values: &mut Vec<Real>) {
            self.0.shape_function_value(reference, values)
        }
        fn shape_function_gradient(&self, reference: &Vector, gradients: &mut Vec<Vector>) {
            self.0.shape_function_gradient(reference, gradients)
        }
        fn face_node_ids(&self, face: Face) -> &[usize] {
            self.0.face_node_ids(face)
        }
    }

    #[test]
    fn candidate_count_mismatch_is_rejected() {
        let grid = Arc::new(Miscounting(UniformGrid::new([1, 1, 1], 1.0)));
        let mut state = MpmState::new(grid, SolverParams::default()).unwrap();
        let cube = Cuboid::new(Vector::zeros(), Vector::repeat(1.0), ParticleFill::new(1.0, 0));

        assert!(matches!(
            state.initialize(&[&cube], 2),
            Err(MpmError::InvalidParameter(_))
        ));
    }

    #[test]
    fn step_advances_clock() {
        let mut state = state(1);
        state.add_particle(Particle::new(Vector::repeat(0.5)).with_mass(1.0).with_volume(1.0));

        state.step().unwrap();
        state.step().unwrap();

        assert_eq!(state.step_index(), 2);
        assert!((state.time() - 2.0 * state.params().time_step_size).abs() < 1e-15);
    }

    #[test]
    fn missing_material_aborts_step() {
        let grid = Arc::new(UniformGrid::new([1, 1, 1], 1.0));
        let mut state = MpmState::new(grid, SolverParams::default()).unwrap();
        state.add_particle(Particle::new(Vector::repeat(0.5)).with_mass(1.0).with_volume(1.0));

        assert!(matches!(state.step(), Err(MpmError::UnknownMaterial { .. })));
    }

    #[test]
    fn degenerate_volume_aborts_without_advancing_clock() {
        let mut state = state(1);
        state.add_particle(Particle::new(Vector::repeat(0.5)).with_mass(1.0).with_volume(0.0));

        assert!(matches!(
            state.step(),
            Err(MpmError::DegenerateParticle { index: 0, step: 0, .. })
        ));
        assert_eq!(state.step_index(), 0);
        assert_eq!(state.time(), 0.0);
    }

    #[test]
    fn escaped_particle_aborts_step() {
        let mut state = state(1);
        state.add_particle(Particle::new(Vector::repeat(1.5)).with_mass(1.0).with_volume(1.0));

        assert!(matches!(state.step(), Err(MpmError::ParticleOutsideGrid { index: 0, .. })));
    }
}
