//! Background grid for MPM simulation
//!
//! The solver only talks to the grid through the [`Grid`] trait. The
//! [`UniformGrid`] shipped here is a structured hexahedral mesh with a
//! trilinear basis on the reference cell `[-1, 1]³`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::kernel;
use crate::core::particle::Particle;
use crate::error::{MpmError, Result};
use crate::math::{Real, Vector};

/// Linear cell index, `0..total_num_cells()`.
pub type CellId = usize;

/// Number of nodes of a trilinear hexahedron
pub const NODES_PER_CELL: usize = 8;

/// Corner offsets of the hexahedral cell, node `n` sits at `CORNER_OFFSETS[n]`.
pub const CORNER_OFFSETS: [[usize; 3]; NODES_PER_CELL] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Grid faces in the order boundary conditions are stored and applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Coordinate axis the face is normal to.
    #[inline]
    pub fn axis(self) -> usize {
        self.index() / 2
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.index() % 2 == 1
    }
}

/// Grid service consumed by the solver.
pub trait Grid: Send + Sync {
    fn spatial_dimension(&self) -> usize {
        3
    }

    /// Number of candidate particles seeded per cell for an interpolation order.
    fn particles_per_cell(&self, order: usize) -> usize;

    fn total_num_cells(&self) -> usize;

    fn total_num_nodes(&self) -> usize;

    fn nodes_per_cell(&self) -> usize;

    /// Replace `candidates` with the seeded particles of `cell`.
    fn initialize_particles(&self, cell: CellId, order: usize, candidates: &mut Vec<Particle>);

    /// Cell containing the particle, `None` when it has left the grid.
    fn locate_particle(&self, particle: &Particle) -> Option<CellId>;

    fn cell_node_ids(&self, cell: CellId, node_ids: &mut Vec<usize>);

    fn map_physical_to_reference_frame(&self, particle: &Particle, cell: CellId) -> Vector;

    fn shape_function_value(&self, reference: &Vector, values: &mut Vec<Real>);

    /// Basis gradients with respect to physical coordinates.
    fn shape_function_gradient(&self, reference: &Vector, gradients: &mut Vec<Vector>);

    /// Node ids lying on a boundary face.
    fn face_node_ids(&self, face: Face) -> &[usize];
}

/// Structured grid of `nx × ny × nz` cubic cells.
#[derive(Clone, Debug)]
pub struct UniformGrid {
    num_cells: [usize; 3],
    cell_width: Real,
    origin: Vector,
    face_nodes: [Vec<usize>; 6],
    candidate_jitter: Option<(u64, Real)>,
}

impl UniformGrid {
    /// Grid anchored at the origin. Every dimension is clamped to at least one cell.
    ///
    /// `cell_width` must be positive and finite, otherwise no particle can be
    /// located. Use [`try_new`](Self::try_new) for widths from user input.
    pub fn new(num_cells: [usize; 3], cell_width: Real) -> Self {
        let num_cells = num_cells.map(|n| n.max(1));
        let mut grid = Self {
            num_cells,
            cell_width,
            origin: Vector::zeros(),
            face_nodes: Default::default(),
            candidate_jitter: None,
        };
        grid.face_nodes = Face::ALL.map(|face| grid.collect_face_nodes(face));
        grid
    }

    /// Checked form of [`new`](Self::new).
    pub fn try_new(num_cells: [usize; 3], cell_width: Real) -> Result<Self> {
        if !(cell_width.is_finite() && cell_width > 0.0) {
            return Err(MpmError::InvalidParameter(format!(
                "cell width must be positive and finite, got {cell_width}"
            )));
        }
        Ok(Self::new(num_cells, cell_width))
    }

    pub fn with_origin(mut self, origin: Vector) -> Self {
        self.origin = origin;
        self
    }

    /// Perturb seeded candidates by up to `fraction` of their sub-cell half width.
    ///
    /// Each cell draws from its own `StdRng` seeded from `seed` and the cell id,
    /// so seeding is reproducible and independent of visiting order.
    pub fn with_candidate_jitter(mut self, seed: u64, fraction: Real) -> Self {
        self.candidate_jitter = Some((seed, fraction.clamp(0.0, 1.0)));
        self
    }

    pub fn num_cells(&self) -> [usize; 3] {
        self.num_cells
    }

    pub fn num_nodes(&self) -> [usize; 3] {
        self.num_cells.map(|n| n + 1)
    }

    pub fn cell_width(&self) -> Real {
        self.cell_width
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn cell_volume(&self) -> Real {
        self.cell_width.powi(3)
    }

    /// Upper corner of the grid.
    pub fn extent(&self) -> Vector {
        self.origin
            + Vector::new(
                self.num_cells[0] as Real,
                self.num_cells[1] as Real,
                self.num_cells[2] as Real,
            ) * self.cell_width
    }

    #[inline]
    pub fn cell_id(&self, ijk: [usize; 3]) -> CellId {
        ijk[0] + self.num_cells[0] * (ijk[1] + self.num_cells[1] * ijk[2])
    }

    #[inline]
    pub fn cell_ijk(&self, cell: CellId) -> [usize; 3] {
        let [nx, ny, _] = self.num_cells;
        [cell % nx, (cell / nx) % ny, cell / (nx * ny)]
    }

    #[inline]
    pub fn node_id(&self, ijk: [usize; 3]) -> usize {
        let [nx, ny, _] = self.num_nodes();
        ijk[0] + nx * (ijk[1] + ny * ijk[2])
    }

    pub fn node_position(&self, node: usize) -> Vector {
        let [nx, ny, _] = self.num_nodes();
        let ijk = [node % nx, (node / nx) % ny, node / (nx * ny)];
        self.origin
            + Vector::new(ijk[0] as Real, ijk[1] as Real, ijk[2] as Real) * self.cell_width
    }

    fn cell_corner(&self, cell: CellId) -> Vector {
        let ijk = self.cell_ijk(cell);
        self.origin
            + Vector::new(ijk[0] as Real, ijk[1] as Real, ijk[2] as Real) * self.cell_width
    }

    fn collect_face_nodes(&self, face: Face) -> Vec<usize> {
        let dims = self.num_nodes();
        let axis = face.axis();
        let fixed = if face.is_upper() { dims[axis] - 1 } else { 0 };

        let mut nodes = Vec::new();
        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    let ijk = [i, j, k];
                    if ijk[axis] == fixed {
                        nodes.push(self.node_id(ijk));
                    }
                }
            }
        }
        nodes
    }
}

impl Grid for UniformGrid {
    fn particles_per_cell(&self, order: usize) -> usize {
        order.pow(3)
    }

    fn total_num_cells(&self) -> usize {
        self.num_cells.iter().product()
    }

    fn total_num_nodes(&self) -> usize {
        self.num_nodes().iter().product()
    }

    fn nodes_per_cell(&self) -> usize {
        NODES_PER_CELL
    }

    fn initialize_particles(&self, cell: CellId, order: usize, candidates: &mut Vec<Particle>) {
        candidates.clear();
        if order == 0 {
            return;
        }

        let corner = self.cell_corner(cell);
        let spacing = self.cell_width / order as Real;
        let volume = self.cell_volume() / self.particles_per_cell(order) as Real;
        let mut rng = self
            .candidate_jitter
            .map(|(seed, fraction)| (StdRng::seed_from_u64(seed ^ cell as u64), fraction));

        for k in 0..order {
            for j in 0..order {
                for i in 0..order {
                    let mut offset = Vector::new(
                        (i as Real + 0.5) * spacing,
                        (j as Real + 0.5) * spacing,
                        (k as Real + 0.5) * spacing,
                    );
                    if let Some((rng, fraction)) = rng.as_mut() {
                        let half = 0.5 * spacing * *fraction;
                        for d in 0..3 {
                            offset[d] += rng.random_range(-1.0..=1.0) * half;
                        }
                    }
                    candidates.push(Particle::new(corner + offset).with_volume(volume));
                }
            }
        }
    }

    fn locate_particle(&self, particle: &Particle) -> Option<CellId> {
        let mut ijk = [0usize; 3];
        for d in 0..3 {
            let scaled = (particle.position[d] - self.origin[d]) / self.cell_width;
            if !scaled.is_finite() || scaled < 0.0 || scaled > self.num_cells[d] as Real {
                return None;
            }
            // A particle on the upper face belongs to the last cell.
            ijk[d] = (scaled.floor() as usize).min(self.num_cells[d] - 1);
        }
        Some(self.cell_id(ijk))
    }

    fn cell_node_ids(&self, cell: CellId, node_ids: &mut Vec<usize>) {
        let base = self.cell_ijk(cell);
        node_ids.clear();
        node_ids.extend(
            CORNER_OFFSETS
                .iter()
                .map(|o| self.node_id([base[0] + o[0], base[1] + o[1], base[2] + o[2]])),
        );
    }

    fn map_physical_to_reference_frame(&self, particle: &Particle, cell: CellId) -> Vector {
        let local = (particle.position - self.cell_corner(cell)) / self.cell_width;
        local * 2.0 - Vector::repeat(1.0)
    }

    fn shape_function_value(&self, reference: &Vector, values: &mut Vec<Real>) {
        kernel::trilinear_values(reference, values);
    }

    fn shape_function_gradient(&self, reference: &Vector, gradients: &mut Vec<Vector>) {
        kernel::trilinear_gradients(reference, self.cell_width, gradients);
    }

    fn face_node_ids(&self, face: Face) -> &[usize] {
        &self.face_nodes[face.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_dimensions() {
        let grid = UniformGrid::new([2, 3, 4], 0.5);
        assert_eq!(grid.total_num_cells(), 24);
        assert_eq!(grid.total_num_nodes(), 3 * 4 * 5);
        assert_eq!(grid.nodes_per_cell(), 8);
        assert_eq!(grid.particles_per_cell(2), 8);
        assert_eq!(grid.extent(), Vector::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn invalid_cell_width_is_rejected() {
        for width in [0.0, -0.5, Real::NAN, Real::INFINITY] {
            assert!(matches!(
                UniformGrid::try_new([2, 2, 2], width),
                Err(MpmError::InvalidParameter(_))
            ));
        }
        assert_eq!(UniformGrid::try_new([2, 2, 2], 0.5).unwrap().cell_width(), 0.5);
    }

    #[test]
    fn cell_ids_round_trip() {
        let grid = UniformGrid::new([3, 4, 5], 1.0);
        for cell in 0..grid.total_num_cells() {
            assert_eq!(grid.cell_id(grid.cell_ijk(cell)), cell);
        }
    }

    #[test]
    fn first_cell_node_ids() {
        let grid = UniformGrid::new([2, 2, 2], 1.0);
        let mut ids = Vec::new();
        grid.cell_node_ids(0, &mut ids);
        assert_eq!(ids, vec![0, 1, 3, 4, 9, 10, 12, 13]);
    }

    #[test]
    fn locate_clamps_upper_face_and_rejects_outside() {
        let grid = UniformGrid::new([2, 2, 2], 1.0);

        let inside = Particle::new(Vector::new(1.5, 0.5, 0.2));
        assert_eq!(grid.locate_particle(&inside), Some(grid.cell_id([1, 0, 0])));

        let on_face = Particle::new(Vector::new(2.0, 2.0, 2.0));
        assert_eq!(grid.locate_particle(&on_face), Some(grid.cell_id([1, 1, 1])));

        let outside = Particle::new(Vector::new(-0.1, 0.5, 0.5));
        assert_eq!(grid.locate_particle(&outside), None);

        let beyond = Particle::new(Vector::new(0.5, 2.5, 0.5));
        assert_eq!(grid.locate_particle(&beyond), None);
    }

    #[test]
    fn cell_centre_maps_to_reference_origin() {
        let grid = UniformGrid::new([2, 2, 2], 0.5).with_origin(Vector::new(-1.0, 0.0, 0.0));
        let p = Particle::new(Vector::new(-0.75, 0.25, 0.75));
        let cell = grid.locate_particle(&p).unwrap();
        let reference = grid.map_physical_to_reference_frame(&p, cell);
        assert!(reference.norm() < 1e-12);
    }

    #[test]
    fn face_nodes_cover_each_boundary_plane() {
        let grid = UniformGrid::new([2, 3, 4], 1.0);
        assert_eq!(grid.face_node_ids(Face::NegX).len(), 4 * 5);
        assert_eq!(grid.face_node_ids(Face::PosY).len(), 3 * 5);
        assert_eq!(grid.face_node_ids(Face::PosZ).len(), 3 * 4);

        for &node in grid.face_node_ids(Face::PosX) {
            assert_eq!(grid.node_position(node).x, 2.0);
        }
        for &node in grid.face_node_ids(Face::NegZ) {
            assert_eq!(grid.node_position(node).z, 0.0);
        }
    }

    #[test]
    fn candidates_sit_on_sub_cell_centres() {
        let grid = UniformGrid::new([1, 1, 1], 1.0);
        let mut candidates = Vec::new();
        grid.initialize_particles(0, 2, &mut candidates);

        assert_eq!(candidates.len(), 8);
        assert_eq!(candidates[0].position, Vector::new(0.25, 0.25, 0.25));
        assert_eq!(candidates[7].position, Vector::new(0.75, 0.75, 0.75));
        let total_volume: Real = candidates.iter().map(|p| p.volume).sum();
        assert!((total_volume - 1.0).abs() < 1e-12);
    }

    #[test]
    fn jittered_candidates_are_reproducible_and_stay_in_cell() {
        let grid = UniformGrid::new([2, 1, 1], 1.0).with_candidate_jitter(7, 1.0);
        let mut first = Vec::new();
        let mut second = Vec::new();
        grid.initialize_particles(1, 3, &mut first);
        grid.initialize_particles(1, 3, &mut second);

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.position, b.position);
            assert_eq!(grid.locate_particle(a), Some(1));
        }
    }
}
