//! Steady-state 2D heat conduction on small rectangular grids.
//!
//! The solver relaxes a temperature field with Jacobi sweeps until the largest
//! per-sweep change drops below a tolerance or an iteration cap is reached.
//! Each grid edge is either held at a fixed temperature or insulated
//! (zero normal gradient). Heat flux and grid-refinement studies are separate
//! passes over finished solutions.

pub mod boundary;
pub mod error;
pub mod flux;
pub mod grid;
pub mod refinement;
pub mod solver;

pub use boundary::{BoundarySet, Edge, EdgeCondition};
pub use error::{ConductionError, ConductionResult};
pub use flux::{
    FluxField, FluxParams, X_FLUX_FILE, Y_FLUX_FILE, boundary_heat_flow, heat_flux,
};
pub use grid::Grid;
pub use refinement::{RefinementPoint, refinement_study};
pub use solver::{
    ConductionProblem, ConductionSolution, SolverConfig, solve, solve_with_boundaries,
};
