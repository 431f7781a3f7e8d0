//! Jacobi relaxation for steady 2D conduction.

use crate::boundary::BoundarySet;
use crate::error::{ConductionError, ConductionResult};
use crate::grid::Grid;
use at_core::numeric::{Real, ensure_positive};
use nalgebra::DMatrix;
use tracing::{debug, warn};

/// Stopping rule for the relaxation loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stop once the largest per-sweep change is at or below this
    pub tolerance: Real,
    /// Hard cap on sweeps
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 10_000,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> ConductionResult<()> {
        ensure_positive(self.tolerance, "tolerance")?;
        if self.max_iterations == 0 {
            return Err(ConductionError::invalid("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Insulated plate: left and top edges fixed, right and bottom insulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductionProblem {
    pub nx: usize,
    pub ny: usize,
    /// Physical length spanned by the `nx - 1` row intervals (m)
    pub domain_length: Real,
    pub left_value: Real,
    pub top_value: Real,
    pub config: SolverConfig,
}

impl Default for ConductionProblem {
    fn default() -> Self {
        Self {
            nx: 10,
            ny: 10,
            domain_length: 0.25,
            left_value: 600.0,
            top_value: 150.0,
            config: SolverConfig::default(),
        }
    }
}

impl ConductionProblem {
    pub fn boundaries(&self) -> BoundarySet {
        BoundarySet::plate(self.left_value, self.top_value)
    }

    /// Same problem on a square `n x n` grid.
    pub fn with_size(&self, n: usize) -> Self {
        Self {
            nx: n,
            ny: n,
            ..*self
        }
    }
}

/// Converged (or capped) temperature field.
#[derive(Debug, Clone)]
pub struct ConductionSolution {
    pub grid: Grid,
    pub boundaries: BoundarySet,
    /// Sweeps performed
    pub iterations: usize,
    /// Largest interior change in the last sweep
    pub final_error: Real,
    pub config: SolverConfig,
}

impl ConductionSolution {
    /// The last sweep met the tolerance.
    pub fn converged(&self) -> bool {
        self.final_error <= self.config.tolerance
    }

    /// The loop stopped on the iteration cap without meeting the tolerance.
    pub fn hit_iteration_cap(&self) -> bool {
        self.iterations >= self.config.max_iterations && !self.converged()
    }

    pub fn max_temperature(&self) -> Real {
        self.grid.max()
    }

    pub fn field(&self) -> &DMatrix<Real> {
        self.grid.field()
    }
}

/// Solve the insulated-plate problem.
pub fn solve(problem: &ConductionProblem) -> ConductionResult<ConductionSolution> {
    solve_with_boundaries(
        problem.nx,
        problem.ny,
        problem.domain_length,
        &problem.boundaries(),
        &problem.config,
    )
}

/// Solve with an arbitrary fixed/insulated edge configuration.
///
/// Returns normally when the iteration cap is reached; inspect
/// [`ConductionSolution::converged`] to tell the two outcomes apart.
pub fn solve_with_boundaries(
    nx: usize,
    ny: usize,
    domain_length: Real,
    boundaries: &BoundarySet,
    config: &SolverConfig,
) -> ConductionResult<ConductionSolution> {
    config.validate()?;
    boundaries.validate()?;
    let mut grid = Grid::new(nx, ny, domain_length)?;

    debug!(
        nx,
        ny,
        domain_length,
        tolerance = config.tolerance,
        max_iterations = config.max_iterations,
        "conduction solve started"
    );

    boundaries.apply_fixed(grid.field_mut());

    let mut next = grid.field().clone();
    let mut error = Real::INFINITY;
    let mut iterations = 0;

    while error > config.tolerance && iterations < config.max_iterations {
        next.copy_from(grid.field());
        error = jacobi_sweep(grid.field(), &mut next);
        boundaries.apply_insulated(&mut next);
        std::mem::swap(grid.field_mut(), &mut next);
        iterations += 1;
    }

    if error > config.tolerance {
        warn!(
            iterations,
            error,
            tolerance = config.tolerance,
            "conduction solve stopped at iteration cap"
        );
    } else {
        debug!(iterations, error, "conduction solve converged");
    }

    Ok(ConductionSolution {
        grid,
        boundaries: *boundaries,
        iterations,
        final_error: error,
        config: *config,
    })
}

/// One Jacobi sweep over interior cells, reading only `current`.
///
/// Returns the largest absolute change.
fn jacobi_sweep(current: &DMatrix<Real>, next: &mut DMatrix<Real>) -> Real {
    let (nx, ny) = current.shape();
    let mut error: Real = 0.0;

    for i in 1..nx - 1 {
        for j in 1..ny - 1 {
            let value = 0.25
                * (current[(i + 1, j)]
                    + current[(i - 1, j)]
                    + current[(i, j + 1)]
                    + current[(i, j - 1)]);
            next[(i, j)] = value;
            error = error.max((value - current[(i, j)]).abs());
        }
    }

    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::EdgeCondition;

    #[test]
    fn single_sweep_averages_previous_field() {
        let current = DMatrix::from_row_slice(3, 3, &[
            0.0, 4.0, 0.0, //
            8.0, 1.0, 2.0, //
            0.0, 6.0, 0.0,
        ]);
        let mut next = current.clone();
        let error = jacobi_sweep(&current, &mut next);

        assert_eq!(next[(1, 1)], 5.0);
        assert_eq!(error, 4.0);
        // only the interior is written
        assert_eq!(next[(0, 1)], 4.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut problem = ConductionProblem::default();
        problem.config.tolerance = 0.0;
        assert!(matches!(
            solve(&problem),
            Err(ConductionError::Core(_))
        ));

        let mut problem = ConductionProblem::default();
        problem.config.max_iterations = 0;
        assert!(matches!(
            solve(&problem),
            Err(ConductionError::InvalidArgument { .. })
        ));

        let problem = ConductionProblem {
            nx: 2,
            ..ConductionProblem::default()
        };
        assert!(solve(&problem).is_err());
    }

    #[test]
    fn capped_solve_reports_iterations() {
        let problem = ConductionProblem {
            config: SolverConfig {
                tolerance: 1e-12,
                max_iterations: 5,
            },
            ..ConductionProblem::default()
        };
        let solution = solve(&problem).unwrap();
        assert_eq!(solution.iterations, 5);
        assert!(solution.hit_iteration_cap());
        assert!(!solution.converged());
    }

    #[test]
    fn large_tolerance_still_runs_one_sweep() {
        let problem = ConductionProblem {
            config: SolverConfig {
                tolerance: 1e9,
                max_iterations: 100,
            },
            ..ConductionProblem::default()
        };
        let solution = solve(&problem).unwrap();
        assert_eq!(solution.iterations, 1);
        assert!(solution.converged());
    }

    #[test]
    fn uniform_fixed_edges_give_uniform_field() {
        let bcs = BoundarySet {
            left: EdgeCondition::Fixed(300.0),
            top: EdgeCondition::Fixed(300.0),
            right: EdgeCondition::Fixed(300.0),
            bottom: EdgeCondition::Fixed(300.0),
        };
        let solution =
            solve_with_boundaries(8, 8, 1.0, &bcs, &SolverConfig::default()).unwrap();
        assert!(solution.converged());
        for v in solution.field().iter() {
            assert!((v - 300.0).abs() < 1e-4);
        }
    }
}
