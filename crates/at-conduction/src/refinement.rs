//! Mesh-sensitivity study: the same plate solved on progressively finer grids.

use crate::error::{ConductionError, ConductionResult};
use crate::solver::{ConductionProblem, solve};
use at_core::numeric::Real;
use rayon::prelude::*;
use tracing::info;

/// Outcome for one grid size.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementPoint {
    /// Square grid size `n x n`
    pub n: usize,
    pub iterations: usize,
    pub max_temperature: Real,
    pub final_error: Real,
    pub converged: bool,
}

/// Solve `template` once per size in `sizes`.
///
/// Sizes are solved in parallel; the result keeps the input order.
pub fn refinement_study(
    sizes: &[usize],
    template: &ConductionProblem,
) -> ConductionResult<Vec<RefinementPoint>> {
    if sizes.is_empty() {
        return Err(ConductionError::invalid("refinement study needs at least one size"));
    }

    let points = sizes
        .par_iter()
        .map(|&n| {
            let solution = solve(&template.with_size(n))?;
            Ok(RefinementPoint {
                n,
                iterations: solution.iterations,
                max_temperature: solution.max_temperature(),
                final_error: solution.final_error,
                converged: solution.converged(),
            })
        })
        .collect::<ConductionResult<Vec<_>>>()?;

    for p in &points {
        info!(
            n = p.n,
            iterations = p.iterations,
            max_temperature = p.max_temperature,
            converged = p.converged,
            "refinement point"
        );
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_input_order() {
        let points = refinement_study(&[12, 5, 8], &ConductionProblem::default()).unwrap();
        let ns: Vec<usize> = points.iter().map(|p| p.n).collect();
        assert_eq!(ns, vec![12, 5, 8]);
    }

    #[test]
    fn empty_and_invalid_sizes_are_rejected() {
        assert!(refinement_study(&[], &ConductionProblem::default()).is_err());
        assert!(refinement_study(&[10, 2], &ConductionProblem::default()).is_err());
    }
}
