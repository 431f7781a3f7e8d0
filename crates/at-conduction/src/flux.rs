//! Conductive heat flux from a finished temperature field.
//!
//! `q = -k A dT/dn` with `A = dx * depth`. Interior points use central
//! differences; fixed edges use a one-sided difference into the domain;
//! insulated edges carry exactly zero normal flux.
//!
//! `qx` and `qy` are signed along `+x` (increasing column) and `+y`
//! (increasing row) everywhere, edges included. [`boundary_heat_flow`] reports
//! flow along an edge's outward normal, so on the left and top edges it is the
//! negated sum of the exported cells.

use crate::boundary::{Edge, EdgeCondition};
use crate::error::ConductionResult;
use crate::solver::ConductionSolution;
use at_core::numeric::{Real, ensure_positive};
use at_core::units::{Conductivity, Length, Power, m, w, w_per_m_k};
use nalgebra::DMatrix;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const X_FLUX_FILE: &str = "heat_transfer_x_direction.csv";
pub const Y_FLUX_FILE: &str = "heat_transfer_y_direction.csv";

/// Material and geometry needed to turn gradients into heat flow.
#[derive(Debug, Clone, Copy)]
pub struct FluxParams {
    pub conductivity: Conductivity,
    /// Out-of-plane depth `dz`
    pub depth: Length,
}

impl Default for FluxParams {
    fn default() -> Self {
        Self {
            conductivity: w_per_m_k(0.25),
            depth: m(1.0),
        }
    }
}

impl FluxParams {
    fn validated(&self) -> ConductionResult<(Real, Real)> {
        let k = ensure_positive(self.conductivity.value, "thermal conductivity")?;
        let dz = ensure_positive(self.depth.value, "depth")?;
        Ok((k, dz))
    }
}

/// Heat flow through each node's face, along `x` (columns) and `y` (rows), in W.
#[derive(Debug, Clone)]
pub struct FluxField {
    pub qx: DMatrix<Real>,
    pub qy: DMatrix<Real>,
    /// Face area `dx * dz` (m^2)
    pub face_area: Real,
}

impl FluxField {
    /// Write `qx` and `qy` as two CSV matrices in `dir`.
    pub fn write_csv(&self, dir: &Path) -> ConductionResult<(PathBuf, PathBuf)> {
        let x_path = dir.join(X_FLUX_FILE);
        let y_path = dir.join(Y_FLUX_FILE);
        at_results::write_matrix_csv(&x_path, &self.qx)?;
        at_results::write_matrix_csv(&y_path, &self.qy)?;
        Ok((x_path, y_path))
    }
}

/// Flux fields over the whole grid.
pub fn heat_flux(
    solution: &ConductionSolution,
    params: &FluxParams,
) -> ConductionResult<FluxField> {
    let (k, dz) = params.validated()?;
    let t = solution.field();
    let (nx, ny) = t.shape();
    let d = solution.grid.spacing();
    let area = d * dz;
    let coeff = -k * area;
    let bcs = &solution.boundaries;

    let qx = DMatrix::from_fn(nx, ny, |i, j| {
        let grad = if j == 0 {
            one_sided(bcs.condition(Edge::Left), t[(i, 1)] - t[(i, 0)], d)
        } else if j == ny - 1 {
            one_sided(bcs.condition(Edge::Right), t[(i, j)] - t[(i, j - 1)], d)
        } else {
            (t[(i, j + 1)] - t[(i, j - 1)]) / (2.0 * d)
        };
        coeff * grad
    });

    let qy = DMatrix::from_fn(nx, ny, |i, j| {
        let grad = if i == 0 {
            one_sided(bcs.condition(Edge::Top), t[(1, j)] - t[(0, j)], d)
        } else if i == nx - 1 {
            one_sided(bcs.condition(Edge::Bottom), t[(i, j)] - t[(i - 1, j)], d)
        } else {
            (t[(i + 1, j)] - t[(i - 1, j)]) / (2.0 * d)
        };
        coeff * grad
    });

    Ok(FluxField {
        qx,
        qy,
        face_area: area,
    })
}

fn one_sided(condition: EdgeCondition, delta: Real, d: Real) -> Real {
    match condition {
        EdgeCondition::Fixed(_) => delta / d,
        EdgeCondition::Insulated => 0.0,
    }
}

/// Sign that turns the exported component on `edge` into flow along its
/// outward normal.
fn outward_sign(edge: Edge) -> Real {
    match edge {
        Edge::Left | Edge::Top => -1.0,
        Edge::Right | Edge::Bottom => 1.0,
    }
}

/// Total heat flow through one edge along its outward normal.
///
/// This is the signed sum of the exported normal component (`qx` for left and
/// right, `qy` for top and bottom) over the cells the edge owns (see
/// [`BoundarySet::owns`]), so a shared corner is counted once. Insulated edges
/// carry no flow.
///
/// [`BoundarySet::owns`]: crate::boundary::BoundarySet::owns
pub fn boundary_heat_flow(
    solution: &ConductionSolution,
    edge: Edge,
    params: &FluxParams,
) -> ConductionResult<Power> {
    let flux = heat_flux(solution, params)?;
    let bcs = &solution.boundaries;
    if !bcs.condition(edge).is_fixed() {
        return Ok(w(0.0));
    }

    let (nx, ny) = flux.qx.shape();
    let (component, cells): (&DMatrix<Real>, Vec<(usize, usize)>) = match edge {
        Edge::Left => (&flux.qx, (0..nx).map(|i| (i, 0)).collect()),
        Edge::Right => (&flux.qx, (0..nx).map(|i| (i, ny - 1)).collect()),
        Edge::Top => (&flux.qy, (0..ny).map(|j| (0, j)).collect()),
        Edge::Bottom => (&flux.qy, (0..ny).map(|j| (nx - 1, j)).collect()),
    };

    let sign = outward_sign(edge);
    let total: Real = cells
        .into_iter()
        .filter(|&(i, j)| bcs.owns(edge, i, j, nx, ny))
        .map(|cell| sign * component[cell])
        .sum();

    debug!(edge = edge.key(), total, "boundary heat flow");
    Ok(w(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{ConductionProblem, solve};

    #[test]
    fn insulated_edges_carry_no_normal_flux() {
        let solution = solve(&ConductionProblem::default()).unwrap();
        let flux = heat_flux(&solution, &FluxParams::default()).unwrap();
        let (nx, ny) = flux.qx.shape();
        for i in 0..nx {
            assert_eq!(flux.qx[(i, ny - 1)], 0.0);
        }
        for j in 0..ny {
            assert_eq!(flux.qy[(nx - 1, j)], 0.0);
        }
    }

    #[test]
    fn face_area_is_spacing_times_depth() {
        let solution = solve(&ConductionProblem::default()).unwrap();
        let params = FluxParams {
            conductivity: w_per_m_k(0.25),
            depth: m(0.5),
        };
        let flux = heat_flux(&solution, &params).unwrap();
        assert!((flux.face_area - 0.25 / 9.0 * 0.5).abs() < 1e-15);
    }

    #[test]
    fn left_edge_flow_leaves_hot_boundary() {
        let solution = solve(&ConductionProblem::default()).unwrap();
        let q = boundary_heat_flow(&solution, Edge::Left, &FluxParams::default()).unwrap();
        assert!(q.value < 0.0);

        let q_right =
            boundary_heat_flow(&solution, Edge::Right, &FluxParams::default()).unwrap();
        assert_eq!(q_right.value, 0.0);
    }

    #[test]
    fn edge_flow_is_signed_sum_of_exported_cells() {
        let solution = solve(&ConductionProblem::default()).unwrap();
        let params = FluxParams::default();
        let flux = heat_flux(&solution, &params).unwrap();
        let (nx, ny) = flux.qx.shape();

        // (0, 0) belongs to the top edge
        let left_cells: Real = (1..nx).map(|i| flux.qx[(i, 0)]).sum();
        let left = boundary_heat_flow(&solution, Edge::Left, &params).unwrap();
        assert!((left.value + left_cells).abs() < 1e-12 * left_cells.abs().max(1.0));
        assert!(left_cells > 0.0);

        let top_cells: Real = (0..ny).map(|j| flux.qy[(0, j)]).sum();
        let top = boundary_heat_flow(&solution, Edge::Top, &params).unwrap();
        assert!((top.value + top_cells).abs() < 1e-12 * top_cells.abs().max(1.0));
    }

    #[test]
    fn far_edges_keep_exported_sign() {
        let bcs = crate::boundary::BoundarySet {
            left: EdgeCondition::Insulated,
            top: EdgeCondition::Insulated,
            right: EdgeCondition::Fixed(500.0),
            bottom: EdgeCondition::Fixed(100.0),
        };
        let solution = crate::solver::solve_with_boundaries(
            8,
            8,
            1.0,
            &bcs,
            &crate::solver::SolverConfig::default(),
        )
        .unwrap();
        let params = FluxParams::default();
        let flux = heat_flux(&solution, &params).unwrap();
        let (nx, ny) = flux.qx.shape();

        // bottom is written after right, so it owns the shared corner
        let right_cells: Real = (0..nx - 1).map(|i| flux.qx[(i, ny - 1)]).sum();
        let right = boundary_heat_flow(&solution, Edge::Right, &params).unwrap();
        assert!((right.value - right_cells).abs() < 1e-12 * right_cells.abs().max(1.0));
        assert!(right.value < 0.0);
    }

    #[test]
    fn rejects_non_positive_conductivity() {
        let solution = solve(&ConductionProblem::default()).unwrap();
        let params = FluxParams {
            conductivity: w_per_m_k(0.0),
            depth: m(1.0),
        };
        assert!(heat_flux(&solution, &params).is_err());
    }
}
