//! Per-edge boundary conditions for the rectangular grid.

use at_core::numeric::{Real, ensure_finite};
use nalgebra::DMatrix;
use std::fmt;

use crate::error::ConductionResult;

/// One side of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Column 0 (`x = 0`).
    Left,
    /// Row 0 (`y = 0`).
    Top,
    /// Last column.
    Right,
    /// Last row.
    Bottom,
}

impl Edge {
    /// Fixed edges are written in this order, so later edges own shared corners.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    pub fn key(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
        }
    }

    /// Whether grid cell `(i, j)` lies on this edge of an `nx x ny` grid.
    pub fn contains(&self, i: usize, j: usize, nx: usize, ny: usize) -> bool {
        match self {
            Edge::Left => j == 0,
            Edge::Top => i == 0,
            Edge::Right => j + 1 == ny,
            Edge::Bottom => i + 1 == nx,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Condition held on one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCondition {
    /// Dirichlet: the whole edge is held at this value.
    Fixed(Real),
    /// Neumann with zero flux: edge cells copy their interior neighbour.
    Insulated,
}

impl EdgeCondition {
    pub fn is_fixed(&self) -> bool {
        matches!(self, EdgeCondition::Fixed(_))
    }
}

/// Conditions for all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySet {
    pub left: EdgeCondition,
    pub top: EdgeCondition,
    pub right: EdgeCondition,
    pub bottom: EdgeCondition,
}

impl BoundarySet {
    /// Left and top edges fixed, right and bottom insulated.
    pub fn plate(left_value: Real, top_value: Real) -> Self {
        Self {
            left: EdgeCondition::Fixed(left_value),
            top: EdgeCondition::Fixed(top_value),
            right: EdgeCondition::Insulated,
            bottom: EdgeCondition::Insulated,
        }
    }

    pub fn condition(&self, edge: Edge) -> EdgeCondition {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Edges carrying a fixed value, in application order.
    pub fn fixed_edges(&self) -> impl Iterator<Item = (Edge, Real)> + '_ {
        Edge::ALL
            .into_iter()
            .filter_map(move |edge| match self.condition(edge) {
                EdgeCondition::Fixed(v) => Some((edge, v)),
                EdgeCondition::Insulated => None,
            })
    }

    pub fn validate(&self) -> ConductionResult<()> {
        for (edge, value) in self.fixed_edges() {
            ensure_finite(value, edge_value_label(edge))?;
        }
        Ok(())
    }

    /// Whether `edge` holds the final fixed value written to cell `(i, j)`.
    ///
    /// A cell shared by two fixed edges belongs to whichever is written last.
    pub fn owns(&self, edge: Edge, i: usize, j: usize, nx: usize, ny: usize) -> bool {
        if !self.condition(edge).is_fixed() || !edge.contains(i, j, nx, ny) {
            return false;
        }
        let later = Edge::ALL
            .iter()
            .skip_while(|e| **e != edge)
            .skip(1)
            .any(|e| self.condition(*e).is_fixed() && e.contains(i, j, nx, ny));
        !later
    }

    /// Write every fixed edge over the full edge length, in `Edge::ALL` order.
    ///
    /// For the plate configuration the top row is written after the left
    /// column, so `(0, 0)` ends up holding the top value.
    pub fn apply_fixed(&self, field: &mut DMatrix<Real>) {
        let (nx, ny) = field.shape();
        for (edge, value) in self.fixed_edges() {
            match edge {
                Edge::Left => field.column_mut(0).fill(value),
                Edge::Top => field.row_mut(0).fill(value),
                Edge::Right => field.column_mut(ny - 1).fill(value),
                Edge::Bottom => field.row_mut(nx - 1).fill(value),
            }
        }
    }

    /// Copy interior neighbours onto insulated edges. Corners are left alone.
    pub fn apply_insulated(&self, field: &mut DMatrix<Real>) {
        let (nx, ny) = field.shape();
        for edge in Edge::ALL {
            if self.condition(edge).is_fixed() {
                continue;
            }
            match edge {
                Edge::Left => {
                    for i in 1..nx - 1 {
                        field[(i, 0)] = field[(i, 1)];
                    }
                }
                Edge::Top => {
                    for j in 1..ny - 1 {
                        field[(0, j)] = field[(1, j)];
                    }
                }
                Edge::Right => {
                    for i in 1..nx - 1 {
                        field[(i, ny - 1)] = field[(i, ny - 2)];
                    }
                }
                Edge::Bottom => {
                    for j in 1..ny - 1 {
                        field[(nx - 1, j)] = field[(nx - 2, j)];
                    }
                }
            }
        }
    }
}

fn edge_value_label(edge: Edge) -> &'static str {
    match edge {
        Edge::Left => "left boundary value",
        Edge::Top => "top boundary value",
        Edge::Right => "right boundary value",
        Edge::Bottom => "bottom boundary value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_corner_takes_top_value() {
        let bcs = BoundarySet::plate(600.0, 150.0);
        let mut field = DMatrix::zeros(4, 5);
        bcs.apply_fixed(&mut field);

        assert_eq!(field[(0, 0)], 150.0);
        assert_eq!(field[(3, 0)], 600.0);
        assert_eq!(field[(0, 4)], 150.0);
        assert_eq!(field[(2, 4)], 0.0);
    }

    #[test]
    fn insulated_copy_skips_corners() {
        let bcs = BoundarySet::plate(600.0, 150.0);
        let mut field = DMatrix::from_fn(4, 4, |i, j| (10 * i + j) as f64);
        bcs.apply_insulated(&mut field);

        // right edge interior rows copy column 2
        assert_eq!(field[(1, 3)], 12.0);
        assert_eq!(field[(2, 3)], 22.0);
        // bottom edge interior columns copy row 2
        assert_eq!(field[(3, 1)], 21.0);
        assert_eq!(field[(3, 2)], 22.0);
        // corners untouched
        assert_eq!(field[(3, 3)], 33.0);
        assert_eq!(field[(0, 3)], 3.0);
        assert_eq!(field[(3, 0)], 30.0);
    }

    #[test]
    fn corner_ownership_follows_write_order() {
        let bcs = BoundarySet::plate(600.0, 150.0);
        assert!(!bcs.owns(Edge::Left, 0, 0, 5, 5));
        assert!(bcs.owns(Edge::Top, 0, 0, 5, 5));
        assert!(bcs.owns(Edge::Left, 4, 0, 5, 5));
        assert!(!bcs.owns(Edge::Right, 2, 4, 5, 5));

        let all_fixed = BoundarySet {
            left: EdgeCondition::Fixed(1.0),
            top: EdgeCondition::Fixed(2.0),
            right: EdgeCondition::Fixed(3.0),
            bottom: EdgeCondition::Fixed(4.0),
        };
        assert!(all_fixed.owns(Edge::Right, 0, 4, 5, 5));
        assert!(all_fixed.owns(Edge::Bottom, 4, 4, 5, 5));
        assert!(!all_fixed.owns(Edge::Top, 0, 4, 5, 5));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        assert!(BoundarySet::plate(600.0, 150.0).validate().is_ok());
        assert!(BoundarySet::plate(f64::NAN, 150.0).validate().is_err());
        assert!(BoundarySet::plate(600.0, f64::INFINITY).validate().is_err());
    }
}
