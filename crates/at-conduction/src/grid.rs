//! Uniform rectangular temperature grid.

use crate::error::{ConductionError, ConductionResult};
use at_core::numeric::{Real, ensure_positive};
use nalgebra::DMatrix;

/// Smallest grid dimension that still has an interior row/column.
pub const MIN_POINTS: usize = 3;

/// Temperature field on an `nx x ny` grid with uniform spacing `dx = dy`.
///
/// Rows run along `y` (row 0 is the top edge), columns along `x` (column 0 is
/// the left edge). The resolution is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    field: DMatrix<Real>,
    spacing: Real,
    domain_length: Real,
}

impl Grid {
    /// Zero-initialised grid spanning `domain_length` over `nx - 1` intervals.
    pub fn new(nx: usize, ny: usize, domain_length: Real) -> ConductionResult<Self> {
        if nx < MIN_POINTS || ny < MIN_POINTS {
            return Err(ConductionError::invalid(format!(
                "grid must be at least {MIN_POINTS}x{MIN_POINTS}, got {nx}x{ny}"
            )));
        }
        let domain_length = ensure_positive(domain_length, "domain length")?;

        Ok(Self {
            field: DMatrix::zeros(nx, ny),
            spacing: domain_length / (nx - 1) as Real,
            domain_length,
        })
    }

    pub fn nx(&self) -> usize {
        self.field.nrows()
    }

    pub fn ny(&self) -> usize {
        self.field.ncols()
    }

    /// Node spacing `dx = dy`.
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    pub fn domain_length(&self) -> Real {
        self.domain_length
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Real> {
        self.field.get((i, j)).copied()
    }

    pub fn field(&self) -> &DMatrix<Real> {
        &self.field
    }

    pub(crate) fn field_mut(&mut self) -> &mut DMatrix<Real> {
        &mut self.field
    }

    pub fn max(&self) -> Real {
        self.field.max()
    }

    pub fn min(&self) -> Real {
        self.field.min()
    }

    /// Physical `x` of each column.
    pub fn x_coords(&self) -> Vec<Real> {
        (0..self.ny()).map(|j| j as Real * self.spacing).collect()
    }

    /// Physical `y` of each row.
    pub fn y_coords(&self) -> Vec<Real> {
        (0..self.nx()).map(|i| i as Real * self.spacing).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_follows_row_count() {
        let grid = Grid::new(10, 10, 0.25).unwrap();
        assert!((grid.spacing() - 0.25 / 9.0).abs() < 1e-15);
        assert_eq!(grid.nx(), 10);
        assert_eq!(grid.ny(), 10);
        assert_eq!(grid.max(), 0.0);
        assert_eq!(grid.get(9, 9), Some(0.0));
        assert_eq!(grid.get(10, 0), None);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(matches!(
            Grid::new(2, 10, 0.25),
            Err(ConductionError::InvalidArgument { .. })
        ));
        assert!(Grid::new(10, 2, 0.25).is_err());
        assert!(Grid::new(10, 10, 0.0).is_err());
        assert!(Grid::new(10, 10, Real::NAN).is_err());
    }

    #[test]
    fn coordinates_span_domain() {
        let grid = Grid::new(5, 3, 1.0).unwrap();
        let y = grid.y_coords();
        assert_eq!(y.len(), 5);
        assert_eq!(y[4], 1.0);
        assert_eq!(grid.x_coords(), vec![0.0, 0.25, 0.5]);
    }
}
