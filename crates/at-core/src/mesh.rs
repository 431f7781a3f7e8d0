//! Uniform 1D/2D sampling helpers.
//!
//! `linspace` and `MeshGrid` follow the usual array-library conventions:
//! a mesh built from `x` (length `nx`) and `y` (length `ny`) has `ny` rows and
//! `nx` columns, with `X[i][j] = x[j]` and `Y[i][j] = y[i]`.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, ensure_finite};

/// `num` evenly spaced points over `[start, end]`, endpoints included.
///
/// `num == 1` yields `[start]`; `num == 0` is rejected.
pub fn linspace(start: Real, end: Real, num: usize) -> CoreResult<Vec<Real>> {
    ensure_finite(start, "linspace start")?;
    ensure_finite(end, "linspace end")?;
    if num == 0 {
        return Err(CoreError::InvalidArg {
            what: "linspace needs at least one point",
        });
    }
    if num == 1 {
        return Ok(vec![start]);
    }

    let delta = (end - start) / (num - 1) as Real;
    let mut points: Vec<Real> = (0..num).map(|i| start + i as Real * delta).collect();

    // Ensure exact endpoint
    points[num - 1] = end;
    Ok(points)
}

/// Cartesian product of two coordinate vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    pub x: Vec<Real>,
    pub y: Vec<Real>,
}

impl MeshGrid {
    pub fn new(x: Vec<Real>, y: Vec<Real>) -> Self {
        Self { x, y }
    }

    pub fn rows(&self) -> usize {
        self.y.len()
    }

    pub fn cols(&self) -> usize {
        self.x.len()
    }

    /// Physical point `(x, y)` at row `i`, column `j`.
    pub fn point(&self, i: usize, j: usize) -> CoreResult<(Real, Real)> {
        let y = *self.y.get(i).ok_or(CoreError::IndexOob {
            what: "mesh row",
            index: i,
            len: self.y.len(),
        })?;
        let x = *self.x.get(j).ok_or(CoreError::IndexOob {
            what: "mesh column",
            index: j,
            len: self.x.len(),
        })?;
        Ok((x, y))
    }

    /// Row-major iterator over `(i, j, x, y)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Real, Real)> + '_ {
        self.y.iter().enumerate().flat_map(move |(i, &y)| {
            self.x.iter().enumerate().map(move |(j, &x)| (i, j, x, y))
        })
    }
}

/// A function sampled on a mesh, `NaN` where the region mask excludes a point.
#[derive(Debug, Clone)]
pub struct MaskedField {
    pub mesh: MeshGrid,
    /// Row-major values, `rows * cols` long.
    pub values: Vec<Real>,
    /// Points inside the region, in row-major order.
    pub points: Vec<(Real, Real)>,
}

impl MaskedField {
    pub fn value(&self, i: usize, j: usize) -> Option<Real> {
        if i >= self.mesh.rows() || j >= self.mesh.cols() {
            return None;
        }
        Some(self.values[i * self.mesh.cols() + j])
    }

    pub fn inside_count(&self) -> usize {
        self.points.len()
    }
}

/// Sample `sin(x * y)` over the unit square, keeping the triangle `y < 1 - x`.
pub fn masked_field(grid_size: usize) -> CoreResult<MaskedField> {
    sample_masked(grid_size, |x, y| y < -x + 1.0, |x, y| (x * y).sin())
}

/// Sample `f` over a `grid_size x grid_size` mesh of the unit square,
/// recording `NaN` wherever `inside` is false.
pub fn sample_masked<M, F>(grid_size: usize, inside: M, f: F) -> CoreResult<MaskedField>
where
    M: Fn(Real, Real) -> bool,
    F: Fn(Real, Real) -> Real,
{
    if grid_size < 2 {
        return Err(CoreError::InvalidArg {
            what: "grid_size must be at least 2",
        });
    }

    let mesh = MeshGrid::new(
        linspace(0.0, 1.0, grid_size)?,
        linspace(0.0, 1.0, grid_size)?,
    );
    let mut values = Vec::with_capacity(grid_size * grid_size);
    let mut points = Vec::new();

    for (_, _, x, y) in mesh.iter() {
        if inside(x, y) {
            values.push(f(x, y));
            points.push((x, y));
        } else {
            values.push(Real::NAN);
        }
    }

    Ok(MaskedField {
        mesh,
        values,
        points,
    })
}
