use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::core::{Point3, Tolerance, Vec3};

/// Parameter step for finite-difference normal estimation.
pub const DERIVATIVE_STEP: f64 = 0.01;

/// A parametric surface over the unit square `(u, v) ∈ [0, 1]²`.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Estimates the surface normal at `(u, v)` by finite differences.
    ///
    /// Probes at `(u + δ, v)` and `(u, v + δ)` with δ = [`DERIVATIVE_STEP`]
    /// and differences against the point at `(u, v)`. When a forward probe
    /// would leave the domain, the difference is taken backward instead so
    /// the sample stays in `[0, 1]` and the tangent direction is preserved.
    ///
    /// A cross product with magnitude under
    /// [`Tolerance::DEGENERATE_NORMAL`] cannot be normalized meaningfully;
    /// the fixed fallback `(0, 0, 1)` is returned so no NaN ever leaves
    /// this method.
    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Vec3 {
        let h = DERIVATIVE_STEP;
        let p = self.point_at(u, v);

        let du = if u + h <= 1.0 {
            self.point_at(u + h, v) - p
        } else {
            p - self.point_at(u - h, v)
        };
        let dv = if v + h <= 1.0 {
            self.point_at(u, v + h) - p
        } else {
            p - self.point_at(u, v - h)
        };

        let n = du.cross(dv);
        if n.length() < Tolerance::DEGENERATE_NORMAL.eps {
            return Vec3::Z;
        }
        n.normalized().unwrap_or(Vec3::Z)
    }
}

/// Errors from control-grid construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("control point index ({row}, {col}) outside {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("control grid needs at least 2x2 points, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
    #[error("row {row} has {len} points, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A tensor-product Bezier surface over an explicit `rows × cols` grid of
/// 3D control points.
///
/// Grid dimensions are fixed at construction and insertion is
/// bounds-checked; rows cannot grow independently. The grid is stored
/// row-major with the row index driving the `v` direction and the column
/// index driving `u`.
///
/// Evaluation reduces each row in `u` (one intermediate point per row) and
/// then reduces that intermediate column in `v`. The normal estimator
/// inherits the same convention through [`Surface::normal_at`], so front
/// faces and normals stay consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierPatch {
    rows: usize,
    cols: usize,
    grid: Vec<Point3>,
}

impl BezierPatch {
    /// Creates a `rows × cols` grid with every control point at the origin.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows < 2 || cols < 2 {
            return Err(GridError::TooSmall { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            grid: vec![Point3::ORIGIN; rows * cols],
        })
    }

    /// Builds a patch from nested rows. Every row must have the same
    /// length; ragged input is rejected rather than padded.
    pub fn from_rows(rows: Vec<Vec<Point3>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if row_count < 2 || col_count < 2 {
            return Err(GridError::TooSmall {
                rows: row_count,
                cols: col_count,
            });
        }

        let mut grid = Vec::with_capacity(row_count * col_count);
        for (row, points) in rows.into_iter().enumerate() {
            if points.len() != col_count {
                return Err(GridError::RaggedRows {
                    row,
                    len: points.len(),
                    expected: col_count,
                });
            }
            grid.extend(points);
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            grid,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of the control grid.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.grid
    }

    #[must_use]
    pub fn control_point(&self, row: usize, col: usize) -> Option<Point3> {
        if row < self.rows && col < self.cols {
            Some(self.grid[row * self.cols + col])
        } else {
            None
        }
    }

    /// Replaces one control point. Out-of-range indices are an error, not a
    /// grid resize.
    pub fn set_control_point(&mut self, row: usize, col: usize, point: Point3) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.grid[row * self.cols + col] = point;
        Ok(())
    }

    /// Resets every control point to the origin. Dimensions are fixed at
    /// construction and survive the reset.
    pub fn clear_control_points(&mut self) {
        self.grid.fill(Point3::ORIGIN);
    }

    /// Flattened `[x, y, z]` coordinates of the control grid, row-major,
    /// ready for upload as a point cloud.
    #[must_use]
    pub fn flattened_control_points(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.grid.len() * 3);
        for p in &self.grid {
            flat.push(p.x);
            flat.push(p.y);
            flat.push(p.z);
        }
        flat
    }

    /// Line-segment endpoints connecting adjacent control points along both
    /// grid directions, flattened as `[x, y, z]` pairs: the control cage
    /// as a line list.
    #[must_use]
    pub fn control_point_grid_lines(&self) -> Vec<f64> {
        let segments = self.rows * (self.cols - 1) + self.cols * (self.rows - 1);
        let mut flat = Vec::with_capacity(segments * 6);

        let mut push_segment = |a: Point3, b: Point3, out: &mut Vec<f64>| {
            out.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
        };

        for r in 0..self.rows {
            for c in 0..self.cols - 1 {
                let a = self.grid[r * self.cols + c];
                let b = self.grid[r * self.cols + c + 1];
                push_segment(a, b, &mut flat);
            }
        }
        for c in 0..self.cols {
            for r in 0..self.rows - 1 {
                let a = self.grid[r * self.cols + c];
                let b = self.grid[(r + 1) * self.cols + c];
                push_segment(a, b, &mut flat);
            }
        }

        flat
    }
}

impl Surface for BezierPatch {
    /// Tensor-product evaluation: each row of control points collapses in
    /// `u` via De Casteljau reduction, then the per-row results collapse
    /// in `v`.
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let mut column = Vec::with_capacity(self.rows);
        let mut row_buf = vec![Point3::ORIGIN; self.cols];

        for r in 0..self.rows {
            row_buf.copy_from_slice(&self.grid[r * self.cols..(r + 1) * self.cols]);
            column.push(reduce(&mut row_buf, u));
        }

        reduce(&mut column, v)
    }
}

/// In-place De Casteljau reduction: collapse adjacent pairs with a lerp
/// until one point remains. Iterative, so deep control rows cannot blow the
/// stack.
fn reduce(points: &mut [Point3], t: f64) -> Point3 {
    let mut len = points.len();
    while len > 1 {
        for i in 0..len - 1 {
            points[i] = points[i].lerp(points[i + 1], t);
        }
        len -= 1;
    }
    points[0]
}
