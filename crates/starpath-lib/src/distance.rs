//! Fixed-point distance approximation and the precomputed distance matrix.
//!
//! The approximation is an alpha-max-plus-beta-min estimate of Euclidean
//! distance evaluated on coordinates truncated to hundredths of a unit. Radius
//! checks and frontier ordering both depend on its exact rounding, so the
//! integer pipeline below must not be replaced with a floating-point variant.

use tracing::debug;

use crate::error::{Error, Result};
use crate::points::Point;

/// Coordinates are scaled by this factor and truncated before comparison.
const FIXED_POINT_SCALE: f32 = 100.0;

const MAX_WEIGHT: i64 = 1007;
const MIN_WEIGHT: i64 = 441;
/// Applied when the vector is close to diagonal (`max < 16 * min`).
const DIAGONAL_CORRECTION: i64 = 40;

/// Approximate the distance between two points without a square root.
///
/// The result is a multiple of `0.01`, symmetric, and exactly zero for
/// identical coordinates.
pub fn approximate_distance(a: &Point, b: &Point) -> f32 {
    let (x1, y1) = to_fixed(a);
    let (x2, y2) = to_fixed(b);

    let dx = (x1 - x2).abs();
    let dy = (y1 - y2).abs();
    let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };

    let mut approx = max * MAX_WEIGHT + min * MIN_WEIGHT;
    if max < (min << 4) {
        approx -= max * DIAGONAL_CORRECTION;
    }

    ((approx + 512) >> 10) as f32 / FIXED_POINT_SCALE
}

fn to_fixed(point: &Point) -> (i64, i64) {
    // `as` truncates toward zero and saturates, which is the required rounding.
    let x = (point.x * FIXED_POINT_SCALE) as i32;
    let y = (point.y * FIXED_POINT_SCALE) as i32;
    (i64::from(x), i64::from(y))
}

/// Symmetric matrix of approximate distances between every pair of points.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f32>,
}

impl DistanceMatrix {
    /// Precompute all pairwise distances. Each unordered pair is approximated
    /// once; the diagonal is left at zero.
    pub fn build(points: &[Point]) -> Self {
        let size = points.len();
        let mut cells = vec![0.0_f32; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let distance = approximate_distance(&points[i], &points[j]);
                cells[i * size + j] = distance;
                cells[j * size + i] = distance;
            }
        }

        debug!(points = size, "built distance matrix");
        Self { size, cells }
    }

    /// Number of points covered by the matrix.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checked lookup of the distance between `i` and `j`.
    pub fn lookup(&self, i: usize, j: usize) -> Result<f32> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.get(i, j))
    }

    /// Distances from `i` to every point, indexed by target.
    ///
    /// Panics if `i` is out of range; callers validate indices first.
    pub(crate) fn row(&self, i: usize) -> &[f32] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub(crate) fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.size + j]
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(0, x, y)
    }

    #[test]
    fn axis_aligned_unit_step() {
        // 100 * 1007 = 100700; (100700 + 512) >> 10 = 98
        assert_eq!(approximate_distance(&p(0.0, 0.0), &p(1.0, 0.0)), 0.98);
    }

    #[test]
    fn diagonal_branch_applies_correction() {
        // max = min = 100: 100700 + 44100 - 4000 = 140800; (140800 + 512) >> 10 = 138
        assert_eq!(approximate_distance(&p(0.0, 0.0), &p(1.0, 1.0)), 1.38);
    }

    #[test]
    fn shallow_vectors_skip_correction() {
        // dx = 1600, dy = 100: max == 16 * min so no correction.
        // 1600 * 1007 + 100 * 441 = 1655300; (1655300 + 512) >> 10 = 1617
        assert_eq!(approximate_distance(&p(0.0, 0.0), &p(16.0, 1.0)), 16.17);
    }

    #[test]
    fn coordinates_truncate_rather_than_round() {
        // Both 0.019 and 0.012 scale to 1 hundredth.
        let a = approximate_distance(&p(0.0, 0.0), &p(0.019, 0.0));
        let b = approximate_distance(&p(0.0, 0.0), &p(0.012, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn negative_coordinates_truncate_toward_zero() {
        // -0.019 * 100 truncates to -1, one hundredth from the origin.
        let a = approximate_distance(&p(-0.019, 0.0), &p(0.0, 0.0));
        let b = approximate_distance(&p(0.012, 0.0), &p(0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn far_apart_points_do_not_overflow() {
        let d = approximate_distance(&p(-2.0e7, -2.0e7), &p(2.0e7, 2.0e7));
        assert!(d > 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 3.0, 4.0),
            Point::new(2, -7.5, 2.25),
        ];
        let matrix = DistanceMatrix::build(&points);

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.lookup(i, i).unwrap(), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.lookup(i, j).unwrap(), matrix.lookup(j, i).unwrap());
            }
        }
        assert_eq!(
            matrix.lookup(0, 1).unwrap(),
            approximate_distance(&points[0], &points[1])
        );
    }

    #[test]
    fn lookup_rejects_out_of_range_indices() {
        let matrix = DistanceMatrix::build(&[Point::new(0, 0.0, 0.0)]);
        let error = matrix.lookup(0, 1).expect_err("index 1 is out of range");
        assert!(matches!(error, Error::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn empty_matrix() {
        let matrix = DistanceMatrix::build(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.lookup(0, 0).is_err());
    }
}
