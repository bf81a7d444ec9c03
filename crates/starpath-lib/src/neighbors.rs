use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// Reject negative or NaN radii before any lookups happen.
pub fn validate_radius(radius: f32) -> Result<()> {
    if radius.is_nan() || radius < 0.0 {
        return Err(Error::InvalidRadius { radius });
    }
    Ok(())
}

/// Radius queries over a precomputed [`DistanceMatrix`].
#[derive(Debug, Clone, Copy)]
pub struct NeighborFinder<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> NeighborFinder<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Every other point within `radius` (inclusive) of `index`, in ascending
    /// index order. An isolated point yields an empty list.
    pub fn neighbors(&self, index: usize, radius: f32) -> Result<Vec<usize>> {
        self.matrix.check_index(index)?;
        validate_radius(radius)?;
        Ok(self.within(index, radius).collect())
    }

    /// Unchecked iterator form used by the search loop once arguments have
    /// been validated.
    pub(crate) fn within(&self, index: usize, radius: f32) -> impl Iterator<Item = usize> + 'a {
        self.matrix
            .row(index)
            .iter()
            .enumerate()
            .filter(move |&(other, &distance)| other != index && distance <= radius)
            .map(|(other, _)| other)
    }
}
