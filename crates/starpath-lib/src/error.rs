use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the starpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A point index fell outside the loaded point set.
    #[error("point index {index} is out of range; expected a value between 0 and {}", .len.saturating_sub(1))]
    IndexOutOfRange { index: usize, len: usize },

    /// The search radius was negative or not a number.
    #[error("radius must be a non-negative number, got {radius}")]
    InvalidRadius { radius: f32 },

    /// Point file could not be located at the resolved path.
    #[error("point file not found at {path}")]
    PointsNotFound { path: PathBuf },

    /// A point record could not be interpreted as an `x,y` coordinate pair.
    #[error("invalid point on line {line}: {message}")]
    PointParse { line: u64, message: String },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from caller-supplied search arguments rather than
    /// from loading the point data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. } | Error::InvalidRadius { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_reports_valid_range() {
        let error = Error::IndexOutOfRange { index: 7, len: 4 };
        assert_eq!(
            error.to_string(),
            "point index 7 is out of range; expected a value between 0 and 3"
        );
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn load_errors_are_not_invalid_arguments() {
        let error = Error::PointParse {
            line: 3,
            message: "expected 2 fields".to_string(),
        };
        assert!(!error.is_invalid_argument());
    }
}
