//! error type shared by the grid and the game layer
use thiserror::Error;

/// Errors raised by grid construction, direct cell addressing and config loading.
///
/// Expected outcomes of the search algorithms (nothing to fill, no path,
/// unreachable cells) are not errors, they are reported through sentinel
/// return values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// width or height was not strictly positive
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        #[allow(missing_docs)]
        width: i32,
        #[allow(missing_docs)]
        height: i32,
    },
    /// the source matrix was empty or ragged
    #[error("matrix must be non-empty and rectangular")]
    InvalidShape,
    /// a direct get/set addressed a cell outside of the grid
    #[error("coordinate ({x},{y}) is outside of the grid")]
    OutOfBounds {
        #[allow(missing_docs)]
        x: i32,
        #[allow(missing_docs)]
        y: i32,
    },
    /// a required argument was missing or malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// a game configuration could not be read
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GridError>;
