//! Error types for colony runs.

use thiserror::Error;

/// Result type alias using [`AcoError`].
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors surfaced by the colony engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// Malformed distance matrix or out-of-range parameter.
    ///
    /// Detected before the first iteration runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An ant reached a city from which no unvisited city can be chosen
    /// (total selection weight is zero or not finite), or from which the
    /// tour cannot be closed back to the start.
    #[error(
        "degenerate selection at iteration {iteration}: no selectable city from {city} \
         ({visited} of {n} cities visited)"
    )]
    DegenerateSelection {
        /// Iteration in which the dead end occurred.
        iteration: usize,
        /// City the ant was standing on.
        city: usize,
        /// Number of cities already in the partial tour.
        visited: usize,
        /// Total number of cities.
        n: usize,
    },
}

impl AcoError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AcoError::InvalidInput(msg.into())
    }

    /// Whether this error was raised by input validation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AcoError::InvalidInput(_))
    }

    /// Whether this error was raised by a dead end during tour construction.
    pub fn is_degenerate_selection(&self) -> bool {
        matches!(self, AcoError::DegenerateSelection { .. })
    }
}
