//! Error types for qudit construction, evolution and configuration.

use thiserror::Error;

/// Result type for automaton operations.
pub type Result<T> = std::result::Result<T, QuditError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuditError {
    /// Squared magnitudes of a candidate vector do not sum to 1.
    #[error("qudit outcome probabilities do not sum to 1: {total}")]
    InvalidState { total: f64 },

    /// A qudit needs at least one outcome.
    #[error("qudit dimension must be at least 1")]
    ZeroDimension,

    /// Vector length does not match the automaton dimension.
    #[error("amplitude vector has {found} entries, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("entity index {index} out of range for {len} entities")]
    EntityOutOfRange { index: usize, len: usize },

    #[error("outcome index {index} out of range for dimension {dimension}")]
    OutcomeOutOfRange { index: usize, dimension: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
