//! Error types shared by the evolution engine.

use thiserror::Error;

/// Errors surfaced by brains, configuration, and the course driver.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// A brain received an input vector of the wrong length.
    #[error("brain expects exactly {expected} inputs, got {actual}")]
    InvalidInput {
        /// Required input length (sensors plus bias).
        expected: usize,
        /// Length that was actually supplied.
        actual: usize,
    },

    /// Configuration values are out of range or inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Reading or writing a configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
