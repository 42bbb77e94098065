// src/core/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Incompatible Dimensions: {context}: expected {expected}, got {got}")]
    IncompatibleDimensions {
        context: String,
        expected: usize,
        got: usize,
    },

    /// A row with no values at all, not even a label.
    #[error("Empty Row: row {0} has no values")]
    EmptyRow(usize),

    #[error("Empty Dataset: cannot predict from a dataset with no rows")]
    EmptyDataset,

    #[error("Unknown Dataset: {0}")]
    UnknownDataset(String),

    #[error("Ndarray Error: {0}")]
    NdarrayError(#[from] ndarray::ShapeError),
}

// Convenience type alias for Result
pub type Result<T> = std::result::Result<T, NbError>;
