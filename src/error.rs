// src/error.rs
use thiserror::Error;

/// Failures of the table build and draw mapping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// No value survived cleaning; callers should skip or report the column.
    #[error("insufficient data: series has no non-missing values")]
    InsufficientData,

    /// A draw landed outside every random-number slice of the table.
    #[error("draw {draw} at position {index} is not covered by any random-number interval")]
    UnmatchedDraw { draw: u32, index: usize },
}
