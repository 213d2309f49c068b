//! Spatial-subsystem error type.

use thiserror::Error;

use cs_core::{CellId, Position};

/// Errors produced by `cs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("position {0} is blocked")]
    Blocked(Position),

    #[error("position {pos} is already occupied by {by}")]
    Occupied { pos: Position, by: CellId },

    #[error("unexpected map character {ch:?} at row {row}, column {col}")]
    Parse { row: usize, col: usize, ch: char },

    #[error("map rows have different widths")]
    RaggedRows,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
