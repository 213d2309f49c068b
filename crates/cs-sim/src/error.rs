use cs_behavior::BehaviorError;
use cs_core::{CellId, CoreError, Position};
use cs_movement::MovementError;
use cs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("behavior configuration error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("{what} count {got} does not match cell count {expected}")]
    CellCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{cell} proposed a move out of {at} but stands on {expected}")]
    MisplacedIntent {
        cell:     CellId,
        at:       Position,
        expected: Position,
    },

    #[error("thread pool error: {0}")]
    ThreadPool(String),

    #[error("movement error: {0}")]
    Movement(#[from] MovementError),

    #[error("grid error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
