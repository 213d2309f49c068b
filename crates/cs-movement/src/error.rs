use cs_core::Position;
use cs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovementError {
    /// An intent whose endpoints are not one orthogonal step apart.
    #[error("invalid intent {from} -> {to}: tiles are not adjacent")]
    NonAdjacent { from: Position, to: Position },

    /// The grid changed between staging and committing a move plan.
    #[error("stale move plan: expected a mover at {0}")]
    StalePlan(Position),

    #[error("grid update failed: {0}")]
    Spatial(#[from] SpatialError),
}

pub type MovementResult<T> = Result<T, MovementError>;
