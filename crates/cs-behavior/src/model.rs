//! The `BehaviorModel` trait — the main extension point for user code.

use cs_core::{AgentRng, CellId, Position};
use cs_spatial::VisionWindow;

use crate::{MoveIntent, SimContext};

/// Everything a cell decided during one proposal call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Proposal {
    /// Ranked single-step moves out of the cell's tile (0 to 4 entries).
    pub intents: Vec<MoveIntent>,

    /// Target the cell should remember for the next tick.  `None` clears
    /// any cached target.
    pub target: Option<Position>,

    /// `true` when the intents came from the random-walk fallback.
    pub wandered: bool,
}

impl Proposal {
    /// Stay put and forget any target.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Pluggable cell behavior.
///
/// Implement this trait to define how cells decide where to step each tick.
/// All methods receive a read-only [`SimContext`], an owned snapshot of the
/// cell's surroundings, and a per-cell, per-tick [`AgentRng`], so the outcome
/// does not depend on thread ordering.
///
/// # Thread safety
///
/// The simulation loop may call `propose` for many cells in parallel via
/// Rayon, so implementations must be `Send + Sync`.  State that varies per
/// cell must live in `CellStore` (read through `ctx.cells`), not in the model.
///
/// # Example
///
/// ```rust
/// use cs_behavior::{BehaviorModel, MoveIntent, Priority, Proposal, SimContext};
/// use cs_core::{AgentRng, CellId, Direction};
/// use cs_spatial::VisionWindow;
///
/// /// Always tries to step east.
/// struct Drift;
///
/// impl BehaviorModel for Drift {
///     fn propose(
///         &self,
///         _cell:  CellId,
///         window: &VisionWindow,
///         _ctx:   &SimContext<'_>,
///         _rng:   &mut AgentRng,
///     ) -> Proposal {
///         let here = window.center();
///         let east = here.step(Direction::East);
///         match window.get(east) {
///             Some(tile) if tile.is_passable() => Proposal {
///                 intents: vec![MoveIntent::new(here, east, Priority::HIGHEST)],
///                 ..Proposal::idle()
///             },
///             _ => Proposal::idle(),
///         }
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per cell per tick.
    ///
    /// `window` is centred on the cell's tile with the cell's vision radius.
    /// An empty `intents` list means the cell stays where it is.
    fn propose(
        &self,
        cell:   CellId,
        window: &VisionWindow,
        ctx:    &SimContext<'_>,
        rng:    &mut AgentRng,
    ) -> Proposal;

    /// Just the ranked moves of [`propose`][Self::propose].
    fn propose_moves(
        &self,
        cell:   CellId,
        window: &VisionWindow,
        ctx:    &SimContext<'_>,
        rng:    &mut AgentRng,
    ) -> Vec<MoveIntent> {
        self.propose(cell, window, ctx, rng).intents
    }
}
