//! A no-op behavior model — cells never move.

use cs_core::{AgentRng, CellId};
use cs_spatial::VisionWindow;

use crate::{BehaviorModel, Proposal, SimContext};

/// A [`BehaviorModel`] that always stays put.
///
/// Useful as a placeholder in tests or for static obstacles that simply
/// occupy space.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn propose(
        &self,
        _cell:   CellId,
        _window: &VisionWindow,
        _ctx:    &SimContext<'_>,
        _rng:    &mut AgentRng,
    ) -> Proposal {
        Proposal::idle()
    }
}
