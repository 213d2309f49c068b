//! Random-walk fallback used when there is nothing to path towards.

use cs_core::{AgentRng, Direction};

use crate::VisionWindow;

/// Shuffle the four directions with `rng` and keep those leading onto a
/// visible, unblocked tile, in shuffled order.
///
/// Occupancy is ignored here; contention is the resolver's problem.  An
/// empty result means the cell is boxed in and stays put.
pub fn wander_directions(window: &VisionWindow, rng: &mut AgentRng) -> Vec<Direction> {
    let mut dirs = Direction::ALL;
    rng.shuffle(&mut dirs);

    let center = window.center();
    dirs.into_iter()
        .filter(|&d| window.get(center.step(d)).is_some_and(|t| t.is_passable()))
        .collect()
}
