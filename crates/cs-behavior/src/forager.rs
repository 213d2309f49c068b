//! The forage proposal generator.
//!
//! A hungry cell looks for the nearest free food tile in its window, then
//! proposes the first step towards it under increasing occupancy surcharges:
//!
//! | occupancy cost | priority |
//! |----------------|----------|
//! | 1              | 4        |
//! | 2              | 3        |
//! | 3              | 2        |
//! | 4              | 1        |
//!
//! The loop stops as soon as a surcharge yields the same first step as
//! cost 1.  The extra proposals
//! tell the resolver where the cell would go if it had to steer around
//! other cells, so contention degrades into a detour rather than a stall.
//!
//! With no visible food, or no route to it, the cell wanders instead.

use cs_core::{AgentRng, CellId, Position};
use cs_spatial::{AStar, PathFinder, VisionWindow, find_nearest_match, wander_directions};

use crate::intent::MAX_OCCUPANCY_COST;
use crate::{BehaviorError, BehaviorModel, BehaviorResult, MoveIntent, Priority, Proposal, SimContext};

// ── ForagingParams ────────────────────────────────────────────────────────────

/// Tunables for [`ForagerBehavior`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForagingParams {
    /// Below this much food a tile counts as empty.
    pub min_food: f64,
}

impl Default for ForagingParams {
    fn default() -> Self {
        Self { min_food: 0.1 }
    }
}

impl ForagingParams {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !self.min_food.is_finite() || self.min_food < 0.0 {
            return Err(BehaviorError::Config(format!(
                "min_food must be a non-negative number, got {}",
                self.min_food
            )));
        }
        Ok(())
    }
}

// ── ForagerBehavior ───────────────────────────────────────────────────────────

/// Seek food when hungry, stay put when standing on it.
pub struct ForagerBehavior<P = AStar> {
    params: ForagingParams,
    finder: P,
}

impl ForagerBehavior<AStar> {
    /// Forager with the default A* path search.
    pub fn new(params: ForagingParams) -> BehaviorResult<Self> {
        Self::with_finder(params, AStar)
    }
}

impl<P: PathFinder> ForagerBehavior<P> {
    /// Forager with a custom path search.
    pub fn with_finder(params: ForagingParams, finder: P) -> BehaviorResult<Self> {
        params.validate()?;
        Ok(Self { params, finder })
    }

    pub fn params(&self) -> &ForagingParams {
        &self.params
    }

    /// Keep `cached` while it still holds free food inside the window,
    /// otherwise search for the nearest one.
    fn choose_target(&self, cached: Option<Position>, window: &VisionWindow) -> Option<Position> {
        let min_food = self.params.min_food;
        if let Some(pos) = cached {
            if pos != window.center() && window.get(pos).is_some_and(|t| t.is_forageable(min_food)) {
                return Some(pos);
            }
        }
        find_nearest_match(window, |t| t.is_forageable(min_food)).map(|d| d.position())
    }
}

impl<P: PathFinder + 'static> BehaviorModel for ForagerBehavior<P> {
    fn propose(
        &self,
        cell:   CellId,
        window: &VisionWindow,
        ctx:    &SimContext<'_>,
        rng:    &mut AgentRng,
    ) -> Proposal {
        let i = cell.index();
        if !ctx.cells.mood[i].seeks_food() {
            return Proposal::idle();
        }

        if let Some(target) = self.choose_target(ctx.cells.target[i], window) {
            let intents = ranked_path_moves(&self.finder, window, target);
            if !intents.is_empty() {
                return Proposal { intents, target: Some(target), wandered: false };
            }
        }

        tracing::trace!(cell = %cell, tick = %ctx.tick, "no reachable food, wandering");
        Proposal { intents: wander_moves(window, rng), target: None, wandered: true }
    }
}

// ── Proposal building blocks ──────────────────────────────────────────────────

/// Ranked first steps from the window centre towards `target`.
///
/// Empty when `target` is unreachable inside the window.  The cost-1 step
/// always comes first at [`Priority::HIGHEST`]; no target appears twice.
pub fn ranked_path_moves<P>(finder: &P, window: &VisionWindow, target: Position) -> Vec<MoveIntent>
where
    P: PathFinder + ?Sized,
{
    let source = window.center();
    let Some(best) = finder.path_to(window, target, 1) else {
        return Vec::new();
    };

    let mut intents = vec![MoveIntent::new(source, best.first_step, Priority::HIGHEST)];
    for cost in 2..=MAX_OCCUPANCY_COST {
        let Some(alt) = finder.path_to(window, target, cost) else { break };
        if alt.first_step == best.first_step {
            break;
        }
        if intents.iter().any(|m| m.target == alt.first_step) {
            continue;
        }
        intents.push(MoveIntent::new(source, alt.first_step, Priority::from_occupancy_cost(cost)));
    }
    intents
}

/// Every open neighbour in seeded random order, highest priority first.
pub fn wander_moves(window: &VisionWindow, rng: &mut AgentRng) -> Vec<MoveIntent> {
    let source = window.center();
    let mut priority = Some(Priority::HIGHEST);
    let mut intents = Vec::with_capacity(4);
    for dir in wander_directions(window, rng) {
        let Some(p) = priority else { break };
        intents.push(MoveIntent::new(source, source.step(dir), p));
        priority = p.lower();
    }
    intents
}
