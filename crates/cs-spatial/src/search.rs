//! Path-search trait and the default windowed A* implementation.
//!
//! # Pluggability
//!
//! Behaviour models call path search through the [`PathFinder`] trait, so an
//! application can swap in a different algorithm without touching the
//! proposal generator.  The default [`AStar`] is a textbook A* restricted to
//! the caller's [`VisionWindow`].
//!
//! # Cost model
//!
//! Stepping onto an unoccupied tile costs 1.  Stepping onto a tile held by
//! another cell costs `occupancy_cost` (clamped to at least 1 so the
//! taxicab heuristic stays admissible and consistent).  Blocked and absent
//! slots are never entered.
//!
//! # Arena
//!
//! Per-search node state (`cost_so_far`, back-pointer, closed flag) lives in
//! flat vectors indexed by window slot.  Nothing outlives the call.

use std::collections::BTreeSet;

use cs_core::Position;

use crate::VisionWindow;

/// Cost sentinel for "not reached yet".
const UNVISITED: u32 = u32::MAX;

/// Back-pointer sentinel for "no origin" (the start slot, or unreached).
pub(crate) const NO_ORIGIN: usize = usize::MAX;

// ── SearchResult ──────────────────────────────────────────────────────────────

/// The outcome of a successful path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Steps after the first one: 0 when the target is adjacent.
    pub distance: u32,
    /// Accumulated edge cost from the start to the target.
    pub cost: u32,
    /// The tile adjacent to the start on the found path.
    pub first_step: Position,
    /// Every tile on the path, from `first_step` to the target inclusive.
    pub path: Vec<Position>,
}

impl SearchResult {
    /// Number of single-tile moves to reach the target.
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    /// The target this result leads to.
    #[inline]
    pub fn target(&self) -> Position {
        self.path.last().copied().unwrap_or(self.first_step)
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable windowed path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers during the parallel proposal phase.
pub trait PathFinder: Send + Sync {
    /// Find a path from the window's centre to `target`.
    ///
    /// Returns `None` when `target` lies beyond the window's radius (no
    /// search is attempted), when it equals the centre, or when the window
    /// contains no route to it.
    fn path_to(
        &self,
        window:         &VisionWindow,
        target:         Position,
        occupancy_cost: u32,
    ) -> Option<SearchResult>;
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// A* with a taxicab heuristic over the vision window.
///
/// The open set is an ordered set keyed by `(f, h, slot)`.  Finding a
/// cheaper path to a frontier slot removes its old key and inserts the new
/// one, so each slot appears at most once.  Ties on `f` favour the slot
/// closer to the target, then the lower slot index.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl PathFinder for AStar {
    fn path_to(
        &self,
        window:         &VisionWindow,
        target:         Position,
        occupancy_cost: u32,
    ) -> Option<SearchResult> {
        astar(window, target, occupancy_cost)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

struct Arena {
    cost:   Vec<u32>,
    origin: Vec<usize>,
    closed: Vec<bool>,
}

impl Arena {
    fn new(len: usize) -> Self {
        Self {
            cost:   vec![UNVISITED; len],
            origin: vec![NO_ORIGIN; len],
            closed: vec![false; len],
        }
    }
}

fn astar(window: &VisionWindow, target: Position, occupancy_cost: u32) -> Option<SearchResult> {
    let start = window.center();
    if start.taxicab(target) > window.radius() || start == target {
        return None;
    }
    let goal = window.index_of(target)?;
    if !window.slot(goal)?.is_passable() {
        return None;
    }

    let occupancy_cost = occupancy_cost.max(1);
    let h = |slot: usize| window.position_of(slot).taxicab(target);

    let mut arena = Arena::new(window.len());
    let mut open: BTreeSet<(u32, u32, usize)> = BTreeSet::new();

    let s = window.center_index();
    arena.cost[s] = 0;
    open.insert((h(s), h(s), s));

    while let Some((_, _, current)) = open.pop_first() {
        if current == goal {
            return Some(reconstruct(window, &arena, goal));
        }
        arena.closed[current] = true;

        for next_pos in window.position_of(current).neighbors() {
            let Some(next) = window.index_of(next_pos) else { continue };
            let Some(tile) = window.slot(next) else { continue };
            if !tile.is_passable() || arena.closed[next] {
                continue;
            }

            let step = if tile.occupied { occupancy_cost } else { 1 };
            let g = arena.cost[current].saturating_add(step);
            if g < arena.cost[next] {
                let hn = h(next);
                if arena.cost[next] != UNVISITED {
                    open.remove(&(arena.cost[next] + hn, hn, next));
                }
                arena.cost[next] = g;
                arena.origin[next] = current;
                open.insert((g + hn, hn, next));
            }
        }
    }

    None
}

fn reconstruct(window: &VisionWindow, arena: &Arena, goal: usize) -> SearchResult {
    let mut path = Vec::new();
    let mut cur = goal;
    while arena.origin[cur] != NO_ORIGIN {
        path.push(window.position_of(cur));
        cur = arena.origin[cur];
    }
    path.reverse();

    SearchResult {
        distance:   path.len().saturating_sub(1) as u32,
        cost:       arena.cost[goal],
        first_step: path[0],
        path,
    }
}
