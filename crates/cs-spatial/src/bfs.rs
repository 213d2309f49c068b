//! Nearest-match discovery by breadth-first search over a vision window.

use std::collections::VecDeque;

use cs_core::Position;

use crate::search::NO_ORIGIN;
use crate::{TileView, VisionWindow};

/// The nearest tile satisfying a predicate, and how the search reached it.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    /// The matching tile.
    pub tile: TileView,
    /// Discovery chain from the step after the centre to `tile`, nearest
    /// first.  Empty when the centre itself matched.
    pub chain: Vec<Position>,
}

impl Discovery {
    #[inline]
    pub fn position(&self) -> Position {
        self.tile.position
    }
}

/// Breadth-first search from the window centre for the first tile that
/// satisfies `predicate`.
///
/// Neighbours are expanded in `Direction::ALL` order (North, South, West,
/// East), so among equidistant matches the one discovered through the
/// earlier direction wins.  Absent slots are skipped.  Blocked tiles are
/// tested against `predicate` but never expanded from.
pub fn find_nearest_match<P>(window: &VisionWindow, predicate: P) -> Option<Discovery>
where
    P: Fn(&TileView) -> bool,
{
    let start = window.center_index();
    window.slot(start)?;

    let mut visited = vec![false; window.len()];
    let mut origin = vec![NO_ORIGIN; window.len()];
    let mut queue = VecDeque::with_capacity(window.len());

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(tile) = window.slot(current) else { continue };
        if predicate(tile) {
            return Some(Discovery { tile: *tile, chain: chain_to(window, &origin, current) });
        }
        // Walls can match but are never walked through.
        if !tile.is_passable() {
            continue;
        }
        for next_pos in tile.position.neighbors() {
            let Some(next) = window.index_of(next_pos) else { continue };
            if visited[next] || window.slot(next).is_none() {
                continue;
            }
            visited[next] = true;
            origin[next] = current;
            queue.push_back(next);
        }
    }

    None
}

fn chain_to(window: &VisionWindow, origin: &[usize], found: usize) -> Vec<Position> {
    let mut chain = Vec::new();
    let mut cur = found;
    while origin[cur] != NO_ORIGIN {
        chain.push(window.position_of(cur));
        cur = origin[cur];
    }
    chain.reverse();
    chain
}
