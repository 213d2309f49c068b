//! The resolver's output: at most one move per source, at most one mover
//! per target.

use std::collections::BTreeMap;

use cs_behavior::Priority;
use cs_core::Position;

/// A committed move out of some source tile.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move {
    pub target:   Position,
    pub priority: Priority,
}

/// Partial function from source positions to target positions.
///
/// Sources without a viable move are simply absent.  Iteration is in
/// ascending source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    moves: BTreeMap<Position, Move>,
}

impl Assignment {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, source: Position, target: Position, priority: Priority) {
        self.moves.insert(source, Move { target, priority });
    }

    pub fn get(&self, source: Position) -> Option<&Move> {
        self.moves.get(&source)
    }

    /// Where the occupant of `source` goes, if anywhere.
    pub fn target_of(&self, source: Position) -> Option<Position> {
        self.get(source).map(|m| m.target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Move)> + '_ {
        self.moves.iter().map(|(&s, &m)| (s, m))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Committed 2-cycles as `(a, b)` pairs with `a < b`.
    pub fn swaps(&self) -> Vec<(Position, Position)> {
        self.iter()
            .filter(|&(s, m)| s < m.target && self.target_of(m.target) == Some(s))
            .map(|(s, m)| (s, m.target))
            .collect()
    }
}
