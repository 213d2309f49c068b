//! Move intents — the single-step moves a cell proposes each tick.

use std::fmt;

use cs_core::Position;

/// Largest occupancy surcharge the proposal generator tries.
pub const MAX_OCCUPANCY_COST: u32 = 4;

/// Rank of a move intent, `1` (lowest) to `4` (highest).
///
/// Occupancy-cost levels map inversely onto priorities: the path found with
/// cost 1 is proposed at priority 4, cost 4 at priority 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(u8);

impl Priority {
    pub const LOWEST: Priority = Priority(1);
    pub const HIGHEST: Priority = Priority(4);

    /// `None` outside `1..=4`.
    pub const fn new(value: u8) -> Option<Priority> {
        if value >= Self::LOWEST.0 && value <= Self::HIGHEST.0 {
            Some(Priority(value))
        } else {
            None
        }
    }

    /// Priority of a proposal found with `cost` (clamped to `1..=4`).
    pub fn from_occupancy_cost(cost: u32) -> Priority {
        let cost = cost.clamp(1, MAX_OCCUPANCY_COST) as u8;
        Priority(Self::HIGHEST.0 + 1 - cost)
    }

    /// The priority one rank below, or `None` at [`Priority::LOWEST`].
    pub fn lower(self) -> Option<Priority> {
        Priority::new(self.0 - 1)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A proposed move of whatever occupies `source` onto `target`.
///
/// `source` and `target` are expected to be orthogonally adjacent; the
/// intent graph rejects anything else.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveIntent {
    pub source:   Position,
    pub target:   Position,
    pub priority: Priority,
}

impl MoveIntent {
    #[inline]
    pub fn new(source: Position, target: Position, priority: Priority) -> Self {
        Self { source, target, priority }
    }

    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.source.is_adjacent(self.target)
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} @{}", self.source, self.target, self.priority)
    }
}
