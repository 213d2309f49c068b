//! The hunger state machine.
//!
//! A cell's mood is re-derived once per tick from two sensed inputs: how
//! much food its tile holds and how much food it carries.  Nothing about the
//! previous mood is consulted, so the transition table is total:
//!
//! | tile resource            | buffer | mood       |
//! |--------------------------|--------|------------|
//! | `>= min_food` and `> 0`  | any    | `Stable`   |
//! | otherwise                | `> 0`  | `Hungry`   |
//! | otherwise                | `== 0` | `Starving` |
//!
//! An empty tile never counts as food, even with `min_food == 0`.

use std::fmt;

/// What a cell wants to do this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    /// Standing on food.  Eats and stays put.
    #[default]
    Stable,
    /// Tile is empty but the buffer still has reserves.
    Hungry,
    /// Tile is empty and so is the buffer.
    Starving,
}

impl Mood {
    /// Evaluate the transition table above.
    pub fn evaluate(tile_resource: f64, buffer: f64, min_food: f64) -> Mood {
        if Self::has_food(tile_resource, min_food) {
            Mood::Stable
        } else if buffer > 0.0 {
            Mood::Hungry
        } else {
            Mood::Starving
        }
    }

    /// `true` when a tile holding `tile_resource` counts as food.
    #[inline]
    pub fn has_food(tile_resource: f64, min_food: f64) -> bool {
        tile_resource >= min_food && tile_resource > 0.0
    }

    /// `true` when the cell should look for food elsewhere.
    #[inline]
    pub fn seeks_food(self) -> bool {
        matches!(self, Mood::Hungry | Mood::Starving)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Stable   => "stable",
            Mood::Hungry   => "hungry",
            Mood::Starving => "starving",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
