//! Core cell storage: `CellStore` (SoA data) and `CellTraits`.
//!
//! Every `Vec` field has exactly `count` elements; the `CellId` value is the
//! index into all of them:
//!
//! ```ignore
//! let pos = store.position[cell.index()];
//! ```
//!
//! The proposal phase only ever holds `&CellStore`.  All writes happen in the
//! sequential metabolism and apply phases of `cs-sim`.

use cs_core::{CellId, Position};

use crate::Mood;

// ── CellTraits ────────────────────────────────────────────────────────────────

/// Per-cell trait values, treated as opaque parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellTraits {
    /// Taxicab radius of the vision window.
    pub vision_radius: u32,
    /// Maximum food absorbed from the tile per tick.
    pub absorption: f64,
    /// Size of the internal food buffer.
    pub capacity: f64,
    /// Food burned from the buffer per tick.
    pub metabolism: f64,
}

impl Default for CellTraits {
    fn default() -> Self {
        Self {
            vision_radius: 3,
            absorption:    1.0,
            capacity:      10.0,
            metabolism:    0.5,
        }
    }
}

// ── CellStore ─────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all cell state.
pub struct CellStore {
    /// Number of cells.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Tile the cell currently occupies.
    pub position: Vec<Position>,

    /// Trait parameters, fixed for the cell's lifetime.
    pub traits: Vec<CellTraits>,

    /// Food carried in the internal buffer, in `[0, traits.capacity]`.
    pub food: Vec<f64>,

    /// Mood evaluated at the start of the current tick.
    pub mood: Vec<Mood>,

    /// Cached forage target.  Cleared whenever the cell falls back to
    /// wandering.
    pub target: Vec<Option<Position>>,

    /// Consecutive ticks spent with an empty buffer.
    pub starved_ticks: Vec<u32>,
}

impl CellStore {
    /// `true` if there are no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `CellId`s in ascending index order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.count as u32).map(CellId)
    }

    /// Vision radius of `cell`.
    #[inline]
    pub fn vision_radius(&self, cell: CellId) -> u32 {
        self.traits[cell.index()].vision_radius
    }

    /// Free room left in `cell`'s buffer.
    #[inline]
    pub fn free_capacity(&self, cell: CellId) -> f64 {
        let i = cell.index();
        (self.traits[i].capacity - self.food[i]).max(0.0)
    }

    // ── Package-private constructor used by CellStoreBuilder ──────────────

    pub(crate) fn from_parts(
        position: Vec<Position>,
        traits:   Vec<CellTraits>,
        food:     Vec<f64>,
    ) -> Self {
        let count = position.len();
        Self {
            count,
            position,
            traits,
            food,
            mood: vec![Mood::Stable; count],
            target: vec![None; count],
            starved_ticks: vec![0; count],
        }
    }
}
