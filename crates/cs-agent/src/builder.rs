//! Fluent builder for constructing a `CellStore`.
//!
//! # Usage
//!
//! ```rust
//! use cs_agent::{CellStoreBuilder, CellTraits};
//! use cs_core::Position;
//!
//! let mut builder = CellStoreBuilder::new();
//! let a = builder.spawn(Position::new(1, 1), CellTraits::default());
//! let b = builder.spawn(Position::new(2, 1), CellTraits::default());
//! let store = builder.build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.position[b.index()], Position::new(2, 1));
//! # let _ = a;
//! ```

use cs_core::{CellId, Position};

use crate::{CellStore, CellTraits};

/// Fluent builder for [`CellStore`].
///
/// Cells get consecutive `CellId`s in spawn order and start with a full
/// buffer.  Placing them on a grid is the caller's job (see
/// `cs_spatial::Grid::place`).
#[derive(Default)]
pub struct CellStoreBuilder {
    position: Vec<Position>,
    traits:   Vec<CellTraits>,
    food:     Vec<f64>,
}

impl CellStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell at `position` with a full buffer.
    pub fn spawn(&mut self, position: Position, traits: CellTraits) -> CellId {
        self.spawn_with_food(position, traits, traits.capacity)
    }

    /// Add a cell with an explicit starting buffer (clamped to capacity).
    pub fn spawn_with_food(&mut self, position: Position, traits: CellTraits, food: f64) -> CellId {
        let id = CellId(self.position.len() as u32);
        self.position.push(position);
        self.traits.push(traits);
        self.food.push(food.clamp(0.0, traits.capacity));
        id
    }

    /// Number of cells spawned so far.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn build(self) -> CellStore {
        CellStore::from_parts(self.position, self.traits, self.food)
    }
}
