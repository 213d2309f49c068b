//! The bounded view a cell has of the grid.
//!
//! A `VisionWindow` is a `(2r + 1) × (2r + 1)` square of optional tile
//! snapshots centred on the observing cell.  Slots outside the grid or
//! beyond taxicab distance `r` are `None`.  Searches address slots by
//! window-relative index and report absolute [`Position`]s.

use cs_core::Position;

use crate::TileView;

#[derive(Clone, Debug)]
pub struct VisionWindow {
    center: Position,
    radius: u32,
    side:   usize,
    /// Row-major slots; slot `(col, row)` maps to
    /// `(center.x - r + col, center.y - r + row)`.
    cells:  Vec<Option<TileView>>,
}

impl VisionWindow {
    /// Build a window by asking `lookup` for every slot within taxicab
    /// `radius` of `center`.  Slots beyond the radius are never queried.
    pub fn from_fn<F>(center: Position, radius: u32, mut lookup: F) -> Self
    where
        F: FnMut(Position) -> Option<TileView>,
    {
        let side = 2 * radius as usize + 1;
        let mut cells = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                let pos = Position::new(
                    center.x - radius as i32 + col as i32,
                    center.y - radius as i32 + row as i32,
                );
                let slot = if center.taxicab(pos) <= radius { lookup(pos) } else { None };
                cells.push(slot);
            }
        }
        Self { center, radius, side, cells }
    }

    /// Absolute position of the observing cell.
    #[inline]
    pub fn center(&self) -> Position {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Side length, `2 * radius + 1`.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total slot count (including absent slots).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Slot index of the centre.
    #[inline]
    pub fn center_index(&self) -> usize {
        self.radius as usize * self.side + self.radius as usize
    }

    /// Slot index of an absolute position, or `None` outside the square.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let col = pos.x - self.center.x + self.radius as i32;
        let row = pos.y - self.center.y + self.radius as i32;
        let side = self.side as i32;
        (col >= 0 && row >= 0 && col < side && row < side)
            .then(|| row as usize * self.side + col as usize)
    }

    /// Absolute position of slot `index`.
    pub fn position_of(&self, index: usize) -> Position {
        let row = (index / self.side) as i32;
        let col = (index % self.side) as i32;
        Position::new(
            self.center.x - self.radius as i32 + col,
            self.center.y - self.radius as i32 + row,
        )
    }

    /// Tile in slot `index`, if present.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&TileView> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Tile at an absolute position, if visible.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<&TileView> {
        self.index_of(pos).and_then(|i| self.slot(i))
    }

    /// `true` if `pos` is a visible slot.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// All visible tiles in row-major order.
    pub fn visible(&self) -> impl Iterator<Item = &TileView> + '_ {
        self.cells.iter().flatten()
    }
}
