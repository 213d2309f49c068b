//! Tile grid representation and builder.
//!
//! # Data layout
//!
//! Tiles are stored row-major in a single `Vec<Tile>`:
//!
//! ```text
//! tiles[ y * width + x ]
//! ```
//!
//! `y` grows downward, so North of `(x, y)` is `(x, y - 1)`.  A tile holds at
//! most one occupant.  Blocked tiles never hold food or occupants.

use std::fmt;

use cs_core::{CellId, Position, SimRng};

use crate::{SpatialError, SpatialResult, VisionWindow};

/// Default ceiling for food on a single tile.
pub const DEFAULT_RESOURCE_CAP: f64 = 20.0;

// ── Tile ──────────────────────────────────────────────────────────────────────

/// Mutable per-tile state owned by the [`Grid`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub blocked:  bool,
    pub occupant: Option<CellId>,
    pub resource: f64,
}

// ── TileView ──────────────────────────────────────────────────────────────────

/// Read-only snapshot of one tile, as seen through a [`VisionWindow`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileView {
    pub position: Position,
    pub blocked:  bool,
    pub occupied: bool,
    pub resource: f64,
}

impl TileView {
    /// An unblocked, unoccupied tile with no food.
    pub fn open(position: Position) -> Self {
        Self { position, blocked: false, occupied: false, resource: 0.0 }
    }

    /// `true` if a cell could step onto this tile (occupancy aside).
    #[inline]
    pub fn is_passable(&self) -> bool {
        !self.blocked
    }

    /// Free, unblocked, and holding at least `min_food`.
    #[inline]
    pub fn is_forageable(&self, min_food: f64) -> bool {
        !self.blocked && !self.occupied && self.resource >= min_food && self.resource > 0.0
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// The bounded 2-D world.
///
/// Do not construct directly; use [`GridBuilder`].
#[derive(Clone, Debug)]
pub struct Grid {
    width:        u32,
    height:       u32,
    tiles:        Vec<Tile>,
    resource_cap: f64,
}

impl Grid {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resource_cap(&self) -> f64 {
        self.resource_cap
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    // ── Tile access ───────────────────────────────────────────────────────

    #[inline]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(|i| &mut self.tiles[i])
    }

    /// Snapshot of the tile at `pos`, or `None` outside the grid.
    pub fn view(&self, pos: Position) -> Option<TileView> {
        self.tile(pos).map(|t| TileView {
            position: pos,
            blocked:  t.blocked,
            occupied: t.occupant.is_some(),
            resource: t.resource,
        })
    }

    #[inline]
    pub fn occupant(&self, pos: Position) -> Option<CellId> {
        self.tile(pos).and_then(|t| t.occupant)
    }

    /// Number of occupied tiles.
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.occupant.is_some()).count()
    }

    /// Sum of food across all tiles.
    pub fn total_resource(&self) -> f64 {
        self.tiles.iter().map(|t| t.resource).sum()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Put `cell` on `pos`.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is out of bounds, blocked, or already occupied.
    pub fn place(&mut self, cell: CellId, pos: Position) -> SpatialResult<()> {
        let tile = self.tile_mut(pos).ok_or(SpatialError::OutOfBounds(pos))?;
        if tile.blocked {
            return Err(SpatialError::Blocked(pos));
        }
        if let Some(by) = tile.occupant {
            return Err(SpatialError::Occupied { pos, by });
        }
        tile.occupant = Some(cell);
        Ok(())
    }

    /// Remove and return whatever occupies `pos`.
    pub fn vacate(&mut self, pos: Position) -> Option<CellId> {
        self.tile_mut(pos).and_then(|t| t.occupant.take())
    }

    // ── Resources ─────────────────────────────────────────────────────────

    /// Remove up to `max` food from `pos` and return how much was taken.
    pub fn take_resource(&mut self, pos: Position, max: f64) -> f64 {
        match self.tile_mut(pos) {
            Some(tile) if !tile.blocked => {
                let taken = tile.resource.min(max.max(0.0));
                tile.resource -= taken;
                taken
            }
            _ => 0.0,
        }
    }

    /// Add food to `pos`, clamped to the grid's resource cap.
    pub fn add_resource(&mut self, pos: Position, amount: f64) {
        let cap = self.resource_cap;
        if let Some(tile) = self.tile_mut(pos) {
            if !tile.blocked {
                tile.resource = (tile.resource + amount).clamp(0.0, cap);
            }
        }
    }

    /// Seed food on open tiles: each gets `U[0, max)` with probability
    /// `density`.
    pub fn scatter_resources(&mut self, rng: &mut SimRng, density: f64, max: f64) {
        let cap = self.resource_cap;
        for tile in self.tiles.iter_mut().filter(|t| !t.blocked) {
            if rng.gen_bool(density) {
                tile.resource = rng.gen_range(0.0..max.max(f64::MIN_POSITIVE)).min(cap);
            }
        }
    }

    // ── Vision ────────────────────────────────────────────────────────────

    /// Square window of side `2 * radius + 1` centred on `center`.
    ///
    /// Entries are `None` outside the grid or beyond taxicab `radius`.  The
    /// window holds copies, so later grid mutation does not affect it.
    pub fn window_around(&self, center: Position, radius: u32) -> VisionWindow {
        VisionWindow::from_fn(center, radius, |pos| self.view(pos))
    }
}

impl fmt::Display for Grid {
    /// `#` blocked, `c` occupied, `*` food, `.` empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.tiles.chunks(self.width as usize) {
            for tile in row {
                let ch = if tile.blocked {
                    '#'
                } else if tile.occupant.is_some() {
                    'c'
                } else if tile.resource > 0.0 {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Incrementally build a [`Grid`].
///
/// # Example
///
/// ```rust
/// use cs_core::{CellId, Position};
/// use cs_spatial::GridBuilder;
///
/// let grid = GridBuilder::new(5, 5)
///     .walled()
///     .resource(Position::new(2, 1), 4.0)
///     .occupant(Position::new(2, 2), CellId(0))
///     .build()
///     .unwrap();
/// assert!(grid.tile(Position::new(0, 0)).unwrap().blocked);
/// assert_eq!(grid.occupant(Position::new(2, 2)), Some(CellId(0)));
/// ```
pub struct GridBuilder {
    width:        u32,
    height:       u32,
    tiles:        Vec<Tile>,
    resource_cap: f64,
    occupants:    Vec<(Position, CellId)>,
}

impl GridBuilder {
    /// An all-open grid of `width × height` with no food.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width as usize * height as usize],
            resource_cap: DEFAULT_RESOURCE_CAP,
            occupants: Vec::new(),
        }
    }

    /// Parse an ASCII map, one string per row.
    ///
    /// `#` blocked, `.` open, `*` food at the resource cap, `c` a cell.
    /// Cells receive `CellId`s in reading order (row by row, left to right).
    pub fn from_rows(rows: &[&str]) -> SpatialResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut builder = Self::new(width as u32, height as u32);
        let mut next_cell = 0u32;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SpatialError::RaggedRows);
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                builder = match ch {
                    '.' => builder,
                    '#' => builder.block(pos),
                    '*' => {
                        let cap = builder.resource_cap;
                        builder.resource(pos, cap)
                    }
                    'c' => {
                        next_cell += 1;
                        builder.occupant(pos, CellId(next_cell - 1))
                    }
                    other => return Err(SpatialError::Parse { row: y, col: x, ch: other }),
                };
            }
        }
        Ok(builder)
    }

    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let in_bounds = pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height;
        if !in_bounds {
            return None;
        }
        let i = pos.y as usize * self.width as usize + pos.x as usize;
        Some(&mut self.tiles[i])
    }

    /// Block every border tile.
    pub fn walled(mut self) -> Self {
        let (w, h) = (self.width as i32, self.height as i32);
        for y in 0..h {
            for x in 0..w {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    self = self.block(Position::new(x, y));
                }
            }
        }
        self
    }

    /// Block `pos`.  Out-of-bounds positions are ignored.
    pub fn block(mut self, pos: Position) -> Self {
        if let Some(tile) = self.tile_mut(pos) {
            tile.blocked = true;
            tile.resource = 0.0;
        }
        self
    }

    /// Set food on `pos` (clamped to the cap when the grid is built).
    pub fn resource(mut self, pos: Position, amount: f64) -> Self {
        if let Some(tile) = self.tile_mut(pos) {
            tile.resource = amount.max(0.0);
        }
        self
    }

    /// Ceiling for food on a single tile.
    pub fn resource_cap(mut self, cap: f64) -> Self {
        self.resource_cap = cap.max(0.0);
        self
    }

    /// Place `cell` on `pos` when the grid is built.
    pub fn occupant(mut self, pos: Position, cell: CellId) -> Self {
        self.occupants.push((pos, cell));
        self
    }

    /// Finish the grid.
    ///
    /// # Errors
    ///
    /// Fails if an occupant lands out of bounds, on a blocked tile, or on a
    /// tile that already has one.
    pub fn build(self) -> SpatialResult<Grid> {
        let cap = self.resource_cap;
        let mut grid = Grid {
            width:        self.width,
            height:       self.height,
            tiles:        self.tiles,
            resource_cap: cap,
        };
        for tile in grid.tiles.iter_mut() {
            tile.resource = if tile.blocked { 0.0 } else { tile.resource.min(cap) };
        }
        for (pos, cell) in self.occupants {
            grid.place(cell, pos)?;
        }
        tracing::debug!(
            width = grid.width,
            height = grid.height,
            occupants = grid.occupied_count(),
            "grid built"
        );
        Ok(grid)
    }
}
