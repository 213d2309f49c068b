//! Fluent builder for constructing a [`Sim`].

use cs_agent::CellStore;
use cs_behavior::{BehaviorModel, ForagingParams};
use cs_core::{SimConfig, Tick};
use cs_spatial::Grid;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, report interval, …
/// - [`Grid`] — the world, from [`cs_spatial::GridBuilder`]
/// - [`CellStore`] — from [`cs_agent::CellStoreBuilder`]
/// - `B: BehaviorModel` — the behavior implementation
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                      |
/// |------------------|------------------------------|
/// | `.foraging(p)`   | `ForagingParams::default()`  |
///
/// # Placement
///
/// Each cell is placed on the grid at `cells.position`.  A tile that already
/// holds that same cell is fine; a tile holding anything else is an error, as
/// is a grid occupant that no cell accounts for.
///
/// # Example
///
/// ```rust
/// use cs_agent::{CellStoreBuilder, CellTraits};
/// use cs_behavior::{ForagerBehavior, ForagingParams};
/// use cs_core::{Position, SimConfig};
/// use cs_sim::{NoopObserver, SimBuilder};
/// use cs_spatial::GridBuilder;
///
/// let grid = GridBuilder::new(8, 8).walled().resource(Position::new(5, 5), 3.0).build()?;
/// let mut cells = CellStoreBuilder::new();
/// cells.spawn(Position::new(2, 2), CellTraits::default());
///
/// let behavior = ForagerBehavior::new(ForagingParams::default())?;
/// let mut sim = SimBuilder::new(SimConfig::default(), grid, cells.build(), behavior).build()?;
/// sim.run(&mut NoopObserver)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:   SimConfig,
    grid:     Grid,
    cells:    CellStore,
    behavior: B,
    foraging: Option<ForagingParams>,
}

impl<B: BehaviorModel> SimBuilder<B> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: Grid, cells: CellStore, behavior: B) -> Self {
        Self { config, grid, cells, behavior, foraging: None }
    }

    /// Food thresholds for the metabolism phase.
    pub fn foraging(mut self, params: ForagingParams) -> Self {
        self.foraging = Some(params);
        self
    }

    /// Validate inputs, place cells, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;
        let foraging = self.foraging.unwrap_or_default();
        foraging.validate()?;

        let cells = self.cells;
        let mut grid = self.grid;

        // ── Validate SoA lengths ──────────────────────────────────────────
        for (what, got) in [
            ("trait", cells.traits.len()),
            ("food", cells.food.len()),
            ("position", cells.position.len()),
        ] {
            if got != cells.count {
                return Err(SimError::CellCountMismatch { expected: cells.count, got, what });
            }
        }

        // ── Place cells on the grid ───────────────────────────────────────
        for cell in cells.cell_ids() {
            let pos = cells.position[cell.index()];
            if grid.occupant(pos) != Some(cell) {
                grid.place(cell, pos)?;
            }
        }
        let occupied = grid.occupied_count();
        if occupied != cells.count {
            return Err(SimError::CellCountMismatch {
                expected: cells.count,
                got:      occupied,
                what:     "grid occupant",
            });
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        tracing::info!(
            cells = cells.count,
            width = grid.width(),
            height = grid.height(),
            seed = self.config.seed,
            ticks = self.config.total_ticks,
            "simulation built"
        );

        Ok(Sim {
            config:   self.config,
            foraging,
            now:      Tick::ZERO,
            cells,
            grid,
            behavior: self.behavior,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
