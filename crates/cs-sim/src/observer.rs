//! Simulation observer trait for progress reporting and data collection.

use cs_agent::CellStore;
use cs_core::Tick;
use cs_spatial::Grid;

/// Counters for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Cells that proposed at least one move.
    pub proposers: usize,
    /// Distinct edges in the intent graph.
    pub intents:   usize,
    /// Moves the resolver committed.
    pub committed: usize,
    /// Moves that survived staging and were written to the grid.
    pub applied:   usize,
    /// Committed moves dropped during staging.
    pub cancelled: usize,
    /// Cells that fell back to wandering.
    pub wandered:  usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — movement counter
///
/// ```rust
/// use cs_core::Tick;
/// use cs_sim::{SimObserver, TickStats};
///
/// #[derive(Default)]
/// struct Moves(usize);
///
/// impl SimObserver for Moves {
///     fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
///         self.0 += stats.applied;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's counters.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called every `config.report_interval_ticks` ticks, after the tick's
    /// moves have been applied.
    fn on_snapshot(&mut self, _tick: Tick, _cells: &CellStore, _grid: &Grid) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
