//! Read-only simulation state passed to every behavior callback.

use cs_agent::CellStore;
use cs_core::Tick;

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// Built once per tick by cs-sim after the metabolism phase and shared
/// immutably across all cells during the proposal phase.  Moods in
/// `cells` are already evaluated for this tick.
pub struct SimContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Read-only view of every cell's SoA state arrays.
    pub cells: &'a CellStore,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(tick: Tick, cells: &'a CellStore) -> Self {
        Self { tick, cells }
    }
}
