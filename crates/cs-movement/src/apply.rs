//! Transactional application of an [`Assignment`] to the grid.
//!
//! # Two steps
//!
//! 1. [`MovePlan::stage`] checks every committed move against the grid
//!    as it was at tick start.  A move survives only if its source holds a
//!    cell, its target is in bounds and unblocked, and the target is either
//!    empty or being vacated by another surviving move.  Cancelling one move
//!    can strand the move into its source, so cancellation repeats until
//!    nothing changes.  Cycles (swaps, rotations) survive whole because
//!    every member vacates the tile the next one enters.
//!
//! 2. [`MovePlan::commit`] re-checks every mover and target against the
//!    live grid, clears every source, then writes every target.  No move ever observes a half-applied grid, so
//!    chains and cycles cannot clobber each other.

use std::collections::{BTreeMap, BTreeSet};

use cs_core::{CellId, Position};
use cs_spatial::{Grid, SpatialError};

use crate::{Assignment, MovementError, MovementResult};

/// A move that passed staging.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StagedMove {
    pub cell: CellId,
    pub from: Position,
    pub to:   Position,
}

/// Why a committed move was dropped during staging.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CancelReason {
    /// Nothing stands on the source tile.
    NoMover,
    /// Target is out of bounds or blocked.
    Impassable,
    /// Target holds a cell that is not leaving.
    TargetHeld,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cancelled {
    pub from:   Position,
    pub to:     Position,
    pub reason: CancelReason,
}

/// The surviving moves of one tick, ready to commit.
#[derive(Clone, Debug, Default)]
pub struct MovePlan {
    moves:     Vec<StagedMove>,
    cancelled: Vec<Cancelled>,
}

impl MovePlan {
    /// Validate `assignment` against `grid` without mutating it.
    pub fn stage(assignment: &Assignment, grid: &Grid) -> MovePlan {
        let mut active: BTreeMap<Position, StagedMove> = BTreeMap::new();
        let mut cancelled = Vec::new();

        for (from, mv) in assignment.iter() {
            let to = mv.target;
            let Some(cell) = grid.occupant(from) else {
                cancelled.push(Cancelled { from, to, reason: CancelReason::NoMover });
                continue;
            };
            if grid.tile(to).is_none_or(|t| t.blocked) {
                cancelled.push(Cancelled { from, to, reason: CancelReason::Impassable });
                continue;
            }
            active.insert(from, StagedMove { cell, from, to });
        }

        loop {
            let stuck: Vec<Position> = active
                .values()
                .filter(|m| grid.occupant(m.to).is_some() && !active.contains_key(&m.to))
                .map(|m| m.from)
                .collect();
            if stuck.is_empty() {
                break;
            }
            for from in stuck {
                if let Some(m) = active.remove(&from) {
                    tracing::debug!(cell = %m.cell, from = %m.from, to = %m.to, "move cancelled, target stays occupied");
                    cancelled.push(Cancelled { from, to: m.to, reason: CancelReason::TargetHeld });
                }
            }
        }

        MovePlan { moves: active.into_values().collect(), cancelled }
    }

    /// Surviving moves in ascending source order.
    pub fn moves(&self) -> &[StagedMove] {
        &self.moves
    }

    pub fn cancelled(&self) -> &[Cancelled] {
        &self.cancelled
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Apply every surviving move to `grid` at once.
    ///
    /// Returns the applied moves so the caller can update cell positions.
    ///
    /// # Errors
    ///
    /// [`MovementError::StalePlan`] if a mover is no longer on its source
    /// tile, or [`MovementError::Spatial`] if a target has since become
    /// blocked or taken by a cell that is not leaving.  Either way the grid
    /// is untouched.
    pub fn commit(self, grid: &mut Grid) -> MovementResult<Vec<StagedMove>> {
        self.check(grid)?;
        for m in &self.moves {
            grid.vacate(m.from);
        }
        for m in &self.moves {
            grid.place(m.cell, m.to)?;
        }
        Ok(self.moves)
    }

    /// Re-validate the plan against the live grid before anything moves.
    fn check(&self, grid: &Grid) -> MovementResult<()> {
        if let Some(m) = self.moves.iter().find(|m| grid.occupant(m.from) != Some(m.cell)) {
            return Err(MovementError::StalePlan(m.from));
        }
        let leaving: BTreeSet<Position> = self.moves.iter().map(|m| m.from).collect();
        for m in &self.moves {
            let tile = grid.tile(m.to).ok_or(SpatialError::OutOfBounds(m.to))?;
            if tile.blocked {
                return Err(SpatialError::Blocked(m.to).into());
            }
            if let Some(by) = tile.occupant.filter(|_| !leaving.contains(&m.to)) {
                return Err(SpatialError::Occupied { pos: m.to, by }.into());
            }
        }
        Ok(())
    }
}
