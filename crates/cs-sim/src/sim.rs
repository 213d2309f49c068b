//! The `Sim` struct and its tick loop.

use cs_agent::{CellStore, Mood};
use cs_behavior::{BehaviorModel, ForagingParams, Proposal, SimContext};
use cs_core::{AgentRng, CellId, Position, SimConfig, Tick};
use cs_movement::{IntentGraph, MovePlan, resolve};
use cs_spatial::Grid;

use crate::{SimError, SimObserver, SimResult, TickStats};

// ── Digest ────────────────────────────────────────────────────────────────────

/// One tick of metabolism, computed but not yet applied.
struct Digest {
    mood:          Vec<Mood>,
    food:          Vec<f64>,
    starved_ticks: Vec<u32>,
    /// Food to remove from each tile once the tick commits.
    eaten:         Vec<(Position, f64)>,
}

impl Digest {
    /// Exchange the staged per-cell state with the store's.  Calling it
    /// twice restores the store.
    fn swap_into(&mut self, cells: &mut CellStore) {
        std::mem::swap(&mut self.mood, &mut cells.mood);
        std::mem::swap(&mut self.food, &mut cells.food);
        std::mem::swap(&mut self.starved_ticks, &mut cells.starved_ticks);
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B>` holds all simulation state and drives the tick loop:
///
/// 1. **Metabolism** (sequential, ascending `CellId`): sense the tile,
///    evaluate [`Mood`], eat, burn.  Staged until the tick commits.
/// 2. **Proposals** (optionally parallel with the `parallel` feature): call
///    [`BehaviorModel::propose`] for every cell with an owned window
///    snapshot and a fresh per-tick [`AgentRng`].
/// 3. **Resolution**: every proposal goes into one
///    [`IntentGraph`]; [`resolve`] reduces it to an assignment.
/// 4. **Apply**: the assignment is staged against the grid and committed
///    in one pass; cell positions follow.
///
/// A tick that returns an error leaves every cell and tile as it was.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel> {
    /// Global configuration (total ticks, seed, …).
    pub config: SimConfig,

    /// Food thresholds used by the metabolism phase.
    pub foraging: ForagingParams,

    /// The next tick to process.
    pub now: Tick,

    /// Cell state (SoA arrays).  Behavior models see it through `SimContext`.
    pub cells: CellStore,

    /// The world.  Every cell stands on the tile matching
    /// `cells.position`, and nothing else stands anywhere.
    pub grid: Grid,

    /// The behavior model.  Called once per cell per tick.
    pub behavior: B,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<B: BehaviorModel> Sim<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.now < self.config.end_tick() {
            self.step(observer)?;
        }
        tracing::info!(
            final_tick = %self.now,
            cells = self.cells.count,
            food_left = self.grid.total_resource(),
            "simulation finished"
        );
        observer.on_sim_end(self.now);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.now;
        observer.on_tick_start(now);
        let stats = self.process_tick(now)?;
        observer.on_tick_end(now, &stats);

        if now.0.is_multiple_of(self.config.report_interval_ticks) {
            tracing::info!(
                tick = %now,
                proposers = stats.proposers,
                committed = stats.committed,
                applied = stats.applied,
                wandered = stats.wandered,
                food = self.grid.total_resource(),
                "tick summary"
            );
            observer.on_snapshot(now, &self.cells, &self.grid);
        }

        self.now = now.next();
        Ok(stats)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Run one tick.  On error the cells and the grid are exactly as they
    /// were before the call.
    fn process_tick(&mut self, now: Tick) -> SimResult<TickStats> {
        // ── Phase 1: metabolism (staged) ──────────────────────────────────
        //
        // Proposals see the new moods and buffers, so they are swapped into
        // the store; the grid is only fed once the moves have committed.
        let mut digest = self.digest();
        digest.swap_into(&mut self.cells);

        match self.plan_and_commit(now) {
            Ok(stats) => {
                for &(pos, amount) in &digest.eaten {
                    self.grid.take_resource(pos, amount);
                }
                Ok(stats)
            }
            Err(e) => {
                digest.swap_into(&mut self.cells);
                Err(e)
            }
        }
    }

    /// Phases 2 to 4.  Touches nothing until the graph is resolved and the
    /// plan passes its commit checks.
    fn plan_and_commit(&mut self, now: Tick) -> SimResult<TickStats> {
        let mut stats = TickStats::default();

        // ── Phase 2: proposals (produce) ──────────────────────────────────
        //
        // Returned in ascending CellId order regardless of how they were
        // computed.
        let proposals = self.compute_proposals(now);

        // ── Phase 3: intent graph + resolution ────────────────────────────
        let mut graph = IntentGraph::with_capacity(proposals.len());
        for (cell, proposal) in &proposals {
            let expected = self.cells.position[cell.index()];
            if let Some(bad) = proposal.intents.iter().find(|m| m.source != expected) {
                return Err(SimError::MisplacedIntent { cell: *cell, at: bad.source, expected });
            }
            graph.extend(proposal.intents.iter().copied())?;

            stats.proposers += usize::from(!proposal.intents.is_empty());
            stats.wandered += usize::from(proposal.wandered);
        }

        let assignment = resolve(&graph);
        stats.intents = graph.len();
        stats.committed = assignment.len();

        // ── Phase 4: apply ────────────────────────────────────────────────
        let plan = MovePlan::stage(&assignment, &self.grid);
        stats.cancelled = plan.cancelled().len();
        let applied = plan.commit(&mut self.grid)?;
        stats.applied = applied.len();
        for m in applied {
            self.cells.position[m.cell.index()] = m.to;
        }
        for (cell, proposal) in proposals {
            self.cells.target[cell.index()] = proposal.target;
        }

        tracing::debug!(
            tick = %now,
            intents = stats.intents,
            committed = stats.committed,
            applied = stats.applied,
            cancelled = stats.cancelled,
            "tick resolved"
        );
        Ok(stats)
    }

    /// Sense, eat and burn for every cell in ascending `CellId` order,
    /// without writing anything back.
    fn digest(&self) -> Digest {
        let min_food = self.foraging.min_food;
        let cells = &self.cells;
        let mut digest = Digest {
            mood:          Vec::with_capacity(cells.count),
            food:          Vec::with_capacity(cells.count),
            starved_ticks: Vec::with_capacity(cells.count),
            eaten:         Vec::new(),
        };

        for i in 0..cells.count {
            let pos = cells.position[i];
            let traits = cells.traits[i];
            let on_tile = self.grid.tile(pos).filter(|t| !t.blocked).map_or(0.0, |t| t.resource);
            let mut food = cells.food[i];

            digest.mood.push(Mood::evaluate(on_tile, food, min_food));

            if Mood::has_food(on_tile, min_food) {
                let room = (traits.capacity - food).max(0.0);
                let taken = on_tile.min(traits.absorption.min(room).max(0.0));
                if taken > 0.0 {
                    digest.eaten.push((pos, taken));
                }
                food += taken;
            }
            food = (food - traits.metabolism).clamp(0.0, traits.capacity);

            digest.starved_ticks.push(if food > 0.0 {
                0
            } else {
                cells.starved_ticks[i].saturating_add(1)
            });
            digest.food.push(food);
        }
        digest
    }

    /// Ask the behavior model for every cell's proposal.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool (or the dedicated pool when `config.num_threads` is set).
    fn compute_proposals(&self, now: Tick) -> Vec<(CellId, Proposal)> {
        // Explicit field borrows so the closure captures only shared refs.
        let grid     = &self.grid;
        let cells    = &self.cells;
        let behavior = &self.behavior;
        let seed     = self.config.seed;

        let ctx = SimContext::new(now, cells);
        let propose = |cell: CellId| {
            let window = grid.window_around(cells.position[cell.index()], cells.vision_radius(cell));
            let mut rng = AgentRng::for_tick(seed, cell, now);
            (cell, behavior.propose(cell, &window, &ctx, &mut rng))
        };

        #[cfg(not(feature = "parallel"))]
        {
            cells.cell_ids().map(propose).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let run = || {
                (0..cells.count as u32)
                    .into_par_iter()
                    .map(CellId)
                    .map(propose)
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }
}
