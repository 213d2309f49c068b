//! Integration tests for cs-sim.

use cs_agent::{CellStore, CellStoreBuilder, CellTraits};
use cs_behavior::{
    BehaviorModel, ForagerBehavior, ForagingParams, MoveIntent, NoopBehavior, Priority, Proposal,
    SimContext,
};
use cs_core::{AgentRng, CellId, Direction, Position, SimConfig, SimRng, Tick};
use cs_spatial::{Grid, GridBuilder, VisionWindow};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed:                  42,
        num_threads:           Some(1),
        report_interval_ticks: 5,
    }
}

/// Parse a map and spawn one full-buffer cell per `c`, in reading order.
fn world(rows: &[&str]) -> (Grid, CellStore) {
    let grid = GridBuilder::from_rows(rows).unwrap().build().unwrap();
    let mut cells = CellStoreBuilder::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == 'c' {
                cells.spawn(Position::new(x as i32, y as i32), CellTraits::default());
            }
        }
    }
    (grid, cells.build())
}

fn forager() -> ForagerBehavior {
    ForagerBehavior::new(ForagingParams::default()).unwrap()
}

fn build<B: BehaviorModel>(rows: &[&str], ticks: u64, behavior: B) -> Sim<B> {
    let (grid, cells) = world(rows);
    SimBuilder::new(test_config(ticks), grid, cells, behavior).build().unwrap()
}

/// Every cell stands where the store says, and nothing else is on the grid.
fn assert_consistent<B: BehaviorModel>(sim: &Sim<B>) {
    for cell in sim.cells.cell_ids() {
        let pos = sim.cells.position[cell.index()];
        assert_eq!(sim.grid.occupant(pos), Some(cell), "{cell} not at {pos}");
    }
    assert_eq!(sim.grid.occupied_count(), sim.cells.count);
}

/// Each cell tries one fixed direction every tick.
struct Scripted(Vec<Option<Direction>>);

impl BehaviorModel for Scripted {
    fn propose(
        &self,
        cell:   CellId,
        window: &VisionWindow,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Proposal {
        let here = window.center();
        Proposal {
            intents: self.0[cell.index()]
                .map(|d| vec![MoveIntent::new(here, here.step(d), Priority::HIGHEST)])
                .unwrap_or_default(),
            ..Proposal::idle()
        }
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = build(&["c.c"], 10, NoopBehavior);
        assert_eq!(sim.cells.count, 2);
        assert_eq!(sim.now, Tick::ZERO);
        assert_eq!(sim.foraging, ForagingParams::default());
        assert_consistent(&sim);
    }

    #[test]
    fn places_cells_missing_from_grid() {
        let grid = GridBuilder::new(3, 1).build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn(Position::new(2, 0), CellTraits::default());
        let sim = SimBuilder::new(test_config(1), grid, cells.build(), NoopBehavior).build().unwrap();
        assert_eq!(sim.grid.occupant(Position::new(2, 0)), Some(CellId(0)));
    }

    #[test]
    fn invalid_config_errors() {
        let (grid, cells) = world(&["c"]);
        let config = SimConfig { report_interval_ticks: 0, ..test_config(1) };
        let result = SimBuilder::new(config, grid, cells, NoopBehavior).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_foraging_errors() {
        let (grid, cells) = world(&["c"]);
        let result = SimBuilder::new(test_config(1), grid, cells, NoopBehavior)
            .foraging(ForagingParams { min_food: -0.5 })
            .build();
        assert!(matches!(result, Err(SimError::Behavior(_))));
    }

    #[test]
    fn stray_grid_occupant_errors() {
        let grid = GridBuilder::new(3, 1).occupant(Position::new(0, 0), CellId(7)).build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn(Position::new(2, 0), CellTraits::default());
        let result = SimBuilder::new(test_config(1), grid, cells.build(), NoopBehavior).build();
        match result {
            Err(SimError::CellCountMismatch { expected, got, .. }) => {
                assert_eq!(expected, 1);
                assert_eq!(got, 2);
            }
            _ => panic!("expected CellCountMismatch"),
        }
    }

    #[test]
    fn stacked_cells_error() {
        let grid = GridBuilder::new(3, 1).build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn(Position::new(1, 0), CellTraits::default());
        cells.spawn(Position::new(1, 0), CellTraits::default());
        let result = SimBuilder::new(test_config(1), grid, cells.build(), NoopBehavior).build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }

    #[test]
    fn cell_on_wall_errors() {
        let grid = GridBuilder::new(3, 3).walled().build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn(Position::new(0, 0), CellTraits::default());
        let result = SimBuilder::new(test_config(1), grid, cells.build(), NoopBehavior).build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }
}

// ── Metabolism ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metabolism_tests {
    use cs_agent::Mood;

    use super::*;

    fn single(food_on_tile: f64, buffer: f64) -> Sim<NoopBehavior> {
        let p = Position::new(0, 0);
        let grid = GridBuilder::new(1, 1).resource(p, food_on_tile).build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn_with_food(p, CellTraits::default(), buffer);
        SimBuilder::new(test_config(10), grid, cells.build(), NoopBehavior).build().unwrap()
    }

    #[test]
    fn eats_then_burns() {
        let mut sim = single(5.0, 2.0);
        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.mood[0], Mood::Stable);
        assert_eq!(sim.cells.food[0], 2.5);
        assert_eq!(sim.grid.tile(Position::new(0, 0)).unwrap().resource, 4.0);
    }

    #[test]
    fn buffer_never_exceeds_capacity() {
        let mut sim = single(5.0, 10.0);
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        let cap = sim.cells.traits[0].capacity;
        assert!(sim.cells.food[0] <= cap);
        assert_eq!(sim.cells.food[0], 9.5);
    }

    #[test]
    fn below_threshold_is_not_eaten() {
        let mut sim = single(0.05, 3.0);
        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.mood[0], Mood::Hungry);
        assert_eq!(sim.cells.food[0], 2.5);
        assert_eq!(sim.grid.tile(Position::new(0, 0)).unwrap().resource, 0.05);
    }

    #[test]
    fn empty_buffer_starves() {
        let mut sim = single(0.0, 0.2);
        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.mood[0], Mood::Hungry);
        assert_eq!(sim.cells.food[0], 0.0);
        assert_eq!(sim.cells.starved_ticks[0], 1);

        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.mood[0], Mood::Starving);
        assert_eq!(sim.cells.starved_ticks[0], 2);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use cs_movement::MovementError;

    use super::*;

    #[test]
    fn forager_walks_to_food_and_settles() {
        let mut sim = build(&["#####", "#c.*#", "#####"], 10, forager());
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        assert_eq!(sim.cells.position[0], Position::new(3, 1));
        assert_eq!(sim.cells.mood[0], cs_agent::Mood::Stable);
        assert_eq!(sim.cells.food[0], 9.5);
        assert_eq!(sim.grid.tile(Position::new(3, 1)).unwrap().resource, 19.0);
        assert_consistent(&sim);
    }

    #[test]
    fn target_is_cached_between_ticks() {
        let mut sim = build(&["#####", "#c.*#", "#####"], 10, forager());
        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.target[0], Some(Position::new(3, 1)));
    }

    #[test]
    fn contested_food_goes_to_one_cell() {
        let mut sim = build(&["#####", "#c*c#", "#####"], 10, forager());
        let stats = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(stats.proposers, 2);
        assert_eq!(stats.intents, 2);
        assert_eq!(stats.committed, 1);
        assert_eq!(stats.applied, 1);
        assert_eq!(sim.cells.position[0], Position::new(2, 1));
        assert_eq!(sim.cells.position[1], Position::new(3, 1));
        assert_consistent(&sim);
    }

    #[test]
    fn scripted_swap() {
        let behavior = Scripted(vec![Some(Direction::East), Some(Direction::West)]);
        let mut sim = build(&["cc"], 10, behavior);
        let stats = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(stats.applied, 2);
        assert_eq!(sim.cells.position[0], Position::new(1, 0));
        assert_eq!(sim.cells.position[1], Position::new(0, 0));
        assert_consistent(&sim);
    }

    #[test]
    fn blocked_chain_is_cancelled() {
        let behavior = Scripted(vec![Some(Direction::East), Some(Direction::East), None]);
        let mut sim = build(&["ccc"], 10, behavior);
        let stats = sim.step(&mut NoopObserver).unwrap();
        assert_eq!(stats.committed, 2);
        assert_eq!(stats.cancelled, 2);
        assert_eq!(stats.applied, 0);
        assert_eq!(sim.cells.position[0], Position::new(0, 0));
        assert_consistent(&sim);
    }

    /// Proposes a move out of a tile the cell is not on.
    struct Misplaced;

    impl BehaviorModel for Misplaced {
        fn propose(&self, _: CellId, _: &VisionWindow, _: &SimContext<'_>, _: &mut AgentRng) -> Proposal {
            let far = Position::new(40, 40);
            Proposal {
                intents: vec![MoveIntent::new(far, far.step(Direction::North), Priority::HIGHEST)],
                ..Proposal::idle()
            }
        }
    }

    #[test]
    fn misplaced_intent_is_surfaced() {
        let mut sim = build(&["c."], 10, Misplaced);
        let err = sim.step(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::MisplacedIntent { cell: CellId(0), .. }));
    }

    /// Proposes a two-tile jump.
    struct Jumper;

    impl BehaviorModel for Jumper {
        fn propose(&self, _: CellId, w: &VisionWindow, _: &SimContext<'_>, _: &mut AgentRng) -> Proposal {
            let here = w.center();
            Proposal {
                intents: vec![MoveIntent::new(here, Position::new(here.x + 2, here.y), Priority::HIGHEST)],
                ..Proposal::idle()
            }
        }
    }

    #[test]
    fn non_adjacent_intent_is_surfaced() {
        let mut sim = build(&["c.."], 10, Jumper);
        let err = sim.step(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Movement(MovementError::NonAdjacent { .. })));
    }

    #[test]
    fn failed_tick_changes_nothing() {
        let home = Position::new(0, 0);
        let grid = GridBuilder::new(3, 1).resource(home, 5.0).build().unwrap();
        let mut cells = CellStoreBuilder::new();
        cells.spawn_with_food(home, CellTraits::default(), 2.0);
        let mut sim = SimBuilder::new(test_config(10), grid, cells.build(), Jumper).build().unwrap();
        let mood = sim.cells.mood.clone();

        assert!(sim.step(&mut NoopObserver).is_err());
        assert_eq!(sim.now, Tick::ZERO);
        assert_eq!(sim.cells.food[0], 2.0);
        assert_eq!(sim.cells.starved_ticks[0], 0);
        assert_eq!(sim.cells.mood, mood);
        assert_eq!(sim.cells.position[0], home);
        assert_eq!(sim.grid.tile(home).unwrap().resource, 5.0);
    }

    #[test]
    fn zero_threshold_still_forages() {
        let params = ForagingParams { min_food: 0.0 };
        let (grid, cells) = world(&["#####", "#c.*#", "#####"]);
        let behavior = ForagerBehavior::new(params).unwrap();
        let mut sim = SimBuilder::new(test_config(10), grid, cells, behavior)
            .foraging(params)
            .build()
            .unwrap();
        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.cells.mood[0], cs_agent::Mood::Hungry);
        assert_eq!(sim.cells.position[0], Position::new(2, 1));
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = build(&["c."], 7, NoopBehavior);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.now, Tick(7));
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;

    fn busy_sim(seed: u64) -> Sim<ForagerBehavior> {
        let mut grid = GridBuilder::new(20, 20).walled().build().unwrap();
        grid.scatter_resources(&mut SimRng::new(seed), 0.15, 5.0);
        let mut cells = CellStoreBuilder::new();
        for i in 0..20 {
            let pos = Position::new(1 + (i % 9) * 2, 1 + (i / 9) * 2);
            cells.spawn_with_food(pos, CellTraits::default(), 3.0);
        }
        let config = SimConfig { seed, ..test_config(40) };
        SimBuilder::new(config, grid, cells.build(), forager()).build().unwrap()
    }

    #[test]
    fn same_seed_same_outcome() {
        let mut a = busy_sim(17);
        let mut b = busy_sim(17);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.cells.position, b.cells.position);
        assert_eq!(a.cells.food, b.cells.food);
        assert_eq!(a.grid.to_string(), b.grid.to_string());
    }

    #[test]
    fn grid_stays_consistent() {
        let mut sim = busy_sim(3);
        for _ in 0..40 {
            sim.step(&mut NoopObserver).unwrap();
            assert_consistent(&sim);
        }
    }

    #[test]
    fn cells_actually_move() {
        let mut sim = busy_sim(5);
        let start = sim.cells.position.clone();
        sim.run(&mut NoopObserver).unwrap();
        assert_ne!(sim.cells.position, start);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<Tick>,
        applied:   usize,
        final_tick: Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }

        fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
            self.ends += 1;
            self.applied += stats.applied;
        }

        fn on_snapshot(&mut self, tick: Tick, cells: &CellStore, grid: &Grid) {
            assert_eq!(grid.occupied_count(), cells.count);
            self.snapshots.push(tick);
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.final_tick = Some(final_tick);
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut sim = build(&["#####", "#c.*#", "#####"], 10, forager());
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts, 10);
        assert_eq!(rec.ends, 10);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(5)]);
        assert_eq!(rec.applied, 2);
        assert_eq!(rec.final_tick, Some(Tick(10)));
    }
}
