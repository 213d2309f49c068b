//! Unit tests for cs-behavior.

use cs_agent::{CellStore, CellStoreBuilder, CellTraits, Mood};
use cs_core::{AgentRng, CellId, Position, Tick};
use cs_spatial::{GridBuilder, VisionWindow};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One hungry cell per position, in `CellId` order.
fn hungry_store(positions: &[Position], radius: u32) -> CellStore {
    let mut b = CellStoreBuilder::new();
    let traits = CellTraits { vision_radius: radius, ..CellTraits::default() };
    for &p in positions {
        b.spawn(p, traits);
    }
    let mut store = b.build();
    store.mood.fill(Mood::Hungry);
    store
}

fn window(rows: &[&str], center: Position, radius: u32) -> VisionWindow {
    GridBuilder::from_rows(rows)
        .unwrap()
        .build()
        .unwrap()
        .window_around(center, radius)
}

fn rng(cell: u32) -> AgentRng {
    AgentRng::for_tick(99, CellId(cell), Tick(0))
}

// ── Intent & Priority ─────────────────────────────────────────────────────────

#[cfg(test)]
mod intent_tests {
    use cs_core::Position;

    use crate::{MoveIntent, Priority};

    #[test]
    fn priority_bounds() {
        assert_eq!(Priority::new(0), None);
        assert_eq!(Priority::new(5), None);
        assert_eq!(Priority::new(1), Some(Priority::LOWEST));
        assert_eq!(Priority::new(4), Some(Priority::HIGHEST));
    }

    #[test]
    fn occupancy_cost_maps_inversely() {
        let got: Vec<u8> = (1..=4).map(|c| Priority::from_occupancy_cost(c).get()).collect();
        assert_eq!(got, vec![4, 3, 2, 1]);
        assert_eq!(Priority::from_occupancy_cost(0), Priority::HIGHEST);
        assert_eq!(Priority::from_occupancy_cost(9), Priority::LOWEST);
    }

    #[test]
    fn lower_walks_down_to_none() {
        let mut p = Some(Priority::HIGHEST);
        let mut seen = Vec::new();
        while let Some(cur) = p {
            seen.push(cur.get());
            p = cur.lower();
        }
        assert_eq!(seen, vec![4, 3, 2, 1]);
    }

    #[test]
    fn adjacency() {
        let a = Position::new(2, 2);
        assert!(MoveIntent::new(a, Position::new(2, 1), Priority::HIGHEST).is_adjacent());
        assert!(!MoveIntent::new(a, Position::new(3, 3), Priority::HIGHEST).is_adjacent());
        assert!(!MoveIntent::new(a, a, Priority::HIGHEST).is_adjacent());
    }

    #[test]
    fn display() {
        let m = MoveIntent::new(Position::new(0, 1), Position::new(0, 0), Priority::HIGHEST);
        assert_eq!(m.to_string(), "(0, 1) -> (0, 0) @p4");
    }
}

// ── SimContext ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;
    use crate::SimContext;

    #[test]
    fn fields_accessible() {
        let store = hungry_store(&[Position::new(0, 0), Position::new(1, 0)], 2);
        let ctx = SimContext::new(Tick(5), &store);
        assert_eq!(ctx.tick, Tick(5));
        assert_eq!(ctx.cells.count, 2);
    }
}

// ── ForagingParams ────────────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use crate::{ForagerBehavior, ForagingParams};

    #[test]
    fn default_threshold() {
        assert_eq!(ForagingParams::default().min_food, 0.1);
        assert!(ForagingParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(ForagerBehavior::new(ForagingParams { min_food: -1.0 }).is_err());
        assert!(ForagerBehavior::new(ForagingParams { min_food: f64::NAN }).is_err());
    }
}

// ── ForagerBehavior ───────────────────────────────────────────────────────────

#[cfg(test)]
mod forager_tests {
    use cs_spatial::{AStar, PathFinder, SearchResult};

    use super::*;
    use crate::{
        BehaviorModel, ForagerBehavior, ForagingParams, MoveIntent, Priority, SimContext,
        ranked_path_moves,
    };

    fn forager() -> ForagerBehavior {
        ForagerBehavior::new(ForagingParams::default()).unwrap()
    }

    /// Food north, another cell east: one proposal, straight north.
    #[test]
    fn food_north_neighbour_east() {
        let center = Position::new(1, 1);
        let w = window(&[".*.", ".cc", "..."], center, 1);
        let store = hungry_store(&[center, Position::new(2, 1)], 1);
        let ctx = SimContext::new(Tick(0), &store);

        let found = cs_spatial::find_nearest_match(&w, |t| t.is_forageable(0.1)).unwrap();
        assert_eq!(found.position(), Position::new(1, 0));

        let path = AStar.path_to(&w, Position::new(1, 0), 1).unwrap();
        assert_eq!(path.distance, 0);
        assert_eq!(path.first_step, Position::new(1, 0));

        let p = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert_eq!(p.intents, vec![MoveIntent::new(center, Position::new(1, 0), Priority::HIGHEST)]);
        assert_eq!(p.target, Some(Position::new(1, 0)));
        assert!(!p.wandered);
    }

    #[test]
    fn stable_cell_stays_put() {
        let center = Position::new(1, 1);
        let w = window(&[".*.", ".c.", "..."], center, 1);
        let mut store = hungry_store(&[center], 1);
        store.mood[0] = Mood::Stable;
        let ctx = SimContext::new(Tick(0), &store);
        let p = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert!(p.intents.is_empty());
        assert_eq!(p.target, None);
        assert!(!p.wandered);
    }

    #[test]
    fn starving_cell_forages() {
        let center = Position::new(1, 1);
        let w = window(&[".*.", ".c.", "..."], center, 1);
        let mut store = hungry_store(&[center], 1);
        store.mood[0] = Mood::Starving;
        let ctx = SimContext::new(Tick(0), &store);
        assert_eq!(forager().propose_moves(CellId(0), &w, &ctx, &mut rng(0)).len(), 1);
    }

    /// Two equal routes, one through a neighbour: surcharge 2 switches route.
    #[test]
    fn surcharge_adds_fallback_step() {
        let origin = Position::new(0, 0);
        let w = window(&["cc", ".*"], origin, 2);
        let moves = ranked_path_moves(&AStar, &w, Position::new(1, 1));
        assert_eq!(
            moves,
            vec![
                MoveIntent::new(origin, Position::new(1, 0), Priority::HIGHEST),
                MoveIntent::new(origin, Position::new(0, 1), Priority::from_occupancy_cost(2)),
            ]
        );
    }

    #[test]
    fn ranked_moves_are_adjacent_and_distinct() {
        let origin = Position::new(0, 0);
        let w = window(&["cc", ".*"], origin, 2);
        let moves = ranked_path_moves(&AStar, &w, Position::new(1, 1));
        assert!(moves.iter().all(MoveIntent::is_adjacent));
        assert_ne!(moves[0].target, moves[1].target);
        assert!(moves.len() <= 4);
    }

    #[test]
    fn unreachable_target_yields_nothing() {
        let w = window(&["c#*"], Position::new(0, 0), 2);
        assert!(ranked_path_moves(&AStar, &w, Position::new(2, 0)).is_empty());
    }

    #[test]
    fn cached_target_is_reused() {
        let center = Position::new(1, 0);
        let w = window(&["*c..*"], center, 3);
        let mut store = hungry_store(&[center], 3);
        let ctx = SimContext::new(Tick(0), &store);
        let fresh = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert_eq!(fresh.target, Some(Position::new(0, 0)));

        store.target[0] = Some(Position::new(4, 0));
        let ctx = SimContext::new(Tick(1), &store);
        let cached = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert_eq!(cached.target, Some(Position::new(4, 0)));
        assert_eq!(cached.intents[0].target, Position::new(2, 0));
    }

    #[test]
    fn stale_cached_target_is_replaced() {
        let center = Position::new(1, 0);
        let w = window(&["*c..*"], center, 3);
        let mut store = hungry_store(&[center], 3);
        store.target[0] = Some(Position::new(3, 0));
        let ctx = SimContext::new(Tick(0), &store);
        let p = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert_eq!(p.target, Some(Position::new(0, 0)));
    }

    #[test]
    fn no_food_wanders_with_ranked_options() {
        let center = Position::new(1, 1);
        let w = window(&["...", ".c.", "..."], center, 1);
        let mut store = hungry_store(&[center], 1);
        store.target[0] = Some(Position::new(0, 0));
        let ctx = SimContext::new(Tick(0), &store);
        let p = forager().propose(CellId(0), &w, &ctx, &mut rng(0));

        assert!(p.wandered);
        assert_eq!(p.target, None, "wandering clears the cache");
        let prios: Vec<u8> = p.intents.iter().map(|m| m.priority.get()).collect();
        assert_eq!(prios, vec![4, 3, 2, 1]);
        assert!(p.intents.iter().all(|m| m.source == center && m.is_adjacent()));
    }

    #[test]
    fn wandering_is_seeded() {
        let center = Position::new(1, 1);
        let w = window(&["...", ".c.", "..."], center, 1);
        let store = hungry_store(&[center], 1);
        let ctx = SimContext::new(Tick(0), &store);
        let a = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        let b = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert_eq!(a, b);
    }

    #[test]
    fn walled_in_cell_wanders_nowhere() {
        let center = Position::new(1, 1);
        let w = window(&["###", "#c#", "###"], center, 1);
        let store = hungry_store(&[center], 1);
        let ctx = SimContext::new(Tick(0), &store);
        let p = forager().propose(CellId(0), &w, &ctx, &mut rng(0));
        assert!(p.wandered);
        assert!(p.intents.is_empty());
    }

    /// A path search that never finds anything.
    struct Blind;

    impl PathFinder for Blind {
        fn path_to(&self, _: &VisionWindow, _: Position, _: u32) -> Option<SearchResult> {
            None
        }
    }

    #[test]
    fn no_path_falls_back_to_wander() {
        let center = Position::new(1, 1);
        let w = window(&[".*.", ".c.", "..."], center, 1);
        let store = hungry_store(&[center], 1);
        let ctx = SimContext::new(Tick(0), &store);
        let blind = ForagerBehavior::with_finder(ForagingParams::default(), Blind).unwrap();
        let p = blind.propose(CellId(0), &w, &ctx, &mut rng(0));
        assert!(p.wandered);
        assert_eq!(p.target, None);
        assert_eq!(p.intents.len(), 4);
    }
}

// ── NoopBehavior ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod noop_tests {
    use super::*;
    use crate::{BehaviorModel, NoopBehavior, Proposal, SimContext};

    #[test]
    fn propose_is_idle() {
        let center = Position::new(1, 1);
        let w = window(&["...", ".c.", "..."], center, 1);
        let store = hungry_store(&[center], 1);
        let ctx = SimContext::new(Tick(0), &store);
        assert_eq!(NoopBehavior.propose(CellId(0), &w, &ctx, &mut rng(0)), Proposal::idle());
    }
}
