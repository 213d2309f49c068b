//! forage — a small walled world of hungry cells.
//!
//! Usage: `forage [config.json]`.  The optional file is a JSON `SimConfig`;
//! missing fields fall back to the defaults below.  Set `RUST_LOG=debug` for
//! per-tick resolution events.

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cs_agent::{CellStore, CellStoreBuilder, CellTraits};
use cs_behavior::{ForagerBehavior, ForagingParams};
use cs_core::{Position, SimConfig, SimRng, Tick};
use cs_sim::{SimBuilder, SimObserver, TickStats};
use cs_spatial::{Grid, GridBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH:        u32 = 32;
const HEIGHT:       u32 = 16;
const CELL_COUNT:   usize = 24;
const FOOD_DENSITY: f64 = 0.08;
const FOOD_MAX:     f64 = 12.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    moves:     usize,
    cancelled: usize,
    wandered:  usize,
}

impl SimObserver for Tally {
    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        self.moves += stats.applied;
        self.cancelled += stats.cancelled;
        self.wandered += stats.wandered;
    }

    fn on_snapshot(&mut self, tick: Tick, cells: &CellStore, grid: &Grid) {
        let starving = cells.starved_ticks.iter().filter(|&&t| t > 0).count();
        println!("── {tick} ── starving: {starving}/{}", cells.count);
        println!("{grid}");
    }
}

// ── World setup ───────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig { total_ticks: 60, seed: 42, ..SimConfig::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Drop `CELL_COUNT` cells on distinct open tiles.
fn spawn_cells(grid: &Grid, rng: &mut SimRng) -> CellStore {
    let mut taken = BTreeSet::new();
    let mut cells = CellStoreBuilder::new();
    while cells.len() < CELL_COUNT {
        let pos = Position::new(
            rng.gen_range(1..WIDTH as i32 - 1),
            rng.gen_range(1..HEIGHT as i32 - 1),
        );
        let open = grid.tile(pos).is_some_and(|t| !t.blocked);
        if open && taken.insert(pos) {
            let food = rng.gen_range(1.0..5.0);
            cells.spawn_with_food(pos, CellTraits::default(), food);
        }
    }
    cells.build()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let mut rng = SimRng::new(config.seed);

    let mut grid = GridBuilder::new(WIDTH, HEIGHT)
        .walled()
        .block(Position::new(10, 4))
        .block(Position::new(10, 5))
        .block(Position::new(10, 6))
        .block(Position::new(21, 9))
        .block(Position::new(21, 10))
        .build()?;
    grid.scatter_resources(&mut rng, FOOD_DENSITY, FOOD_MAX);
    let cells = spawn_cells(&grid, &mut rng);

    let behavior = ForagerBehavior::new(ForagingParams::default())?;
    let mut sim = SimBuilder::new(config, grid, cells, behavior).build()?;

    let mut tally = Tally::default();
    let t0 = Instant::now();
    sim.run(&mut tally)?;

    println!("Simulation complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!("  moves applied : {}", tally.moves);
    println!("  cancelled     : {}", tally.cancelled);
    println!("  wander ticks  : {}", tally.wandered);
    println!("  food left     : {:.1}", sim.grid.total_resource());
    println!();

    println!("{:<6} {:<10} {:<8} {:<8}", "Cell", "Position", "Mood", "Buffer");
    println!("{}", "-".repeat(34));
    for cell in sim.cells.cell_ids() {
        let i = cell.index();
        println!(
            "{:<6} {:<10} {:<8} {:<8.2}",
            cell.to_string(),
            sim.cells.position[i].to_string(),
            sim.cells.mood[i].as_str(),
            sim.cells.food[i],
        );
    }

    Ok(())
}
