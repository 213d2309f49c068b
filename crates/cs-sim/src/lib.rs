//! `cs-sim` — tick loop orchestrator for the rust_cellsim simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Metabolism — per cell, ascending CellId: evaluate mood from the tile
//!                  and buffer, eat from the tile, burn food.
//!   ② Proposals  — BehaviorModel::propose for every cell, each with an
//!                  owned vision window and a (seed, cell, tick) AgentRng
//!                  (parallel with the `parallel` feature).
//!   ③ Resolve    — all intents → IntentGraph → resolve → Assignment.
//!   ④ Apply      — MovePlan::stage against the grid, commit in one pass,
//!                  update CellStore positions.
//! ```
//!
//! Proposals are merged in ascending `CellId` order and the resolver sorts
//! its input, so a run is reproducible from its seed with or without the
//! `parallel` feature.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the proposal phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the intent graph (forwards to cs-movement). |
//! | `serde`    | Serde derives on config and state types.               |

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
