//! `cs-behavior` — cell behavior model trait, move intents, and the forage
//! proposal generator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `MoveIntent`, `Priority`                                        |
//! | [`context`] | `SimContext<'a>` — read-only tick snapshot shared by all cells  |
//! | [`model`]   | `BehaviorModel` trait, `Proposal`                               |
//! | [`forager`] | `ForagerBehavior` — ranked path proposals with wander fallback  |
//! | [`noop`]    | `NoopBehavior` — placeholder that never moves                   |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The tick loop in cs-sim calls [`BehaviorModel::propose`] once per cell
//! with an owned [`VisionWindow`][cs_spatial::VisionWindow] copied from the
//! grid at tick start.  Models never see the live grid and never mutate
//! anything; their intents go into a shared intent graph which cs-movement
//! resolves after every cell has proposed.

pub mod context;
pub mod error;
pub mod forager;
pub mod intent;
pub mod model;
pub mod noop;

#[cfg(test)]
mod tests;

pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use forager::{ForagerBehavior, ForagingParams, ranked_path_moves, wander_moves};
pub use intent::{MAX_OCCUPANCY_COST, MoveIntent, Priority};
pub use model::{BehaviorModel, Proposal};
pub use noop::NoopBehavior;
