//! `cs-movement` — intent graph, conflict resolution, and the apply phase.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`graph`]      | `IntentGraph` — every move intent of one tick               |
//! | [`resolver`]   | `resolve` — greedy reduction to a conflict-free matching    |
//! | [`assignment`] | `Assignment` — source → target, one mover per target        |
//! | [`apply`]      | `MovePlan` — snapshot staging and all-at-once commit        |
//! | [`error`]      | `MovementError`, `MovementResult<T>`                        |
//!
//! # Per-tick flow
//!
//! ```text
//! proposals ──add_intent──▶ IntentGraph ──resolve──▶ Assignment
//!           ──MovePlan::stage(&grid)──▶ MovePlan ──commit(&mut grid)──▶ moves
//! ```
//!
//! Everything here is tick-scoped.  Nothing survives into the next tick.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `fx-hash` | `FxHashMap` for the graph's vertex map.                     |

pub mod apply;
pub mod assignment;
pub mod error;
pub mod graph;
pub mod resolver;


pub use apply::{CancelReason, Cancelled, MovePlan, StagedMove};
pub use assignment::{Assignment, Move};
pub use error::{MovementError, MovementResult};
pub use graph::{Edge, IntentGraph};
pub use resolver::resolve;
