//! `cs-core` — foundational types for the `rust_cellsim` foraging simulation.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CellId`                                              |
//! | [`pos`]         | `Position`, `Direction`, taxicab distance             |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `AgentRng` (per cell, per tick), `SimRng` (global)    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::CellId;
pub use pos::{Direction, Position};
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Tick};
