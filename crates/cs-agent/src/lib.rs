//! `cs-agent` — Structure-of-Arrays cell storage for `rust_cellsim`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`store`]   | `CellStore` (SoA arrays), `CellTraits`                    |
//! | [`builder`] | `CellStoreBuilder` (fluent construction)                  |
//! | [`mood`]    | `Mood` — the per-tick hunger state machine                |
//!
//! Trait values (vision radius, absorption rate, …) are opaque parameters
//! here.  Decoding them from a genome is somebody else's job.

pub mod builder;
pub mod mood;
pub mod store;


pub use builder::CellStoreBuilder;
pub use mood::Mood;
pub use store::{CellStore, CellTraits};
