//! `cs-spatial` — tile grid, vision windows, and local search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid`, `Tile`, `TileView`, `GridBuilder`                   |
//! | [`window`]  | `VisionWindow` — the radius-limited view around a cell      |
//! | [`bfs`]     | `find_nearest_match`, `Discovery`                           |
//! | [`search`]  | `PathFinder` trait, `SearchResult`, `AStar`                 |
//! | [`wander`]  | `wander_directions` — seeded random-walk fallback           |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! Every search reads only the window it is handed.  A position outside
//! the window is invisible even when a straight line to it would be shorter.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod bfs;
pub mod error;
pub mod grid;
pub mod search;
pub mod wander;
pub mod window;


pub use bfs::{Discovery, find_nearest_match};
pub use error::{SpatialError, SpatialResult};
pub use grid::{Grid, GridBuilder, Tile, TileView};
pub use search::{AStar, PathFinder, SearchResult};
pub use wander::wander_directions;
pub use window::VisionWindow;
