//! Label box placement.
//!
//! The solver walks ranked clusters in order and commits each one exactly
//! once. Supporting pieces: the radial search grid, an R-tree obstacle index
//! and the injectable layout cache.

pub mod cache;
mod obstacles;
mod search;
mod solver;

pub use cache::{ContentKey, MemoryCache, PlacementCache};
pub use solver::place_clusters;
