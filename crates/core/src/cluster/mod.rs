//! Point clustering and ranking.
//!
//! This module contains:
//! - The coastline distance metric (direction-aware, not plain Euclidean)
//! - Density clustering of landfall points (DBSCAN with that metric)
//! - The cluster ranking that fixes placement priority

pub mod dbscan;
pub mod metric;
pub mod rank;

pub use dbscan::{Clustering, cluster_points};
pub use metric::coastline_distance;
pub use rank::rank_clusters;
