//! landfall - deterministic label placement for clustered geographic points.
//!
//! The pipeline clusters landfall points with a coastline-weighted metric,
//! ranks clusters by severity and proximity to the reference anchor, builds
//! a buffered hull and a text-sized label box per cluster, then places each
//! box in rank order so that no label overlaps raw points or previously
//! placed geometry. Every stage is deterministic: the same input sequence
//! and parameters always yield the same layout.

pub mod cluster;
pub mod error;
pub mod geometry;
pub mod model;
pub mod params;
pub mod pipeline;
pub mod place;

pub use cluster::{Clustering, cluster_points, coastline_distance, rank_clusters};
pub use error::{LayoutError, Result};
pub use geometry::{ClusterGeometry, build_cluster_geometry};
pub use model::{Cluster, Landfall, PlacedCluster, Resolution};
pub use params::{AnchorRules, ClusterParams, GeometryParams, LayoutParams, SearchParams};
pub use pipeline::{Layout, layout_labels, layout_labels_with};
pub use place::{ContentKey, MemoryCache, PlacementCache, place_clusters};
