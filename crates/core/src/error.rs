//! Error types for the landfall label placement library.

use thiserror::Error;

/// Primary error type for layout operations.
///
/// Collisions and degenerate hull geometry are expected outcomes of the
/// placement search and are handled locally; only invariant violations
/// surface here.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cluster {id} has no members")]
    EmptyCluster { id: usize },

    #[error("invalid parameter {name}: {msg}")]
    InvalidParameter { name: &'static str, msg: String },
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
