//! Zone proximity calculation.
//!
//! The allocation engine ranks candidate resources by the distance
//! between their current zone and the incident's zone. The metric is
//! pluggable through the [`ZoneProximity`] trait; two metrics ship with
//! the crate:
//!
//! - [`NumericDistance`]: absolute difference of zone numbers (default).
//! - [`AdjacencyGraph`]: shortest hop count over a zone adjacency graph.

mod metrics;
mod types;

pub use metrics::{AdjacencyGraph, NumericDistance};
pub use types::ZoneProximity;
