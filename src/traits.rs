//! Seams between the discovery engine and its pluggable parts.

use std::collections::HashMap;

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::osrm::RouteGeometryError;
use crate::polyline::Polyline;

/// Computes minimal total cost from a source node to every node of a graph.
///
/// Implementations must not mutate the graph. Nodes that cannot be reached
/// map to `f64::INFINITY`.
pub trait ShortestPathSolver {
    /// Fixed complexity label reported verbatim in responses.
    fn complexity(&self) -> &'static str;

    fn distances_from(&self, graph: &Graph, source: NodeId) -> Result<HashMap<NodeId, f64>>;
}

/// Provides a travel-path geometry between two (lat, lng) locations.
///
/// Must be shareable across the enrichment worker pool.
pub trait RouteGeometryProvider: Sync {
    fn route_between(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> std::result::Result<Polyline, RouteGeometryError>;
}
