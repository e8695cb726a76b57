//! cafe-discovery core
//!
//! Recommends nearby coffee shops by combining geographic distance with
//! weighted user preferences over a star-shaped graph, solved with a
//! selectable shortest-path algorithm, and annotates the best results with
//! routed travel geometry.

pub mod error;
pub mod config;
pub mod traits;
pub mod dataset;
pub mod hours;
pub mod filters;
pub mod cost;
pub mod graph;
pub mod shortest_path;
pub mod ranking;
pub mod enrich;
pub mod discover;
pub mod osrm;
pub mod haversine;
pub mod polyline;

pub use discover::{DiscoveryEngine, OptimalRouteRequest, OptimalRouteResponse, UserLocation};
pub use error::{Error, ErrorKind, Result};
