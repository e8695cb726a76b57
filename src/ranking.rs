//! Ranking of reachable cafés by total cost.

use serde::Serialize;

use crate::dataset::{CafeId, DatasetSnapshot};
use crate::graph::NodeId;
use crate::haversine::haversine_km;
use crate::shortest_path::PathResult;

/// One entry of the ranked response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCafe {
    #[serde(rename = "cafeteria_id")]
    pub cafe_id: CafeId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub optimal_cost: f64,
    pub distance_km: f64,
    /// Travel path as `[lat, lon]` pairs; the two endpoints when unrouted.
    pub route_points: Vec<[f64; 2]>,
}

impl RankedCafe {
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Sort reachable cafés by optimal cost and keep the first `limit`.
///
/// `order` is the node iteration order; equal costs keep it. The user node,
/// unreachable nodes and ids missing from the snapshot are dropped. Each
/// entry starts with a straight-line geometry.
pub fn rank_cafes(
    paths: &PathResult,
    order: &[NodeId],
    user_node: NodeId,
    user_location: (f64, f64),
    snapshot: &DatasetSnapshot,
    limit: usize,
) -> Vec<RankedCafe> {
    let mut ranked: Vec<RankedCafe> = order
        .iter()
        .filter(|&&node| node != user_node)
        .filter_map(|&node| {
            let optimal_cost = paths.distance_to(node);
            if !optimal_cost.is_finite() {
                return None;
            }
            let cafe = snapshot.cafe(node)?;
            let location = cafe.coordinates()?;
            Some(RankedCafe {
                cafe_id: cafe.id,
                name: cafe.name.clone(),
                latitude: location.0,
                longitude: location.1,
                optimal_cost,
                distance_km: haversine_km(user_location, location),
                route_points: vec![
                    [user_location.0, user_location.1],
                    [location.0, location.1],
                ],
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.optimal_cost.total_cmp(&b.optimal_cost));
    ranked.truncate(limit);
    ranked
}
