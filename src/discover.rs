//! Optimal-route discovery: the request-level entry point.
//!
//! Builds the preference graph, runs the selected algorithm, ranks the
//! reachable cafés and enriches the best ones with routed geometry.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{EngineConfig, MAX_RESULT_LIMIT};
use crate::dataset::DatasetSnapshot;
use crate::enrich::RouteGeometryEnricher;
use crate::error::{Error, Result};
use crate::filters::PreferenceFilters;
use crate::graph::build_preference_graph;
use crate::osrm::OsrmClient;
use crate::ranking::{RankedCafe, rank_cafes};
use crate::shortest_path::Algorithm;
use crate::traits::RouteGeometryProvider;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRouteRequest {
    pub algorithm: String,
    pub user_location: UserLocation,
    #[serde(default)]
    pub filters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalRouteResponse {
    #[serde(rename = "ordered_cafeterias")]
    pub ordered_cafes: Vec<RankedCafe>,
    pub selected_algorithm: String,
    pub big_o_notation: String,
    pub processing_time_ms: u64,
}

pub struct DiscoveryEngine<'a, P> {
    snapshot: &'a DatasetSnapshot,
    enricher: RouteGeometryEnricher<P>,
    result_limit: usize,
}

impl<'a> DiscoveryEngine<'a, OsrmClient> {
    /// Engine backed by the OSRM client described in `config`.
    pub fn from_config(snapshot: &'a DatasetSnapshot, config: &EngineConfig) -> Result<Self> {
        let config = config.clone().normalized();
        let client = OsrmClient::new(config.osrm)?;
        Self::new(snapshot, client, config.enrichment_workers, config.result_limit)
    }
}

impl<'a, P: RouteGeometryProvider> DiscoveryEngine<'a, P> {
    pub fn new(
        snapshot: &'a DatasetSnapshot,
        provider: P,
        enrichment_workers: usize,
        result_limit: usize,
    ) -> Result<Self> {
        Ok(Self {
            snapshot,
            enricher: RouteGeometryEnricher::new(provider, enrichment_workers)?,
            result_limit: result_limit.clamp(1, MAX_RESULT_LIMIT),
        })
    }

    /// Serve a request against the local wall clock.
    pub fn optimal_route(&self, request: &OptimalRouteRequest) -> Result<OptimalRouteResponse> {
        self.optimal_route_at(request, Local::now().naive_local())
    }

    /// Serve a request with "open now" evaluated at `now`.
    pub fn optimal_route_at(
        &self,
        request: &OptimalRouteRequest,
        now: NaiveDateTime,
    ) -> Result<OptimalRouteResponse> {
        let algorithm: Algorithm = request.algorithm.parse()?;
        let filters = PreferenceFilters::from_value(request.filters.clone())?;
        let user_location = (
            request.user_location.latitude,
            request.user_location.longitude,
        );

        let built = build_preference_graph(self.snapshot, user_location, &filters, now);
        if !built.graph.contains(built.user_node) {
            return Err(Error::GraphInitialization {
                node: built.user_node,
            });
        }

        let paths = algorithm.run(&built.graph, built.user_node)?;

        let mut ranked = rank_cafes(
            &paths,
            built.graph.nodes(),
            built.user_node,
            user_location,
            self.snapshot,
            self.result_limit,
        );
        self.enricher.enrich(user_location, &mut ranked);

        info!(
            algorithm = algorithm.name(),
            candidates = built.graph.node_count() - 1,
            returned = ranked.len(),
            elapsed_ms = paths.elapsed.as_millis() as u64,
            "optimal route computed"
        );

        Ok(OptimalRouteResponse {
            ordered_cafes: ranked,
            selected_algorithm: algorithm.name().to_string(),
            big_o_notation: paths.complexity.to_string(),
            processing_time_ms: paths.elapsed.as_millis() as u64,
        })
    }
}
