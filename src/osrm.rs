//! OSRM HTTP adapter for route geometries.

use serde::Deserialize;
use thiserror::Error;

use crate::polyline::{Polyline, PolylineError};
use crate::traits::RouteGeometryProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Service root up to, not including, the profile segment.
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Decimal precision of the returned polyline.
    ///
    /// Defaults to 6. Stock OSRM servers, including the public default
    /// `base_url`, encode `geometries=polyline` at precision 5; decoding their
    /// output at 6 shrinks every coordinate tenfold. Set 5 for such servers.
    pub polyline_precision: u32,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org/route/v1".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 5,
            polyline_precision: 6,
        }
    }
}

/// Why a single route lookup did not produce a geometry.
#[derive(Debug, Error)]
pub enum RouteGeometryError {
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service answered with status {status}")]
    Status { status: u16 },

    #[error("routing service returned code {code:?} without a route")]
    NoRoute { code: String },

    #[error("routing service returned undecodable geometry: {0}")]
    MalformedGeometry(#[from] PolylineError),
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/{}/{:.6},{:.6};{:.6},{:.6}?geometries=polyline&overview=full&steps=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }
}

impl RouteGeometryProvider for OsrmClient {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<Polyline, RouteGeometryError> {
        let response = self.client.get(self.route_url(from, to)).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteGeometryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.json::<OsrmRouteResponse>()?;
        parse_route_body(body, self.config.polyline_precision)
    }
}

fn parse_route_body(body: OsrmRouteResponse, precision: u32) -> Result<Polyline, RouteGeometryError> {
    if body.code != "Ok" {
        return Err(RouteGeometryError::NoRoute { code: body.code });
    }

    let geometry = body
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.geometry)
        .ok_or(RouteGeometryError::NoRoute { code: body.code })?;

    Ok(Polyline::decode(&geometry, precision)?)
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<String>,
}
