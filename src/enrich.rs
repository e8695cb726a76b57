//! Route geometry enrichment of ranked cafés.
//!
//! One routing call per café, fanned out over a fixed-size worker pool and
//! joined before returning. A failed call never fails the request: the café
//! keeps its straight-line geometry.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::Result;
use crate::osrm::RouteGeometryError;
use crate::polyline::Polyline;
use crate::ranking::RankedCafe;
use crate::traits::RouteGeometryProvider;

/// Result of looking up one café's geometry.
#[derive(Debug)]
pub enum GeometryOutcome {
    Routed(Polyline),
    Fallback {
        line: Polyline,
        reason: RouteGeometryError,
    },
}

impl GeometryOutcome {
    /// Look up the route from `from` to `to`, falling back to a straight line.
    pub fn resolve<P: RouteGeometryProvider + ?Sized>(
        provider: &P,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Self {
        let checked = provider.route_between(from, to).and_then(|polyline| {
            if polyline.points().len() < 2 {
                return Err(RouteGeometryError::NoRoute {
                    code: "EmptyGeometry".to_string(),
                });
            }
            polyline.check_bounds()?;
            Ok(polyline)
        });

        match checked {
            Ok(polyline) => GeometryOutcome::Routed(polyline),
            Err(reason) => GeometryOutcome::Fallback {
                line: Polyline::straight_line(from, to),
                reason,
            },
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, GeometryOutcome::Routed(_))
    }

    pub fn into_polyline(self) -> Polyline {
        match self {
            GeometryOutcome::Routed(polyline) => polyline,
            GeometryOutcome::Fallback { line, .. } => line,
        }
    }
}

pub struct RouteGeometryEnricher<P> {
    provider: P,
    pool: ThreadPool,
}

impl<P: RouteGeometryProvider> RouteGeometryEnricher<P> {
    pub fn new(provider: P, workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|index| format!("route-enrich-{}", index))
            .build()?;

        Ok(Self { provider, pool })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Replace each café's geometry with its routed path where available.
    pub fn enrich(&self, user_location: (f64, f64), cafes: &mut [RankedCafe]) {
        let provider = &self.provider;
        let outcomes: Vec<GeometryOutcome> = self.pool.install(|| {
            cafes
                .par_iter()
                .map(|cafe| GeometryOutcome::resolve(provider, user_location, cafe.location()))
                .collect()
        });

        let mut routed = 0usize;
        for (cafe, outcome) in cafes.iter_mut().zip(outcomes) {
            match &outcome {
                GeometryOutcome::Routed(_) => routed += 1,
                GeometryOutcome::Fallback { reason, .. } => {
                    warn!(cafe_id = cafe.cafe_id, error = %reason, "route lookup failed, using straight line");
                }
            }
            cafe.route_points = outcome
                .into_polyline()
                .into_points()
                .into_iter()
                .map(|(lat, lng)| [lat, lng])
                .collect();
        }

        debug!(requested = cafes.len(), routed, "route geometry enrichment finished");
    }
}
