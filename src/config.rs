//! Engine configuration.
//!
//! # Environment Variables
//!
//! - `OSRM_BASE_URL`: routing service root (default: public OSRM demo server)
//! - `OSRM_PROFILE`: routing profile (default: `driving`)
//! - `OSRM_TIMEOUT_SECS`: per-call timeout (default: 5)
//! - `OSRM_POLYLINE_PRECISION`: geometry precision (default: 6)
//! - `DISCOVER_ENRICHMENT_WORKERS`: concurrent routing calls (default: 4)
//! - `DISCOVER_RESULT_LIMIT`: ranked cafés returned, 1..=20 (default: 20)

use std::str::FromStr;

use crate::osrm::OsrmConfig;

/// Upper bound on ranked results, and therefore on routing calls per request.
pub const MAX_RESULT_LIMIT: usize = 20;

const DEFAULT_ENRICHMENT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub osrm: OsrmConfig,
    /// Size of the enrichment worker pool.
    pub enrichment_workers: usize,
    /// Number of ranked cafés kept and enriched.
    pub result_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            osrm: OsrmConfig::default(),
            enrichment_workers: DEFAULT_ENRICHMENT_WORKERS,
            result_limit: MAX_RESULT_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let osrm = OsrmConfig {
            base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.osrm.base_url),
            profile: lookup("OSRM_PROFILE").unwrap_or(defaults.osrm.profile),
            timeout_secs: parsed(&lookup, "OSRM_TIMEOUT_SECS").unwrap_or(defaults.osrm.timeout_secs),
            polyline_precision: parsed(&lookup, "OSRM_POLYLINE_PRECISION")
                .unwrap_or(defaults.osrm.polyline_precision),
        };

        Self {
            osrm,
            enrichment_workers: parsed(&lookup, "DISCOVER_ENRICHMENT_WORKERS")
                .unwrap_or(defaults.enrichment_workers),
            result_limit: parsed(&lookup, "DISCOVER_RESULT_LIMIT").unwrap_or(defaults.result_limit),
        }
        .normalized()
    }

    /// Clamp limits into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.enrichment_workers = self.enrichment_workers.max(1);
        self.result_limit = self.result_limit.clamp(1, MAX_RESULT_LIMIT);
        self
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|value| value.trim().parse().ok())
}
