//! Crate error type.

use thiserror::Error;

/// Convenient result alias for the discovery engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by the request layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something we cannot serve.
    BadRequest,
    /// The engine or its environment failed.
    Internal,
}

/// Top-level engine error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the caller names an algorithm outside the supported set.
    #[error("algorithm '{name}' is not supported; expected one of Dijkstra, Floyd-Warshall, Bellman-Ford")]
    UnsupportedAlgorithm { name: String },

    /// Raised when the filter payload has a recognized key with a wrong-typed value.
    #[error("invalid filters: {message}")]
    InvalidFilters { message: String },

    /// Raised when the synthetic user node is missing from the built graph.
    #[error("could not initialize user node {node} in preference graph")]
    GraphInitialization { node: i64 },

    /// Raised by Bellman-Ford when an edge can still be relaxed after |V|-1 passes.
    #[error("negative cycle detected in preference graph")]
    NegativeCycleDetected,

    /// Wrapper for routing client construction errors.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// Wrapper for enrichment worker pool construction errors.
    #[error(transparent)]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedAlgorithm { .. } | Error::InvalidFilters { .. } => {
                ErrorKind::BadRequest
            }
            Error::GraphInitialization { .. }
            | Error::NegativeCycleDetected
            | Error::HttpClient(_)
            | Error::WorkerPool(_) => ErrorKind::Internal,
        }
    }
}
