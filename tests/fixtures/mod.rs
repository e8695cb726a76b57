//! Test fixtures for cafe-discovery.
//!
//! Provides:
//! - Named café locations around Lima and Bogotá
//! - A snapshot builder that turns them into a `DatasetSnapshot`

pub mod cafe_locations;

pub use cafe_locations::*;
