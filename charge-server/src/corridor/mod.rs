//! Route corridor construction.
//!
//! Turns a driving polyline into a buffered search corridor, then tiles
//! the corridor into bounded-size geographic cells so each spatial query
//! against the station provider stays within payload limits.

mod builder;
pub mod projection;

pub use builder::{Corridor, CorridorBuilder, CorridorConfig, GeometryError};
