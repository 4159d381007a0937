//! Domain types for the charge-stop planner.
//!
//! This module contains the core domain model types that represent
//! validated routing data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod coordinate;
mod error;
mod route;
mod soc;
mod station;
mod vehicle;

pub use coordinate::Coordinate;
pub use error::DomainError;
pub use route::Route;
pub use soc::SocWindow;
pub use station::{ChargingStation, StationId};
pub use vehicle::Vehicle;
