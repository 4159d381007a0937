//! Charge-stop planning.
//!
//! This module implements the core planning algorithm that answers:
//! "where does the vehicle have to stop and charge so its state of
//! charge never drops below the configured floor?"
//!
//! Candidate stations are first linear-referenced onto the route, then a
//! greedy loop walks the route picking the furthest reachable stop
//! (preferring fast chargers) until the destination is in range.

mod config;
mod estimator;
mod referencer;
mod stops;
mod strategy;

pub use config::PlannerConfig;
pub use estimator::{stop_charge_hours, total_charging_minutes};
pub use referencer::{LocatedStation, locate_along_route};
pub use stops::{RechargeStop, Unreachable, plan_recharge_stops};
pub use strategy::SelectionPolicy;
