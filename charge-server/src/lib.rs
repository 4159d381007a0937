//! EV charge-stop planning server.
//!
//! A web service that answers: "I'm driving this electric vehicle from
//! here to there, where do I have to stop and charge so the battery
//! never drops below its floor?"

pub mod catalog;
pub mod corridor;
pub mod directions;
pub mod domain;
pub mod itinerary;
pub mod planner;
pub mod stations;
pub mod web;
