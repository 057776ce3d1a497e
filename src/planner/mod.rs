//! Flight planning module.
//!
//! This module provides:
//! - Move-by-move navigation with landmark detours and dodge correction
//! - Two-stop pickup route optimization
//! - Greedy value-ordered order scheduling under a move budget

mod navigator;
mod route;
mod scheduler;

pub use navigator::{Drone, Move, NavigatorConfig, RouteOutcome};
pub use route::plan_stops;
pub use scheduler::{DayPlan, DeliverySink, Scheduler};
