//! GarudNav - Delivery Drone Day Planner
//!
//! GarudNav plans one drone's delivery day: given no-fly zones, landmark
//! way-points, a shop catalog and a date's order book from the delivery data
//! server, it decides which orders to service (maximizing delivered value
//! under a fixed move budget), in what order and via which pickup stops, and
//! produces a move-by-move flight path that never crosses a no-fly-zone
//! boundary.
//!
//! ## Planning pipeline
//!
//! - Data service documents become an immutable [`ZoneMap`], [`Catalog`] and
//!   [`OrderBook`]
//! - The [`Scheduler`] admits orders greedily by value, gating each on a
//!   feasibility dry-run
//! - The two-stop route optimizer picks the cheaper pickup ordering
//! - The [`Drone`] navigator flies quantized 10° headings, diverting via
//!   landmarks and dodge-correcting around boundary edges
//! - Committed moves flow out through [`DeliverySink`] callbacks and the
//!   final [`DayPlan`]

pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod map;
pub mod output;
pub mod planner;

pub use config::GarudConfig;
pub use data::{Catalog, DataClient, Order, OrderBook};
pub use error::{GarudError, Result};
pub use geo::{Heading, Position, Segment, STEP_LENGTH};
pub use map::{Landmark, ZoneMap};
pub use planner::{DayPlan, DeliverySink, Drone, Move, NavigatorConfig, RouteOutcome, Scheduler};
