//! Greedy order scheduler.
//!
//! Candidates are valued once, sorted by value descending (order id breaks
//! ties so runs are reproducible) and admitted one at a time: each order is
//! route-optimized, dry-run for round-trip feasibility against the remaining
//! battery, and either committed through the budget-aware navigator or
//! skipped. The day ends with a single return-home leg.

use tracing::{info, warn};

use crate::data::{Catalog, Order};
use crate::error::{GarudError, Result};
use crate::geo::Position;
use crate::map::ZoneMap;

use super::navigator::{Drone, Move, NavigatorConfig, RouteOutcome};
use super::route;

/// Receives scheduling events as they are committed, for external
/// persistence (delivery ledger, flight path).
pub trait DeliverySink {
    /// Called once per accepted order with its total cost in pence.
    fn on_delivery(&mut self, _order: &str, _cost_pence: u32) {}

    /// Called once per committed move, in flight order.
    fn on_move(&mut self, _mv: &Move) {}
}

/// No-op sink.
impl DeliverySink for () {}

/// Result of one scheduling run.
#[derive(Clone, Debug)]
pub struct DayPlan {
    /// Home position the run started and ended at
    pub home: Position,
    /// Accepted order ids, in commit order
    pub delivered: Vec<String>,
    /// Value delivered, in pence
    pub delivered_value: u32,
    /// Total value of every candidate order, in pence
    pub total_value: u32,
    /// Moves consumed, home return included
    pub moves_used: u32,
    /// The full committed flight log
    pub log: Vec<Move>,
}

impl DayPlan {
    /// Every position visited, starting from home, one entry per move
    /// (hover moves repeat the position).
    pub fn visited_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.log.len() + 1);
        positions.push(self.home);
        positions.extend(self.log.iter().map(|m| m.to));
        positions
    }
}

/// Greedy admission-control scheduler for one drone-day.
pub struct Scheduler<'a> {
    map: &'a ZoneMap,
    catalog: &'a Catalog,
    cfg: NavigatorConfig,
}

impl<'a> Scheduler<'a> {
    pub fn new(map: &'a ZoneMap, catalog: &'a Catalog, cfg: NavigatorConfig) -> Self {
        Self { map, catalog, cfg }
    }

    /// Plan the whole day: admit orders greedily by value, then return home.
    pub fn run(
        &self,
        orders: &[Order],
        home: Position,
        battery: i32,
        sink: &mut dyn DeliverySink,
    ) -> Result<DayPlan> {
        // Value every candidate once, independent of planning.
        let mut candidates: Vec<(u32, &Order)> = Vec::with_capacity(orders.len());
        for order in orders {
            match self.catalog.delivery_cost(&order.items) {
                Some(value) => candidates.push((value, order)),
                None => warn!(order = %order.id, "order references unknown items, skipping"),
            }
        }
        candidates.sort_by(|(va, a), (vb, b)| vb.cmp(va).then_with(|| a.id.cmp(&b.id)));
        let total_value: u32 = candidates.iter().map(|(v, _)| *v).sum();

        let mut drone = Drone::new(home, battery);
        let mut delivered = Vec::new();
        let mut delivered_value = 0u32;
        let mut emitted = 0usize;

        for &(value, order) in &candidates {
            let stops = match self.resolve_stops(&drone, order) {
                Ok(stops) => stops,
                Err(e) => {
                    warn!(order = %order.id, "unservable: {}", e);
                    continue;
                }
            };

            if !self.is_feasible(&drone, &stops, home) {
                info!(order = %order.id, value, "insufficient budget, skipping");
                continue;
            }

            let outcome = drone.deliver_route(self.map, &stops, Some(&order.id), home, &self.cfg)?;
            emitted = flush_moves(&drone, emitted, sink);

            match outcome {
                RouteOutcome::Completed => {
                    info!(order = %order.id, value, moves = drone.moves_used(), "delivered");
                    delivered.push(order.id.clone());
                    delivered_value += value;
                    sink.on_delivery(&order.id, value);
                }
                RouteOutcome::BudgetExhausted => {
                    warn!(order = %order.id, "budget exhausted mid-order, heading home");
                    break;
                }
            }
        }

        drone.return_home(self.map, home, &self.cfg)?;
        flush_moves(&drone, emitted, sink);

        info!(
            delivered = delivered.len(),
            delivered_value,
            total_value,
            moves = drone.moves_used(),
            "day complete"
        );

        Ok(DayPlan {
            home,
            delivered,
            delivered_value,
            total_value,
            moves_used: drone.moves_used(),
            log: drone.into_log(),
        })
    }

    /// Resolve an order's shops to positions and pick the cheaper visiting
    /// order. Unknown items/shops and >2-shop orders come back as errors.
    fn resolve_stops(&self, drone: &Drone, order: &Order) -> Result<Vec<Position>> {
        let shops = self
            .catalog
            .shops_for_items(&order.items)
            .ok_or_else(|| GarudError::Order("unknown item".to_string()))?;

        let mut shop_positions = Vec::with_capacity(shops.len());
        for shop in &shops {
            let pos = self
                .catalog
                .shop_position(shop)
                .ok_or_else(|| GarudError::Order(format!("shop '{}' has no location", shop)))?;
            shop_positions.push(pos);
        }

        route::plan_stops(drone.position(), &shop_positions, order.dropoff, self.map, &self.cfg)
    }

    /// Dry-run the full round trip (stops plus home return) from the real
    /// drone's position; feasible when it fits the remaining battery.
    /// Unplannable routes are simply infeasible, never fatal.
    fn is_feasible(&self, drone: &Drone, stops: &[Position], home: Position) -> bool {
        let mut probe = Drone::probe(drone.position());
        if probe.follow_route(self.map, stops, None, &self.cfg).is_err() {
            return false;
        }
        if probe.return_home(self.map, home, &self.cfg).is_err() {
            return false;
        }
        probe.moves_used() as i32 <= drone.battery()
    }
}

/// Send any log entries not yet emitted to the sink; returns the new
/// high-water mark.
fn flush_moves(drone: &Drone, from: usize, sink: &mut dyn DeliverySink) -> usize {
    for mv in &drone.log()[from..] {
        sink.on_move(mv);
    }
    drone.log().len()
}
