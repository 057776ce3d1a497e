//! Drone navigation state machine.
//!
//! A `Drone` advances one quantized-heading step at a time toward an ordered
//! list of sub-goals, diverting via landmarks when the direct route crosses a
//! no-fly-zone boundary and nudging blocked headings in 10° increments. Every
//! move is appended to the flight log. Probe drones (`Drone::probe`) share no
//! state with the real flight: they are evaluated to exhaustion for move
//! counts and discarded.

use crate::error::{GarudError, Result};
use crate::geo::{Heading, Position};
use crate::map::ZoneMap;

/// Detour re-evaluations allowed per sub-goal before the leg is declared
/// unplannable.
const MAX_DETOURS: u32 = 64;

/// Navigator tuning knobs.
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Moves that must remain available for the home return when the
    /// budget-aware variant decides whether to continue
    pub return_margin: i32,
    /// Maximum moves per leg before planning is declared failed
    pub max_leg_moves: u32,
    /// Maximum ±10° dodge adjustments from the original bearing (18 = 180°)
    pub max_dodge_steps: u32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            return_margin: 5,
            max_leg_moves: 2000,
            max_dodge_steps: 18,
        }
    }
}

/// One committed move of the drone.
#[derive(Clone, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub heading: Heading,
    /// Order being serviced when the move was made, if any
    pub order: Option<String>,
}

/// Outcome of a budget-aware delivery run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Every sub-goal was reached
    Completed,
    /// Halted early: continuing would eat into the home-return margin
    BudgetExhausted,
}

/// Delivery drone state: position, move budget, and the committed flight log.
#[derive(Clone, Debug)]
pub struct Drone {
    position: Position,
    moves_used: u32,
    battery: i32,
    log: Vec<Move>,
}

impl Drone {
    pub fn new(position: Position, battery: i32) -> Self {
        Self {
            position,
            moves_used: 0,
            battery,
            log: Vec::new(),
        }
    }

    /// A disposable probe at `position` with fresh counters and an empty
    /// log. Probes only count moves; their battery never runs out.
    pub fn probe(position: Position) -> Self {
        Self::new(position, i32::MAX)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    pub fn battery(&self) -> i32 {
        self.battery
    }

    pub fn log(&self) -> &[Move] {
        &self.log
    }

    pub fn into_log(self) -> Vec<Move> {
        self.log
    }

    /// Fly one step along `angle`, recording the move.
    fn fly(&mut self, angle: i32, order: Option<&str>) {
        let from = self.position;
        self.position = self.position.step(Heading::Fly(angle));
        self.battery -= 1;
        self.moves_used += 1;
        self.log.push(Move {
            from,
            to: self.position,
            heading: Heading::Fly(angle),
            order: order.map(str::to_owned),
        });
    }

    /// Hover in place for one move, recording it.
    fn hover(&mut self, order: Option<&str>) {
        self.battery -= 1;
        self.moves_used += 1;
        self.log.push(Move {
            from: self.position,
            to: self.position,
            heading: Heading::Hover,
            order: order.map(str::to_owned),
        });
    }

    /// Visit each destination in order, hovering once on every arrival.
    ///
    /// No budget checking: this is the probe/dry-run variant. Fails when a
    /// blocked route has no reachable landmark or a leg exceeds the move cap.
    pub fn follow_route(
        &mut self,
        map: &ZoneMap,
        destinations: &[Position],
        order: Option<&str>,
        cfg: &NavigatorConfig,
    ) -> Result<()> {
        for &dest in destinations {
            self.travel_to(map, dest, order, cfg, None)?;
            self.hover(order);
        }
        Ok(())
    }

    /// Budget-aware variant of [`follow_route`](Self::follow_route).
    ///
    /// After every move a probe is re-derived at the current position and
    /// flown home from scratch; when remaining battery minus that return
    /// cost drops below the safety margin the run halts immediately.
    pub fn deliver_route(
        &mut self,
        map: &ZoneMap,
        destinations: &[Position],
        order: Option<&str>,
        home: Position,
        cfg: &NavigatorConfig,
    ) -> Result<RouteOutcome> {
        for &dest in destinations {
            if self.travel_to(map, dest, order, cfg, Some(home))? == RouteOutcome::BudgetExhausted {
                return Ok(RouteOutcome::BudgetExhausted);
            }
            self.hover(order);
            if self.margin_breached(map, home, cfg)? {
                return Ok(RouteOutcome::BudgetExhausted);
            }
        }
        Ok(RouteOutcome::Completed)
    }

    /// Fly back to `home`, re-evaluating the direct route before every step.
    /// No terminal hover.
    pub fn return_home(&mut self, map: &ZoneMap, home: Position, cfg: &NavigatorConfig) -> Result<()> {
        let mut leg_moves = 0u32;
        let mut detours = 0u32;

        while !self.position.is_close_to(home) {
            if map.blocks_direct_route(self.position, home) {
                detours += 1;
                if detours > MAX_DETOURS {
                    return Err(GarudError::Planning(
                        "home return exceeded detour limit".to_string(),
                    ));
                }
                let landmark = self.pick_landmark(map, home)?;
                while !self.position.is_close_to(landmark) {
                    self.bounded_fly(map, landmark, None, cfg, &mut leg_moves)?;
                }
            } else {
                self.bounded_fly(map, home, None, cfg, &mut leg_moves)?;
            }
        }
        Ok(())
    }

    /// Reach one sub-goal: detour via landmarks while the direct route is
    /// blocked, then fly straight in. With `budget_home` set, the home-return
    /// margin is re-checked after every move.
    fn travel_to(
        &mut self,
        map: &ZoneMap,
        dest: Position,
        order: Option<&str>,
        cfg: &NavigatorConfig,
        budget_home: Option<Position>,
    ) -> Result<RouteOutcome> {
        let mut detours = 0u32;

        while map.blocks_direct_route(self.position, dest) {
            detours += 1;
            if detours > MAX_DETOURS {
                return Err(GarudError::Planning(format!(
                    "destination ({:.6}, {:.6}) exceeded detour limit",
                    dest.lng, dest.lat
                )));
            }
            let landmark = self.pick_landmark(map, dest)?;
            if self.travel_direct(map, landmark, order, cfg, budget_home)?
                == RouteOutcome::BudgetExhausted
            {
                return Ok(RouteOutcome::BudgetExhausted);
            }
        }

        self.travel_direct(map, dest, order, cfg, budget_home)
    }

    /// Fly toward `target` until arrived, dodging rounding-induced boundary
    /// crossings. The direct route is assumed open when this is entered.
    fn travel_direct(
        &mut self,
        map: &ZoneMap,
        target: Position,
        order: Option<&str>,
        cfg: &NavigatorConfig,
        budget_home: Option<Position>,
    ) -> Result<RouteOutcome> {
        let mut leg_moves = 0u32;

        while !self.position.is_close_to(target) {
            self.bounded_fly(map, target, order, cfg, &mut leg_moves)?;
            if let Some(home) = budget_home {
                if self.margin_breached(map, home, cfg)? {
                    return Ok(RouteOutcome::BudgetExhausted);
                }
            }
        }
        Ok(RouteOutcome::Completed)
    }

    /// One dodge-corrected step toward `target`, with the per-leg move cap.
    fn bounded_fly(
        &mut self,
        map: &ZoneMap,
        target: Position,
        order: Option<&str>,
        cfg: &NavigatorConfig,
        leg_moves: &mut u32,
    ) -> Result<()> {
        *leg_moves += 1;
        if *leg_moves > cfg.max_leg_moves {
            return Err(GarudError::Planning(format!(
                "leg toward ({:.6}, {:.6}) exceeded {} moves",
                target.lng, target.lat, cfg.max_leg_moves
            )));
        }
        let heading = self.dodge_heading(map, self.position.heading_to(target), target, cfg);
        self.fly(heading, order);
        Ok(())
    }

    /// Choose the detour landmark for a blocked route to `dest`.
    ///
    /// A landmark the drone is already at cannot unblock anything, so that
    /// case fails the leg instead of spinning in place.
    fn pick_landmark(&self, map: &ZoneMap, dest: Position) -> Result<Position> {
        let landmark = map
            .closest_landmark_towards(self.position, dest)
            .ok_or_else(|| {
                GarudError::Planning(format!(
                    "no reachable landmark from ({:.6}, {:.6})",
                    self.position.lng, self.position.lat
                ))
            })?;
        if self.position.is_close_to(landmark) {
            return Err(GarudError::Planning(format!(
                "route to ({:.6}, {:.6}) is blocked with no detour progress",
                dest.lng, dest.lat
            )));
        }
        Ok(landmark)
    }

    /// Whether continuing would leave less than the safety margin after a
    /// direct return home. Costs one full probe return per call.
    fn margin_breached(&self, map: &ZoneMap, home: Position, cfg: &NavigatorConfig) -> Result<bool> {
        let mut probe = Drone::probe(self.position);
        probe.return_home(map, home, cfg)?;
        Ok(self.battery - (probe.moves_used as i32) < cfg.return_margin)
    }

    /// Correct a quantized heading whose next step would cross a boundary
    /// edge (a 10°-rounding artifact).
    ///
    /// Evaluates `h ± 10` around the proposed heading, preferring candidates
    /// whose step avoids every edge, breaking ties by distance to `target`.
    /// When both candidates are blocked the search continues from the closer
    /// one, bounded by `max_dodge_steps`; on exhaustion the best available
    /// heading is accepted so planning never loops forever.
    fn dodge_heading(
        &self,
        map: &ZoneMap,
        proposed: i32,
        target: Position,
        cfg: &NavigatorConfig,
    ) -> i32 {
        let mut h = proposed;

        for _ in 0..cfg.max_dodge_steps {
            if !map.blocks_direct_route(self.position, self.position.step(Heading::Fly(h))) {
                return h;
            }

            let plus = (h + 10).rem_euclid(360);
            let minus = (h - 10).rem_euclid(360);
            let plus_pos = self.position.step(Heading::Fly(plus));
            let minus_pos = self.position.step(Heading::Fly(minus));
            let plus_open = !map.blocks_direct_route(self.position, plus_pos);
            let minus_open = !map.blocks_direct_route(self.position, minus_pos);
            let plus_closer = plus_pos.distance_to(target) < minus_pos.distance_to(target);

            match (plus_open, minus_open) {
                (true, true) => return if plus_closer { plus } else { minus },
                (true, false) => return plus,
                (false, true) => return minus,
                (false, false) => h = if plus_closer { plus } else { minus },
            }
        }

        tracing::warn!(
            heading = proposed,
            "dodge correction exhausted {} steps, accepting best available",
            cfg.max_dodge_steps
        );
        h
    }
}
