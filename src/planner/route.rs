//! Two-stop pickup route optimization.
//!
//! An order requires visiting one or two pickup shops before its drop-off.
//! With two shops there are exactly two visiting orders; each is dry-run
//! through a probe drone and the cheaper one (fewer moves, hovers included)
//! wins. Anything beyond two shops is a contract violation and is rejected.

use crate::error::{GarudError, Result};
use crate::geo::Position;
use crate::map::ZoneMap;

use super::navigator::{Drone, NavigatorConfig};

/// Order the stops for an order: pickup shop(s) first, drop-off last.
///
/// Ties between the two permutations keep the original shop ordering.
pub fn plan_stops(
    from: Position,
    shops: &[Position],
    dropoff: Position,
    map: &ZoneMap,
    cfg: &NavigatorConfig,
) -> Result<Vec<Position>> {
    match shops {
        [] => Ok(vec![dropoff]),
        [only] => Ok(vec![*only, dropoff]),
        [a, b] => {
            let forward = vec![*a, *b, dropoff];
            let reverse = vec![*b, *a, dropoff];

            let forward_moves = simulate(from, &forward, map, cfg)?;
            let reverse_moves = simulate(from, &reverse, map, cfg)?;

            if forward_moves <= reverse_moves {
                Ok(forward)
            } else {
                Ok(reverse)
            }
        }
        more => Err(GarudError::Order(format!(
            "{} pickup shops, at most two are supported",
            more.len()
        ))),
    }
}

/// Move count for visiting `stops` in order from `from`, budget ignored.
fn simulate(from: Position, stops: &[Position], map: &ZoneMap, cfg: &NavigatorConfig) -> Result<u32> {
    let mut probe = Drone::probe(from);
    probe.follow_route(map, stops, None, cfg)?;
    Ok(probe.moves_used())
}
