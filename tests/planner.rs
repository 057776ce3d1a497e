//! End-to-end planning scenarios on in-memory fixtures.

use garud_nav::data::client::{MenuItem, ShopMenu};
use garud_nav::data::{Catalog, Order};
use garud_nav::geo::{Heading, Position, STEP_LENGTH};
use garud_nav::map::{Landmark, ZoneMap};
use garud_nav::planner::{NavigatorConfig, Scheduler};

const S: f64 = STEP_LENGTH;

fn single_shop_catalog(shop_pos: Position) -> Catalog {
    let menus = vec![ShopMenu {
        name: "test-shop".to_string(),
        location: "a.b.c".to_string(),
        menu: vec![MenuItem {
            item: "sandwich".to_string(),
            pence: 450,
        }],
    }];
    Catalog::build(&menus, |_| Ok(shop_pos)).unwrap()
}

fn sandwich_order(id: &str, dropoff: Position) -> Order {
    Order {
        id: id.to_string(),
        items: vec!["sandwich".to_string()],
        dropoff,
    }
}

#[test]
fn open_field_delivery_move_counts() {
    let home = Position::new(0.0, 0.0);
    let map = ZoneMap::new(&[], Vec::new(), home);
    let shop = Position::new(10.5 * S, 0.0);
    let dropoff = Position::new(20.5 * S, 0.0);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![sandwich_order("A1", dropoff)];
    let plan = scheduler.run(&orders, home, 1500, &mut ()).unwrap();

    assert_eq!(plan.delivered, vec!["A1"]);
    assert_eq!(plan.delivered_value, 500);

    // Ten fly moves plus one hover per stop.
    let order_moves = plan
        .log
        .iter()
        .filter(|m| m.order.as_deref() == Some("A1"))
        .count();
    assert_eq!(order_moves, 10 + 1 + 10 + 1);

    let hovers = plan
        .log
        .iter()
        .filter(|m| m.heading == Heading::Hover)
        .count();
    assert_eq!(hovers, 2);

    // The return leg re-crosses the arrival threshold at exactly one step
    // length out; accumulated rounding decides whether the final move is
    // needed.
    let return_moves = plan.moves_used as usize - order_moves;
    assert!((19..=20).contains(&return_moves), "return took {}", return_moves);
    assert!(plan.log.iter().skip(order_moves).all(|m| m.order.is_none()));

    // The path starts at home and ends within one step of it.
    let visited = plan.visited_positions();
    assert_eq!(visited[0], home);
    assert!(visited.last().unwrap().is_close_to(home));
}

#[test]
fn delivery_routes_around_a_wall_via_a_landmark() {
    let home = Position::new(0.0, 0.0);
    // Thin vertical wall east of home, spanning well above and below the
    // direct route to the shop.
    let ring = vec![
        Position::new(10.0 * S, -5.0 * S),
        Position::new(10.0 * S, 5.0 * S),
        Position::new(10.2 * S, 5.0 * S),
        Position::new(10.2 * S, -5.0 * S),
        Position::new(10.0 * S, -5.0 * S),
    ];
    let landmarks = vec![Landmark {
        name: "over-the-top".to_string(),
        position: Position::new(10.1 * S, 12.0 * S),
    }];
    let map = ZoneMap::new(&[ring], landmarks, home);

    let shop = Position::new(20.0 * S, 0.0);
    let dropoff = Position::new(25.0 * S, 0.0);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![sandwich_order("A1", dropoff)];
    let plan = scheduler.run(&orders, home, 1500, &mut ()).unwrap();

    assert_eq!(plan.delivered, vec!["A1"]);

    // The detour is strictly longer than the blocked straight line.
    let direct = (home.distance_to(shop) / S).ceil() as u32;
    assert!(plan.moves_used > direct);

    // No committed move may cross a no-fly boundary.
    for mv in &plan.log {
        if mv.heading != Heading::Hover {
            assert!(
                !map.blocks_direct_route(mv.from, mv.to),
                "move from {:?} to {:?} crossed a boundary",
                mv.from,
                mv.to
            );
        }
    }

    assert!(plan.visited_positions().last().unwrap().is_close_to(home));
}

#[test]
fn fully_walled_off_shop_makes_the_order_unservable() {
    let home = Position::new(0.0, 0.0);
    // A wall no landmark can route around: only the auto-added home
    // landmark exists, and it is on the drone's own side.
    let ring = vec![
        Position::new(10.0 * S, -1000.0 * S),
        Position::new(10.0 * S, 1000.0 * S),
        Position::new(10.2 * S, 1000.0 * S),
        Position::new(10.2 * S, -1000.0 * S),
        Position::new(10.0 * S, -1000.0 * S),
    ];
    let map = ZoneMap::new(&[ring], Vec::new(), home);

    let shop = Position::new(20.0 * S, 0.0);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![sandwich_order("A1", Position::new(25.0 * S, 0.0))];
    let plan = scheduler.run(&orders, home, 1500, &mut ()).unwrap();

    // Unservable, not a crash: skipped with zero value, drone stays home.
    assert!(plan.delivered.is_empty());
    assert_eq!(plan.delivered_value, 0);
    assert_eq!(plan.moves_used, 0);
    assert_eq!(plan.total_value, 500);
}

#[test]
fn budget_below_round_trip_skips_and_stays_home() {
    let home = Position::new(0.0, 0.0);
    let map = ZoneMap::new(&[], Vec::new(), home);
    let shop = Position::new(10.5 * S, 0.0);
    let dropoff = Position::new(20.5 * S, 0.0);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![sandwich_order("A1", dropoff)];

    // The cheapest possible round trip is 41 moves (22 delivering plus at
    // least 19 home); one move below that must skip the order.
    let plan = scheduler.run(&orders, home, 40, &mut ()).unwrap();

    assert!(plan.delivered.is_empty());
    assert_eq!(plan.delivered_value, 0);
    assert_eq!(plan.moves_used, 0);
}

#[test]
fn identical_runs_produce_identical_plans() {
    let home = Position::new(0.0, 0.0);
    let ring = vec![
        Position::new(8.0 * S, 2.0 * S),
        Position::new(8.0 * S, 9.0 * S),
        Position::new(14.0 * S, 9.0 * S),
        Position::new(14.0 * S, 2.0 * S),
        Position::new(8.0 * S, 2.0 * S),
    ];
    let landmarks = vec![Landmark {
        name: "south-gap".to_string(),
        position: Position::new(11.0 * S, -6.0 * S),
    }];
    let map = ZoneMap::new(&[ring], landmarks, home);

    let shop = Position::new(20.5 * S, 5.5 * S);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![
        sandwich_order("A1", Position::new(25.5 * S, 0.0)),
        sandwich_order("B2", Position::new(3.5 * S, 15.5 * S)),
    ];

    let first = scheduler.run(&orders, home, 1500, &mut ()).unwrap();
    let second = scheduler.run(&orders, home, 1500, &mut ()).unwrap();

    assert_eq!(first.delivered, second.delivered);
    assert_eq!(first.moves_used, second.moves_used);
    assert_eq!(first.delivered_value, second.delivered_value);
    assert_eq!(
        first.visited_positions().len(),
        second.visited_positions().len()
    );
}

#[test]
fn moves_used_grows_monotonically_through_the_log() {
    let home = Position::new(0.0, 0.0);
    let map = ZoneMap::new(&[], Vec::new(), home);
    let shop = Position::new(6.5 * S, 4.5 * S);
    let catalog = single_shop_catalog(shop);
    let scheduler = Scheduler::new(&map, &catalog, NavigatorConfig::default());

    let orders = vec![sandwich_order("A1", Position::new(12.5 * S, 0.0))];
    let plan = scheduler.run(&orders, home, 1500, &mut ()).unwrap();

    // One log entry per move, each starting where the previous ended.
    assert_eq!(plan.log.len() as u32, plan.moves_used);
    for pair in plan.log.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}
