//! GarudNav binary: fetch the day's data, plan the flight, save the outputs.

use std::path::{Path, PathBuf};

use tracing::info;

use garud_nav::config::GarudConfig;
use garud_nav::data::{Catalog, DataClient, OrderBook};
use garud_nav::error::{GarudError, Result};
use garud_nav::map::ZoneMap;
use garud_nav::output::{save_deliveries, save_flightpath_geojson, DeliveryRecord};
use garud_nav::planner::{DeliverySink, Move, Scheduler};

/// Sink that collects ledger records while the scheduler runs.
#[derive(Default)]
struct Ledger {
    records: Vec<DeliveryRecord>,
}

impl DeliverySink for Ledger {
    fn on_delivery(&mut self, order: &str, cost_pence: u32) {
        self.records.push(DeliveryRecord {
            order: order.to_string(),
            cost_pence,
        });
    }

    fn on_move(&mut self, _mv: &Move) {}
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garud_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let date = args
        .get(1)
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .ok_or_else(|| {
            GarudError::Config(
                "usage: garud-nav <YYYY-MM-DD> [config.toml] [--server host:port]".to_string(),
            )
        })?;

    let mut config = if let Some(path) = args.get(2).filter(|a| !a.starts_with("--")) {
        let config_path = Path::new(path);
        info!("Loading configuration from {:?}", config_path);
        GarudConfig::load(config_path)?
    } else if Path::new("garud.toml").exists() {
        info!("Loading configuration from garud.toml");
        GarudConfig::load(Path::new("garud.toml"))?
    } else {
        info!("Using default configuration");
        GarudConfig::default()
    };

    // Override the data server address if provided
    if let Some(server) = args
        .iter()
        .position(|a| a == "--server")
        .and_then(|i| args.get(i + 1))
    {
        let (host, port) = server
            .split_once(':')
            .ok_or_else(|| GarudError::Config(format!("invalid --server value '{}'", server)))?;
        config.server.host = host.to_string();
        config.server.port = port
            .parse()
            .map_err(|_| GarudError::Config(format!("invalid --server port '{}'", port)))?;
    }

    info!("GarudNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Data server {}:{}, planning {}",
        config.server.host, config.server.port, date
    );

    let client = DataClient::new(&config.server.host, config.server.port, config.server.timeout_ms)?;
    let home = config.drone.home();

    // Static map data: fetched once, immutable for the whole run
    let rings = client.no_fly_zones()?;
    let landmarks = client.landmarks()?;
    let map = ZoneMap::new(&rings, landmarks, home);
    info!(
        "Zone map: {} boundary edges, {} landmarks",
        map.edge_count(),
        map.landmarks().len()
    );

    let menus = client.menus()?;
    let catalog = Catalog::build(&menus, |words| client.locate(words))?;
    info!("Catalog: {} shops", menus.len());

    let records = client.orders(&date)?;
    info!("Order book: {} candidate orders", records.len());
    let book = OrderBook::build(records, |words| client.locate(words))?;

    // Plan the day
    let scheduler = Scheduler::new(&map, &catalog, config.drone.navigator());
    let mut ledger = Ledger::default();
    let plan = scheduler.run(book.orders(), home, config.drone.battery, &mut ledger)?;

    info!(
        "Delivered {}/{} orders worth {}p of {}p in {} moves",
        plan.delivered.len(),
        book.len(),
        plan.delivered_value,
        plan.total_value,
        plan.moves_used
    );

    // Save outputs
    let flightpath_path =
        PathBuf::from(&config.output.flightpath_dir).join(format!("drone-{}.geojson", date));
    save_flightpath_geojson(&flightpath_path, &plan.visited_positions())?;
    save_deliveries(Path::new(&config.output.deliveries_path), &ledger.records)?;

    info!("GarudNav finished");
    Ok(())
}
