//! Output writers: flight path GeoJSON and the delivery ledger.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::Result;
use crate::geo::Position;

/// One delivered order for the ledger file.
#[derive(Clone, Debug, Serialize)]
pub struct DeliveryRecord {
    pub order: String,
    pub cost_pence: u32,
}

/// Write every visited position as a single GeoJSON LineString feature.
pub fn save_flightpath_geojson(path: &Path, positions: &[Position]) -> Result<()> {
    let coordinates: Vec<[f64; 2]> = positions.iter().map(|p| [p.lng, p.lat]).collect();
    let doc = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        }],
    });

    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    info!("Flight path saved to {:?}", path);
    Ok(())
}

/// Write the delivered-order ledger as a JSON array.
pub fn save_deliveries(path: &Path, records: &[DeliveryRecord]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    info!("Delivery ledger saved to {:?} ({} orders)", path, records.len());
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
