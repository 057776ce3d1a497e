//! HTTP client for the delivery data service.
//!
//! The data server exposes static JSON documents: no-fly-zone and landmark
//! GeoJSON, the combined shop menu, the order book per date, and a
//! word-address geocoding lookup. Everything is fetched with blocking GETs;
//! non-success status codes surface as typed errors.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GarudError, Result};
use crate::geo::Position;
use crate::map::Landmark;

/// One shop's entry in the combined menu document.
#[derive(Clone, Debug, Deserialize)]
pub struct ShopMenu {
    pub name: String,
    /// Dot-separated three-word address of the shop
    pub location: String,
    pub menu: Vec<MenuItem>,
}

/// One item on a shop menu.
#[derive(Clone, Debug, Deserialize)]
pub struct MenuItem {
    pub item: String,
    pub pence: u32,
}

/// One order in the order book document for a date.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "orderNo")]
    pub order_no: String,
    /// Dot-separated three-word address of the drop-off
    #[serde(rename = "deliverTo")]
    pub deliver_to: String,
    pub items: Vec<String>,
}

/// Geocoding response for a word address. Only the coordinates matter.
#[derive(Debug, Deserialize)]
struct WordDetails {
    coordinates: Position,
}

/// Minimal GeoJSON subset the data server's documents use.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// Blocking client for the data server.
pub struct DataClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl DataClient {
    pub fn new(host: &str, port: u16, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            base: format!("http://{}:{}", host, port),
            http,
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base, path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(GarudError::Data(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }
        Ok(response.json()?)
    }

    /// No-fly-zone polygons as corner-point rings.
    pub fn no_fly_zones(&self) -> Result<Vec<Vec<Position>>> {
        let fc: FeatureCollection = self.get_json("buildings/no-fly-zones.geojson")?;

        let mut rings = Vec::new();
        for feature in fc.features {
            if let Geometry::Polygon { coordinates } = feature.geometry {
                for ring in coordinates {
                    rings.push(
                        ring.into_iter()
                            .map(|[lng, lat]| Position::new(lng, lat))
                            .collect(),
                    );
                }
            }
        }
        Ok(rings)
    }

    /// Named detour way-points.
    pub fn landmarks(&self) -> Result<Vec<Landmark>> {
        let fc: FeatureCollection = self.get_json("buildings/landmarks.geojson")?;

        let mut landmarks = Vec::new();
        for (i, feature) in fc.features.into_iter().enumerate() {
            if let Geometry::Point { coordinates: [lng, lat] } = feature.geometry {
                let name = feature
                    .properties
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("landmark-{}", i));
                landmarks.push(Landmark {
                    name,
                    position: Position::new(lng, lat),
                });
            }
        }
        Ok(landmarks)
    }

    /// The combined menu of every shop.
    pub fn menus(&self) -> Result<Vec<ShopMenu>> {
        self.get_json("menus/menus.json")
    }

    /// The order book for one delivery date (`YYYY-MM-DD`).
    pub fn orders(&self, date: &str) -> Result<Vec<OrderRecord>> {
        self.get_json(&format!("orders/{}.json", date))
    }

    /// Resolve a dot-separated three-word address to a position.
    pub fn locate(&self, words: &str) -> Result<Position> {
        let parts: Vec<&str> = words.split('.').collect();
        match parts.as_slice() {
            [a, b, c] => {
                let details: WordDetails =
                    self.get_json(&format!("words/{}/{}/{}/details.json", a, b, c))?;
                Ok(details.coordinates)
            }
            _ => Err(GarudError::Data(format!(
                "malformed word address '{}'",
                words
            ))),
        }
    }
}
