//! Configuration loading for GarudNav

use serde::Deserialize;
use std::path::Path;

use crate::error::{GarudError, Result};
use crate::geo::Position;
use crate::planner::NavigatorConfig;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct GarudConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub drone: DroneConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Data server connection settings
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Data server host (default: localhost)
    #[serde(default = "default_host")]
    pub host: String,

    /// Data server port (default: 9898)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in milliseconds (default: 5000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Drone parameters
#[derive(Clone, Debug, Deserialize)]
pub struct DroneConfig {
    /// Home longitude (default: Appleton Tower)
    #[serde(default = "default_home_lng")]
    pub home_lng: f64,

    /// Home latitude (default: Appleton Tower)
    #[serde(default = "default_home_lat")]
    pub home_lat: f64,

    /// Move budget for the day (default: 1500)
    #[serde(default = "default_battery")]
    pub battery: i32,

    /// Moves kept in reserve for the home return (default: 5)
    #[serde(default = "default_return_margin")]
    pub return_margin: i32,

    /// Maximum moves per planning leg (default: 2000)
    #[serde(default = "default_max_leg_moves")]
    pub max_leg_moves: u32,

    /// Maximum ±10° dodge adjustments, 18 = 180° (default: 18)
    #[serde(default = "default_max_dodge_steps")]
    pub max_dodge_steps: u32,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory for the flight path GeoJSON file
    #[serde(default = "default_flightpath_dir")]
    pub flightpath_dir: String,

    /// Path of the delivery ledger file
    #[serde(default = "default_deliveries_path")]
    pub deliveries_path: String,
}

// Default value functions
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    9898
}
fn default_timeout() -> u64 {
    5000
}
fn default_home_lng() -> f64 {
    -3.186874
}
fn default_home_lat() -> f64 {
    55.944494
}
fn default_battery() -> i32 {
    1500
}
fn default_return_margin() -> i32 {
    5
}
fn default_max_leg_moves() -> u32 {
    2000
}
fn default_max_dodge_steps() -> u32 {
    18
}
fn default_flightpath_dir() -> String {
    "output".to_string()
}
fn default_deliveries_path() -> String {
    "output/deliveries.json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            home_lng: default_home_lng(),
            home_lat: default_home_lat(),
            battery: default_battery(),
            return_margin: default_return_margin(),
            max_leg_moves: default_max_leg_moves(),
            max_dodge_steps: default_max_dodge_steps(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            flightpath_dir: default_flightpath_dir(),
            deliveries_path: default_deliveries_path(),
        }
    }
}

impl Default for GarudConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            drone: DroneConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl GarudConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GarudError::Config(format!("Failed to read config file: {}", e)))?;
        let config: GarudConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl DroneConfig {
    /// The drone's home position.
    pub fn home(&self) -> Position {
        Position::new(self.home_lng, self.home_lat)
    }

    /// Navigator tuning derived from this configuration.
    pub fn navigator(&self) -> NavigatorConfig {
        NavigatorConfig {
            return_margin: self.return_margin,
            max_leg_moves: self.max_leg_moves,
            max_dodge_steps: self.max_dodge_steps,
        }
    }
}
