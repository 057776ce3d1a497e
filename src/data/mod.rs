//! Data service collaborators.
//!
//! This module provides:
//! - HTTP retrieval of zone geometry, menus, orders and word-address
//!   geocoding from the delivery data server
//! - The shop/price catalog snapshot
//! - The resolved order book for one delivery day

pub mod catalog;
pub mod client;
pub mod orders;

pub use catalog::Catalog;
pub use client::DataClient;
pub use orders::{Order, OrderBook};
