//! The resolved order book for one delivery day.

use crate::error::Result;
use crate::geo::Position;

use super::client::OrderRecord;

/// One candidate order with its drop-off already geocoded.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: String,
    pub items: Vec<String>,
    pub dropoff: Position,
}

/// All orders for the planning date.
#[derive(Clone, Debug, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Build the book from raw order records, resolving each drop-off word
    /// address through `locate`.
    pub fn build<F>(records: Vec<OrderRecord>, mut locate: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Position>,
    {
        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            let dropoff = locate(&record.deliver_to)?;
            orders.push(Order {
                id: record.order_no,
                items: record.items,
                dropoff,
            });
        }
        Ok(Self { orders })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
