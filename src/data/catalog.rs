//! Shop and price catalog snapshot.
//!
//! Built once per run from the combined menu document; owned maps passed by
//! reference into the scheduler, never global state.

use std::collections::HashMap;

use crate::error::Result;
use crate::geo::Position;

use super::client::ShopMenu;

/// Flat delivery charge applied to every order, in pence.
pub const DELIVERY_CHARGE_PENCE: u32 = 50;

/// Item prices, item-to-shop assignment and resolved shop positions.
#[derive(Clone, Debug)]
pub struct Catalog {
    item_price: HashMap<String, u32>,
    item_shop: HashMap<String, String>,
    shop_position: HashMap<String, Position>,
}

impl Catalog {
    /// Build the catalog, resolving each shop's word address through
    /// `locate` (typically [`DataClient::locate`](super::DataClient::locate)).
    pub fn build<F>(menus: &[ShopMenu], mut locate: F) -> Result<Self>
    where
        F: FnMut(&str) -> Result<Position>,
    {
        let mut item_price = HashMap::new();
        let mut item_shop = HashMap::new();
        let mut shop_position = HashMap::new();

        for shop in menus {
            shop_position.insert(shop.name.clone(), locate(&shop.location)?);
            for entry in &shop.menu {
                item_price.insert(entry.item.clone(), entry.pence);
                item_shop.insert(entry.item.clone(), shop.name.clone());
            }
        }

        Ok(Self {
            item_price,
            item_shop,
            shop_position,
        })
    }

    /// Total order cost in pence: delivery charge plus every item's price.
    /// `None` when any item is unknown.
    pub fn delivery_cost(&self, items: &[String]) -> Option<u32> {
        items
            .iter()
            .map(|item| self.item_price.get(item).copied())
            .sum::<Option<u32>>()
            .map(|total| total + DELIVERY_CHARGE_PENCE)
    }

    /// The shops an order must visit, deduplicated in first-occurrence
    /// order so planning stays deterministic. `None` on any unknown item.
    pub fn shops_for_items(&self, items: &[String]) -> Option<Vec<String>> {
        let mut shops: Vec<String> = Vec::new();
        for item in items {
            let shop = self.item_shop.get(item)?;
            if !shops.iter().any(|s| s == shop) {
                shops.push(shop.clone());
            }
        }
        Some(shops)
    }

    pub fn shop_position(&self, shop: &str) -> Option<Position> {
        self.shop_position.get(shop).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::client::MenuItem;

    fn menus() -> Vec<ShopMenu> {
        vec![
            ShopMenu {
                name: "Nile Valley".to_string(),
                location: "looks.clouds.daring".to_string(),
                menu: vec![
                    MenuItem {
                        item: "falafel wrap".to_string(),
                        pence: 480,
                    },
                    MenuItem {
                        item: "mango juice".to_string(),
                        pence: 200,
                    },
                ],
            },
            ShopMenu {
                name: "Bing Tea".to_string(),
                location: "sketch.spill.puns".to_string(),
                menu: vec![MenuItem {
                    item: "bubble tea".to_string(),
                    pence: 300,
                }],
            },
        ]
    }

    fn catalog() -> Catalog {
        Catalog::build(&menus(), |words| {
            Ok(if words.starts_with("looks") {
                Position::new(-3.19, 55.94)
            } else {
                Position::new(-3.18, 55.95)
            })
        })
        .unwrap()
    }

    #[test]
    fn delivery_cost_includes_the_charge() {
        let cat = catalog();
        let items = vec!["falafel wrap".to_string(), "bubble tea".to_string()];
        assert_eq!(cat.delivery_cost(&items), Some(480 + 300 + 50));
    }

    #[test]
    fn unknown_item_has_no_cost() {
        let cat = catalog();
        let items = vec!["haggis".to_string()];
        assert_eq!(cat.delivery_cost(&items), None);
    }

    #[test]
    fn shops_deduplicate_in_first_occurrence_order() {
        let cat = catalog();
        let items = vec![
            "bubble tea".to_string(),
            "falafel wrap".to_string(),
            "mango juice".to_string(),
        ];
        assert_eq!(
            cat.shops_for_items(&items),
            Some(vec!["Bing Tea".to_string(), "Nile Valley".to_string()])
        );
    }

    #[test]
    fn shop_positions_come_from_the_locator() {
        let cat = catalog();
        assert_eq!(cat.shop_position("Nile Valley"), Some(Position::new(-3.19, 55.94)));
        assert_eq!(cat.shop_position("nowhere"), None);
    }
}
