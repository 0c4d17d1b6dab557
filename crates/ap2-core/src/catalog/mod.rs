//! Catalog collaborator.
//!
//! The mandate chain only needs two things from the product side: a product
//! lookup when locking a cart, and an order record after a completed payment.
//! [`InMemoryCatalog`] serves static fixture data; anything implementing
//! [`Catalog`] can stand in for it.

mod memory;

pub use memory::InMemoryCatalog;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listing on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub price: Decimal,
    pub in_stock: bool,
    pub stock_count: u32,

    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub ram: String,
    #[serde(default)]
    pub mrp: Decimal,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub delivery_partner: String,
    #[serde(default)]
    pub delivery_speed: String,
}

impl Product {
    /// Name with variant, as locked into a Cart Mandate.
    pub fn display_name(&self) -> String {
        match (self.color.is_empty(), self.storage.is_empty()) {
            (true, true) => self.name.clone(),
            (false, true) => format!("{} ({})", self.name, self.color),
            (true, false) => format!("{} ({})", self.name, self.storage),
            (false, false) => format!("{} ({}, {})", self.name, self.color, self.storage),
        }
    }

    /// Discount against MRP in whole percent (0 when MRP is unknown).
    pub fn discount_percent(&self) -> u32 {
        if self.mrp <= Decimal::ZERO || self.price >= self.mrp {
            return 0;
        }
        self.mrp
            .checked_sub(self.price)
            .and_then(|off| off.checked_div(self.mrp))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|pct| pct.round().to_u32())
            .unwrap_or(0)
    }

    /// Units that can be sold right now.
    pub fn available_units(&self) -> u32 {
        if self.in_stock {
            self.stock_count
        } else {
            0
        }
    }
}

/// Order recorded against the catalog after a completed payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// `ORD-` + 12 hex
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub platform: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer_name: String,
    pub delivery_address: String,
    pub delivery_partner: String,
    pub status: String,
    pub ordered_at: DateTime<Utc>,
}

/// Product lookup and order recording.
pub trait Catalog: Send + Sync {
    fn find_product(&self, product_id: &str) -> Option<Product>;

    /// Record an order. Returns `None` if the product is unknown or out of stock.
    fn record_order(
        &self,
        product_id: &str,
        quantity: u32,
        customer_name: &str,
        delivery_address: &str,
    ) -> Option<OrderRecord>;

    fn find_order(&self, order_id: &str) -> Option<OrderRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn product(id: &str, price: i64, in_stock: bool, stock_count: u32) -> Product {
        Product {
            id: id.to_string(),
            name: "Samsung Galaxy S24".to_string(),
            platform: "Flipkart".to_string(),
            price: Decimal::from(price),
            in_stock,
            stock_count,
            color: "Onyx Black".to_string(),
            storage: "128GB".to_string(),
            ram: "8GB".to_string(),
            mrp: Decimal::from(74_999),
            rating: 4.4,
            seller: "RetailNet".to_string(),
            delivery_partner: "Ekart Logistics".to_string(),
            delivery_speed: "Tomorrow".to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        let mut p = product("FK-S24-128", 57_999, true, 10);
        assert_eq!(p.display_name(), "Samsung Galaxy S24 (Onyx Black, 128GB)");
        p.color.clear();
        assert_eq!(p.display_name(), "Samsung Galaxy S24 (128GB)");
        p.storage.clear();
        assert_eq!(p.display_name(), "Samsung Galaxy S24");
    }

    #[test]
    fn test_discount_percent() {
        let p = product("FK-S24-128", 57_999, true, 10);
        assert_eq!(p.discount_percent(), 23);

        let mut no_mrp = p.clone();
        no_mrp.mrp = Decimal::ZERO;
        assert_eq!(no_mrp.discount_percent(), 0);
    }

    #[test]
    fn test_available_units() {
        assert_eq!(product("A", 1, true, 5).available_units(), 5);
        assert_eq!(product("A", 1, false, 5).available_units(), 0);
    }
}
