use super::{Catalog, OrderRecord, Product};
use crate::mandate::{generate_id, IdKind};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.yaml");

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Static product list with an in-memory order book.
///
/// Recording an order does not change stock levels.
pub struct InMemoryCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
    orders: RwLock<HashMap<String, OrderRecord>>,
}

impl InMemoryCatalog {
    /// Build from a product list.
    ///
    /// Product IDs must be unique. Prices must be non-negative and the value
    /// of the full stock must be representable.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (i, p) in products.iter().enumerate() {
            if index.insert(p.id.clone(), i).is_some() {
                bail!("duplicate product id in catalog: {}", p.id);
            }
            if p.price < Decimal::ZERO || p.mrp < Decimal::ZERO {
                bail!("negative price in catalog: {}", p.id);
            }
            if p.price
                .checked_mul(Decimal::from(p.stock_count.max(1)))
                .is_none()
            {
                bail!("price of {} overflows at stock {}", p.id, p.stock_count);
            }
        }
        Ok(Self {
            products,
            index,
            orders: RwLock::new(HashMap::new()),
        })
    }

    /// The bundled product fixture.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_CATALOG).context("bundled catalog is invalid")
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).context("failed to parse catalog YAML")?;
        Self::new(file.products)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Self::from_yaml_str(&yaml)
            .with_context(|| format!("invalid catalog {}", path.display()))?;
        debug!(path = %path.display(), products = catalog.products.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Products in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn order_count(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Catalog for InMemoryCatalog {
    fn find_product(&self, product_id: &str) -> Option<Product> {
        self.index
            .get(product_id)
            .map(|&i| self.products[i].clone())
    }

    fn record_order(
        &self,
        product_id: &str,
        quantity: u32,
        customer_name: &str,
        delivery_address: &str,
    ) -> Option<OrderRecord> {
        let product = self.find_product(product_id)?;
        if !product.in_stock {
            return None;
        }
        let total_amount = product.price.checked_mul(Decimal::from(quantity))?;

        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let order_id = loop {
            let id = generate_id(IdKind::Order);
            if !orders.contains_key(&id) {
                break id;
            }
        };

        let order = OrderRecord {
            order_id: order_id.clone(),
            product_id: product.id.clone(),
            product_name: product.display_name(),
            platform: product.platform.clone(),
            quantity,
            unit_price: product.price,
            total_amount,
            customer_name: customer_name.to_string(),
            delivery_address: delivery_address.to_string(),
            delivery_partner: product.delivery_partner,
            status: "CONFIRMED".to_string(),
            ordered_at: Utc::now(),
        };
        orders.insert(order_id, order.clone());
        Some(order)
    }

    fn find_order(&self, order_id: &str) -> Option<OrderRecord> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(order_id)
            .cloned()
    }
}
