//! Static product catalog standing in for the scanner backend

use crate::error::{BargainError, Result};
use crate::types::Item;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A product the scanner can recognise
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub retail_price: Decimal,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in product list
    pub fn builtin() -> Self {
        let products = [
            ("Milk", dec!(3.50)),
            ("Bread", dec!(4.20)),
            ("Eggs", dec!(5.80)),
            ("Basmati Rice", dec!(12.00)),
            ("Masala Chai", dec!(6.40)),
            ("Paneer", dec!(7.25)),
        ]
        .into_iter()
        .map(|(name, retail_price)| Product {
            name: name.to_string(),
            retail_price,
        })
        .collect();

        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive lookup by product name
    pub fn find(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .find(|product| product.name.eq_ignore_ascii_case(name))
    }

    /// Scan a product, producing a fresh item with its own ID
    pub fn scan(&self, name: &str) -> Result<Item> {
        let product = self
            .find(name)
            .ok_or_else(|| BargainError::ProductNotFound(name.trim().to_string()))?;

        let item = Item::new(product.name.clone(), product.retail_price)?;
        tracing::debug!("Scanned {} as {}", product.name, item.id);
        Ok(item)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
