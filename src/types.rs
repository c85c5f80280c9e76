//! Core types used throughout Bargain Wala

use crate::error::{BargainError, Result};
use blake2::{Blake2b512, Digest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest price accepted for retail prices and quotes
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Reject prices above [`MAX_PRICE`]
pub fn ensure_price_in_range(price: Decimal) -> Result<()> {
    if price > MAX_PRICE {
        return Err(BargainError::PriceTooLarge {
            price: price.to_string(),
            max: MAX_PRICE.to_string(),
        });
    }
    Ok(())
}

/// Unique identifier for scanned items
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemID(pub String);

impl ItemID {
    /// Generate a new unique item ID from the current time and a random nonce
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let nonce: u64 = rand::random();

        let mut hasher = Blake2b512::new();
        hasher.update(nanos.to_be_bytes());
        hasher.update(nonce.to_be_bytes());
        let result = hasher.finalize();

        Self(format!("item_{}", hex::encode(&result[..8])))
    }
}

impl fmt::Display for ItemID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product candidate for negotiation, as produced by the scanner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemID,
    pub name: String,
    pub retail_price: Decimal,
}

impl Item {
    /// Create an item with a freshly generated ID
    pub fn new(name: impl Into<String>, retail_price: Decimal) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(BargainError::EmptyProductName);
        }
        if retail_price <= Decimal::ZERO {
            return Err(BargainError::NonPositiveRetail(retail_price.to_string()));
        }
        ensure_price_in_range(retail_price)?;

        Ok(Self {
            id: ItemID::generate(),
            name,
            retail_price,
        })
    }
}
