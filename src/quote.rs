//! Parsing of user-entered prices
//!
//! The store assumes every price it sees is already a valid decimal, so
//! anything typed by a user goes through here first.

use crate::error::{BargainError, Result};
use crate::types::ensure_price_in_range;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a quoted price
///
/// Accepts zero. Rejects empty, non-numeric, negative and out-of-range input.
pub fn parse_price(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BargainError::EmptyPrice);
    }

    let price = Decimal::from_str(trimmed)
        .map_err(|_| BargainError::InvalidPrice(trimmed.to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(BargainError::NegativePrice(trimmed.to_string()));
    }
    ensure_price_in_range(price)?;

    Ok(price)
}

/// Parse a retail price, which must be strictly positive
pub fn parse_retail_price(input: &str) -> Result<Decimal> {
    let price = parse_price(input)?;
    if price.is_zero() {
        return Err(BargainError::NonPositiveRetail(input.trim().to_string()));
    }
    Ok(price)
}
