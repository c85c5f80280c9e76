//! Negotiation configuration

use crate::error::{BargainError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for the mock settlement rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Delay before a negotiating item is settled
    pub settlement_delay_ms: u64,
    /// A quote strictly above `retail * acceptance_ratio` is accepted
    pub acceptance_ratio: Decimal,
    /// Counter offer issued for insufficient quotes, as a share of retail
    pub counter_ratio: Decimal,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            settlement_delay_ms: 3000,
            acceptance_ratio: dec!(0.8),
            counter_ratio: dec!(0.85),
        }
    }
}

impl NegotiationConfig {
    /// Load a config from a JSON file; missing fields fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the settlement delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.settlement_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.settlement_delay_ms)
    }

    /// Check that both ratios lie in (0, 1]
    pub fn validate(&self) -> Result<()> {
        for (field, ratio) in [
            ("acceptance_ratio", self.acceptance_ratio),
            ("counter_ratio", self.counter_ratio),
        ] {
            if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
                return Err(BargainError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    field, ratio
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NegotiationConfig::default();
        assert_eq!(config.settlement_delay(), Duration::from_secs(3));
        assert_eq!(config.acceptance_ratio, dec!(0.8));
        assert_eq!(config.counter_ratio, dec!(0.85));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = NegotiationConfig::from_json(r#"{"settlement_delay_ms": 10}"#).unwrap();
        assert_eq!(config.settlement_delay(), Duration::from_millis(10));
        assert_eq!(config.counter_ratio, dec!(0.85));
    }

    #[test]
    fn test_ratio_parsed_from_string() {
        let config =
            NegotiationConfig::from_json(r#"{"acceptance_ratio": "0.75", "counter_ratio": "0.9"}"#)
                .unwrap();
        assert_eq!(config.acceptance_ratio, dec!(0.75));
        assert_eq!(config.counter_ratio, dec!(0.9));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let result = NegotiationConfig::from_json(r#"{"counter_ratio": "1.5"}"#);
        assert!(matches!(result, Err(BargainError::InvalidConfig(_))));

        let result = NegotiationConfig::from_json(r#"{"acceptance_ratio": "0"}"#);
        assert!(matches!(result, Err(BargainError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = NegotiationConfig::from_json("settlement_delay_ms = 5");
        assert!(matches!(result, Err(BargainError::Json(_))));
    }

    #[test]
    fn test_with_delay() {
        let config = NegotiationConfig::default().with_delay(Duration::from_millis(250));
        assert_eq!(config.settlement_delay_ms, 250);
    }
}
