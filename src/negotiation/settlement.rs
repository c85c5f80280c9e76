//! The mock settlement rule

use crate::config::NegotiationConfig;
use rust_decimal::Decimal;

use super::types::SettlementOutcome;

/// Decide whether a quote is accepted or countered
///
/// A quote strictly above `retail * acceptance_ratio` is accepted at the quoted
/// price and any saving below retail is credited as coins. Anything else is
/// countered at `retail * counter_ratio`.
pub fn settle(retail: Decimal, quote: Decimal, config: &NegotiationConfig) -> SettlementOutcome {
    if quote > retail * config.acceptance_ratio {
        SettlementOutcome::Agreed {
            counter_price: quote,
            coins: (retail - quote).max(Decimal::ZERO),
        }
    } else {
        SettlementOutcome::Countered {
            counter_price: (retail * config.counter_ratio).normalize(),
        }
    }
}
