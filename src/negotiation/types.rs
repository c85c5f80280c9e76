//! Negotiation types and state machine

use crate::error::{BargainError, Result};
use crate::types::{ensure_price_in_range, Item, ItemID};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Negotiation status of a bargain item
///
/// `Failed` has no transition leading into it; it is kept so consumers can
/// match on it once a rejection path exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationStatus {
    /// Waiting for a (fresh) quote; also the revert target after a counter offer
    #[default]
    Pending,
    /// Settlement scheduled
    Negotiating,
    /// Quote accepted
    Agreed,
    /// Never reached
    Failed,
}

impl NegotiationStatus {
    /// Check if no further transition is defined
    pub fn is_terminal(&self) -> bool {
        matches!(self, NegotiationStatus::Agreed | NegotiationStatus::Failed)
    }
}

/// A cart entry tracking a user's offer against the retail price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BargainItem {
    item: Item,
    user_quoted_price: Decimal,
    server_counter_price: Decimal,
    status: NegotiationStatus,
}

impl BargainItem {
    /// Create a pending bargain item from a scanned item and the user's quote
    pub fn new(item: Item, user_quoted_price: Decimal) -> Result<Self> {
        if user_quoted_price.is_sign_negative() && !user_quoted_price.is_zero() {
            return Err(BargainError::NegativePrice(user_quoted_price.to_string()));
        }
        ensure_price_in_range(user_quoted_price)?;

        Ok(Self {
            item,
            user_quoted_price,
            server_counter_price: Decimal::ZERO,
            status: NegotiationStatus::Pending,
        })
    }

    pub fn id(&self) -> &ItemID {
        &self.item.id
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn retail_price(&self) -> Decimal {
        self.item.retail_price
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn user_quoted_price(&self) -> Decimal {
        self.user_quoted_price
    }

    /// Zero until the first settlement
    pub fn server_counter_price(&self) -> Decimal {
        self.server_counter_price
    }

    pub fn status(&self) -> NegotiationStatus {
        self.status
    }

    /// Drop any negotiation outcome carried in from outside the store
    pub(crate) fn reset(&mut self) {
        self.server_counter_price = Decimal::ZERO;
        self.status = NegotiationStatus::Pending;
    }

    pub(crate) fn set_status(&mut self, status: NegotiationStatus) {
        self.status = status;
    }

    pub(crate) fn set_server_counter_price(&mut self, price: Decimal) {
        self.server_counter_price = price;
    }
}

/// Result of offering an item to the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Item appended and negotiation started
    Accepted(ItemID),
    /// An item with the same product name is already in the store
    RejectedDuplicate { name: String },
}

impl AddOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AddOutcome::Accepted(_))
    }
}

/// Outcome of the settlement rule for a single item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementOutcome {
    /// Quote accepted; `coins` is the saving credited to the user
    Agreed { counter_price: Decimal, coins: Decimal },
    /// Quote too low; the server counters and the item goes back to pending
    Countered { counter_price: Decimal },
}

impl SettlementOutcome {
    pub fn counter_price(&self) -> Decimal {
        match self {
            SettlementOutcome::Agreed { counter_price, .. }
            | SettlementOutcome::Countered { counter_price } => *counter_price,
        }
    }

    pub fn status(&self) -> NegotiationStatus {
        match self {
            SettlementOutcome::Agreed { .. } => NegotiationStatus::Agreed,
            SettlementOutcome::Countered { .. } => NegotiationStatus::Pending,
        }
    }
}

/// Change notification emitted by the store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// Item appended to the cart
    ItemAdded { item: BargainItem },
    /// Item moved to negotiating and a settlement was scheduled
    NegotiationStarted { id: ItemID },
    /// Deferred settlement applied
    Settled {
        item: BargainItem,
        outcome: SettlementOutcome,
        coins_earned: Decimal,
    },
}

/// Serializable view of the whole store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub items: Vec<BargainItem>,
    pub coins_earned: Decimal,
    pub best_quoted_price_total: Decimal,
}
