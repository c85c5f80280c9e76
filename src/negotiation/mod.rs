//! Negotiation module: cart state and mock price settlement

pub mod settlement;
pub mod store;
pub mod types;

pub use settlement::settle;
pub use store::{ChannelObserver, NegotiationStore, StoreObserver, SubscriptionId};
pub use types::{
    AddOutcome, BargainItem, NegotiationStatus, SettlementOutcome, StoreEvent, StoreSnapshot,
};
