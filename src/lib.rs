//! Bargain Wala negotiation core
//!
//! In-memory cart for the Bargain Wala shopping app. Scanned items are
//! quoted by the user and settled against their retail price after a fixed
//! delay:
//! - accepted quotes earn the saving below retail as coins
//! - low quotes receive a server counter offer

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod negotiation;
pub mod quote;
pub mod types;

// Re-export commonly used types
pub use config::NegotiationConfig;
pub use error::{BargainError, Result};
pub use negotiation::{AddOutcome, BargainItem, NegotiationStatus, NegotiationStore, StoreEvent};
pub use types::{Item, ItemID};
