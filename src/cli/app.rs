//! Bargain Wala application wiring the catalog, quote parsing and the store

use crate::catalog::Catalog;
use crate::config::NegotiationConfig;
use crate::error::Result;
use crate::negotiation::{
    AddOutcome, BargainItem, NegotiationStatus, NegotiationStore, SettlementOutcome, StoreEvent,
};
use crate::quote::{parse_price, parse_retail_price};
use crate::types::Item;
use std::fmt::Write;

/// Main Bargain Wala application
#[derive(Clone)]
pub struct BargainApp {
    store: NegotiationStore,
    catalog: Catalog,
}

impl BargainApp {
    /// Create an application over the built-in catalog
    pub fn new(config: NegotiationConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: NegotiationConfig, catalog: Catalog) -> Self {
        Self {
            store: NegotiationStore::new(config),
            catalog,
        }
    }

    pub fn store(&self) -> &NegotiationStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Scan a product (or build an ad-hoc item when a retail price is given),
    /// attach the user's quote and hand it to the store
    pub async fn bargain(
        &self,
        product: &str,
        quote: &str,
        retail: Option<&str>,
    ) -> Result<AddOutcome> {
        let quote = parse_price(quote)?;
        let item = match retail {
            Some(retail) => Item::new(product, parse_retail_price(retail)?)?,
            None => self.catalog.scan(product)?,
        };

        Ok(self.store.add_item(BargainItem::new(item, quote)?).await)
    }

    /// Wait for every outstanding settlement
    pub async fn settle_all(&self) {
        self.store.wait_idle().await;
    }

    /// Scripted session: one accepted quote, one countered, one duplicate
    pub async fn demo(&self) -> Result<Vec<AddOutcome>> {
        let mut outcomes = Vec::new();
        for (product, quote) in [("Milk", "3.00"), ("Bread", "3.00"), ("Milk", "2.00")] {
            outcomes.push(self.bargain(product, quote, None).await?);
        }
        self.settle_all().await;
        Ok(outcomes)
    }

    /// Human readable cart listing with totals
    pub async fn cart_summary(&self) -> String {
        let snapshot = self.store.snapshot().await;
        let mut out = String::new();

        for item in &snapshot.items {
            let _ = writeln!(
                out,
                "{:<14} retail {:>8}  quoted {:>8}  server {:>8}  {}",
                item.name(),
                item.retail_price(),
                item.user_quoted_price(),
                item.server_counter_price(),
                status_label(item.status())
            );
        }
        let _ = writeln!(out, "Quoted total: {}", snapshot.best_quoted_price_total);
        let _ = write!(out, "Coins earned: {}", snapshot.coins_earned);
        out
    }

    /// Pretty-printed JSON snapshot of the cart
    pub async fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.store.snapshot().await)?)
    }

    /// Pretty-printed JSON listing of the catalog
    pub fn render_catalog_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.catalog.products())?)
    }
}

fn status_label(status: NegotiationStatus) -> &'static str {
    match status {
        NegotiationStatus::Pending => "pending",
        NegotiationStatus::Negotiating => "negotiating",
        NegotiationStatus::Agreed => "agreed",
        NegotiationStatus::Failed => "failed",
    }
}

/// One-line description of a store event for terminal output
pub fn describe_event(event: &StoreEvent) -> String {
    match event {
        StoreEvent::ItemAdded { item } => format!(
            "+ {} quoted at {} (retail {})",
            item.name(),
            item.user_quoted_price(),
            item.retail_price()
        ),
        StoreEvent::NegotiationStarted { id } => format!("~ negotiating {}", id),
        StoreEvent::Settled { item, outcome, .. } => match outcome {
            SettlementOutcome::Agreed { counter_price, coins } => format!(
                "✓ {} agreed at {}, {} coins earned",
                item.name(),
                counter_price,
                coins
            ),
            SettlementOutcome::Countered { counter_price } => format!(
                "✗ {} countered at {}, quote again",
                item.name(),
                counter_price
            ),
        },
    }
}
