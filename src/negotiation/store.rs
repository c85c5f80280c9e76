//! Negotiation store holds the cart and runs the mock settlement

use crate::config::NegotiationConfig;
use crate::error::{BargainError, Result};
use crate::types::ItemID;
use futures::future::join_all;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::settlement::settle;
use super::types::{
    AddOutcome, BargainItem, NegotiationStatus, SettlementOutcome, StoreEvent, StoreSnapshot,
};

/// Receives change notifications from a [`NegotiationStore`]
///
/// Called with the store lock held, right after the mutation. Implementations
/// must not block.
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, event: &StoreEvent);
}

/// Observer forwarding every event into an unbounded channel
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<StoreEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<StoreEvent>) -> Self {
        Self { tx }
    }
}

impl StoreObserver for ChannelObserver {
    fn on_change(&self, event: &StoreEvent) {
        // Receiver gone means nobody is listening any more
        let _ = self.tx.send(event.clone());
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Scheduled settlement for one item
struct PendingSettlement {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

struct StoreState {
    items: Vec<BargainItem>,
    coins_earned: Decimal,
    observers: Vec<(SubscriptionId, Arc<dyn StoreObserver>)>,
    next_subscription: u64,
    pending: HashMap<ItemID, PendingSettlement>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            coins_earned: Decimal::ZERO,
            observers: Vec::new(),
            next_subscription: 0,
            pending: HashMap::new(),
        }
    }

    fn position(&self, id: &ItemID) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn notify(&self, event: StoreEvent) {
        for (_, observer) in &self.observers {
            observer.on_change(&event);
        }
    }

    /// Apply the settlement rule to a negotiating item
    fn settle_item(&mut self, id: &ItemID, config: &NegotiationConfig) {
        let Some(index) = self.position(id) else {
            tracing::warn!("Settlement fired for unknown item {}", id);
            return;
        };

        let item = &self.items[index];
        let outcome = settle(item.retail_price(), item.user_quoted_price(), config);

        // Compute the new balance before touching the item so an overflow
        // cannot leave it half-settled
        let coins_earned = match &outcome {
            SettlementOutcome::Agreed { coins, .. } => {
                self.coins_earned.checked_add(*coins).unwrap_or_else(|| {
                    tracing::warn!("Coin balance saturated while settling {}", id);
                    Decimal::MAX
                })
            }
            SettlementOutcome::Countered { .. } => self.coins_earned,
        };

        let item = &mut self.items[index];
        item.set_server_counter_price(outcome.counter_price());
        item.set_status(outcome.status());
        let item = item.clone();
        self.coins_earned = coins_earned;

        match &outcome {
            SettlementOutcome::Agreed { counter_price, coins } => {
                tracing::info!(
                    "Agreed on {} at {} (retail {}), coins +{}",
                    item.name(),
                    counter_price,
                    item.retail_price(),
                    coins
                );
            }
            SettlementOutcome::Countered { counter_price } => {
                tracing::info!(
                    "Countered {} at {} (quoted {}), awaiting a new quote",
                    item.name(),
                    counter_price,
                    item.user_quoted_price()
                );
            }
        }

        self.notify(StoreEvent::Settled {
            item,
            outcome,
            coins_earned: self.coins_earned,
        });
    }
}

/// In-memory store of bargain items
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct NegotiationStore {
    state: Arc<Mutex<StoreState>>,
    config: Arc<NegotiationConfig>,
}

impl NegotiationStore {
    /// Create an empty store
    pub fn new(config: NegotiationConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    /// Register an observer for change notifications
    pub async fn subscribe(&self, observer: Arc<dyn StoreObserver>) -> SubscriptionId {
        let mut state = self.state.lock().await;
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.observers.push((id, observer));
        id
    }

    /// Subscribe with a channel receiving every subsequent event
    pub async fn subscribe_channel(
        &self,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.subscribe(Arc::new(ChannelObserver::new(tx))).await;
        (id, rx)
    }

    /// Remove an observer; returns false if it was not registered
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.lock().await;
        let before = state.observers.len();
        state.observers.retain(|(sub, _)| *sub != id);
        state.observers.len() != before
    }

    /// Append an item and start negotiating it
    ///
    /// Items are unique by product name. A duplicate leaves the store
    /// untouched: no notification, no settlement. Accepted items enter as
    /// `pending` whatever status they carried.
    pub async fn add_item(&self, mut item: BargainItem) -> AddOutcome {
        let mut state = self.state.lock().await;

        if state.items.iter().any(|existing| existing.name() == item.name()) {
            tracing::warn!("Rejected duplicate product {} ({})", item.name(), item.id());
            return AddOutcome::RejectedDuplicate {
                name: item.name().to_string(),
            };
        }

        item.reset();
        let id = item.id().clone();
        tracing::info!(
            "Added {} ({}) quoted at {} against retail {}",
            item.name(),
            id,
            item.user_quoted_price(),
            item.retail_price()
        );

        state.items.push(item.clone());
        state.notify(StoreEvent::ItemAdded { item });

        let index = state.items.len() - 1;
        self.begin_negotiation(&mut state, index);

        AddOutcome::Accepted(id)
    }

    /// Move an item to negotiating and schedule its settlement
    pub async fn start_negotiation(&self, id: &ItemID) -> Result<()> {
        let mut state = self.state.lock().await;
        let index = state
            .position(id)
            .ok_or_else(|| BargainError::ItemNotFound(id.0.clone()))?;

        match state.items[index].status() {
            NegotiationStatus::Negotiating => Err(BargainError::AlreadyNegotiating(id.0.clone())),
            status if status.is_terminal() => Err(BargainError::InvalidStateTransition(format!(
                "{} is {:?}",
                id, status
            ))),
            _ => {
                self.begin_negotiation(&mut state, index);
                Ok(())
            }
        }
    }

    fn begin_negotiation(&self, state: &mut StoreState, index: usize) {
        let item = &mut state.items[index];
        item.set_status(NegotiationStatus::Negotiating);
        let id = item.id().clone();

        state.notify(StoreEvent::NegotiationStarted { id: id.clone() });

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Self::run_settlement(
            self.state.clone(),
            self.config.clone(),
            id.clone(),
            cancel.clone(),
        ));

        tracing::debug!(
            "Scheduled settlement for {} in {:?}",
            id,
            self.config.settlement_delay()
        );

        state.pending.insert(
            id,
            PendingSettlement {
                cancel,
                handle: Some(handle),
            },
        );
    }

    async fn run_settlement(
        state: Arc<Mutex<StoreState>>,
        config: Arc<NegotiationConfig>,
        id: ItemID,
        cancel: CancellationToken,
    ) {
        tokio::select! {
            _ = tokio::time::sleep(config.settlement_delay()) => {}
            _ = cancel.cancelled() => {
                tracing::debug!("Settlement for {} cancelled", id);
                return;
            }
        }

        let mut state = state.lock().await;
        // Cancelled while waiting for the lock
        if cancel.is_cancelled() {
            return;
        }

        state.pending.remove(&id);
        state.settle_item(&id, &config);
    }

    /// Wait until every scheduled settlement has run
    pub async fn wait_idle(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> = {
                let mut state = self.state.lock().await;
                state
                    .pending
                    .values_mut()
                    .filter_map(|pending| pending.handle.take())
                    .collect()
            };

            if handles.is_empty() {
                return;
            }

            for result in join_all(handles).await {
                if let Err(e) = result {
                    tracing::error!("Settlement task failed: {}", e);
                }
            }
        }
    }

    /// Cancel every outstanding settlement
    ///
    /// Cancelled items stay `negotiating`. Returns how many were cancelled.
    pub async fn shutdown(&self) -> usize {
        let drained: Vec<PendingSettlement> = {
            let mut state = self.state.lock().await;
            let drained: Vec<PendingSettlement> =
                state.pending.drain().map(|(_, pending)| pending).collect();
            for pending in &drained {
                pending.cancel.cancel();
            }
            drained
        };

        // Handles already taken by `wait_idle` are awaited there
        let cancelled = drained.len();
        join_all(drained.into_iter().filter_map(|pending| pending.handle)).await;

        if cancelled > 0 {
            tracing::info!("Cancelled {} pending settlement(s)", cancelled);
        }
        cancelled
    }

    /// Number of settlements scheduled but not yet applied
    pub async fn pending_settlements(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    /// All items in insertion order
    pub async fn items(&self) -> Vec<BargainItem> {
        self.state.lock().await.items.clone()
    }

    pub async fn get_item(&self, id: &ItemID) -> Option<BargainItem> {
        let state = self.state.lock().await;
        state.position(id).map(|index| state.items[index].clone())
    }

    pub async fn coins_earned(&self) -> Decimal {
        self.state.lock().await.coins_earned
    }

    /// Sum of user quotes over all items
    ///
    /// Agreed items also count their quote, not their server price.
    pub async fn best_quoted_price_total(&self) -> Decimal {
        let state = self.state.lock().await;
        Self::quote_total(&state.items)
    }

    // Saturates like the coin balance
    fn quote_total(items: &[BargainItem]) -> Decimal {
        items.iter().fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.user_quoted_price())
                .unwrap_or(Decimal::MAX)
        })
    }

    /// Consistent view of items and totals
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().await;
        StoreSnapshot {
            items: state.items.clone(),
            coins_earned: state.coins_earned,
            best_quoted_price_total: Self::quote_total(&state.items),
        }
    }
}

impl Default for NegotiationStore {
    fn default() -> Self {
        Self::new(NegotiationConfig::default())
    }
}
