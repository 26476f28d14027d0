//! # Basket Store
//!
//! The authoritative basket for one storefront session: it owns the
//! [`Basket`], the sidebar flag, the injected [`SnapshotStorage`] and the
//! subscribers that re-render on change.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Store Operations                              │
//! │                                                                         │
//! │  UI Action              Store Call                  Effects             │
//! │  ─────────              ──────────                  ───────             │
//! │                                                                         │
//! │  Add to Basket ───────► add_item()        ──┐                           │
//! │  +/- buttons ─────────► update_quantity() ──┤  1. mutate basket         │
//! │  Trash icon ──────────► remove_item()     ──┼► 2. storage.set(snapshot) │
//! │  Clear All ───────────► clear_basket()    ──┘  3. notify subscribers    │
//! │                                                                         │
//! │  Open/close sidebar ──► set_open()  ──────────► notify only             │
//! │                                                                         │
//! │  Badge / total ───────► total_items(), total_price()   (read only)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! [`BasketStore::open`] reads the snapshot once. A missing, unreadable or
//! malformed snapshot yields an empty basket and a warning; startup never
//! fails because of it.
//!
//! ## Threading
//! Mutations take `&mut self` and run to completion, subscribers included.
//! Callers that share a store between threads wrap it in a mutex.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::basket::{Basket, BasketItem, BasketTotals};
use crate::money::Money;
use crate::storage::SnapshotStorage;
use crate::types::BouquetSize;
use crate::BASKET_STORAGE_KEY;

// =============================================================================
// State View
// =============================================================================

/// Read-only view of the store handed to subscribers.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketState<'a> {
    pub items: &'a [BasketItem],
    /// Sidebar visibility. UI-only, never persisted.
    pub is_open: bool,
}

impl BasketState<'_> {
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn total_price(&self) -> Money {
        self.items.iter().map(BasketItem::line_total).sum()
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Handle returned by [`BasketStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&BasketState<'_>) + Send>;

// =============================================================================
// Basket Store
// =============================================================================

/// Observable, persisted basket.
///
/// ## Invariants
/// - Items are unique by `(flower_id, size)`
/// - Every item has `quantity >= 1`
/// - After each item mutation the storage holds the current snapshot
///   (unless the backend reported a write error, which is logged)
pub struct BasketStore<S> {
    basket: Basket,
    is_open: bool,
    storage: S,
    subscribers: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: SnapshotStorage> BasketStore<S> {
    /// Creates the store and rehydrates it from `storage`.
    ///
    /// ## Fallbacks
    /// ```text
    /// storage.get("flower-basket")
    ///      │
    ///      ├── Ok(None)            → empty basket
    ///      ├── Err(_)              → empty basket, warn!
    ///      └── Ok(Some(json))
    ///            ├── parse error   → empty basket, warn!
    ///            └── parsed        → normalized basket
    /// ```
    pub fn open(storage: S) -> Self {
        let basket = load_basket(&storage);
        BasketStore {
            basket,
            is_open: false,
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a line, merging quantity into an existing `(flower_id, size)`
    /// line. The existing line's price, name and image are kept. A line
    /// with `quantity < 1` is ignored.
    pub fn add_item(&mut self, item: BasketItem) {
        let flower_id = item.flower_id.clone();
        let size = item.size;
        let quantity = item.quantity;
        let added = self.basket.add_item(item);
        debug!(flower_id = %flower_id, size = %size, quantity, added, "add_item");
        self.commit();
    }

    /// Removes a line. Unknown keys are a no-op.
    pub fn remove_item(&mut self, flower_id: &str, size: BouquetSize) {
        let removed = self.basket.remove_item(flower_id, size);
        debug!(flower_id = %flower_id, size = %size, removed, "remove_item");
        self.commit();
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line. Unknown keys
    /// are a no-op.
    pub fn update_quantity(&mut self, flower_id: &str, size: BouquetSize, quantity: i64) {
        let changed = self.basket.update_quantity(flower_id, size, quantity);
        debug!(
            flower_id = %flower_id,
            size = %size,
            quantity,
            changed,
            "update_quantity"
        );
        self.commit();
    }

    /// Empties the basket. The sidebar flag is left as is.
    pub fn clear_basket(&mut self) {
        debug!(lines = self.basket.line_count(), "clear_basket");
        self.basket.clear();
        self.commit();
    }

    /// Shows or hides the basket sidebar. Not persisted.
    pub fn set_open(&mut self, open: bool) {
        debug!(open, "set_open");
        self.is_open = open;
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Sum of quantities; 0 for an empty basket.
    pub fn total_items(&self) -> i64 {
        self.basket.total_items()
    }

    /// Sum of price × quantity; zero for an empty basket.
    pub fn total_price(&self) -> Money {
        self.basket.total_price()
    }

    pub fn totals(&self) -> BasketTotals {
        BasketTotals::from(&self.basket)
    }

    pub fn items(&self) -> &[BasketItem] {
        self.basket.items()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn state(&self) -> BasketState<'_> {
        BasketState {
            items: self.basket.items(),
            is_open: self.is_open,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and hands back the storage (e.g. to flush it).
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Registers a listener called synchronously after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&BasketState<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let initial_len = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != initial_len
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    /// Writes the snapshot. Failures are logged; the in-memory basket stays
    /// authoritative for the session.
    fn persist(&self) {
        let snapshot = match self.basket.to_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Failed to encode basket snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set(BASKET_STORAGE_KEY, &snapshot) {
            error!(error = %e, "Failed to persist basket snapshot");
        }
    }

    fn notify(&mut self) {
        let state = BasketState {
            items: self.basket.items(),
            is_open: self.is_open,
        };
        for (_, listener) in self.subscribers.iter_mut() {
            listener(&state);
        }
    }
}

fn load_basket<S: SnapshotStorage>(storage: &S) -> Basket {
    let snapshot = match storage.get(BASKET_STORAGE_KEY) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return Basket::new(),
        Err(e) => {
            warn!(error = %e, "Could not read basket snapshot, starting empty");
            return Basket::new();
        }
    };

    match Basket::from_snapshot(&snapshot) {
        Ok(basket) => {
            debug!(lines = basket.line_count(), "Basket restored from snapshot");
            basket
        }
        Err(e) => {
            warn!(error = %e, "Error loading basket from storage, starting empty");
            Basket::new()
        }
    }
}

impl<S> fmt::Debug for BasketStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasketStore")
            .field("items", &self.basket.items())
            .field("is_open", &self.is_open)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
