//! # Basket State
//!
//! Shares one `BasketStore` between the shell's command handlers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SharedBasket                                                           │
//! │  └── Arc<Mutex<BasketStore<S>>>                                         │
//! │        ├── with_basket(|store| ...)      read totals, items             │
//! │        └── with_basket_mut(|store| ...)  add, remove, set quantity      │
//! │                                                                         │
//! │  Every mutation persists through S before the closure returns.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use bloom_core::{BasketStore, SnapshotStorage};
use tracing::debug;

/// Thread-safe basket handle.
#[derive(Debug)]
pub struct SharedBasket<S> {
    store: Arc<Mutex<BasketStore<S>>>,
}

impl<S> Clone for SharedBasket<S> {
    fn clone(&self) -> Self {
        SharedBasket {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SnapshotStorage> SharedBasket<S> {
    /// Rehydrates the basket from `storage` and logs every change.
    pub fn open(storage: S) -> Self {
        let mut store = BasketStore::open(storage);

        store.subscribe(|state| {
            debug!(
                lines = state.items.len(),
                total_items = state.total_items(),
                total_price = %state.total_price(),
                "Basket changed"
            );
        });

        SharedBasket {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with_basket<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BasketStore<S>) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_basket_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BasketStore<S>) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::{BasketItem, BouquetSize, MemoryStorage, Money};

    #[test]
    fn test_clones_share_store() {
        let basket = SharedBasket::open(MemoryStorage::new());
        let other = basket.clone();

        other.with_basket_mut(|store| {
            let roses = BasketItem::new("f1", "Roses", BouquetSize::M, Money::from_major(10), 2);
            store.add_item(roses);
        });

        assert_eq!(basket.with_basket(|store| store.total_items()), 2);
        assert_eq!(basket.with_basket(|store| store.subscriber_count()), 1);
    }

    #[test]
    fn test_rehydrates_from_storage() {
        let storage = MemoryStorage::new();
        SharedBasket::open(storage.clone()).with_basket_mut(|store| {
            let tulips = BasketItem::new("f2", "Tulips", BouquetSize::S, Money::from_major(5), 3);
            store.add_item(tulips);
        });

        let basket = SharedBasket::open(storage);
        assert_eq!(basket.with_basket(|store| store.total_price()), Money::from_major(15));
    }
}
