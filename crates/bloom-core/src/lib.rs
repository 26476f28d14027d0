//! # bloom-core: Pure Basket Logic for the Flower Storefront
//!
//! This crate is the **heart** of the storefront basket. It owns the basket
//! data model, its mutation rules, the observable store wrapped around it and
//! the checkout handoff text. It never touches the disk or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bloom Basket Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI / bloom-cli                       │   │
//! │  │   Add to Basket ──► +/- Quantity ──► Remove ──► WhatsApp        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bloom-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  basket  │ │  store   │ │    checkout      │  │   │
//! │  │   │  Flower  │ │  Basket  │ │ observers│ │ message + wa.me  │  │   │
//! │  │   │  Size    │ │  Item    │ │ persist  │ │                  │  │   │
//! │  │   └──────────┘ └──────────┘ └────┬─────┘ └──────────────────┘  │   │
//! │  │                                  │ SnapshotStorage (trait)      │   │
//! │  └──────────────────────────────────┼──────────────────────────────┘   │
//! │                                     │                                   │
//! │  ┌──────────────────────────────────▼──────────────────────────────┐   │
//! │  │          bloom-db: SqliteStorage / FileStorage                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Flower, FlowerOption, BouquetSize, Language)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`basket`] - Basket line items and the mutation rules
//! - [`store`] - Observable, persisted basket store
//! - [`storage`] - Key-value snapshot storage trait + in-memory impl
//! - [`checkout`] - WhatsApp order message and link
//! - [`preferences`] - Persisted UI language
//! - [`validation`] - Input checks used by front-ends
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bloom_core::{BasketItem, BasketStore, BouquetSize, MemoryStorage, Money};
//!
//! let mut store = BasketStore::open(MemoryStorage::new());
//! store.add_item(BasketItem::new("f1", "Red Roses", BouquetSize::M, Money::from_major(10), 2));
//! store.add_item(BasketItem::new("f1", "Red Roses", BouquetSize::M, Money::from_major(10), 1));
//!
//! assert_eq!(store.items().len(), 1);
//! assert_eq!(store.total_items(), 3);
//! assert_eq!(store.total_price(), Money::from_major(30));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod checkout;
pub mod error;
pub mod money;
pub mod preferences;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketItem, BasketKey, BasketTotals};
pub use checkout::CheckoutHandoff;
pub use error::{CoreError, CoreResult, StorageError, ValidationError};
pub use money::Money;
pub use storage::{MemoryStorage, SnapshotStorage};
pub use store::{BasketState, BasketStore, SubscriptionId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the basket snapshot.
///
/// The storefront has always written its basket under this key, so existing
/// snapshots keep loading after an upgrade.
pub const BASKET_STORAGE_KEY: &str = "flower-basket";

/// Storage key holding the selected UI language code.
pub const LANGUAGE_STORAGE_KEY: &str = "flower-language";

/// Maximum quantity of a single line accepted from user input.
///
/// ## Business Reason
/// Catches typos like 100 instead of 10 before they reach the basket.
/// The store itself does not enforce it.
pub const MAX_ITEM_QUANTITY: i64 = 999;
