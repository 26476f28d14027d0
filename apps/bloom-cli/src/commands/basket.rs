//! # Basket Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Basket Lifecycle                                  │
//! │                                                                         │
//! │  bloom add ...        ──► validate ──► add_item        ──► persist     │
//! │  bloom set-qty ...    ──► validate ──► update_quantity ──► persist     │
//! │  bloom remove ...     ──────────────► remove_item     ──► persist     │
//! │  bloom clear          ──────────────► clear_basket    ──► persist     │
//! │  bloom show           ──────────────► items + totals                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloom_core::validation::{validate_basket_item, validate_flower_id, validate_quantity};
use bloom_core::{BasketItem, BasketStore, BasketTotals, BouquetSize, SnapshotStorage};
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;
use crate::state::SharedBasket;

/// Basket response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketResponse {
    pub items: Vec<BasketItem>,
    pub totals: BasketTotals,
}

impl<S: SnapshotStorage> From<&BasketStore<S>> for BasketResponse {
    fn from(store: &BasketStore<S>) -> Self {
        BasketResponse {
            items: store.items().to_vec(),
            totals: store.totals(),
        }
    }
}

/// Gets the current basket contents.
pub fn get_basket<S: SnapshotStorage>(basket: &SharedBasket<S>) -> BasketResponse {
    basket.with_basket(|store| BasketResponse::from(store))
}

/// Adds a line after validating it.
pub fn add_to_basket<S: SnapshotStorage>(
    basket: &SharedBasket<S>,
    item: BasketItem,
) -> Result<BasketResponse, CliError> {
    validate_basket_item(&item)?;

    debug!(
        flower_id = %item.flower_id,
        size = %item.size,
        quantity = item.quantity,
        "add_to_basket"
    );

    Ok(basket.with_basket_mut(|store| {
        store.add_item(item);
        BasketResponse::from(&*store)
    }))
}

/// Sets a line's quantity. Zero or below removes the line.
pub fn update_basket_item<S: SnapshotStorage>(
    basket: &SharedBasket<S>,
    flower_id: &str,
    size: BouquetSize,
    quantity: i64,
) -> Result<BasketResponse, CliError> {
    validate_flower_id(flower_id)?;
    if quantity > 0 {
        validate_quantity(quantity)?;
    }

    Ok(basket.with_basket_mut(|store| {
        store.update_quantity(flower_id, size, quantity);
        BasketResponse::from(&*store)
    }))
}

/// Removes a line. Unknown lines are ignored.
pub fn remove_from_basket<S: SnapshotStorage>(
    basket: &SharedBasket<S>,
    flower_id: &str,
    size: BouquetSize,
) -> BasketResponse {
    basket.with_basket_mut(|store| {
        store.remove_item(flower_id, size);
        BasketResponse::from(&*store)
    })
}

/// Empties the basket.
pub fn clear_basket<S: SnapshotStorage>(basket: &SharedBasket<S>) -> BasketResponse {
    basket.with_basket_mut(|store| {
        store.clear_basket();
        BasketResponse::from(&*store)
    })
}
