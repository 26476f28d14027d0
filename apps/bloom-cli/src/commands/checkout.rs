//! # Checkout Command
//!
//! Prints the WhatsApp order message and link. The basket is left as is;
//! run `bloom clear` once the order is confirmed.

use std::fmt;

use bloom_core::SnapshotStorage;
use serde::Serialize;

use crate::state::{ConfigState, SharedBasket};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    pub link: String,
    pub total: String,
}

impl fmt::Display for CheckoutResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.message, self.link)
    }
}

/// Builds the order handoff for the current basket.
pub fn checkout<S: SnapshotStorage>(
    basket: &SharedBasket<S>,
    config: &ConfigState,
) -> CheckoutResponse {
    let handoff = config.checkout_handoff();

    basket.with_basket(|store| {
        let total = store.total_price();
        CheckoutResponse {
            message: handoff.message(store.items(), total),
            link: handoff.link(store.items(), total),
            total: config.format_currency(total),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::checkout::EMPTY_BASKET_MESSAGE;
    use bloom_core::{BasketItem, BouquetSize, MemoryStorage, Money};

    #[test]
    fn test_checkout_empty_basket() {
        let basket = SharedBasket::open(MemoryStorage::new());
        let response = checkout(&basket, &ConfigState::default());

        assert_eq!(response.message, EMPTY_BASKET_MESSAGE);
        assert_eq!(response.total, "AED 0.00");
        assert!(response.link.starts_with("https://wa.me/971500000000?text=Hello!"));
    }

    #[test]
    fn test_checkout_leaves_basket_alone() {
        let basket = SharedBasket::open(MemoryStorage::new());
        basket.with_basket_mut(|store| {
            let tulips = BasketItem::new("f2", "Tulips", BouquetSize::S, Money::from_major(5), 3);
            store.add_item(tulips);
        });

        let config = ConfigState {
            currency_symbol: "$".to_string(),
            whatsapp_number: "+1 (555) 0100".to_string(),
            ..ConfigState::default()
        };
        let response = checkout(&basket, &config);

        assert_eq!(
            response.message,
            "Hello! I'm interested in these flowers:\n\
             - Tulips (Size: S, Qty: 3, Price: $15.00)\n\
             \n\
             Total: $15.00"
        );
        assert_eq!(response.total, "$15.00");
        assert!(response.link.starts_with("https://wa.me/15550100?text="));
        assert!(response.to_string().ends_with(&response.link));
        assert_eq!(basket.with_basket(|store| store.total_items()), 3);
    }
}
