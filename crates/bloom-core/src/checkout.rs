//! # Checkout Handoff
//!
//! There is no in-app payment. "Checkout" composes a plain-text order summary
//! and a `wa.me` link that opens a WhatsApp chat with the boutique, the
//! message pre-filled.
//!
//! ```text
//! Hello! I'm interested in these flowers:
//! - Red Roses (Size: M, Qty: 2, Price: AED 20.00), https://shop.example/flower/f1
//! - Tulips (Size: S, Qty: 3, Price: AED 15.00), https://shop.example/flower/f2
//!
//! Total: AED 35.00
//! ```
//!
//! The basket is only read here; clearing it after the handoff is the
//! caller's decision.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::basket::BasketItem;
use crate::money::Money;

/// Greeting used when the basket is empty.
pub const EMPTY_BASKET_MESSAGE: &str = "Hello! I'm interested in your flower arrangements.";

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Characters `encodeURIComponent` leaves alone: alphanumerics plus
/// `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the order summary for `items`.
///
/// `currency` is prefixed verbatim to every amount. The CLI configures it
/// and defaults to `"AED "` (note the trailing space); `"$"` gives `$15.00`.
pub fn order_message(items: &[BasketItem], total: Money, currency: &str) -> String {
    if items.is_empty() {
        return EMPTY_BASKET_MESSAGE.to_string();
    }

    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            let mut line = format!(
                "- {} (Size: {}, Qty: {}, Price: {}{})",
                item.flower_name,
                item.size,
                item.quantity,
                currency,
                item.line_total()
            );
            // The link stays inline after ", ", not on a line of its own.
            if !item.href.is_empty() {
                line.push_str(", ");
                line.push_str(&item.href);
            }
            line
        })
        .collect();

    format!(
        "Hello! I'm interested in these flowers:\n{}\n\nTotal: {}{}",
        lines.join("\n"),
        currency,
        total
    )
}

/// Builds `https://wa.me/<digits>?text=<message>`.
///
/// Everything but digits is stripped from `phone` (`"+971 50-123"` →
/// `97150123`).
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        digits,
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

/// Boutique contact details used to hand a basket over to WhatsApp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHandoff {
    pub phone: String,
    pub currency: String,
}

impl CheckoutHandoff {
    pub fn new(phone: impl Into<String>, currency: impl Into<String>) -> Self {
        CheckoutHandoff {
            phone: phone.into(),
            currency: currency.into(),
        }
    }

    /// Order summary for `items`.
    pub fn message(&self, items: &[BasketItem], total: Money) -> String {
        order_message(items, total, &self.currency)
    }

    /// Ready-to-open WhatsApp link carrying the order summary.
    pub fn link(&self, items: &[BasketItem], total: Money) -> String {
        whatsapp_link(&self.phone, &self.message(items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::Basket;
    use crate::types::BouquetSize;

    fn sample_basket() -> Basket {
        Basket::from_items([
            BasketItem::new("f1", "Red Roses", BouquetSize::M, Money::from_major(10), 2)
                .with_href("https://shop.example/flower/f1"),
            BasketItem::new("f2", "Tulips", BouquetSize::S, Money::from_major(5), 3),
        ])
    }

    #[test]
    fn test_order_message() {
        let basket = sample_basket();
        let message = order_message(basket.items(), basket.total_price(), "AED ");

        assert_eq!(
            message,
            "Hello! I'm interested in these flowers:\n\
             - Red Roses (Size: M, Qty: 2, Price: AED 20.00), https://shop.example/flower/f1\n\
             - Tulips (Size: S, Qty: 3, Price: AED 15.00)\n\
             \n\
             Total: AED 35.00"
        );
    }

    #[test]
    fn test_empty_basket_message() {
        assert_eq!(order_message(&[], Money::zero(), "$"), EMPTY_BASKET_MESSAGE);
    }

    #[test]
    fn test_unknown_size_prints_code() {
        let items = [BasketItem::new(
            "f9",
            "Mystery",
            BouquetSize::from_code(7),
            Money::from_minor(150),
            1,
        )];
        let message = order_message(&items, Money::from_minor(150), "$");
        assert!(message.contains("- Mystery (Size: 7, Qty: 1, Price: $1.50)"));
    }

    #[test]
    fn test_whatsapp_link_encoding() {
        let link = whatsapp_link("+971 50-000 0000", "Hi! (2x) roses & tulips\nTotal: $5.00");
        assert_eq!(
            link,
            "https://wa.me/971500000000?text=Hi!%20(2x)%20roses%20%26%20tulips%0ATotal%3A%20%245.00"
        );
    }

    #[test]
    fn test_whatsapp_link_encodes_utf8() {
        let link = whatsapp_link("1", "Розы");
        assert_eq!(link, "https://wa.me/1?text=%D0%A0%D0%BE%D0%B7%D1%8B");
    }

    #[test]
    fn test_handoff_link_carries_message() {
        let basket = sample_basket();
        let handoff = CheckoutHandoff::new("+971500000000", "AED ");
        let link = handoff.link(basket.items(), basket.total_price());

        assert!(link.starts_with("https://wa.me/971500000000?text=Hello!%20I'm%20interested"));
        assert!(link.ends_with("Total%3A%20AED%2035.00"));
    }
}
