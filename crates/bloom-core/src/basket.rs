//! # Basket
//!
//! Line items and the rules that mutate them. `Basket` is a plain value with
//! no persistence or observers; [`crate::store::BasketStore`] wraps it.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A line is identified by (flower_id, size)                              │
//! │                                                                         │
//! │  add Red Roses / M  x1   ──►  [ Red Roses M x1 ]                        │
//! │  add Red Roses / M  x2   ──►  [ Red Roses M x3 ]          (merged)      │
//! │  add Red Roses / XL x1   ──►  [ Red Roses M x3, Red Roses XL x1 ]       │
//! │  set Red Roses / M  = 0  ──►  [ Red Roses XL x1 ]         (removed)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! Name, image, link and unit price are captured when a line is first added.
//! Re-adding the same key only adds quantity; a catalog price change between
//! two adds does not touch the existing line.

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{BouquetSize, Flower, FlowerOption};

// =============================================================================
// Basket Item
// =============================================================================

/// One basket line.
///
/// Serialized field names match the storefront snapshot format:
/// `flowerId, flowerName, size, price, imageLink, href, quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketItem {
    /// Catalog flower ID.
    pub flower_id: String,

    /// Flower name at time of adding (frozen).
    pub flower_name: String,

    pub size: BouquetSize,

    /// Unit price at time of adding (frozen).
    ///
    /// Carried in JSON as a decimal major-unit number and rounded half away
    /// from zero to two decimal places (whole minor units) when read, so a
    /// stored `19.999` loads as `20.00`.
    #[ts(type = "number")]
    pub price: Money,

    /// First image of the chosen option (frozen).
    #[serde(default)]
    pub image_link: String,

    /// Product page link, echoed into the checkout message.
    #[serde(default)]
    pub href: String,

    #[ts(type = "number")]
    pub quantity: i64,
}

impl BasketItem {
    /// Creates a line without image or link.
    pub fn new(
        flower_id: impl Into<String>,
        flower_name: impl Into<String>,
        size: BouquetSize,
        price: Money,
        quantity: i64,
    ) -> Self {
        BasketItem {
            flower_id: flower_id.into(),
            flower_name: flower_name.into(),
            size,
            price,
            image_link: String::new(),
            href: String::new(),
            quantity,
        }
    }

    /// Sets the image link.
    pub fn with_image(mut self, image_link: impl Into<String>) -> Self {
        self.image_link = image_link.into();
        self
    }

    /// Sets the product page link.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }

    /// Builds a single-quantity line from a catalog flower and the chosen
    /// option, as the product page's "Add to Basket" button does.
    ///
    /// The option's first image becomes the line image.
    pub fn from_flower_option(
        flower: &Flower,
        option: &FlowerOption,
        href: impl Into<String>,
    ) -> Self {
        BasketItem {
            flower_id: flower.id.clone(),
            flower_name: flower.name.clone(),
            size: option.size,
            price: option.price,
            image_link: option.image_links.first().cloned().unwrap_or_default(),
            href: href.into(),
            quantity: 1,
        }
    }

    /// Returns the line's natural key.
    pub fn key(&self) -> BasketKey {
        BasketKey {
            flower_id: self.flower_id.clone(),
            size: self.size,
        }
    }

    /// Checks whether this line has the given key.
    #[inline]
    pub fn matches(&self, flower_id: &str, size: BouquetSize) -> bool {
        self.flower_id == flower_id && self.size == size
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// Natural key of a basket line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasketKey {
    pub flower_id: String,
    pub size: BouquetSize,
}

// =============================================================================
// Basket
// =============================================================================

/// Ordered basket lines.
///
/// ## Invariants
/// - No two lines share a `(flower_id, size)` key
/// - Every present line has `quantity >= 1`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    /// Creates an empty basket.
    pub fn new() -> Self {
        Basket { items: Vec::new() }
    }

    /// Builds a basket from untrusted lines (e.g. a stored snapshot).
    ///
    /// Lines with `quantity < 1` are dropped; repeated keys are merged into
    /// the first occurrence, so the invariants hold from the start.
    pub fn from_items(items: impl IntoIterator<Item = BasketItem>) -> Self {
        let mut basket = Basket::new();
        for item in items {
            basket.add_item(item);
        }
        basket
    }

    /// Adds a line or increases the quantity of the existing one.
    ///
    /// ## Behavior
    /// - `item.quantity < 1`: ignored with a warning, returns `false`
    /// - Key already present: quantity += `item.quantity` (saturating), every
    ///   other field of the existing line is left alone
    /// - Key not present: appended at the end
    pub fn add_item(&mut self, item: BasketItem) -> bool {
        if item.quantity < 1 {
            warn!(
                flower_id = %item.flower_id,
                size = %item.size,
                quantity = item.quantity,
                "Ignoring basket line with non-positive quantity"
            );
            return false;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&item.flower_id, item.size))
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return true;
        }

        self.items.push(item);
        true
    }

    /// Removes the line with the given key.
    ///
    /// Returns `false` (and changes nothing) when no such line exists.
    pub fn remove_item(&mut self, flower_id: &str, size: BouquetSize) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| !i.matches(flower_id, size));
        self.items.len() != initial_len
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Basket::remove_item`]
    /// - otherwise: absolute set (not additive)
    /// - key not present: no-op, returns `false`
    pub fn update_quantity(&mut self, flower_id: &str, size: BouquetSize, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(flower_id, size);
        }

        match self.items.iter_mut().find(|i| i.matches(flower_id, size)) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    /// Looks up a line by key.
    pub fn get(&self, flower_id: &str, size: BouquetSize) -> Option<&BasketItem> {
        self.items.iter().find(|i| i.matches(flower_id, size))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines (the badge count). Saturates at
    /// `i64::MAX`.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of unit price × quantity across all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(BasketItem::line_total).sum()
    }

    /// Encodes the lines as the JSON snapshot array.
    pub fn to_snapshot(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Decodes a JSON snapshot array, normalizing it like
    /// [`Basket::from_items`].
    pub fn from_snapshot(snapshot: &str) -> CoreResult<Self> {
        let items: Vec<BasketItem> = serde_json::from_str(snapshot)?;
        Ok(Basket::from_items(items))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate figures for a basket, for API/CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketTotals {
    #[ts(type = "number")]
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_items: i64,
    #[ts(type = "number")]
    pub total_price: Money,
}

impl From<&Basket> for BasketTotals {
    fn from(basket: &Basket) -> Self {
        BasketTotals {
            line_count: basket.line_count(),
            total_items: basket.total_items(),
            total_price: basket.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BouquetType;
    use std::collections::HashSet;

    fn item(flower_id: &str, size: BouquetSize, price_major: i64, quantity: i64) -> BasketItem {
        BasketItem::new(
            flower_id,
            format!("Flower {}", flower_id),
            size,
            Money::from_major(price_major),
            quantity,
        )
    }

    #[test]
    fn test_additive_merge() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 3));
        basket.add_item(item("f1", BouquetSize::M, 10, 2));

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.items()[0].quantity, 5);
    }

    #[test]
    fn test_merge_keeps_original_price_and_name() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 1));

        let mut repriced = item("f1", BouquetSize::M, 99, 1);
        repriced.flower_name = "Renamed".to_string();
        basket.add_item(repriced);

        let line = basket.get("f1", BouquetSize::M).unwrap();
        assert_eq!(line.price, Money::from_major(10));
        assert_eq!(line.flower_name, "Flower f1");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_distinct_sizes_are_distinct_lines() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::S, 10, 1));
        basket.add_item(item("f1", BouquetSize::M, 12, 1));

        assert_eq!(basket.line_count(), 2);
    }

    #[test]
    fn test_keys_stay_unique_and_order_is_kept() {
        let mut basket = Basket::new();
        let adds = [
            ("a", BouquetSize::S),
            ("b", BouquetSize::S),
            ("a", BouquetSize::S),
            ("a", BouquetSize::L),
            ("b", BouquetSize::S),
            ("c", BouquetSize::WOW),
        ];
        for (id, size) in adds {
            basket.add_item(item(id, size, 1, 1));
        }

        let keys: Vec<BasketKey> = basket.items().iter().map(BasketItem::key).collect();
        let unique: HashSet<&BasketKey> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());

        let order: Vec<(&str, BouquetSize)> = basket
            .items()
            .iter()
            .map(|i| (i.flower_id.as_str(), i.size))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a", BouquetSize::S),
                ("b", BouquetSize::S),
                ("a", BouquetSize::L),
                ("c", BouquetSize::WOW),
            ]
        );
        assert_eq!(basket.total_items(), 6);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 3));

        assert!(basket.update_quantity("f1", BouquetSize::M, 7));
        assert_eq!(basket.items()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_to_zero_or_below_removes() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 3));
        basket.add_item(item("f2", BouquetSize::M, 10, 1));

        assert!(basket.update_quantity("f1", BouquetSize::M, 0));
        assert!(basket.get("f1", BouquetSize::M).is_none());
        assert_eq!(basket.total_items(), 1);

        assert!(basket.update_quantity("f2", BouquetSize::M, -4));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_missing_key_is_a_no_op() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 3));
        let before = basket.clone();

        assert!(!basket.remove_item("unknown", BouquetSize::from_code(99)));
        assert!(!basket.update_quantity("unknown", BouquetSize::M, 4));
        assert!(!basket.update_quantity("f1", BouquetSize::XL, 4));
        assert_eq!(basket, before);
    }

    #[test]
    fn test_totals() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 2));
        basket.add_item(item("f2", BouquetSize::S, 5, 3));

        assert_eq!(basket.total_items(), 5);
        assert_eq!(basket.total_price(), Money::from_major(35));

        let totals = BasketTotals::from(&basket);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_items, 5);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let basket = Basket::new();
        assert_eq!(basket.total_items(), 0);
        assert!(basket.total_price().is_zero());
    }

    #[test]
    fn test_clear() {
        let mut basket = Basket::new();
        basket.add_item(item("f1", BouquetSize::M, 10, 2));
        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.total_items(), 0);
        assert!(basket.total_price().is_zero());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut basket = Basket::new();
        basket.add_item(
            item("f1", BouquetSize::M, 10, 2)
                .with_image("https://cdn.example/f1.jpg")
                .with_href("https://shop.example/flower/f1"),
        );
        basket.add_item(BasketItem::new(
            "f2",
            "Tulips",
            BouquetSize::XL,
            Money::from_minor(1999),
            1,
        ));

        let snapshot = basket.to_snapshot().unwrap();
        let restored = Basket::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored, basket);
    }

    #[test]
    fn test_snapshot_field_names() {
        let basket = Basket::from_items([item("f1", BouquetSize::L, 10, 1)]);
        let snapshot = basket.to_snapshot().unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        let line = &value[0];

        assert_eq!(line["flowerId"], "f1");
        assert_eq!(line["flowerName"], "Flower f1");
        assert_eq!(line["size"], 3);
        assert_eq!(line["price"], 10.0);
        assert_eq!(line["imageLink"], "");
        assert_eq!(line["href"], "");
        assert_eq!(line["quantity"], 1);
    }

    #[test]
    fn test_snapshot_without_href_still_loads() {
        let snapshot = r#"[{"flowerId":"f1","flowerName":"Roses","size":2,
            "price":12.5,"imageLink":"x.jpg","quantity":2}]"#;
        let basket = Basket::from_snapshot(snapshot).unwrap();

        assert_eq!(basket.items()[0].href, "");
        assert_eq!(basket.total_price(), Money::from_major(25));
    }

    #[test]
    fn test_snapshot_price_rounds_to_minor_units() {
        let snapshot = r#"[{"flowerId":"f1","flowerName":"Roses","size":2,
            "price":19.999,"quantity":1},{"flowerId":"f2","flowerName":"Lilies",
            "size":1,"price":0.125,"quantity":1}]"#;
        let basket = Basket::from_snapshot(snapshot).unwrap();

        assert_eq!(basket.items()[0].price, Money::from_minor(2000));
        assert_eq!(basket.items()[1].price, Money::from_minor(13));
        assert_eq!(basket.to_snapshot().unwrap().matches("\"price\":20.0").count(), 1);
    }

    #[test]
    fn test_from_items_normalizes() {
        let basket = Basket::from_items([
            item("f1", BouquetSize::M, 10, 2),
            item("f2", BouquetSize::M, 10, 0),
            item("f1", BouquetSize::M, 10, 3),
            item("f3", BouquetSize::S, 10, -1),
        ]);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.items()[0].quantity, 5);
    }

    #[test]
    fn test_non_positive_add_is_ignored() {
        let mut basket = Basket::new();
        assert!(!basket.add_item(item("f1", BouquetSize::M, 10, 0)));
        assert!(basket.add_item(item("f2", BouquetSize::M, 10, 2)));
        assert!(!basket.add_item(item("f2", BouquetSize::M, 10, -5)));

        assert_eq!(basket.line_count(), 1);
        assert!(basket.get("f1", BouquetSize::M).is_none());
        assert_eq!(basket.get("f2", BouquetSize::M).unwrap().quantity, 2);
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let basket = Basket::from_items([
            item("f1", BouquetSize::M, 10, i64::MAX),
            item("f2", BouquetSize::S, 5, 1),
            item("f1", BouquetSize::M, 10, 3),
        ]);

        assert_eq!(basket.items()[0].quantity, i64::MAX);
        assert_eq!(basket.total_items(), i64::MAX);
        assert_eq!(basket.total_price(), Money::from_minor(i64::MAX));
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        assert!(Basket::from_snapshot("not json").is_err());
        assert!(Basket::from_snapshot(r#"{"flowerId":"f1"}"#).is_err());
        assert!(Basket::from_snapshot(r#"[{"flowerId":"f1"}]"#).is_err());
    }

    #[test]
    fn test_from_flower_option() {
        let option = FlowerOption {
            id: "o-2".to_string(),
            size: BouquetSize::L,
            price: Money::from_major(300),
            image_links: vec!["first.jpg".to_string(), "second.jpg".to_string()],
            index: None,
        };
        let flower = Flower {
            id: "f-7".to_string(),
            name: "White Hydrangea".to_string(),
            description: String::new(),
            bouquet_type: BouquetType::Basket,
            flower_group_id: "g".to_string(),
            colors: vec![],
            kinds: vec![],
            options: vec![option.clone()],
        };

        let line =
            BasketItem::from_flower_option(&flower, &option, "https://shop.example/flower/f-7");
        assert_eq!(line.flower_id, "f-7");
        assert_eq!(line.size, BouquetSize::L);
        assert_eq!(line.price, Money::from_major(300));
        assert_eq!(line.image_link, "first.jpg");
        assert_eq!(line.quantity, 1);

        let bare = FlowerOption {
            image_links: vec![],
            ..option
        };
        assert_eq!(BasketItem::from_flower_option(&flower, &bare, "").image_link, "");
    }
}
