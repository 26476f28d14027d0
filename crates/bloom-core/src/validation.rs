//! # Validation Module
//!
//! Input checks front-ends run before handing user input to the basket.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (CLI args / web form)                              │
//! │  └── Type parsing (numbers, size names)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules: non-empty IDs, quantity range, known sizes        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: BasketStore                                                  │
//! │  └── Trusts its input; enforces only key uniqueness and quantity >= 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bloom_core::validation::{validate_flower_id, validate_quantity};
//!
//! assert!(validate_flower_id("f-100").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::basket::BasketItem;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::BouquetSize;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest flower ID the catalog issues.
const MAX_FLOWER_ID_LEN: usize = 64;

/// Validates a catalog flower ID.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
pub fn validate_flower_id(flower_id: &str) -> ValidationResult<()> {
    let flower_id = flower_id.trim();

    if flower_id.is_empty() {
        return Err(ValidationError::Required {
            field: "flower id".to_string(),
        });
    }

    if flower_id.len() > MAX_FLOWER_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "flower id".to_string(),
            max: MAX_FLOWER_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity typed by the user.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Note that `BasketStore::update_quantity` deliberately accepts 0 to mean
/// "remove"; this check is for add/set inputs.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (complimentary items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates that a size is one the catalog sells.
pub fn validate_size(size: BouquetSize) -> ValidationResult<()> {
    if !size.is_known() {
        return Err(ValidationError::InvalidFormat {
            field: "size".to_string(),
            reason: format!("unknown bouquet size code {}", size.code()),
        });
    }

    Ok(())
}

/// Validates a whole line before it is added.
pub fn validate_basket_item(item: &BasketItem) -> ValidationResult<()> {
    validate_flower_id(&item.flower_id)?;
    validate_size(item.size)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;

    if item.flower_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "flower name".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_flower_id() {
        assert!(validate_flower_id("f1").is_ok());
        assert!(validate_flower_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());

        assert!(validate_flower_id("").is_err());
        assert!(validate_flower_id("   ").is_err());
        assert!(validate_flower_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_and_size() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(-1)).is_err());

        assert!(validate_size(BouquetSize::WOW).is_ok());
        assert_eq!(
            validate_size(BouquetSize::from_code(0)).unwrap_err().to_string(),
            "size has invalid format: unknown bouquet size code 0"
        );
    }

    #[test]
    fn test_validate_basket_item() {
        let good = BasketItem::new("f1", "Roses", BouquetSize::M, Money::from_major(10), 1);
        assert!(validate_basket_item(&good).is_ok());

        let unnamed = BasketItem::new("f1", " ", BouquetSize::M, Money::from_major(10), 1);
        assert!(matches!(
            validate_basket_item(&unnamed),
            Err(ValidationError::Required { .. })
        ));

        let zero = BasketItem::new("f1", "Roses", BouquetSize::M, Money::from_major(10), 0);
        assert!(matches!(
            validate_basket_item(&zero),
            Err(ValidationError::MustBePositive { .. })
        ));
    }
}
