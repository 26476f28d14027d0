//! # Money Module
//!
//! Provides the `Money` type for basket prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A basket of three 0.10 add-ons would total 0.30000000000000004        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (fils/cents)                         │
//! │    10 + 10 + 10 = 30 minor units → "0.30"                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The catalog backend and the stored basket snapshot carry prices as plain
//! JSON numbers in major units (`"price": 10.5`). `Money` converts at the
//! serde boundary and keeps integer minor units everywhere else.
//!
//! ## Usage
//! ```rust
//! use bloom_core::money::Money;
//!
//! let price = Money::from_minor(1050); // 10.50
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.to_string(), "31.50");
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Minor units per major unit (100 fils = 1 dirham).
const MINOR_PER_MAJOR: i64 = 100;

/// Largest magnitude accepted from a decimal price (well inside f64's exact
/// integer range).
const MAX_DECIMAL_MAGNITUDE: f64 = 9.0e13;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Where Money is Used
/// ```text
/// FlowerOption.price ──► BasketItem.price ──► BasketItem::line_total()
///                                                     │
///                                                     ▼
///                                      BasketStore::total_price()
///                                                     │
///                                                     ▼
///                                 Checkout message "Total: AED 35.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use bloom_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Creates a Money value from major and minor parts.
    ///
    /// For negative amounts only the major part carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major.saturating_mul(MINOR_PER_MAJOR).saturating_sub(minor))
        } else {
            Money(major.saturating_mul(MINOR_PER_MAJOR).saturating_add(minor))
        }
    }

    /// Converts a decimal major-unit amount (as served by the catalog API).
    ///
    /// Rounds half away from zero to the nearest minor unit. Returns `None`
    /// for NaN, infinities and absurdly large values.
    ///
    /// ```rust
    /// use bloom_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.5), Some(Money::from_minor(1050)));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_minor(30)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_DECIMAL_MAGNITUDE {
            return None;
        }
        Some(Money((value * MINOR_PER_MAJOR as f64).round() as i64))
    }

    /// Returns the amount as a decimal number of major units.
    ///
    /// Only for the wire format; never do arithmetic on the result.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates at `i64::MIN`/`i64::MAX` minor units instead of
    /// overflowing.
    ///
    /// ```rust
    /// use bloom_core::money::Money;
    ///
    /// let unit = Money::from_minor(299);
    /// assert_eq!(unit.multiply_quantity(3).minor(), 897);
    /// assert_eq!(unit.multiply_quantity(i64::MAX).minor(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates. Snapshots are untrusted input and a huge stored
// quantity must not panic the basket.

/// Renders as `major.minor` with two digits and no currency symbol.
///
/// The symbol is a display concern (see the CLI's `ConfigState`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| D::Error::custom(format!("invalid price: {value}")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
