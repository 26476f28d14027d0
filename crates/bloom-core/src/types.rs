//! # Catalog Types
//!
//! Value types shared by the catalog, the basket and the storefront UI.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │     Flower      │ 1    * │  FlowerOption   │                        │
//! │  │  ─────────────  │───────►│  ─────────────  │                        │
//! │  │  id             │        │  id             │                        │
//! │  │  name           │        │  size ──────────┼──► BouquetSize         │
//! │  │  bouquet_type   │        │  price (Money)  │    S M L XL WOW        │
//! │  │  colors, kinds  │        │  image_links    │                        │
//! │  └─────────────────┘        └─────────────────┘                        │
//! │                                     │                                   │
//! │                     BasketItem::from_flower_option()                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integer-coded enums travel as their numeric code on the wire, the way the
//! catalog backend serves them.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Bouquet Size
// =============================================================================

/// Bouquet size code.
///
/// Stored as the raw code so that a line can be addressed with any code the
/// front-end sends; the named sizes are the associated constants.
///
/// ```rust
/// use bloom_core::BouquetSize;
///
/// assert_eq!(BouquetSize::XL.code(), 4);
/// assert_eq!(BouquetSize::XL.to_string(), "XL");
/// assert_eq!(BouquetSize::from_code(42).to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BouquetSize(u8);

impl BouquetSize {
    pub const S: BouquetSize = BouquetSize(1);
    pub const M: BouquetSize = BouquetSize(2);
    pub const L: BouquetSize = BouquetSize(3);
    pub const XL: BouquetSize = BouquetSize(4);
    pub const WOW: BouquetSize = BouquetSize(5);

    /// Every size the catalog offers, smallest first.
    pub const ALL: [BouquetSize; 5] = [Self::S, Self::M, Self::L, Self::XL, Self::WOW];

    #[inline]
    pub const fn from_code(code: u8) -> Self {
        BouquetSize(code)
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        self.0
    }

    /// Display name, or `None` for codes the catalog does not define.
    pub const fn name(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("S"),
            2 => Some("M"),
            3 => Some("L"),
            4 => Some("XL"),
            5 => Some("WOW"),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        self.name().is_some()
    }

    /// Parses either a size name (`"xl"`, case-insensitive) or a numeric code.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(code) = input.parse::<u8>() {
            return Some(BouquetSize(code));
        }
        Self::ALL
            .into_iter()
            .find(|size| size.name().is_some_and(|n| n.eq_ignore_ascii_case(input)))
    }
}

impl fmt::Display for BouquetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

// =============================================================================
// Integer-Coded Catalog Enums
// =============================================================================

/// Unknown numeric code for an integer-coded catalog enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} code {}", self.kind, self.code)
    }
}

impl std::error::Error for UnknownCode {}

/// Declares an enum that is carried as a `u8` code with a display name.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($variant = $code,)+
        }

        impl $name {
            /// Display name shown in the storefront.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            #[inline]
            pub const fn code(&self) -> u8 {
                *self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownCode;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(UnknownCode { kind: $kind, code }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

coded_enum! {
    /// How the stems are arranged.
    BouquetType, "bouquet type" {
        MonoBouquet = 1 => "Mono Bouquet",
        DuoBouquet = 2 => "Duo Bouquet",
        Basket = 3 => "Basket",
        MixBouquet = 4 => "Mix Bouquet",
    }
}

coded_enum! {
    /// Flower species offered by the boutique.
    FlowerKind, "flower kind" {
        Rose = 1 => "Rose",
        Hydrangea = 2 => "Hydrangea",
        Peony = 3 => "Peony",
        Tanacetum = 4 => "Tanacetum",
        SprayRoses = 5 => "Spray Roses",
        FrenchRoses = 6 => "French Roses",
        Eustoma = 7 => "Eustoma",
        Delphinium = 8 => "Delphinium",
        Tulips = 9 => "Tulips",
        Ranunculus = 10 => "Ranunculus",
    }
}

coded_enum! {
    /// Dominant colours of an arrangement.
    FlowerColor, "flower color" {
        Blue = 1 => "Blue",
        Fuchsia = 2 => "Fuchsia",
        Green = 3 => "Green",
        Peach = 4 => "Peach",
        Pink = 5 => "Pink",
        Red = 6 => "Red",
        Violet = 7 => "Violet",
        White = 8 => "White",
        Yellow = 9 => "Yellow",
    }
}

// =============================================================================
// Language
// =============================================================================

/// Storefront UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Russian, Language::Arabic];

    /// Two-letter code used in URLs and storage.
    pub const fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Arabic => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code.trim())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Flower (catalog product)
// =============================================================================

/// A purchasable size/price variant of a flower arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerOption {
    pub id: String,
    pub size: BouquetSize,
    /// Unit price for this size.
    pub price: Money,
    #[serde(default)]
    pub image_links: Vec<String>,
    /// Display position among the flower's options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// A flower arrangement as served by the catalog.
///
/// The backend spells the bouquet type field `bouqetType`; the rename keeps
/// that payload readable as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flower {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "bouqetType")]
    pub bouquet_type: BouquetType,
    #[serde(default)]
    pub flower_group_id: String,
    #[serde(default, rename = "flowerColors")]
    pub colors: Vec<FlowerColor>,
    #[serde(default, rename = "flowerKinds")]
    pub kinds: Vec<FlowerKind>,
    #[serde(default, rename = "flowerOptions")]
    pub options: Vec<FlowerOption>,
}

impl Flower {
    /// Finds the option offered in `size`.
    pub fn option_for(&self, size: BouquetSize) -> Option<&FlowerOption> {
        self.options.iter().find(|opt| opt.size == size)
    }

    /// The option the product page preselects (the first one listed).
    pub fn default_option(&self) -> Option<&FlowerOption> {
        self.options.first()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bouquet_size_names() {
        let names: Vec<String> = BouquetSize::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["S", "M", "L", "XL", "WOW"]);
        assert!(!BouquetSize::from_code(99).is_known());
        assert_eq!(BouquetSize::from_code(99).to_string(), "99");
    }

    #[test]
    fn test_bouquet_size_parse() {
        assert_eq!(BouquetSize::parse("wow"), Some(BouquetSize::WOW));
        assert_eq!(BouquetSize::parse(" 2 "), Some(BouquetSize::M));
        assert_eq!(BouquetSize::parse("huge"), None);
    }

    #[test]
    fn test_coded_enum_wire_format() {
        assert_eq!(serde_json::to_string(&FlowerKind::SprayRoses).unwrap(), "5");
        let color: FlowerColor = serde_json::from_str("6").unwrap();
        assert_eq!(color, FlowerColor::Red);
        assert!(serde_json::from_str::<BouquetType>("9").is_err());
        assert_eq!(BouquetType::MixBouquet.name(), "Mix Bouquet");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::from_code("ar"), Some(Language::Arabic));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(serde_json::to_string(&Language::Russian).unwrap(), "\"ru\"");
    }

    #[test]
    fn test_flower_from_catalog_payload() {
        let json = r#"{
            "id": "f-100",
            "name": "Pink Peonies",
            "description": "Soft and airy",
            "bouqetType": 1,
            "flowerGroupId": "g-1",
            "flowerColors": [5, 8],
            "flowerKinds": [3],
            "flowerOptions": [
                {"id": "o-1", "size": 1, "price": 250, "imageLinks": ["a.jpg", "b.jpg"]},
                {"id": "o-2", "size": 3, "price": 420.5, "imageLinks": []}
            ]
        }"#;

        let flower: Flower = serde_json::from_str(json).unwrap();
        assert_eq!(flower.bouquet_type, BouquetType::MonoBouquet);
        assert_eq!(flower.colors, vec![FlowerColor::Pink, FlowerColor::White]);
        assert_eq!(flower.default_option().unwrap().id, "o-1");
        assert_eq!(
            flower.option_for(BouquetSize::L).unwrap().price,
            Money::from_minor(42050)
        );
        assert!(flower.option_for(BouquetSize::WOW).is_none());
    }
}
