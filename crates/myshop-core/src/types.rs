//! # Domain Types
//!
//! Core domain types used throughout the shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Good       │   │    CartLine     │   │     Badge       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (GoodId)    │◄──│  id (GoodId)    │   │  BEST           │       │
//! │  │  name           │   │  qty (≥ 1)      │   │  NEW            │       │
//! │  │  price / sale   │   └─────────────────┘   │  HOT            │       │
//! │  │  image, rating  │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Field names are camelCase (`salePrice`) so a catalog written for the
//! browser front-end deserializes unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Won;

// =============================================================================
// Good Id
// =============================================================================

/// Stable identifier of a catalog entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct GoodId(u32);

impl GoodId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        GoodId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for GoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GoodId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(GoodId)
    }
}

// =============================================================================
// Badge
// =============================================================================

/// Merchandising badge shown on a catalog card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Badge {
    Best,
    New,
    Hot,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Best => write!(f, "BEST"),
            Badge::New => write!(f, "NEW"),
            Badge::Hot => write!(f, "HOT"),
        }
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Customer rating on a 0 to 5 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating(f64);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: f64 = 0.0;
    /// Highest allowed rating.
    pub const MAX: f64 = 5.0;

    pub const fn new(value: f64) -> Self {
        Rating(value)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Number of filled stars: the rating rounded and clamped to 0..=5.
    pub fn filled_stars(&self) -> usize {
        if self.0.is_nan() {
            return 0;
        }
        self.0.round().clamp(Self::MIN, Self::MAX) as usize
    }

    /// Five-character star string, e.g. `★★★★☆` for 4.2.
    pub fn stars(&self) -> String {
        let filled = self.filled_stars();
        let mut out = "★".repeat(filled);
        out.push_str(&"☆".repeat(5 - filled));
        out
    }
}

// =============================================================================
// Good
// =============================================================================

/// A catalog entry available for purchase.
///
/// The catalog is seed data; the store reads goods but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    /// Unique, stable identifier.
    pub id: GoodId,

    /// Display name.
    pub name: String,

    /// List price in whole won.
    pub price: Won,

    /// Discounted price. Only used when it is below `price`.
    #[serde(default)]
    pub sale_price: Option<Won>,

    /// Image reference (URL or asset path). Views fall back to initials.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub badge: Option<Badge>,

    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Good {
    /// Creates a plain good with only the required fields.
    pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
        Good {
            id: GoodId::new(id),
            name: name.into(),
            price: Won::new(price),
            sale_price: None,
            image: None,
            badge: None,
            rating: None,
        }
    }

    pub fn with_sale_price(mut self, sale_price: i64) -> Self {
        self.sale_price = Some(Won::new(sale_price));
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(Rating::new(rating));
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// True when a sale price is set and lower than the list price.
    pub fn is_on_sale(&self) -> bool {
        matches!(self.sale_price, Some(sale) if sale < self.price)
    }

    /// The price a customer pays for one unit.
    ///
    /// ## Rule
    /// `sale_price` if present and lower than `price`, otherwise `price`.
    /// The same rule drives cart display and `buy_all`, so the shown total
    /// is always the charged total.
    pub fn unit_price(&self) -> Won {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }

    /// Discount percentage for display: `round((price - sale) / price * 100)`.
    ///
    /// ## Example
    /// ```rust
    /// use myshop_core::Good;
    ///
    /// let good = Good::new(1, "사과", 1_000).with_sale_price(800);
    /// assert_eq!(good.discount_percent(), 20);
    /// ```
    pub fn discount_percent(&self) -> u32 {
        match self.sale_price {
            Some(sale) if sale < self.price && self.price.amount() > 0 => {
                let price = self.price.amount() as f64;
                let off = (price - sale.amount() as f64) / price * 100.0;
                off.round() as u32
            }
            _ => 0,
        }
    }

    /// Placeholder text for cards without an image: the first two
    /// characters of the name, or `GD` when the name is blank.
    pub fn initials(&self) -> String {
        let initials: String = self.name.trim().chars().take(2).collect();
        if initials.is_empty() {
            "GD".to_string()
        } else {
            initials
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A cart entry: which good, and how many.
///
/// ## Invariants (enforced by the store)
/// - At most one line per `id`
/// - `qty >= 1`; a line that would reach zero is removed instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: GoodId,
    pub qty: u32,
}

impl CartLine {
    /// A fresh line holding one unit.
    pub const fn single(id: GoodId) -> Self {
        CartLine { id, qty: 1 }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_prefers_lower_sale_price() {
        let plain = Good::new(1, "사과", 1_000);
        assert_eq!(plain.unit_price(), Won::new(1_000));
        assert!(!plain.is_on_sale());

        let on_sale = Good::new(2, "딸기", 30_000).with_sale_price(24_000);
        assert_eq!(on_sale.unit_price(), Won::new(24_000));
        assert!(on_sale.is_on_sale());

        // A "sale" price above the list price is ignored
        let odd = Good::new(3, "바나나", 500).with_sale_price(700);
        assert_eq!(odd.unit_price(), Won::new(500));
        assert_eq!(odd.discount_percent(), 0);
    }

    #[test]
    fn test_discount_percent_rounds() {
        let good = Good::new(1, "사과", 1_000).with_sale_price(800);
        assert_eq!(good.discount_percent(), 20);

        // (3000 - 1999) / 3000 = 33.36% → 33
        let good = Good::new(2, "초코렛", 3_000).with_sale_price(1_999);
        assert_eq!(good.discount_percent(), 33);

        // (8000 - 5000) / 8000 = 37.5% → 38
        let good = Good::new(3, "초코렛", 8_000).with_sale_price(5_000);
        assert_eq!(good.discount_percent(), 38);
    }

    #[test]
    fn test_stars() {
        assert_eq!(Rating::new(4.2).stars(), "★★★★☆");
        assert_eq!(Rating::new(4.5).stars(), "★★★★★");
        assert_eq!(Rating::new(0.0).stars(), "☆☆☆☆☆");
        assert_eq!(Rating::new(9.0).stars(), "★★★★★");
        assert_eq!(Rating::new(-1.0).stars(), "☆☆☆☆☆");
    }

    #[test]
    fn test_initials() {
        assert_eq!(Good::new(1, "못산다니까요", 1).initials(), "못산");
        assert_eq!(Good::new(2, "  ", 1).initials(), "GD");
    }

    #[test]
    fn test_good_json_shape() {
        let json = r#"{"id": 1, "name": "사과", "price": 1000, "salePrice": 800, "badge": "HOT", "rating": 4.5}"#;
        let good: Good = serde_json::from_str(json).unwrap();

        assert_eq!(good.id, GoodId::new(1));
        assert_eq!(good.sale_price, Some(Won::new(800)));
        assert_eq!(good.badge, Some(Badge::Hot));
        assert_eq!(good.rating, Some(Rating::new(4.5)));
        assert_eq!(good.image, None);
    }

    #[test]
    fn test_good_id_parse() {
        assert_eq!(" 9 ".parse::<GoodId>().unwrap(), GoodId::new(9));
        assert!("abc".parse::<GoodId>().is_err());
        assert!("-1".parse::<GoodId>().is_err());
    }
}
