//! # Pricing Module
//!
//! Derived values the views render: line totals, subtotal, shipping and the
//! grand total. Nothing here is stored; everything is recomputed from the
//! goods catalog and the cart.
//!
//! ## Cart Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit price  = salePrice if present and < price, else price            │
//! │  line total  = unit price × qty                                        │
//! │  subtotal    = Σ line totals                                           │
//! │  shipping    = 0         if subtotal == 0 or subtotal ≥ threshold      │
//! │                flat fee  otherwise                                     │
//! │  grand total = subtotal + shipping                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Won;
use crate::types::{CartLine, Good, GoodId};
use crate::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD};

/// Name shown for a cart line whose good is no longer in the catalog.
pub const UNKNOWN_GOOD_NAME: &str = "상품";

// =============================================================================
// Shipping Policy
// =============================================================================

/// Free-shipping threshold and flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: Won,

    /// Fee charged for a non-empty cart under the threshold.
    pub flat_fee: Won,
}

impl Default for ShippingPolicy {
    /// 50,000원 threshold, 3,000원 fee (reference data).
    fn default() -> Self {
        ShippingPolicy {
            free_threshold: FREE_SHIPPING_THRESHOLD,
            flat_fee: FLAT_SHIPPING_FEE,
        }
    }
}

impl ShippingPolicy {
    /// Shipping fee for a given subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use myshop_core::{ShippingPolicy, Won};
    ///
    /// let policy = ShippingPolicy::default();
    /// assert_eq!(policy.fee_for(Won::new(49_999)), Won::new(3_000));
    /// assert_eq!(policy.fee_for(Won::new(50_000)), Won::zero());
    /// assert_eq!(policy.fee_for(Won::zero()), Won::zero());
    /// ```
    pub fn fee_for(&self, subtotal: Won) -> Won {
        if subtotal.is_zero() || subtotal >= self.free_threshold {
            Won::zero()
        } else {
            self.flat_fee
        }
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Unit price for a cart line, resolving the good by id.
///
/// A line whose good is missing from the catalog prices at zero.
pub fn unit_price_of(goods: &[Good], id: GoodId) -> Won {
    goods
        .iter()
        .find(|g| g.id == id)
        .map(Good::unit_price)
        .unwrap_or_default()
}

/// Merchandise total of a cart: Σ unit price × qty.
///
/// Saturates at `i64::MAX`; see [`checked_cart_subtotal`] for the amount
/// `buy_all` debits.
pub fn cart_subtotal(goods: &[Good], cart: &[CartLine]) -> Won {
    cart.iter()
        .map(|line| unit_price_of(goods, line.id).multiply_quantity(line.qty))
        .sum()
}

/// Exact merchandise total, `None` when it does not fit in a `Won`.
pub fn checked_cart_subtotal(goods: &[Good], cart: &[CartLine]) -> Option<Won> {
    cart.iter().try_fold(Won::zero(), |acc, line| {
        let line_total = unit_price_of(goods, line.id).checked_multiply_quantity(line.qty)?;
        acc.checked_add(line_total)
    })
}

// =============================================================================
// Cart Summary (view DTO)
// =============================================================================

/// A cart line joined with its catalog entry, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: GoodId,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: Won,
    pub qty: u32,
    pub line_total: Won,
}

/// Everything the cart panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLineView>,
    pub total_qty: u32,
    pub subtotal: Won,
    pub shipping: Won,
    pub total: Won,
}

impl CartSummary {
    /// Builds the summary from the catalog and cart.
    pub fn compute(goods: &[Good], cart: &[CartLine], policy: &ShippingPolicy) -> Self {
        let lines: Vec<CartLineView> = cart
            .iter()
            .map(|line| {
                let good = goods.iter().find(|g| g.id == line.id);
                let unit_price = good.map(Good::unit_price).unwrap_or_default();

                CartLineView {
                    id: line.id,
                    name: good
                        .map(|g| g.name.clone())
                        .unwrap_or_else(|| UNKNOWN_GOOD_NAME.to_string()),
                    image: good.and_then(|g| g.image.clone()),
                    unit_price,
                    qty: line.qty,
                    line_total: unit_price.multiply_quantity(line.qty),
                }
            })
            .collect();

        let subtotal: Won = lines.iter().map(|l| l.line_total).sum();
        let shipping = policy.fee_for(subtotal);
        let total_qty = lines.iter().map(|l| l.qty).fold(0u32, u32::saturating_add);

        CartSummary {
            lines,
            total_qty,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
