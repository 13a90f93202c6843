//! # Shop Commands
//!
//! Catalog, cart and wallet commands.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│  Bought  │                        │
//! │  │  Cart    │     │          │     │ (wallet  │                        │
//! │  └──────────┘     └──────────┘     │  debited)│                        │
//! │       ▲                │           └────┬─────┘                        │
//! │       │           add_to_cart           │                              │
//! │       │           remove_one            │                              │
//! │       │           clear_line            │                              │
//! │       │                │                │                              │
//! │       └── reset_cart ──┘◄───────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use myshop_core::{CartLine, CartLineView, CartSummary, Good, GoodId, Outcome, ShopStore, Won};

use crate::error::ApiError;
use crate::state::{ConfigState, ShopHandle};

/// Catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsResponse {
    pub goods: Vec<Good>,
}

/// Cart contents plus everything the cart panel derives from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: Vec<CartLine>,
    pub summary: CartSummary,
    /// False when the command named an unknown good or cart line.
    pub applied: bool,
}

impl CartResponse {
    fn build(store: &ShopStore, config: &ConfigState, applied: bool) -> Self {
        CartResponse {
            cart: store.cart().to_vec(),
            summary: store.summary(&config.shipping),
            applied,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub balance: Won,
}

/// A completed purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    /// What was bought, priced at purchase time.
    pub lines: Vec<CartLineView>,
    /// Amount debited from the wallet.
    pub total: Won,
    /// Wallet balance afterwards.
    pub balance: Won,
}

/// Lists the catalog in display order.
pub fn get_goods(shop: &ShopHandle) -> GoodsResponse {
    debug!("get_goods command");
    shop.with_store(|s| GoodsResponse {
        goods: s.goods().to_vec(),
    })
}

/// Gets the cart with line totals, shipping and grand total.
pub fn get_cart(shop: &ShopHandle, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    shop.with_store(|s| CartResponse::build(s, config, true))
}

pub fn get_wallet(shop: &ShopHandle) -> WalletResponse {
    debug!("get_wallet command");
    WalletResponse {
        balance: shop.with_store(|s| s.balance()),
    }
}

/// Adds one unit of a good ("담기").
///
/// ## Behavior
/// - Good already in cart: quantity increases
/// - Good not in cart: appended with quantity 1
/// - Unknown good: nothing changes, `applied` is false
/// - Line already at the quantity cap: `CART_ERROR`
pub fn add_to_cart(
    shop: &ShopHandle,
    config: &ConfigState,
    id: GoodId,
) -> Result<CartResponse, ApiError> {
    debug!(good_id = %id, "add_to_cart command");
    shop.with_store_mut(|s| {
        let outcome = s.add_cart(id)?;
        Ok(CartResponse::build(s, config, outcome != Outcome::Ignored))
    })
}

/// Takes one unit off a line ("-1"); a line at quantity 1 is removed.
pub fn remove_one(
    shop: &ShopHandle,
    config: &ConfigState,
    id: GoodId,
) -> Result<CartResponse, ApiError> {
    debug!(good_id = %id, "remove_one command");
    shop.with_store_mut(|s| {
        let outcome = s.remove_cart_one(id)?;
        Ok(CartResponse::build(s, config, outcome != Outcome::Ignored))
    })
}

/// Removes a whole line ("취소").
pub fn clear_line(
    shop: &ShopHandle,
    config: &ConfigState,
    id: GoodId,
) -> Result<CartResponse, ApiError> {
    debug!(good_id = %id, "clear_line command");
    shop.with_store_mut(|s| {
        let outcome = s.clear_cart(id)?;
        Ok(CartResponse::build(s, config, outcome != Outcome::Ignored))
    })
}

/// Empties the cart ("전체 취소하기").
pub fn reset_cart(shop: &ShopHandle, config: &ConfigState) -> Result<CartResponse, ApiError> {
    debug!("reset_cart command");
    shop.with_store_mut(|s| {
        s.reset_cart()?;
        Ok(CartResponse::build(s, config, true))
    })
}

/// Buys everything in the cart ("전체 구매하기").
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  buy                                                                    │
/// │   │                                                                     │
/// │   ▼                                                                     │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Snapshot the priced lines (for the receipt)                │    │
/// │  │  2. store.buy_all()                                            │    │
/// │  │     - total ≤ balance: debit, empty cart                       │    │
/// │  │     - total > balance: INSUFFICIENT_BALANCE, nothing changes   │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The snapshot and the purchase happen under one lock.
pub fn buy_all(shop: &ShopHandle, config: &ConfigState) -> Result<PurchaseResponse, ApiError> {
    debug!("buy_all command");
    shop.with_store_mut(|s| {
        let summary = s.summary(&config.shipping);
        let receipt = s.buy_all()?;

        Ok(PurchaseResponse {
            lines: summary.lines,
            total: receipt.total,
            balance: receipt.balance_after,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use myshop_core::seed;

    fn setup() -> (ShopHandle, ConfigState) {
        (
            ShopHandle::new(seed::initial_state()),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_add_reports_summary() {
        let (shop, config) = setup();
        add_to_cart(&shop, &config, GoodId::new(1)).unwrap();
        let resp = add_to_cart(&shop, &config, GoodId::new(1)).unwrap();

        assert!(resp.applied);
        assert_eq!(resp.cart, vec![CartLine { id: GoodId::new(1), qty: 2 }]);
        assert_eq!(resp.summary.subtotal, Won::new(2_000));
        assert_eq!(resp.summary.shipping, Won::new(3_000));
        assert_eq!(resp.summary.total, Won::new(5_000));
    }

    #[test]
    fn test_unknown_good_is_not_applied() {
        let (shop, config) = setup();
        let resp = add_to_cart(&shop, &config, GoodId::new(99)).unwrap();

        assert!(!resp.applied);
        assert!(resp.cart.is_empty());
    }

    #[test]
    fn test_buy_all_debits_subtotal_only() {
        let (shop, config) = setup();
        add_to_cart(&shop, &config, GoodId::new(1)).unwrap();
        add_to_cart(&shop, &config, GoodId::new(1)).unwrap();

        let resp = buy_all(&shop, &config).unwrap();

        assert_eq!(resp.total, Won::new(2_000));
        assert_eq!(resp.balance, Won::new(98_000));
        assert_eq!(resp.lines.len(), 1);
        assert_eq!(resp.lines[0].name, "사과");
        assert_eq!(get_wallet(&shop).balance, Won::new(98_000));
        assert!(get_cart(&shop, &config).cart.is_empty());
    }

    #[test]
    fn test_buy_all_insufficient_balance() {
        let (shop, config) = setup();
        add_to_cart(&shop, &config, GoodId::new(9)).unwrap();

        let err = buy_all(&shop, &config).unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientBalance);
        assert_eq!(get_wallet(&shop).balance, Won::new(100_000));
        assert_eq!(
            get_cart(&shop, &config).cart,
            vec![CartLine { id: GoodId::new(9), qty: 1 }]
        );
    }

    #[test]
    fn test_remove_clear_reset() {
        let (shop, config) = setup();
        add_to_cart(&shop, &config, GoodId::new(1)).unwrap();
        add_to_cart(&shop, &config, GoodId::new(1)).unwrap();
        add_to_cart(&shop, &config, GoodId::new(3)).unwrap();

        let resp = remove_one(&shop, &config, GoodId::new(1)).unwrap();
        assert_eq!(resp.summary.total_qty, 2);

        let resp = clear_line(&shop, &config, GoodId::new(3)).unwrap();
        assert_eq!(resp.cart, vec![CartLine { id: GoodId::new(1), qty: 1 }]);

        let resp = clear_line(&shop, &config, GoodId::new(3)).unwrap();
        assert!(!resp.applied);

        let resp = reset_cart(&shop, &config).unwrap();
        assert!(resp.summary.is_empty());
    }
}
