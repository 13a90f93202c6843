//! # Shop Store
//!
//! Owns the shop state (wallet balance, goods catalog, cart) and is the only
//! place it changes.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shop State Operations                                │
//! │                                                                         │
//! │  View Action          ShopCommand            State Change               │
//! │  ───────────          ───────────            ────────────               │
//! │                                                                         │
//! │  "담기"  ────────────► AddCart(id) ─────────► qty+1 or push {id, 1}     │
//! │                                                                         │
//! │  "-1"    ────────────► RemoveCartOne(id) ───► qty-1, drop line at 0     │
//! │                                                                         │
//! │  "취소"  ────────────► ClearCart(id) ───────► drop line                 │
//! │                                                                         │
//! │  "전체 취소하기" ────► ResetCart ───────────► cart = []                 │
//! │                                                                         │
//! │  "전체 구매하기" ────► BuyAll ──────────────► balance -= total, cart=[] │
//! │                                              or InsufficientBalance    │
//! │                                                                         │
//! │  Every command goes through `reduce(&state, &command)`, which builds   │
//! │  a complete new state or fails. The store swaps it in on success only. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-line Lifecycle
//! ```text
//! absent ──add──► qty=1 ──add──► qty=2 ──add──► …
//!   ▲               │  ▲            │
//!   └────remove─────┘  └───remove───┘
//!   ▲
//!   └──────────── clear / reset / buy (from any qty) ─────────────
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{ShopError, ShopResult};
use crate::money::Won;
use crate::pricing::{cart_subtotal, checked_cart_subtotal, CartSummary, ShippingPolicy};
use crate::types::{CartLine, Good, GoodId};
use crate::validation::{validate_balance, validate_catalog};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Shop State
// =============================================================================

/// The aggregate root: balance, catalog, cart.
///
/// Fields are private; the only way to change a `ShopState` is [`reduce`].
/// The catalog sits behind an `Arc` since no command ever changes it, so
/// every transition shares it instead of copying.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopState {
    balance: Won,
    goods: Arc<[Good]>,
    cart: Vec<CartLine>,
}

impl ShopState {
    /// Creates a state with an empty cart after validating the inputs.
    ///
    /// ## Errors
    /// - negative balance
    /// - invalid catalog (duplicate ids, blank names, negative prices, ...)
    pub fn new(balance: Won, goods: Vec<Good>) -> ShopResult<Self> {
        validate_balance(balance)?;
        validate_catalog(&goods)?;

        Ok(ShopState {
            balance,
            goods: goods.into(),
            cart: Vec::new(),
        })
    }

    /// Builds a state from data already known to be valid (seed data).
    pub(crate) fn from_trusted(balance: Won, goods: Vec<Good>) -> Self {
        ShopState {
            balance,
            goods: goods.into(),
            cart: Vec::new(),
        }
    }

    pub fn balance(&self) -> Won {
        self.balance
    }

    pub fn goods(&self) -> &[Good] {
        &self.goods
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Looks up a good by id.
    pub fn good(&self, id: GoodId) -> Option<&Good> {
        self.goods.iter().find(|g| g.id == id)
    }

    /// Looks up the cart line for a good.
    pub fn line(&self, id: GoodId) -> Option<&CartLine> {
        self.cart.iter().find(|l| l.id == id)
    }

    /// Amount `BuyAll` would debit right now.
    pub fn total_cost(&self) -> Won {
        cart_subtotal(&self.goods, &self.cart)
    }

    fn with_cart(&self, cart: Vec<CartLine>) -> Self {
        ShopState {
            balance: self.balance,
            goods: Arc::clone(&self.goods),
            cart,
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// The closed set of shop mutations.
///
/// Serialized as `{ "type": "addCart", "payload": 1 }` so a view can post
/// commands in the same shape as a reducer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ShopCommand {
    AddCart(GoodId),
    RemoveCartOne(GoodId),
    ClearCart(GoodId),
    ResetCart,
    BuyAll,
}

// =============================================================================
// Transition Function
// =============================================================================

/// Pure transition: `(state, command) → new state`.
///
/// Never mutates `state`. On error nothing has changed.
///
/// ## Errors
/// - `GoodNotFound` - `AddCart` with an id missing from the catalog
/// - `CartLineNotFound` - `RemoveCartOne` / `ClearCart` with no such line
/// - `QuantityTooLarge` - `AddCart` on a line already at `MAX_ITEM_QUANTITY`
/// - `InsufficientBalance` - `BuyAll` costs more than the balance
pub fn reduce(state: &ShopState, command: &ShopCommand) -> ShopResult<ShopState> {
    match *command {
        ShopCommand::AddCart(id) => {
            if state.good(id).is_none() {
                return Err(ShopError::GoodNotFound(id));
            }

            let mut cart = state.cart.clone();
            match cart.iter_mut().find(|l| l.id == id) {
                Some(line) => {
                    if line.qty >= MAX_ITEM_QUANTITY {
                        return Err(ShopError::QuantityTooLarge {
                            requested: line.qty.saturating_add(1),
                            max: MAX_ITEM_QUANTITY,
                        });
                    }
                    line.qty += 1;
                }
                None => cart.push(CartLine::single(id)),
            }
            Ok(state.with_cart(cart))
        }

        ShopCommand::RemoveCartOne(id) => {
            let pos = state
                .cart
                .iter()
                .position(|l| l.id == id)
                .ok_or(ShopError::CartLineNotFound(id))?;

            let mut cart = state.cart.clone();
            let drop_line = match cart.get_mut(pos) {
                Some(line) if line.qty > 1 => {
                    line.qty -= 1;
                    false
                }
                _ => true,
            };
            if drop_line {
                cart.remove(pos);
            }
            Ok(state.with_cart(cart))
        }

        ShopCommand::ClearCart(id) => {
            if state.line(id).is_none() {
                return Err(ShopError::CartLineNotFound(id));
            }

            let cart = state.cart.iter().filter(|l| l.id != id).copied().collect();
            Ok(state.with_cart(cart))
        }

        ShopCommand::ResetCart => Ok(state.with_cart(Vec::new())),

        ShopCommand::BuyAll => {
            let insufficient = || ShopError::InsufficientBalance {
                required: state.total_cost(),
                available: state.balance,
            };
            let total =
                checked_cart_subtotal(&state.goods, &state.cart).ok_or_else(insufficient)?;
            let balance = state.balance.checked_debit(total).ok_or_else(insufficient)?;

            Ok(ShopState {
                balance,
                goods: Arc::clone(&state.goods),
                cart: Vec::new(),
            })
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What a successful purchase bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Cart contents at the moment of purchase.
    pub lines: Vec<CartLine>,
    /// Amount debited.
    pub total: Won,
    /// Wallet balance after the debit.
    pub balance_after: Won,
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed (or was already in the requested shape).
    Applied,
    /// The command named an unknown good or cart line; state unchanged.
    Ignored,
    /// `BuyAll` went through.
    Purchased(Receipt),
}

// =============================================================================
// Store
// =============================================================================

/// The explicitly constructed owner of a [`ShopState`].
///
/// One store per session; tests build a fresh one each time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopStore {
    state: ShopState,
}

impl ShopStore {
    pub fn new(state: ShopState) -> Self {
        ShopStore { state }
    }

    pub fn state(&self) -> &ShopState {
        &self.state
    }

    pub fn balance(&self) -> Won {
        self.state.balance()
    }

    pub fn goods(&self) -> &[Good] {
        self.state.goods()
    }

    pub fn cart(&self) -> &[CartLine] {
        self.state.cart()
    }

    pub fn good(&self, id: GoodId) -> Option<&Good> {
        self.state.good(id)
    }

    /// Cart panel figures under the given shipping policy.
    pub fn summary(&self, policy: &ShippingPolicy) -> CartSummary {
        CartSummary::compute(self.state.goods(), self.state.cart(), policy)
    }

    /// Applies a command.
    ///
    /// ## Policy
    /// - Unknown good / cart line → `Ok(Outcome::Ignored)`, state unchanged
    /// - `InsufficientBalance`, `QuantityTooLarge` → `Err`, state unchanged
    /// - Successful `BuyAll` → `Ok(Outcome::Purchased(receipt))`
    pub fn dispatch(&mut self, command: ShopCommand) -> ShopResult<Outcome> {
        if command == ShopCommand::BuyAll {
            return self.buy_all().map(Outcome::Purchased);
        }

        match reduce(&self.state, &command) {
            Ok(next) => {
                self.state = next;
                debug!(?command, cart_lines = self.state.cart.len(), "command applied");
                Ok(Outcome::Applied)
            }
            Err(err) if err.is_not_found() => {
                debug!(?command, %err, "command ignored");
                Ok(Outcome::Ignored)
            }
            Err(err) => {
                warn!(?command, %err, "command rejected");
                Err(err)
            }
        }
    }

    pub fn add_cart(&mut self, id: GoodId) -> ShopResult<Outcome> {
        self.dispatch(ShopCommand::AddCart(id))
    }

    pub fn remove_cart_one(&mut self, id: GoodId) -> ShopResult<Outcome> {
        self.dispatch(ShopCommand::RemoveCartOne(id))
    }

    pub fn clear_cart(&mut self, id: GoodId) -> ShopResult<Outcome> {
        self.dispatch(ShopCommand::ClearCart(id))
    }

    pub fn reset_cart(&mut self) -> ShopResult<Outcome> {
        self.dispatch(ShopCommand::ResetCart)
    }

    /// Buys the whole cart, all or nothing.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 사과 x2 (2,000원), balance 100,000원
    ///      │
    ///      ▼
    /// buy_all() ← THIS FUNCTION
    ///      │
    ///      ├── total > balance? → Err(InsufficientBalance), nothing changes
    ///      │
    ///      └── OK → balance 98,000원, cart []
    /// ```
    pub fn buy_all(&mut self) -> ShopResult<Receipt> {
        let next = reduce(&self.state, &ShopCommand::BuyAll).map_err(|err| {
            warn!(%err, "purchase rejected");
            err
        })?;

        let receipt = Receipt {
            lines: self.state.cart.clone(),
            total: self.state.balance - next.balance,
            balance_after: next.balance,
        };
        self.state = next;

        info!(
            total = %receipt.total,
            balance = %receipt.balance_after,
            lines = receipt.lines.len(),
            "purchase completed"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> GoodId {
        GoodId::new(n)
    }

    fn store_with(balance: i64, goods: Vec<Good>) -> ShopStore {
        ShopStore::new(ShopState::new(Won::new(balance), goods).unwrap())
    }

    fn apple_store() -> ShopStore {
        store_with(100_000, vec![Good::new(1, "사과", 1_000)])
    }

    #[test]
    fn test_add_twice_yields_single_line_with_qty_two() {
        let mut store = apple_store();
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();

        assert_eq!(store.cart(), &[CartLine { id: id(1), qty: 2 }]);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = store_with(
            0,
            vec![Good::new(1, "사과", 1_000), Good::new(2, "딸기", 30_000)],
        );
        store.add_cart(id(2)).unwrap();
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(2)).unwrap();

        assert_eq!(
            store.cart(),
            &[CartLine { id: id(2), qty: 2 }, CartLine { id: id(1), qty: 1 }]
        );
    }

    #[test]
    fn test_add_does_not_touch_balance_or_goods() {
        let mut store = apple_store();
        let goods_before = store.goods().to_vec();
        store.add_cart(id(1)).unwrap();

        assert_eq!(store.balance(), Won::new(100_000));
        assert_eq!(store.goods(), goods_before.as_slice());
    }

    #[test]
    fn test_add_unknown_good_is_ignored() {
        let mut store = apple_store();
        let before = store.clone();

        assert_eq!(store.add_cart(id(404)).unwrap(), Outcome::Ignored);
        assert_eq!(store, before);
        assert_eq!(
            reduce(before.state(), &ShopCommand::AddCart(id(404))),
            Err(ShopError::GoodNotFound(id(404)))
        );
    }

    #[test]
    fn test_add_beyond_quantity_cap_is_rejected() {
        let mut store = apple_store();
        for _ in 0..MAX_ITEM_QUANTITY {
            store.add_cart(id(1)).unwrap();
        }
        let before = store.clone();

        let err = store.add_cart(id(1)).unwrap_err();
        assert!(matches!(err, ShopError::QuantityTooLarge { max: 999, .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_one_decrements_then_drops_line() {
        let mut store = apple_store();
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();

        store.remove_cart_one(id(1)).unwrap();
        assert_eq!(store.cart(), &[CartLine { id: id(1), qty: 2 }]);

        store.remove_cart_one(id(1)).unwrap();
        assert_eq!(store.cart(), &[CartLine { id: id(1), qty: 1 }]);

        store.remove_cart_one(id(1)).unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_remove_one_without_line_is_ignored() {
        let mut store = apple_store();
        assert_eq!(store.remove_cart_one(id(1)).unwrap(), Outcome::Ignored);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = apple_store();
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();

        assert_eq!(store.clear_cart(id(1)).unwrap(), Outcome::Applied);
        let once = store.clone();
        assert_eq!(store.clear_cart(id(1)).unwrap(), Outcome::Ignored);

        assert_eq!(store, once);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_then_clear_restores_prior_cart() {
        let mut store = store_with(
            0,
            vec![Good::new(1, "사과", 1_000), Good::new(2, "딸기", 30_000)],
        );
        store.add_cart(id(1)).unwrap();
        let prior = store.cart().to_vec();

        store.add_cart(id(2)).unwrap();
        store.clear_cart(id(2)).unwrap();

        assert_eq!(store.cart(), prior.as_slice());
    }

    #[test]
    fn test_reset_empties_cart_only() {
        let mut store = store_with(
            5_000,
            vec![Good::new(1, "사과", 1_000), Good::new(2, "딸기", 30_000)],
        );
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(2)).unwrap();

        store.reset_cart().unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.balance(), Won::new(5_000));
        assert_eq!(store.goods().len(), 2);

        // Reset on an empty cart is fine too
        assert_eq!(store.reset_cart().unwrap(), Outcome::Applied);
    }

    #[test]
    fn test_buy_all_scenario() {
        let mut store = apple_store();
        store.add_cart(id(1)).unwrap();
        assert_eq!(store.cart(), &[CartLine { id: id(1), qty: 1 }]);
        store.add_cart(id(1)).unwrap();
        assert_eq!(store.cart(), &[CartLine { id: id(1), qty: 2 }]);

        let receipt = store.buy_all().unwrap();

        assert_eq!(store.balance(), Won::new(98_000));
        assert!(store.cart().is_empty());
        assert_eq!(receipt.total, Won::new(2_000));
        assert_eq!(receipt.balance_after, Won::new(98_000));
        assert_eq!(receipt.lines, vec![CartLine { id: id(1), qty: 2 }]);
    }

    #[test]
    fn test_buy_all_insufficient_balance_leaves_state_unchanged() {
        let mut store = store_with(
            100_000,
            vec![
                Good::new(1, "사과", 1_000),
                Good::new(9, "못산다니까요", 999_999_999),
            ],
        );
        store.add_cart(id(9)).unwrap();
        let before = store.clone();

        let err = store.dispatch(ShopCommand::BuyAll).unwrap_err();

        assert_eq!(
            err,
            ShopError::InsufficientBalance {
                required: Won::new(999_999_999),
                available: Won::new(100_000),
            }
        );
        assert_eq!(store, before);
        assert_eq!(store.balance(), Won::new(100_000));
        assert_eq!(store.cart(), &[CartLine { id: id(9), qty: 1 }]);
    }

    #[test]
    fn test_buy_all_rejects_total_beyond_won_range() {
        let mut store = store_with(
            i64::MAX,
            vec![Good::new(1, "금괴", i64::MAX), Good::new(2, "은괴", i64::MAX)],
        );
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(2)).unwrap();
        let before = store.clone();

        let err = store.buy_all().unwrap_err();

        assert!(matches!(err, ShopError::InsufficientBalance { .. }));
        assert_eq!(store, before);
        assert_eq!(store.balance(), Won::new(i64::MAX));
        assert_eq!(store.cart().len(), 2);
    }

    #[test]
    fn test_buy_all_exact_balance() {
        let mut store = store_with(2_000, vec![Good::new(1, "사과", 1_000)]);
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();

        store.buy_all().unwrap();
        assert_eq!(store.balance(), Won::zero());
    }

    #[test]
    fn test_buy_all_uses_sale_price() {
        let apple = Good::new(1, "사과", 1_000).with_sale_price(800);
        let mut store = store_with(10_000, vec![apple]);
        store.add_cart(id(1)).unwrap();
        store.add_cart(id(1)).unwrap();

        let receipt = store.buy_all().unwrap();
        assert_eq!(receipt.total, Won::new(1_600));
        assert_eq!(store.balance(), Won::new(8_400));
    }

    #[test]
    fn test_buy_all_with_empty_cart_debits_nothing() {
        let mut store = apple_store();
        let receipt = store.buy_all().unwrap();

        assert!(receipt.lines.is_empty());
        assert_eq!(receipt.total, Won::zero());
        assert_eq!(store.balance(), Won::new(100_000));
    }

    #[test]
    fn test_new_state_validates_inputs() {
        assert!(ShopState::new(Won::new(-1), vec![]).is_err());
        assert!(ShopState::new(
            Won::zero(),
            vec![Good::new(1, "사과", 1), Good::new(1, "사과", 1)]
        )
        .is_err());
    }

    #[test]
    fn test_command_wire_shape() {
        let json = serde_json::to_string(&ShopCommand::AddCart(id(3))).unwrap();
        assert_eq!(json, r#"{"type":"addCart","payload":3}"#);

        let cmd: ShopCommand = serde_json::from_str(r#"{"type":"buyAll"}"#).unwrap();
        assert_eq!(cmd, ShopCommand::BuyAll);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    mod proptest_tests {
        use super::*;
        use crate::seed;
        use proptest::prelude::*;
        use std::collections::HashSet;

        /// Ids 0 and 10 are not in the seed catalog.
        fn command() -> impl Strategy<Value = ShopCommand> {
            let good_id = (0u32..=10).prop_map(GoodId::new);
            prop_oneof![
                4 => good_id.clone().prop_map(ShopCommand::AddCart),
                2 => good_id.clone().prop_map(ShopCommand::RemoveCartOne),
                1 => good_id.prop_map(ShopCommand::ClearCart),
                1 => Just(ShopCommand::ResetCart),
                1 => Just(ShopCommand::BuyAll),
            ]
        }

        fn assert_invariants(store: &ShopStore, goods: &[Good]) {
            let mut ids = HashSet::new();
            for line in store.cart() {
                assert!(line.qty >= 1, "line with zero qty: {line:?}");
                assert!(ids.insert(line.id), "duplicate line for {}", line.id);
                assert!(store.good(line.id).is_some(), "line for unknown good");
            }
            assert!(!store.balance().is_negative());
            assert_eq!(store.goods(), goods);
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: invariants hold after every command in any sequence.
            #[test]
            fn invariants_hold_for_any_sequence(
                commands in proptest::collection::vec(command(), 0..64)
            ) {
                let mut store = ShopStore::new(seed::initial_state());
                let goods = store.goods().to_vec();

                for cmd in commands {
                    let before = store.clone();
                    let balance_before = store.balance();
                    let cost = store.state().total_cost();

                    match store.dispatch(cmd) {
                        Ok(Outcome::Purchased(receipt)) => {
                            prop_assert_eq!(receipt.total, cost);
                            prop_assert_eq!(store.balance(), balance_before - cost);
                            prop_assert!(store.cart().is_empty());
                        }
                        Ok(Outcome::Ignored) | Err(_) => prop_assert_eq!(&store, &before),
                        Ok(Outcome::Applied) => {}
                    }
                    assert_invariants(&store, &goods);
                }
            }

            /// Property: reduce is deterministic.
            #[test]
            fn reduce_is_deterministic(commands in proptest::collection::vec(command(), 0..32)) {
                let mut state = seed::initial_state();
                for cmd in commands {
                    let first = reduce(&state, &cmd);
                    let second = reduce(&state, &cmd);
                    prop_assert_eq!(&first, &second);
                    if let Ok(next) = first {
                        state = next;
                    }
                }
            }

            /// Property: clear is idempotent from any reachable state.
            #[test]
            fn clear_is_idempotent(
                commands in proptest::collection::vec(command(), 0..32),
                target in 1u32..=9,
            ) {
                let mut store = ShopStore::new(seed::initial_state());
                for cmd in commands {
                    let _ = store.dispatch(cmd);
                }

                let mut once = store.clone();
                once.clear_cart(GoodId::new(target)).unwrap();
                let mut twice = once.clone();
                twice.clear_cart(GoodId::new(target)).unwrap();

                prop_assert_eq!(&once, &twice);
                prop_assert!(once.state().line(GoodId::new(target)).is_none());
            }
        }
    }
}
