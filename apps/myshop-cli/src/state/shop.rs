//! # Shop State
//!
//! Session-owned handle to the shop store.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shop Handle Operations                               │
//! │                                                                         │
//! │  Session Line         Command Function         Store Call               │
//! │  ────────────         ────────────────         ──────────               │
//! │                                                                         │
//! │  add 1 ─────────────► add_to_cart() ─────────► store.add_cart(1)       │
//! │                                                                         │
//! │  remove 1 ──────────► remove_one() ──────────► store.remove_cart_one(1)│
//! │                                                                         │
//! │  clear 1 ───────────► clear_line() ──────────► store.clear_cart(1)     │
//! │                                                                         │
//! │  reset ─────────────► reset_cart() ──────────► store.reset_cart()      │
//! │                                                                         │
//! │  buy ───────────────► buy_all() ─────────────► store.buy_all()         │
//! │                                                                         │
//! │  cart / wallet ─────► get_cart() ────────────► (read only)             │
//! │                                                                         │
//! │  NOTE: Writes and reads both take the Mutex lock, and release it as    │
//! │        soon as the closure returns.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use myshop_core::{ShopState, ShopStore};

/// Cloneable handle to the shop store.
///
/// `Arc<Mutex<_>>` lets the session and any future view share one store.
/// A poisoned lock is recovered: the store only ever swaps in complete
/// states, so whatever it holds is valid.
#[derive(Debug, Clone)]
pub struct ShopHandle {
    store: Arc<Mutex<ShopStore>>,
}

impl ShopHandle {
    /// Wraps a freshly built state in a store.
    pub fn new(state: ShopState) -> Self {
        ShopHandle {
            store: Arc::new(Mutex::new(ShopStore::new(state))),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let balance = shop.with_store(|s| s.balance());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ShopStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shop.with_store_mut(|s| s.add_cart(GoodId::new(1)))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ShopStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myshop_core::{seed, GoodId, Won};

    #[test]
    fn test_clones_share_one_store() {
        let shop = ShopHandle::new(seed::initial_state());
        let other = shop.clone();

        shop.with_store_mut(|s| s.add_cart(GoodId::new(1))).unwrap();

        assert_eq!(other.with_store(|s| s.cart().len()), 1);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let shop = ShopHandle::new(seed::initial_state());
        let poisoner = shop.clone();

        let _ = std::thread::spawn(move || {
            poisoner.with_store_mut(|_| panic!("boom"));
        })
        .join();

        assert_eq!(shop.with_store(|s| s.balance()), Won::new(100_000));
    }
}
