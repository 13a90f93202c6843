//! # Todo State
//!
//! Session-owned handle to the todo store. Independent of the shop: it has
//! its own lock and never touches cart or wallet.

use std::sync::{Arc, Mutex, PoisonError};

use myshop_core::TodoStore;

#[derive(Debug, Clone, Default)]
pub struct TodoHandle {
    store: Arc<Mutex<TodoStore>>,
}

impl TodoHandle {
    /// Starts with an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TodoStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TodoStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}
