//! # myshop-core: Pure Business Logic for My Shop
//!
//! This crate is the **heart** of the storefront. It owns the shop state
//! (wallet balance, goods catalog, cart) and every rule that changes it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        My Shop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (browser / CLI)                   │   │
//! │  │    GoodList ──► Cart ──► Wallet ──► Pages / navigation          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / clear / reset / buy     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ myshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   shop    │  │  pricing  │  │   │
//! │  │   │   Good    │  │    Won    │  │ ShopStore │  │  Summary  │  │   │
//! │  │   │ CartLine  │  │           │  │  reduce   │  │  Shipping │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE TRANSITIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Good, Badge, Rating, CartLine)
//! - [`money`] - Won type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog and input validation
//! - [`pricing`] - Derived cart totals, shipping and discounts
//! - [`shop`] - The shop state, its command set and the store
//! - [`seed`] - Reference catalog and JSON catalog loading
//! - [`todo`] - The (unrelated) todo-list container
//!
//! ## Example Usage
//!
//! ```rust
//! use myshop_core::seed;
//! use myshop_core::{GoodId, ShopStore, Won};
//!
//! let mut store = ShopStore::new(seed::initial_state());
//! store.add_cart(GoodId::new(1)).unwrap();
//! store.add_cart(GoodId::new(1)).unwrap();
//!
//! let receipt = store.buy_all().unwrap();
//! assert_eq!(receipt.total, Won::new(2_000));
//! assert_eq!(store.balance(), Won::new(98_000));
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod seed;
pub mod shop;
pub mod todo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ShopError, ShopResult, ValidationError};
pub use money::Won;
pub use pricing::{CartLineView, CartSummary, ShippingPolicy};
pub use shop::{reduce, Outcome, Receipt, ShopCommand, ShopState, ShopStore};
pub use todo::{reduce_todos, TodoCommand, TodoItem, TodoState, TodoStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single good in the cart.
///
/// ## Business Reason
/// Keeps line totals far away from integer overflow even for the most
/// expensive seeded goods, and catches runaway clicking.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Subtotal at or above which shipping is free (reference data).
pub const FREE_SHIPPING_THRESHOLD: Won = Won::new(50_000);

/// Flat shipping fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Won = Won::new(3_000);

/// Wallet balance a new session starts with.
pub const DEFAULT_BALANCE: Won = Won::new(100_000);
