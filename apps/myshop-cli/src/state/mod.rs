//! # State Module
//!
//! Session state, split by concern so each command asks only for what it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  ShopHandle  │  │  TodoHandle  │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │   ShopStore  │  │   TodoStore  │  │  balance         │              │
//! │  │  >>          │  │  >>          │  │  shipping        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • ShopHandle / TodoHandle: independent locks, never held together     │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod shop;
mod todo;

pub use config::{
    ConfigState, ENV_CATALOG_PATH, ENV_FREE_SHIPPING_THRESHOLD, ENV_INITIAL_BALANCE,
    ENV_SHIPPING_FEE, ENV_STORE_NAME,
};
pub use shop::ShopHandle;
pub use todo::TodoHandle;
