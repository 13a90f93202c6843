//! # Commands Module
//!
//! Every operation a session line can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── shop.rs     ◄─── Catalog, cart, wallet, purchase
//! └── todo.rs     ◄─── Todo list
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Session                                                                │
//! │  ───────                                                                │
//! │  "add 1"  ──parse──►  SessionCommand::Add(GoodId(1))                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::shop::add_to_cart(&shop, &config, id)                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<CartResponse, ApiError>                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  view::render_cart(...)   or   serde_json (--json)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take the state they need by reference and return plain
//! serializable responses; they never print.

pub mod shop;
pub mod todo;
