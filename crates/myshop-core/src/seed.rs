//! # Seed Data
//!
//! The reference catalog a session starts with, and loading a catalog from
//! JSON for sessions that bring their own.
//!
//! ## Reference Catalog
//! ```text
//! ┌────┬──────────────┬───────────────┐
//! │ id │ name         │ price (원)    │
//! ├────┼──────────────┼───────────────┤
//! │  1 │ 사과         │         1,000 │
//! │  2 │ 딸기         │        30,000 │
//! │  3 │ 바나나       │           500 │
//! │  4 │ 초코렛       │         8,000 │
//! │  5 │ 오랜지       │        15,000 │
//! │  6 │ 황금         │       100,001 │  ← one won over the starting balance
//! │  7 │ 사지마세요   │       500,000 │
//! │  8 │ 어짜피못사요 │   100,000,000 │
//! │  9 │ 못산다니까요 │   999,999,999 │
//! └────┴──────────────┴───────────────┘
//! ```

use tracing::debug;

use crate::error::{ShopResult, ValidationError};
use crate::money::Won;
use crate::shop::ShopState;
use crate::types::Good;
use crate::validation::validate_catalog;
use crate::DEFAULT_BALANCE;

/// The nine reference goods, in catalog order.
pub fn reference_goods() -> Vec<Good> {
    vec![
        Good::new(1, "사과", 1_000),
        Good::new(2, "딸기", 30_000),
        Good::new(3, "바나나", 500),
        Good::new(4, "초코렛", 8_000),
        Good::new(5, "오랜지", 15_000),
        Good::new(6, "황금", 100_001),
        Good::new(7, "사지마세요", 500_000),
        Good::new(8, "어짜피못사요", 100_000_000),
        Good::new(9, "못산다니까요", 999_999_999),
    ]
}

/// Balance 100,000원, the reference catalog, an empty cart.
pub fn initial_state() -> ShopState {
    ShopState::from_trusted(DEFAULT_BALANCE, reference_goods())
}

/// Builds a state from a custom balance and catalog.
pub fn state_with(balance: Won, goods: Vec<Good>) -> ShopResult<ShopState> {
    ShopState::new(balance, goods)
}

/// Parses a JSON array of goods and validates it.
///
/// ## Format
/// ```json
/// [
///   { "id": 1, "name": "사과", "price": 1000, "salePrice": 800, "badge": "HOT" },
///   { "id": 2, "name": "딸기", "price": 30000, "rating": 4.5 }
/// ]
/// ```
///
/// ## Errors
/// - `InvalidFormat { field: "catalog" }` - not valid JSON for a goods array
/// - any error from [`validate_catalog`]
pub fn catalog_from_json(json: &str) -> ShopResult<Vec<Good>> {
    let goods: Vec<Good> =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
            field: "catalog".to_string(),
            reason: e.to_string(),
        })?;

    validate_catalog(&goods)?;
    debug!(count = goods.len(), "catalog loaded from JSON");

    Ok(goods)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShopError;
    use crate::types::{Badge, GoodId};

    #[test]
    fn test_initial_state() {
        let state = initial_state();

        assert_eq!(state.balance(), Won::new(100_000));
        assert_eq!(state.goods().len(), 9);
        assert!(state.cart().is_empty());
        assert_eq!(state.good(GoodId::new(6)).unwrap().price, Won::new(100_001));
        assert_eq!(state.good(GoodId::new(9)).unwrap().name, "못산다니까요");
    }

    #[test]
    fn test_reference_catalog_is_valid() {
        assert!(validate_catalog(&reference_goods()).is_ok());
        assert_eq!(
            ShopState::new(DEFAULT_BALANCE, reference_goods()).unwrap(),
            initial_state()
        );
    }

    #[test]
    fn test_reference_catalog_order() {
        let ids: Vec<u32> = reference_goods().iter().map(|g| g.id.get()).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"id": 1, "name": "사과", "price": 1000, "salePrice": 800, "badge": "BEST"},
            {"id": 2, "name": "딸기", "price": 30000}
        ]"#;
        let goods = catalog_from_json(json).unwrap();

        assert_eq!(goods.len(), 2);
        assert_eq!(goods[0].badge, Some(Badge::Best));
        assert_eq!(goods[0].unit_price(), Won::new(800));
    }

    #[test]
    fn test_catalog_from_json_rejects_garbage() {
        let err = catalog_from_json("{not json").unwrap_err();
        assert!(matches!(
            err,
            ShopError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_catalog_from_json_rejects_duplicate_ids() {
        let json = r#"[{"id": 1, "name": "a", "price": 1}, {"id": 1, "name": "b", "price": 2}]"#;
        assert!(matches!(
            catalog_from_json(json),
            Err(ShopError::Validation(ValidationError::Duplicate { .. }))
        ));
    }
}
