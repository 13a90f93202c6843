//! # Error Types
//!
//! Domain-specific error types for myshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  myshop-core errors (this file)                                        │
//! │  ├── ShopError        - Store / domain failures                        │
//! │  └── ValidationError  - Catalog and input validation failures          │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the view sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → ShopError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not-found Policy
//! `GoodNotFound` and `CartLineNotFound` are produced by [`crate::shop::reduce`]
//! but the store swallows them: an unknown id leaves the state unchanged and
//! the caller sees `Outcome::Ignored`. `InsufficientBalance` is the only
//! failure that reaches the view during normal use.

use thiserror::Error;

use crate::money::Won;
use crate::types::GoodId;

// =============================================================================
// Shop Error
// =============================================================================

/// Shop domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// The id does not match any good in the catalog.
    #[error("Good not found: {0}")]
    GoodNotFound(GoodId),

    /// The cart has no line for this good.
    #[error("No cart line for good {0}")]
    CartLineNotFound(GoodId),

    /// The wallet cannot cover the purchase.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 못산다니까요 x1 (999,999,999원)
    ///      │
    ///      ▼
    /// buy_all(), balance = 100,000원
    ///      │
    ///      ▼
    /// InsufficientBalance { required: 999,999,999원, available: 100,000원 }
    ///      │
    ///      ▼
    /// View shows: "잔액이 부족합니다" and the cart stays as it was
    /// ```
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Won, available: Won },

    /// A single cart line would exceed the per-item quantity cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ShopError {
    /// Returns true for the errors the store treats as a silent no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ShopError::GoodNotFound(_) | ShopError::CartLineNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed catalog JSON).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two goods sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ShopError.
pub type ShopResult<T> = Result<T, ShopError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ShopError::InsufficientBalance {
            required: Won::new(999_999_999),
            available: Won::new(100_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: required 999,999,999원, available 100,000원"
        );

        assert_eq!(
            ShopError::GoodNotFound(GoodId::new(42)).to_string(),
            "Good not found: 42"
        );
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ShopError::GoodNotFound(GoodId::new(1)).is_not_found());
        assert!(ShopError::CartLineNotFound(GoodId::new(1)).is_not_found());
        assert!(!ShopError::InsufficientBalance {
            required: Won::new(2),
            available: Won::new(1),
        }
        .is_not_found());
    }

    #[test]
    fn test_validation_converts_to_shop_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(validation_err.to_string(), "name is required");

        let shop_err: ShopError = validation_err.into();
        assert!(matches!(shop_err, ShopError::Validation(_)));
    }
}
