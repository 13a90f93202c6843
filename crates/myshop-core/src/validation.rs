//! # Validation Module
//!
//! Input validation utilities for the shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (seed / JSON)                                   │
//! │  ├── Unique ids, names, non-negative prices, rating range              │
//! │  └── THIS MODULE: validate_catalog, validate_balance                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command layer (CLI)                                          │
//! │  ├── Argument parsing (ids, titles)                                    │
//! │  └── THIS MODULE: validate_todo_title                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store transitions                                            │
//! │  └── Quantity cap, insufficient balance (see `shop`)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Won;
use crate::types::{Good, Rating};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted good name or todo title, in characters.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a good's display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use myshop_core::validation::validate_good_name;
///
/// assert!(validate_good_name("사과").is_ok());
/// assert!(validate_good_name("   ").is_err());
/// ```
pub fn validate_good_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name).map(|_| ())
}

/// Validates a todo title and returns it trimmed.
pub fn validate_todo_title(title: &str) -> ValidationResult<String> {
    validate_text("title", title)
}

fn validate_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price (list or sale). Zero is allowed (free items).
pub fn validate_price(field: &str, price: Won) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a wallet balance. Must be non-negative.
///
/// ## Example
/// ```rust
/// use myshop_core::validation::validate_balance;
/// use myshop_core::Won;
///
/// assert!(validate_balance(Won::new(100_000)).is_ok());
/// assert!(validate_balance(Won::new(-1)).is_err());
/// ```
pub fn validate_balance(balance: Won) -> ValidationResult<()> {
    validate_price("balance", balance)
}

/// Validates a rating lies within 0..=5.
pub fn validate_rating(rating: Rating) -> ValidationResult<()> {
    let value = rating.value();
    if !(Rating::MIN..=Rating::MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: Rating::MIN as i64,
            max: Rating::MAX as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a single catalog entry.
pub fn validate_good(good: &Good) -> ValidationResult<()> {
    validate_good_name(&good.name)?;
    validate_price("price", good.price)?;

    if let Some(sale_price) = good.sale_price {
        validate_price("salePrice", sale_price)?;
    }
    if let Some(rating) = good.rating {
        validate_rating(rating)?;
    }

    Ok(())
}

/// Validates a whole catalog.
///
/// ## Rules
/// - Every entry passes [`validate_good`]
/// - Ids are unique (the cart references goods by id alone)
pub fn validate_catalog(goods: &[Good]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(goods.len());

    for good in goods {
        validate_good(good)?;

        if !seen.insert(good.id) {
            return Err(ValidationError::Duplicate {
                field: "good id".to_string(),
                value: good.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
