//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in My Shop                                │
//! │                                                                         │
//! │  Session line "buy"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store error? ─── ShopError::InsufficientBalance ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad input? ─── ValidationError::Required ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Rendered as a message line, or with --json:                           │
//! │  { "code": "INSUFFICIENT_BALANCE", "message": "..." }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ApiError` is what the user sees and never ends a session. `CliError`
//! covers everything around it: unparseable lines, configuration, I/O.

use serde::Serialize;
use thiserror::Error;

use myshop_core::{ShopError, ValidationError};

/// Error returned from command functions.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_BALANCE",
///   "message": "잔액이 부족합니다: 결제금액 999,999,999원, 잔액 100,000원"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown good or cart line
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Wallet cannot cover the purchase
    InsufficientBalance,

    /// Cart operation failed (quantity cap)
    CartError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts store errors to API errors.
impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        match err {
            ShopError::GoodNotFound(id) => ApiError::not_found("Good", &id.to_string()),
            ShopError::CartLineNotFound(id) => ApiError::not_found("Cart line", &id.to_string()),
            ShopError::InsufficientBalance {
                required,
                available,
            } => ApiError::new(
                ErrorCode::InsufficientBalance,
                format!(
                    "잔액이 부족합니다: 결제금액 {}, 잔액 {}",
                    required, available
                ),
            ),
            ShopError::QuantityTooLarge { requested, max } => ApiError::cart(format!(
                "Quantity {} exceeds maximum allowed ({})",
                requested, max
            )),
            ShopError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// CLI Error
// =============================================================================

/// Errors outside a single command: parsing, configuration, I/O.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Invalid configuration {key}: {reason}")]
    Config { key: String, reason: String },

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Errors caused by what the user typed; a session reports them and
    /// keeps going.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CliError::UnknownCommand(_)
                | CliError::MissingArgument { .. }
                | CliError::InvalidArgument { .. }
        )
    }
}

/// How a CLI error is shown in a reply.
impl From<&CliError> for ApiError {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Shop(e) => ApiError::from(e.clone()),
            e if e.is_input_error() => ApiError::validation(e.to_string()),
            e => {
                tracing::error!("Session error: {}", e);
                ApiError::internal(e.to_string())
            }
        }
    }
}
