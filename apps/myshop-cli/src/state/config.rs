//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MYSHOP_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use myshop_core::{seed, ShippingPolicy, ShopState, Won, DEFAULT_BALANCE};

use crate::error::CliError;

pub const ENV_STORE_NAME: &str = "MYSHOP_STORE_NAME";
pub const ENV_INITIAL_BALANCE: &str = "MYSHOP_INITIAL_BALANCE";
pub const ENV_FREE_SHIPPING_THRESHOLD: &str = "MYSHOP_FREE_SHIPPING_THRESHOLD";
pub const ENV_SHIPPING_FEE: &str = "MYSHOP_SHIPPING_FEE";
pub const ENV_CATALOG_PATH: &str = "MYSHOP_CATALOG_PATH";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Title shown above every page
    pub store_name: String,

    /// Currency unit appended to amounts
    pub currency_symbol: String,

    /// Wallet balance a session starts with
    pub initial_balance: Won,

    /// Free-shipping threshold and flat fee
    pub shipping: ShippingPolicy,

    /// JSON catalog to load instead of the reference goods
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "나의 가게"
    /// - Balance: 100,000원
    /// - Shipping: free from 50,000원, otherwise 3,000원
    /// - Catalog: the nine reference goods
    fn default() -> Self {
        ConfigState {
            store_name: "나의 가게".to_string(),
            currency_symbol: "원".to_string(),
            initial_balance: DEFAULT_BALANCE,
            shipping: ShippingPolicy::default(),
            catalog_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MYSHOP_STORE_NAME`: Override store name
    /// - `MYSHOP_INITIAL_BALANCE`: Starting balance in won (e.g. "250000")
    /// - `MYSHOP_FREE_SHIPPING_THRESHOLD`: Free-shipping threshold in won
    /// - `MYSHOP_SHIPPING_FEE`: Flat shipping fee in won
    /// - `MYSHOP_CATALOG_PATH`: Path to a JSON goods array
    ///
    /// A value that does not parse is an error, not a silent default.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            config.store_name = store_name;
        }

        if let Some(value) = lookup(ENV_INITIAL_BALANCE) {
            config.initial_balance = parse_won(ENV_INITIAL_BALANCE, &value)?;
        }

        if let Some(value) = lookup(ENV_FREE_SHIPPING_THRESHOLD) {
            config.shipping.free_threshold = parse_won(ENV_FREE_SHIPPING_THRESHOLD, &value)?;
        }

        if let Some(value) = lookup(ENV_SHIPPING_FEE) {
            config.shipping.flat_fee = parse_won(ENV_SHIPPING_FEE, &value)?;
        }

        if let Some(path) = lookup(ENV_CATALOG_PATH) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Builds the initial shop state: the configured balance plus either
    /// the catalog file or the reference goods.
    pub fn initial_state(&self) -> Result<ShopState, CliError> {
        let goods = match &self.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let goods = seed::catalog_from_json(&json)?;
                info!(path = %path.display(), count = goods.len(), "catalog file loaded");
                goods
            }
            None => seed::reference_goods(),
        };

        Ok(seed::state_with(self.initial_balance, goods)?)
    }

    /// Formats an amount the way the cart panel does: `1,000 원`.
    ///
    /// ## Example
    /// ```rust
    /// use myshop_cli::state::ConfigState;
    /// use myshop_core::Won;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Won::new(1_000)), "1,000 원");
    /// ```
    pub fn format_currency(&self, amount: Won) -> String {
        format!("{} {}", amount.grouped(), self.currency_symbol)
    }
}

fn parse_won(key: &str, value: &str) -> Result<Won, CliError> {
    let amount = value.trim().parse::<i64>().map_err(|e| CliError::Config {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    if amount < 0 {
        return Err(CliError::Config {
            key: key.to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(Won::new(amount))
}
