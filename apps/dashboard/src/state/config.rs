//! # Configuration State
//!
//! Dashboard configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │  2. Config file                                                         │
//! │     ~/.config/sweetbakery/dashboard.toml (Linux)                        │
//! │     ~/Library/Application Support/com.sweetbakery.dashboard/... (macOS) │
//! │  3. Environment variables (`BAKERY_*`)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```toml
//! # dashboard.toml
//! store_name = "Sweet Bakery, Indiranagar"
//! recent_sales_limit = 10
//! data_dir = "/var/lib/sweetbakery"
//! ```
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use bakery_core::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConfigState {
    /// Shown in the header and in the welcome toast
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Rows in the dashboard "Recent Sales" card
    pub recent_sales_limit: usize,

    /// Include the low stock alert list in the dashboard response
    pub show_low_stock_alerts: bool,

    /// Where the session record lives. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Sweet Bakery"
    /// - Currency: ₹, 2 decimals
    /// - Recent sales: 5
    /// - Low stock alerts: on
    fn default() -> Self {
        ConfigState {
            store_name: "Sweet Bakery".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            recent_sales_limit: 5,
            show_low_stock_alerts: true,
            data_dir: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }
        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }
        if self.recent_sales_limit == 0 {
            return Err(ConfigError::Invalid(
                "recent_sales_limit must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BAKERY_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("BAKERY_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(dir) = lookup("BAKERY_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(limit) = lookup("BAKERY_RECENT_SALES_LIMIT") {
            match limit.parse::<usize>() {
                Ok(n) => self.recent_sales_limit = n,
                Err(_) => warn!(value = %limit, "Ignoring invalid BAKERY_RECENT_SALES_LIMIT"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sweetbakery", "dashboard")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    /// Formats a paise amount as a currency string with
    /// `currency_decimals` places.
    ///
    /// Fewer than two places rounds half away from zero; more pads with
    /// zeros.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "₹12.34");
    /// ```
    pub fn format_currency(&self, paise: i64) -> String {
        let decimals = u32::from(self.currency_decimals.min(4));
        let abs = u128::from(paise.unsigned_abs());

        let scaled = if decimals >= 2 {
            abs * 10_u128.pow(decimals - 2)
        } else {
            let step = 10_u128.pow(2 - decimals);
            (abs + step / 2) / step
        };
        let unit = 10_u128.pow(decimals);
        let sign = if paise < 0 && scaled > 0 { "-" } else { "" };

        if decimals == 0 {
            format!("{}{}{}", sign, self.currency_symbol, scaled)
        } else {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                scaled / unit,
                scaled % unit,
                width = decimals as usize
            )
        }
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.format_currency(amount.paise())
    }
}
