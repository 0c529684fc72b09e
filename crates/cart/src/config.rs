//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AFRICLOTHING_CART_DIR` - Directory the cart file lives in (default: .africlothing)
//! - `AFRICLOTHING_CART_KEY` - Storage key for the cart (default: africlothing-cart)
//! - `AFRICLOTHING_SHIPPING_FLAT_RATE` - Flat shipping charge (default: 5.99)
//! - `AFRICLOTHING_TAX_RATE` - Tax rate as a fraction (default: 0.08)

use std::path::PathBuf;
use std::str::FromStr;

use africlothing_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::DEFAULT_STORAGE_KEY;
use crate::store::validate_key;
use crate::summary::SummaryRates;

const DEFAULT_STORAGE_DIR: &str = ".africlothing";
const DEFAULT_SHIPPING_FLAT_RATE: &str = "5.99";
const DEFAULT_TAX_RATE: &str = "0.08";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart storage and summary configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the file store
    pub storage_dir: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Shipping and tax used for order summaries
    pub rates: SummaryRates,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            rates: SummaryRates::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(
            get_optional_env("AFRICLOTHING_CART_DIR"),
            get_optional_env("AFRICLOTHING_CART_KEY"),
            get_optional_env("AFRICLOTHING_SHIPPING_FLAT_RATE"),
            get_optional_env("AFRICLOTHING_TAX_RATE"),
        )
    }

    /// Build configuration from raw variable values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any present value is invalid.
    pub fn from_vars(
        storage_dir: Option<String>,
        storage_key: Option<String>,
        flat_shipping: Option<String>,
        tax_rate: Option<String>,
    ) -> Result<Self, ConfigError> {
        let storage_dir = PathBuf::from(or_default(storage_dir, DEFAULT_STORAGE_DIR));

        let storage_key = or_default(storage_key, DEFAULT_STORAGE_KEY);
        validate_key(&storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("AFRICLOTHING_CART_KEY".to_string(), e.to_string())
        })?;

        let flat_shipping = Price::parse(&or_default(flat_shipping, DEFAULT_SHIPPING_FLAT_RATE))
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "AFRICLOTHING_SHIPPING_FLAT_RATE".to_string(),
                    e.to_string(),
                )
            })?;

        let tax_rate = parse_rate(&or_default(tax_rate, DEFAULT_TAX_RATE))
            .map_err(|e| ConfigError::InvalidEnvVar("AFRICLOTHING_TAX_RATE".to_string(), e))?;

        Ok(Self {
            storage_dir,
            storage_key,
            rates: SummaryRates {
                flat_shipping,
                tax_rate,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Use `value` unless it is missing or blank.
fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse a fraction in `[0, 1]`.
fn parse_rate(value: &str) -> Result<Decimal, String> {
    let rate = Decimal::from_str(value.trim()).map_err(|e| e.to_string())?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(format!("must be between 0 and 1 (got {rate})"));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_vars(None, None, None, None).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "africlothing-cart");
        assert_eq!(config.rates.flat_shipping, Price::from_cents(599));
        assert_eq!(config.rates.tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            CartConfig::from_vars(Some(String::new()), Some("  ".to_string()), None, None)
                .unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_vars(
            Some("/tmp/carts".to_string()),
            Some("guest-cart".to_string()),
            Some("0".to_string()),
            Some("0.15".to_string()),
        )
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "guest-cart");
        assert!(config.rates.flat_shipping.is_zero());
        assert_eq!(config.rates.tax_rate, Decimal::new(15, 2));
    }

    #[test]
    fn test_invalid_key() {
        let err = CartConfig::from_vars(None, Some("../cart".to_string()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "AFRICLOTHING_CART_KEY"));
    }

    #[test]
    fn test_invalid_shipping() {
        let err = CartConfig::from_vars(None, None, Some("free".to_string()), None).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "AFRICLOTHING_SHIPPING_FLAT_RATE")
        );
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert!(parse_rate("0").is_ok());
        assert!(parse_rate("1").is_ok());
        assert!(parse_rate("1.5").is_err());
        assert!(parse_rate("-0.1").is_err());
        assert!(parse_rate("eight").is_err());
    }
}
