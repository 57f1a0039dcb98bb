//! # Storefront Configuration
//!
//! Deployment configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LOCA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.
//!
//! ## Rounding Boundary
//! The engine hands out unrounded amounts; `format_price` is the single
//! place a number is rounded, at display time.

use serde::{Deserialize, Serialize};

use loca_core::{CheckoutPolicy, TaxRate};

/// Storefront configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Store name (displayed in the storefront header and on requests)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tax rate applied at checkout
    pub tax_rate: TaxRate,

    /// Flat shipping fee for sale orders
    pub shipping_fee: f64,

    /// Tax-exclusive subtotal from which shipping is waived
    pub free_shipping_threshold: f64,
}

impl Default for StorefrontConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "LocaKit Dev Store"
    /// - Currency: EUR (€)
    /// - Tax: 20% (French TVA)
    /// - Shipping: 50.00, waived from 1000.00 HT
    fn default() -> Self {
        StorefrontConfig {
            store_name: "LocaKit Dev Store".to_string(),
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            currency_decimals: 2,
            tax_rate: TaxRate::standard(),
            shipping_fee: 50.0,
            free_shipping_threshold: 1000.0,
        }
    }
}

impl StorefrontConfig {
    /// Creates a new StorefrontConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LOCA_STORE_NAME`: Override store name
    /// - `LOCA_TAX_RATE`: Override tax rate as a percentage (e.g., "20")
    /// - `LOCA_SHIPPING_FEE`: Override the flat shipping fee
    /// - `LOCA_FREE_SHIPPING_THRESHOLD`: Override the waiver threshold
    pub fn from_env() -> Self {
        let mut config = StorefrontConfig::default();

        if let Ok(store_name) = std::env::var("LOCA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(rate_str) = std::env::var("LOCA_TAX_RATE") {
            if let Ok(pct) = rate_str.parse::<f64>() {
                config.tax_rate = TaxRate::from_percentage(pct);
            }
        }

        if let Ok(fee_str) = std::env::var("LOCA_SHIPPING_FEE") {
            if let Ok(fee) = fee_str.parse::<f64>() {
                config.shipping_fee = fee;
            }
        }

        if let Ok(threshold_str) = std::env::var("LOCA_FREE_SHIPPING_THRESHOLD") {
            if let Ok(threshold) = threshold_str.parse::<f64>() {
                config.free_shipping_threshold = threshold;
            }
        }

        config
    }

    /// The checkout parameters handed to every new cart.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: self.tax_rate,
            shipping_fee: self.shipping_fee,
            free_shipping_threshold: self.free_shipping_threshold,
        }
    }

    /// Formats an amount as a currency string.
    ///
    /// This is the display-time rounding point; nothing upstream rounds.
    ///
    /// ## Example
    /// ```rust
    /// use loca_session::config::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_price(1234.5), "€1234.50");
    /// ```
    pub fn format_price(&self, amount: f64) -> String {
        format!(
            "{}{}{:.*}",
            if amount < 0.0 { "-" } else { "" },
            self.currency_symbol,
            self.currency_decimals as usize,
            amount.abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.tax_rate, TaxRate::standard());
        assert_eq!(config.shipping_fee, 50.0);
        assert_eq!(config.free_shipping_threshold, 1000.0);
    }

    #[test]
    fn test_checkout_policy_mirrors_config() {
        let config = StorefrontConfig {
            shipping_fee: 25.0,
            free_shipping_threshold: 500.0,
            ..StorefrontConfig::default()
        };
        let policy = config.checkout_policy();
        assert_eq!(policy.shipping_fee, 25.0);
        assert_eq!(policy.free_shipping_threshold, 500.0);
        assert_eq!(policy.tax_rate, config.tax_rate);
    }

    #[test]
    fn test_format_price_rounds_at_display() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_price(1234.5), "€1234.50");
        assert_eq!(config.format_price(40.002), "€40.00");
        assert_eq!(config.format_price(40.006), "€40.01");
        assert_eq!(config.format_price(0.0), "€0.00");
    }

    #[test]
    fn test_format_price_negative() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_price(-5.5), "-€5.50");
    }
}
