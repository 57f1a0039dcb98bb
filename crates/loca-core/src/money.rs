//! # Money Module
//!
//! Tax-exclusive / tax-inclusive conversion (HT / TTC in the storefront UI).
//!
//! ## Why Unrounded f64?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  Rounding inside the engine compounds across multi-line totals:        │
//! │    round(a·t) + round(b·t) ≠ round((a+b)·t)   for many a, b            │
//! │                                                                         │
//! │  OUR RULE: the engine never rounds.                                    │
//! │    Every total leaves this crate as a raw amount in the deployment's   │
//! │    base currency unit. The display layer rounds exactly once           │
//! │    (StorefrontConfig::format_price in loca-session).                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use loca_core::money::{to_exclusive, to_inclusive, TaxRate};
//!
//! let rate = TaxRate::standard(); // 20% for this deployment
//!
//! let ttc = to_inclusive(100.0, rate);
//! assert_eq!(ttc, 120.0);
//!
//! let ht = to_exclusive(ttc, rate);
//! assert!((ht - 100.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::STANDARD_TAX_RATE;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a fraction of the tax-exclusive amount.
///
/// `TaxRate::from_rate(0.20)` is 20% (the French TVA rate this deployment
/// runs under). The rate is always passed as a parameter to the conversion
/// functions rather than read from a global, so tests can vary it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a fraction (0.20 = 20%).
    #[inline]
    pub const fn from_rate(rate: f64) -> Self {
        TaxRate(rate)
    }

    /// Creates a tax rate from a percentage (20.0 = 20%).
    #[inline]
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate(pct / 100.0)
    }

    /// The deployment's standard rate.
    #[inline]
    pub const fn standard() -> Self {
        TaxRate(STANDARD_TAX_RATE)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn rate(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Checks if the tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::standard()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts a tax-exclusive amount to its tax-inclusive counterpart.
///
/// `amount_inclusive = amount_exclusive * (1 + rate)`
///
/// ## Example
/// ```rust
/// use loca_core::money::{to_inclusive, TaxRate};
///
/// let ttc = to_inclusive(450.0, TaxRate::from_rate(0.20));
/// assert_eq!(ttc, 540.0);
/// ```
#[inline]
pub fn to_inclusive(amount_exclusive: f64, rate: TaxRate) -> f64 {
    amount_exclusive * (1.0 + rate.rate())
}

/// Converts a tax-inclusive amount back to its tax-exclusive counterpart.
///
/// `amount_exclusive = amount_inclusive / (1 + rate)`
#[inline]
pub fn to_exclusive(amount_inclusive: f64, rate: TaxRate) -> f64 {
    amount_inclusive / (1.0 + rate.rate())
}

/// Tax owed on a tax-exclusive amount.
///
/// `tax = amount_exclusive * rate`
///
/// Kept separate from [`to_inclusive`] so cart totals can report the tax
/// line on its own.
#[inline]
pub fn tax_on(amount_exclusive: f64, rate: TaxRate) -> f64 {
    amount_exclusive * rate.rate()
}

// =============================================================================
// Unit Tests
// =============================================================================
