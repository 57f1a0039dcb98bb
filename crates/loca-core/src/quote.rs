//! # Quote List
//!
//! The rental-side selection container (the storefront's "needs list"): each
//! line carries a chosen contract duration, and totals come from the
//! product's rate card rather than a unit price.
//!
//! ## Admission & Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(product, qty, duration)                                            │
//! │       │                                                                 │
//! │       ├── product.kind == Rental?        ProductKindMismatch            │
//! │       ├── duration priced on the card?   TierNotFound (at ADMISSION)   │
//! │       └── shared checks (stock, caps)    see selection.rs               │
//! │                                                                         │
//! │  totals(rate_book)                                                      │
//! │       │                                                                 │
//! │       ├── every line's tier still configured?                           │
//! │       │        no → TierNotFound (LAZY: tier removed after admission)  │
//! │       │                                                                 │
//! │       └── monthly estimate = Σ monthly_fee × qty                        │
//! │           upfront total    = Σ upfront_contribution × qty               │
//! │                                                                         │
//! │  All-or-nothing: a single unpriced line fails the whole derivation     │
//! │  rather than being silently excluded from the total.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::rates::RateBook;
use crate::selection::{Selection, SelectionLine};
use crate::types::{Product, ProductKind, RentalDuration};

// =============================================================================
// Quote List
// =============================================================================

/// The rental-side selection container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteList {
    selection: Selection,
}

impl QuoteList {
    /// Creates an empty quote list.
    pub fn new() -> Self {
        QuoteList {
            selection: Selection::new(ProductKind::Rental),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations (all-or-nothing)
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a rental product for a contract duration.
    ///
    /// The duration must be priced on the product's rate card at admission
    /// time; an unpriced duration is rejected, never defaulted. When the
    /// product is already listed the quantity merges and the line keeps its
    /// previously chosen duration.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: i64,
        duration: RentalDuration,
        rates: &RateBook,
    ) -> CoreResult<()> {
        if product.kind != ProductKind::Rental {
            return Err(CoreError::ProductKindMismatch {
                product_id: product.id.clone(),
                expected: ProductKind::Rental,
                actual: product.kind,
            });
        }
        if quantity == 0 {
            // Net effect unchanged; skip the tier check a no-op doesn't need
            return Ok(());
        }
        if !rates.has_tier(&product.id, duration) {
            return Err(CoreError::TierNotFound {
                product_id: product.id.clone(),
                duration,
            });
        }

        self.selection.add(product, quantity, Some(duration))
    }

    /// Replaces a line's quantity; `quantity <= 0` removes the line.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.selection.set_quantity(product, quantity)
    }

    /// Replaces a line's chosen duration, revalidating against the rate
    /// book. Fails with `TierNotFound` when the product has no tier for the
    /// new duration; the line keeps its previous duration.
    pub fn set_duration(
        &mut self,
        product_id: &str,
        duration: RentalDuration,
        rates: &RateBook,
    ) -> CoreResult<()> {
        if self.selection.line(product_id).is_none() {
            return Err(CoreError::LineNotFound {
                product_id: product_id.to_string(),
            });
        }
        if !rates.has_tier(product_id, duration) {
            return Err(CoreError::TierNotFound {
                product_id: product_id.to_string(),
                duration,
            });
        }

        self.selection.set_duration(product_id, duration)
    }

    /// Deletes a line if present; no-op when absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        self.selection.remove(product_id)
    }

    /// Empties the quote list unconditionally.
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lines in insertion order.
    pub fn lines(&self) -> &[SelectionLine] {
        self.selection.lines()
    }

    /// Looks up one line.
    pub fn line(&self, product_id: &str) -> Option<&SelectionLine> {
        self.selection.line(product_id)
    }

    /// Number of unique lines.
    pub fn line_count(&self) -> usize {
        self.selection.len()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> i64 {
        self.selection.total_quantity()
    }

    /// Checks if the quote list is empty.
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    // -------------------------------------------------------------------------
    // Derived totals (re-derived on every read, never cached)
    // -------------------------------------------------------------------------

    /// Lines priced against the rate book.
    ///
    /// All-or-nothing: a line whose duration no longer resolves to a tier
    /// (removed after the line was created) fails the whole derivation with
    /// `TierNotFound` instead of being dropped from the result.
    pub fn priced_lines(&self, rates: &RateBook) -> CoreResult<Vec<QuotedLine>> {
        self.selection
            .lines()
            .iter()
            .map(|line| {
                let duration = line.duration.ok_or_else(|| CoreError::DurationRequired {
                    product_id: line.product_id.clone(),
                })?;
                let tier = rates.tier(&line.product_id, duration).ok_or_else(|| {
                    CoreError::TierNotFound {
                        product_id: line.product_id.clone(),
                        duration,
                    }
                })?;

                Ok(QuotedLine {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    duration,
                    months: duration.months(),
                    monthly_fee: tier.monthly_fee,
                    upfront_contribution: tier.upfront_contribution,
                    line_monthly: tier.monthly_fee * line.quantity as f64,
                    line_upfront: tier.upfront_contribution * line.quantity as f64,
                })
            })
            .collect()
    }

    /// Estimated total per month: Σ monthly_fee × quantity.
    pub fn monthly_estimate(&self, rates: &RateBook) -> CoreResult<f64> {
        Ok(self
            .priced_lines(rates)?
            .iter()
            .map(|l| l.line_monthly)
            .sum())
    }

    /// One-off contributions due at contract start: Σ upfront × quantity.
    pub fn upfront_total(&self, rates: &RateBook) -> CoreResult<f64> {
        Ok(self
            .priced_lines(rates)?
            .iter()
            .map(|l| l.line_upfront)
            .sum())
    }

    /// Both estimates in one pass, for the storefront quote panel.
    pub fn totals(&self, rates: &RateBook) -> CoreResult<QuoteTotals> {
        let lines = self.priced_lines(rates)?;
        Ok(QuoteTotals {
            line_count: lines.len(),
            total_quantity: self.total_quantity(),
            monthly_estimate: lines.iter().map(|l| l.line_monthly).sum(),
            upfront_total: lines.iter().map(|l| l.line_upfront).sum(),
        })
    }
}

impl Default for QuoteList {
    fn default() -> Self {
        QuoteList::new()
    }
}

// =============================================================================
// Priced Views
// =============================================================================

/// A quote line resolved against the rate book.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotedLine {
    pub product_id: String,
    pub quantity: i64,
    pub duration: RentalDuration,
    pub months: u32,
    pub monthly_fee: f64,
    pub upfront_contribution: f64,
    pub line_monthly: f64,
    pub line_upfront: f64,
}

/// Quote list totals summary for the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub monthly_estimate: f64,
    pub upfront_total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
