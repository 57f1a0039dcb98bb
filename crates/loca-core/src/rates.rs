//! # Rental Duration Price Table
//!
//! Per-product rental pricing, configured by an administrator.
//!
//! ## Pricing Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Duration-Tiered Rental Pricing                          │
//! │                                                                         │
//! │  Product "Scissor lift 12m"                                             │
//! │  ┌───────────┬──────────────┬────────────────────┐                     │
//! │  │ Duration  │ Monthly fee  │ Upfront contribution│                     │
//! │  ├───────────┼──────────────┼────────────────────┤                     │
//! │  │ 12 months │       450.00 │             500.00 │                     │
//! │  │ 24 months │       350.00 │               0.00 │                     │
//! │  └───────────┴──────────────┴────────────────────┘                     │
//! │                                                                         │
//! │  quote(12 months) → total HT = 450 × 12 + 500 = 5900                   │
//! │                     total TTC = 5900 × 1.20    = 7080                  │
//! │                                                                         │
//! │  Tiers are INDEPENDENT, not cumulative: each duration prices the       │
//! │  whole contract on its own. At most one tier per (product, duration).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A duration with no tier is not priced at all: quoting it fails with
//! `TierNotFound`, and a quote line referencing it is rejected at admission
//! time rather than silently defaulted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{to_inclusive, TaxRate};
use crate::types::RentalDuration;
use crate::validation::validate_fee;

// =============================================================================
// Rate Tier
// =============================================================================

/// One pricing record: what a given contract length costs per month, plus an
/// optional one-off contribution due at contract start.
///
/// Both amounts are tax-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateTier {
    /// Contract length this tier prices.
    pub duration: RentalDuration,

    /// Fee charged per month, tax-exclusive.
    pub monthly_fee: f64,

    /// One-off contribution at contract start, tax-exclusive.
    #[serde(default)]
    pub upfront_contribution: f64,
}

/// Fully-priced quote for one (product, duration) pair.
///
/// All amounts are unrounded; the display layer rounds once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierQuote {
    pub monthly_fee: f64,
    pub upfront_contribution: f64,
    /// `monthly_fee × months + upfront_contribution`
    pub total_exclusive: f64,
    /// `total_exclusive` converted at the supplied tax rate.
    pub total_inclusive: f64,
}

// =============================================================================
// Rate Card (one product)
// =============================================================================

/// The set of rate tiers configured for a single product.
///
/// ## Invariants
/// - At most one tier per duration (upsert semantics)
/// - Tiers are kept sorted by ascending duration; the order is cosmetic
///   (admin presentation) and carries no pricing meaning
/// - A product may have zero tiers (not yet priced by the administrator)
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateCard {
    /// Product this card prices.
    pub product_id: String,

    /// Tiers, ascending by duration.
    tiers: Vec<RateTier>,
}

impl RateCard {
    /// Creates an empty card for a product.
    pub fn new(product_id: impl Into<String>) -> Self {
        RateCard {
            product_id: product_id.into(),
            tiers: Vec::new(),
        }
    }

    /// Adds or replaces the tier for a duration.
    ///
    /// ## Rules
    /// - Negative fees are rejected with a validation error
    /// - An existing tier for the same duration is replaced, never duplicated
    pub fn upsert_tier(
        &mut self,
        duration: RentalDuration,
        monthly_fee: f64,
        upfront_contribution: f64,
    ) -> CoreResult<()> {
        validate_fee("monthly fee", monthly_fee)?;
        validate_fee("upfront contribution", upfront_contribution)?;

        let tier = RateTier {
            duration,
            monthly_fee,
            upfront_contribution,
        };

        match self.tiers.iter_mut().find(|t| t.duration == duration) {
            Some(existing) => *existing = tier,
            None => {
                let at = self
                    .tiers
                    .iter()
                    .position(|t| t.duration > duration)
                    .unwrap_or(self.tiers.len());
                self.tiers.insert(at, tier);
            }
        }

        Ok(())
    }

    /// Removes the tier for a duration. Returns whether a tier was removed.
    ///
    /// Live quote lines referencing the removed duration are not reconciled
    /// here; they surface `TierNotFound` the next time totals are derived.
    pub fn remove_tier(&mut self, duration: RentalDuration) -> bool {
        let before = self.tiers.len();
        self.tiers.retain(|t| t.duration != duration);
        self.tiers.len() != before
    }

    /// Looks up the tier for a duration.
    pub fn tier(&self, duration: RentalDuration) -> Option<&RateTier> {
        self.tiers.iter().find(|t| t.duration == duration)
    }

    /// Whether a duration is priced on this card.
    pub fn has_tier(&self, duration: RentalDuration) -> bool {
        self.tier(duration).is_some()
    }

    /// Tiers in ascending duration order (admin presentation order).
    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// Checks if no tier is configured yet.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Prices a full contract for a duration.
    ///
    /// `total_exclusive = monthly_fee × months + upfront_contribution`,
    /// `total_inclusive = to_inclusive(total_exclusive, tax_rate)`.
    ///
    /// Fails with `TierNotFound` when the duration has no tier.
    pub fn quote(&self, duration: RentalDuration, tax_rate: TaxRate) -> CoreResult<TierQuote> {
        let tier = self.tier(duration).ok_or_else(|| CoreError::TierNotFound {
            product_id: self.product_id.clone(),
            duration,
        })?;

        let total_exclusive =
            tier.monthly_fee * duration.months() as f64 + tier.upfront_contribution;

        Ok(TierQuote {
            monthly_fee: tier.monthly_fee,
            upfront_contribution: tier.upfront_contribution,
            total_exclusive,
            total_inclusive: to_inclusive(total_exclusive, tax_rate),
        })
    }
}

// =============================================================================
// Rate Book (all products)
// =============================================================================

/// Rate cards for the whole catalog, keyed by product id.
///
/// The in-memory image of the external tier store (keyed by
/// `(product_id, duration)`); quote-list totals resolve each line against a
/// book snapshot supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    cards: HashMap<String, RateCard>,
}

impl RateBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        RateBook {
            cards: HashMap::new(),
        }
    }

    /// Looks up a product's rate card.
    pub fn card(&self, product_id: &str) -> Option<&RateCard> {
        self.cards.get(product_id)
    }

    /// Adds or replaces a tier, creating the product's card on first use.
    pub fn upsert_tier(
        &mut self,
        product_id: &str,
        duration: RentalDuration,
        monthly_fee: f64,
        upfront_contribution: f64,
    ) -> CoreResult<()> {
        self.cards
            .entry(product_id.to_string())
            .or_insert_with(|| RateCard::new(product_id))
            .upsert_tier(duration, monthly_fee, upfront_contribution)
    }

    /// Removes a tier. Returns whether a tier was removed.
    pub fn remove_tier(&mut self, product_id: &str, duration: RentalDuration) -> bool {
        self.cards
            .get_mut(product_id)
            .map(|card| card.remove_tier(duration))
            .unwrap_or(false)
    }

    /// Looks up one tier.
    pub fn tier(&self, product_id: &str, duration: RentalDuration) -> Option<&RateTier> {
        self.card(product_id).and_then(|card| card.tier(duration))
    }

    /// Whether the duration is priced for the product.
    pub fn has_tier(&self, product_id: &str, duration: RentalDuration) -> bool {
        self.tier(product_id, duration).is_some()
    }

    /// Prices a full contract for a (product, duration) pair.
    ///
    /// A product with no card at all fails `TierNotFound` the same way an
    /// unpriced duration does.
    pub fn quote(
        &self,
        product_id: &str,
        duration: RentalDuration,
        tax_rate: TaxRate,
    ) -> CoreResult<TierQuote> {
        match self.card(product_id) {
            Some(card) => card.quote(duration, tax_rate),
            None => Err(CoreError::TierNotFound {
                product_id: product_id.to_string(),
                duration,
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
