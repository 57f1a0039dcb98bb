//! # Selection Lines
//!
//! Shared mechanics behind the two selection containers (cart and quote
//! list): an ordered sequence of lines, unique by product id, mutated only
//! through operations that validate fully before touching any state.
//!
//! ## Mutation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every mutation is all-or-nothing                     │
//! │                                                                         │
//! │  add(product, qty, duration?)                                           │
//! │       │                                                                 │
//! │       ├── container kind == product kind?        ProductKindMismatch   │
//! │       ├── duration present iff rental?           DurationRequired /    │
//! │       │                                          DurationNotAllowed    │
//! │       ├── qty == 0 → no-op, qty < 0?             InvalidQuantity       │
//! │       ├── existing + qty within line max?        QuantityTooLarge      │
//! │       ├── existing + qty within stock snapshot?  InsufficientStock     │
//! │       ├── room for a new line?                   SelectionTooLarge     │
//! │       │                                                                 │
//! │       └── only now: mutate                                              │
//! │                                                                         │
//! │  The stock check always sees the RESULTING quantity, so stock cannot   │
//! │  be exceeded through repeated small additions.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines hold a weak product reference (the id) and never a price; prices
//! are resolved at computation time by the owning container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::stock::ensure_available;
use crate::types::{Product, ProductKind, RentalDuration};
use crate::{MAX_LINE_QUANTITY, MAX_SELECTION_LINES};

// =============================================================================
// Selection Line
// =============================================================================

/// One line of a selection container.
///
/// Owned exclusively by its container; created on first add, destroyed when
/// its quantity would drop to zero or on explicit removal.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionLine {
    /// Weak reference to the product (resolved against a catalog snapshot).
    pub product_id: String,

    /// Units selected, always >= 1.
    pub quantity: i64,

    /// Chosen contract duration; `Some` on rental lines only.
    pub duration: Option<RentalDuration>,

    /// When this line was created.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Selection
// =============================================================================

/// Ordered, unique-by-product line set shared by `Cart` and `QuoteList`.
///
/// Container-specific rules (tier admission, checkout policy) live in the
/// wrapping types; this struct enforces everything both containers share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Selection {
    /// Which product kind this container admits.
    kind: ProductKind,

    /// Lines in insertion order.
    lines: Vec<SelectionLine>,

    /// When the selection was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Selection {
    pub(crate) fn new(kind: ProductKind) -> Self {
        Selection {
            kind,
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    pub(crate) fn line(&self, product_id: &str) -> Option<&SelectionLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub(crate) fn lines(&self) -> &[SelectionLine] {
        &self.lines
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adds `quantity` units of a product, merging into an existing line.
    ///
    /// `quantity == 0` is a no-op (the net effect is unchanged), not an
    /// error. When the product is already selected, the supplied duration is
    /// ignored and the line keeps its chosen one; `set_duration` is the way
    /// to change it.
    pub(crate) fn add(
        &mut self,
        product: &Product,
        quantity: i64,
        duration: Option<RentalDuration>,
    ) -> CoreResult<()> {
        if product.kind != self.kind {
            return Err(CoreError::ProductKindMismatch {
                product_id: product.id.clone(),
                expected: self.kind,
                actual: product.kind,
            });
        }

        match (self.kind, duration) {
            (ProductKind::Rental, None) => {
                return Err(CoreError::DurationRequired {
                    product_id: product.id.clone(),
                })
            }
            (ProductKind::Sale, Some(_)) => {
                return Err(CoreError::DurationNotAllowed {
                    product_id: product.id.clone(),
                })
            }
            _ => {}
        }

        if quantity < 0 {
            return Err(CoreError::InvalidQuantity {
                requested: quantity as f64,
            });
        }
        if quantity == 0 {
            return Ok(());
        }

        let existing = self.position(&product.id);
        let held = existing.map(|i| self.lines[i].quantity).unwrap_or(0);
        let resulting = held + quantity;

        if resulting > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: resulting,
                max: MAX_LINE_QUANTITY,
            });
        }
        ensure_available(product, resulting)?;

        match existing {
            Some(i) => self.lines[i].quantity = resulting,
            None => {
                if self.lines.len() >= MAX_SELECTION_LINES {
                    return Err(CoreError::SelectionTooLarge {
                        max: MAX_SELECTION_LINES,
                    });
                }
                self.lines.push(SelectionLine {
                    product_id: product.id.clone(),
                    quantity,
                    duration,
                    added_at: Utc::now(),
                });
            }
        }

        Ok(())
    }

    /// Replaces a line's quantity outright.
    ///
    /// `quantity <= 0` is equivalent to removal. Either the full new
    /// quantity passes the stock check or the line keeps its prior value.
    pub(crate) fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(&product.id);
            return Ok(());
        }

        let i = self
            .position(&product.id)
            .ok_or_else(|| CoreError::LineNotFound {
                product_id: product.id.clone(),
            })?;

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        ensure_available(product, quantity)?;

        self.lines[i].quantity = quantity;
        Ok(())
    }

    /// Replaces a line's chosen duration. Tier admission is the quote
    /// list's responsibility, checked before this is called.
    pub(crate) fn set_duration(
        &mut self,
        product_id: &str,
        duration: RentalDuration,
    ) -> CoreResult<()> {
        let i = self
            .position(product_id)
            .ok_or_else(|| CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })?;

        self.lines[i].duration = Some(duration);
        Ok(())
    }

    /// Deletes a line if present; absent lines are a no-op, not an error.
    pub(crate) fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Empties all lines unconditionally.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
