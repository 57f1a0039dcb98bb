//! # Domain Types
//!
//! Core domain types for the pricing/quoting engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ RentalDuration  │   │   ProductKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  SixMonths      │   │  Rental         │       │
//! │  │  sku (business) │   │  TwelveMonths   │   │  Sale           │       │
//! │  │  unit price HT  │   │  TwentyFour...  │   └─────────────────┘       │
//! │  │  stock quantity │   │  ThirtySix...   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Catalog = caller-supplied snapshot, arena-style lookup by product id  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! The engine never fetches a product itself. Selection lines hold a weak
//! product reference (the id) and every derivation resolves it against a
//! [`Catalog`] snapshot handed in by the caller. Stock figures in that
//! snapshot may be stale; the caller re-validates against a fresh snapshot
//! before final submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Product Kind
// =============================================================================

/// How a product reaches the customer.
///
/// The kind decides which selection container may hold the product: rental
/// items go to the quote list, sale items go to the cart. The check is
/// exhaustive at every container boundary, never a runtime assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Rented for a contracted number of months (quote list).
    Rental,
    /// Sold outright (cart).
    Sale,
}

// =============================================================================
// Rental Duration
// =============================================================================

/// Contract lengths offered for rental products.
///
/// A closed set: a duration outside it is unrepresentable, so a quote line
/// can never carry an arbitrary length. The variants order ascending, which
/// is also the order tiers are presented to administrators (cosmetic only,
/// tiers are independent of each other).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RentalDuration {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
    ThirtySixMonths,
}

impl RentalDuration {
    /// All durations, ascending.
    pub const ALL: [RentalDuration; 4] = [
        RentalDuration::SixMonths,
        RentalDuration::TwelveMonths,
        RentalDuration::TwentyFourMonths,
        RentalDuration::ThirtySixMonths,
    ];

    /// Contract length in months.
    #[inline]
    pub const fn months(&self) -> u32 {
        match self {
            RentalDuration::SixMonths => 6,
            RentalDuration::TwelveMonths => 12,
            RentalDuration::TwentyFourMonths => 24,
            RentalDuration::ThirtySixMonths => 36,
        }
    }

    /// Parses a month count coming from a form or an API payload.
    ///
    /// Returns `None` for lengths the storefront does not offer.
    pub fn from_months(months: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.months() == months)
    }
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, read-only input to this engine.
///
/// Owned by the catalog subsystem; this crate never writes it back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in the storefront and on quotes.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Unit price, tax-exclusive, in the deployment's base currency unit.
    pub unit_price_exclusive: f64,

    /// Available stock in this snapshot.
    pub stock_quantity: i64,

    /// Below this level the storefront shows a "low stock" badge.
    pub low_stock_threshold: i64,

    /// Rental or sale; decides the admissible selection container.
    pub kind: ProductKind,

    /// Whether product is visible in the storefront (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether any stock remains in this snapshot.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether the remaining stock sits at or below the display threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.low_stock_threshold
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// A caller-supplied snapshot of catalog products, keyed by product id.
///
/// Selection containers store only product ids; totals resolve them here at
/// computation time. Building the snapshot (from a database, a cache, an
/// HTTP call) is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Catalog {
            products: HashMap::new(),
        }
    }

    /// Adds or replaces a product in the snapshot.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, product_id: &str) -> CoreResult<&Product> {
        self.product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price_exclusive: 100.0,
            stock_quantity: 5,
            low_stock_threshold: 2,
            kind: ProductKind::Sale,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_duration_months() {
        assert_eq!(RentalDuration::SixMonths.months(), 6);
        assert_eq!(RentalDuration::ThirtySixMonths.months(), 36);
    }

    #[test]
    fn test_duration_from_months() {
        assert_eq!(
            RentalDuration::from_months(24),
            Some(RentalDuration::TwentyFourMonths)
        );
        assert_eq!(RentalDuration::from_months(7), None);
        assert_eq!(RentalDuration::from_months(0), None);
    }

    #[test]
    fn test_duration_ordering_is_ascending() {
        let mut all = RentalDuration::ALL;
        all.sort();
        assert_eq!(all, RentalDuration::ALL);
        assert!(RentalDuration::SixMonths < RentalDuration::ThirtySixMonths);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(RentalDuration::TwelveMonths.to_string(), "12 months");
    }

    #[test]
    fn test_low_stock() {
        let mut product = test_product("1");
        assert!(!product.is_low_stock());

        product.stock_quantity = 2;
        assert!(product.is_low_stock());
        assert!(product.in_stock());

        product.stock_quantity = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog: Catalog = [test_product("a"), test_product("b")].into_iter().collect();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.product("a").is_some());
        assert!(catalog.product("missing").is_none());
        assert!(matches!(
            catalog.require("missing"),
            Err(CoreError::ProductNotFound(_))
        ));
    }
}
