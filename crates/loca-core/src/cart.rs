//! # Cart
//!
//! The sale-side selection container: one-time purchases with subtotal, tax,
//! threshold-based shipping and grand total.
//!
//! ## Totals Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                                                   │
//! │  ├── Pallet truck      x3        300.00 HT                              │
//! │  ├── Strapping kit     x6        600.00 HT                              │
//! │  ├──────────────────────────────────────                                │
//! │  │   Subtotal (HT)               900.00                                 │
//! │  │   Tax (20%)                   180.00                                 │
//! │  │   Shipping                     50.00   (waived from 1000.00 HT)      │
//! │  │   ──────────────────────────────────                                 │
//! │  │   TOTAL (TTC)                1130.00                                 │
//! │  └── "Add 100.00 more for free shipping"                                │
//! │                                                                         │
//! │  Totals are derived on read against a catalog snapshot, never stored.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shipping fee and the free-shipping threshold are injected through
//! [`CheckoutPolicy`], not hard-coded, so deployments can vary them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{tax_on, TaxRate};
use crate::selection::{Selection, SelectionLine};
use crate::types::{Catalog, Product, ProductKind};

// =============================================================================
// Checkout Policy
// =============================================================================

/// Deployment-level checkout parameters, injected into every cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutPolicy {
    /// Tax rate applied to the subtotal.
    pub tax_rate: TaxRate,

    /// Flat shipping fee, tax treatment included in the amount.
    pub shipping_fee: f64,

    /// Subtotal (tax-exclusive) from which shipping is waived.
    pub free_shipping_threshold: f64,
}

impl Default for CheckoutPolicy {
    /// Development defaults: 20% tax, 50.00 shipping, waived from 1000.00 HT.
    fn default() -> Self {
        CheckoutPolicy {
            tax_rate: TaxRate::standard(),
            shipping_fee: 50.0,
            free_shipping_threshold: 1000.0,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The sale-side selection container.
///
/// ## Invariants
/// - Holds sale products only; rental products are rejected at the boundary
/// - Lines are unique by product id (re-adding increments the quantity)
/// - Every mutation is stock-validated against the resulting quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    policy: CheckoutPolicy,
    selection: Selection,
}

impl Cart {
    /// Creates an empty cart under the given checkout policy.
    pub fn new(policy: CheckoutPolicy) -> Self {
        Cart {
            policy,
            selection: Selection::new(ProductKind::Sale),
        }
    }

    /// The policy this cart prices under.
    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    // -------------------------------------------------------------------------
    // Mutations (all-or-nothing, see selection.rs)
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a sale product, merging into an existing
    /// line. The stock check sees the resulting total, not the increment.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.selection.add(product, quantity, None)
    }

    /// Replaces a line's quantity; `quantity <= 0` removes the line.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.selection.set_quantity(product, quantity)
    }

    /// Deletes a line if present; no-op when absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        self.selection.remove(product_id)
    }

    /// Empties the cart unconditionally.
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

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    // -------------------------------------------------------------------------
    // Derived totals (re-derived on every read, never cached)
    // -------------------------------------------------------------------------

    /// Sum of `unit_price × quantity` over all lines, tax-exclusive.
    ///
    /// A line whose product is missing from the snapshot fails the whole
    /// derivation with `ProductNotFound`; it is never silently skipped.
    pub fn subtotal_exclusive(&self, catalog: &Catalog) -> CoreResult<f64> {
        let mut subtotal = 0.0;
        for line in self.selection.lines() {
            let product = catalog.require(&line.product_id)?;
            subtotal += product.unit_price_exclusive * line.quantity as f64;
        }
        Ok(subtotal)
    }

    /// Tax owed on the subtotal.
    pub fn tax(&self, catalog: &Catalog) -> CoreResult<f64> {
        Ok(tax_on(self.subtotal_exclusive(catalog)?, self.policy.tax_rate))
    }

    /// Shipping owed for a given subtotal. An empty cart ships nothing and
    /// costs nothing; otherwise the flat fee applies until the threshold.
    fn shipping_for(&self, subtotal_exclusive: f64) -> f64 {
        if self.is_empty() || subtotal_exclusive >= self.policy.free_shipping_threshold {
            0.0
        } else {
            self.policy.shipping_fee
        }
    }

    /// Flat shipping fee, waived once the subtotal reaches the free-shipping
    /// threshold.
    pub fn shipping_cost(&self, catalog: &Catalog) -> CoreResult<f64> {
        Ok(self.shipping_for(self.subtotal_exclusive(catalog)?))
    }

    /// Grand total: subtotal + tax + shipping.
    pub fn total_inclusive(&self, catalog: &Catalog) -> CoreResult<f64> {
        let subtotal = self.subtotal_exclusive(catalog)?;
        Ok(subtotal + tax_on(subtotal, self.policy.tax_rate) + self.shipping_for(subtotal))
    }

    /// How much more to spend for free shipping; display encouragement only,
    /// no effect on totals.
    pub fn remaining_for_free_shipping(&self, catalog: &Catalog) -> CoreResult<f64> {
        let subtotal = self.subtotal_exclusive(catalog)?;
        Ok((self.policy.free_shipping_threshold - subtotal).max(0.0))
    }

    /// Lines priced against the snapshot, for display and submission.
    pub fn priced_lines(&self, catalog: &Catalog) -> CoreResult<Vec<CartLine>> {
        self.selection
            .lines()
            .iter()
            .map(|line| {
                let product = catalog.require(&line.product_id)?;
                Ok(CartLine {
                    product_id: line.product_id.clone(),
                    sku: product.sku.clone(),
                    name: product.name.clone(),
                    quantity: line.quantity,
                    unit_price_exclusive: product.unit_price_exclusive,
                    line_total_exclusive: product.unit_price_exclusive * line.quantity as f64,
                })
            })
            .collect()
    }

    /// All totals in one pass, for the storefront cart panel.
    pub fn totals(&self, catalog: &Catalog) -> CoreResult<CartTotals> {
        let subtotal_exclusive = self.subtotal_exclusive(catalog)?;
        let tax = tax_on(subtotal_exclusive, self.policy.tax_rate);
        let shipping = self.shipping_for(subtotal_exclusive);

        Ok(CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal_exclusive,
            tax,
            shipping,
            total_inclusive: subtotal_exclusive + tax + shipping,
            remaining_for_free_shipping: (self.policy.free_shipping_threshold
                - subtotal_exclusive)
                .max(0.0),
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new(CheckoutPolicy::default())
    }
}

// =============================================================================
// Priced Views
// =============================================================================

/// A cart line resolved against a catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_exclusive: f64,
    pub line_total_exclusive: f64,
}

/// Cart totals summary for the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_exclusive: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total_inclusive: f64,
    pub remaining_for_free_shipping: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::Utc;

    const EPS: f64 = 1e-9;

    fn sale_product(id: &str, price: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price_exclusive: price,
            stock_quantity: stock,
            low_stock_threshold: 2,
            kind: ProductKind::Sale,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rental_product(id: &str) -> Product {
        Product {
            kind: ProductKind::Rental,
            ..sale_product(id, 100.0, 5)
        }
    }

    #[test]
    fn test_repeated_adds_cannot_exceed_stock() {
        // stock=5, unitPrice=100, taxRate=0.20
        let p = sale_product("p", 100.0, 5);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::new(CheckoutPolicy {
            tax_rate: TaxRate::from_rate(0.20),
            ..CheckoutPolicy::default()
        });

        cart.add(&p, 3).unwrap();
        let err = cart.add(&p, 3).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // Cart unchanged at quantity 3
        assert_eq!(cart.line("p").unwrap().quantity, 3);
        assert!((cart.subtotal_exclusive(&catalog).unwrap() - 300.0).abs() < EPS);
        assert!((cart.tax(&catalog).unwrap() - 60.0).abs() < EPS);
    }

    #[test]
    fn test_shipping_threshold() {
        // subtotal=900, threshold=1000, fee=50
        let p = sale_product("p", 100.0, 20);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::new(CheckoutPolicy {
            tax_rate: TaxRate::from_rate(0.20),
            shipping_fee: 50.0,
            free_shipping_threshold: 1000.0,
        });

        cart.add(&p, 9).unwrap();
        assert!((cart.shipping_cost(&catalog).unwrap() - 50.0).abs() < EPS);
        assert!((cart.remaining_for_free_shipping(&catalog).unwrap() - 100.0).abs() < EPS);

        // One more unit reaches the threshold exactly
        cart.add(&p, 1).unwrap();
        assert_eq!(cart.shipping_cost(&catalog).unwrap(), 0.0);
        assert_eq!(cart.remaining_for_free_shipping(&catalog).unwrap(), 0.0);
    }

    #[test]
    fn test_total_inclusive_composition() {
        let p = sale_product("p", 100.0, 20);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::default();

        cart.add(&p, 9).unwrap();
        let totals = cart.totals(&catalog).unwrap();

        assert!((totals.subtotal_exclusive - 900.0).abs() < EPS);
        assert!((totals.tax - 180.0).abs() < EPS);
        assert!((totals.shipping - 50.0).abs() < EPS);
        assert!((totals.total_inclusive - 1130.0).abs() < EPS);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_quantity, 9);
    }

    #[test]
    fn test_rental_product_rejected() {
        let rental = rental_product("r");
        let mut cart = Cart::default();

        let err = cart.add(&rental, 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductKindMismatch { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_yields_zero_totals() {
        let p = sale_product("p", 100.0, 20);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::default();

        cart.add(&p, 3).unwrap();
        cart.clear();

        let totals = cart.totals(&catalog).unwrap();
        assert_eq!(totals.subtotal_exclusive, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.shipping, 0.0);
        assert_eq!(totals.total_inclusive, 0.0);
        assert_eq!(totals.line_count, 0);
    }

    #[test]
    fn test_missing_product_fails_derivation() {
        let p = sale_product("p", 100.0, 20);
        let mut cart = Cart::default();
        cart.add(&p, 1).unwrap();

        // Snapshot without the product: error, not a silent skip
        let empty = Catalog::new();
        assert!(matches!(
            cart.subtotal_exclusive(&empty),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_priced_lines() {
        let a = sale_product("a", 100.0, 20);
        let b = sale_product("b", 25.5, 20);
        let catalog: Catalog = [a.clone(), b.clone()].into_iter().collect();
        let mut cart = Cart::default();

        cart.add(&a, 2).unwrap();
        cart.add(&b, 4).unwrap();

        let lines = cart.priced_lines(&catalog).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, "a");
        assert!((lines[0].line_total_exclusive - 200.0).abs() < EPS);
        assert!((lines[1].line_total_exclusive - 102.0).abs() < EPS);
    }

    #[test]
    fn test_views_serialize_camel_case() {
        let totals = CartTotals {
            line_count: 0,
            total_quantity: 0,
            subtotal_exclusive: 0.0,
            tax: 0.0,
            shipping: 0.0,
            total_inclusive: 0.0,
            remaining_for_free_shipping: 0.0,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert!(json.get("subtotalExclusive").is_some());
        assert!(json.get("remainingForFreeShipping").is_some());
    }
}
