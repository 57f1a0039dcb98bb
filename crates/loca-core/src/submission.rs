//! # Submission Snapshots
//!
//! Finalized, self-contained images of a quote list or cart, ready for the
//! request-capture collaborator.
//!
//! ## Staleness Re-check
//! Stock is validated against whatever snapshot the container saw at
//! mutation time, and stock may have moved since. Building a submission is
//! therefore the designated re-validation point: the caller passes a FRESH
//! catalog snapshot and every line is checked against it again before the
//! request leaves the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine, CartTotals};
use crate::error::{CoreResult, ValidationError};
use crate::quote::{QuoteList, QuoteTotals, QuotedLine};
use crate::rates::RateBook;
use crate::stock::ensure_available;
use crate::types::Catalog;
use crate::validation::{validate_contact_name, validate_email};

// =============================================================================
// Customer Contact
// =============================================================================

/// Contact fields attached to a quote or order request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

impl CustomerContact {
    /// Checks the fields a request cannot leave without.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_contact_name(&self.name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// A finalized quote list, priced and re-validated, plus who is asking.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Request id (UUID v4), minted here.
    pub request_id: String,

    pub contact: CustomerContact,
    pub lines: Vec<QuotedLine>,
    pub totals: QuoteTotals,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl QuoteRequest {
    /// Builds a submission snapshot from the live quote list.
    ///
    /// Validates the contact, re-validates every line against the fresh
    /// catalog snapshot, and re-prices against the current rate book. An
    /// empty quote list cannot be submitted.
    pub fn build(
        quote: &QuoteList,
        catalog: &Catalog,
        rates: &RateBook,
        contact: CustomerContact,
    ) -> CoreResult<Self> {
        contact.validate()?;
        if quote.is_empty() {
            return Err(ValidationError::Required {
                field: "quote lines".to_string(),
            }
            .into());
        }

        for line in quote.lines() {
            let product = catalog.require(&line.product_id)?;
            ensure_available(product, line.quantity)?;
        }

        Ok(QuoteRequest {
            request_id: Uuid::new_v4().to_string(),
            contact,
            lines: quote.priced_lines(rates)?,
            totals: quote.totals(rates)?,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// A finalized cart, priced and re-validated, plus who is buying.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Request id (UUID v4), minted here.
    pub request_id: String,

    pub contact: CustomerContact,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Builds a submission snapshot from the live cart.
    ///
    /// Same contract as [`QuoteRequest::build`]: contact validated, stock
    /// re-checked line by line against the fresh snapshot, empty carts
    /// rejected.
    pub fn build(cart: &Cart, catalog: &Catalog, contact: CustomerContact) -> CoreResult<Self> {
        contact.validate()?;
        if cart.is_empty() {
            return Err(ValidationError::Required {
                field: "cart lines".to_string(),
            }
            .into());
        }

        for line in cart.lines() {
            let product = catalog.require(&line.product_id)?;
            ensure_available(product, line.quantity)?;
        }

        Ok(OrderRequest {
            request_id: Uuid::new_v4().to_string(),
            contact,
            lines: cart.priced_lines(catalog)?,
            totals: cart.totals(catalog)?,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{Product, ProductKind, RentalDuration};

    const EPS: f64 = 1e-9;

    fn contact() -> CustomerContact {
        CustomerContact {
            name: "Marie Dupont".to_string(),
            email: "marie@example.com".to_string(),
            phone: Some("+33 6 12 34 56 78".to_string()),
            company: None,
            message: None,
        }
    }

    fn product(id: &str, kind: ProductKind, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price_exclusive: 100.0,
            stock_quantity: stock,
            low_stock_threshold: 2,
            kind,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_quote_request() {
        let q = product("q", ProductKind::Rental, 10);
        let catalog: Catalog = [q.clone()].into_iter().collect();
        let mut rates = RateBook::new();
        rates
            .upsert_tier("q", RentalDuration::TwelveMonths, 450.0, 500.0)
            .unwrap();

        let mut list = QuoteList::new();
        list.add(&q, 2, RentalDuration::TwelveMonths, &rates).unwrap();

        let request = QuoteRequest::build(&list, &catalog, &rates, contact()).unwrap();
        assert_eq!(request.lines.len(), 1);
        assert!((request.totals.monthly_estimate - 900.0).abs() < EPS);
        assert!(!request.request_id.is_empty());
    }

    #[test]
    fn test_build_order_request() {
        let p = product("p", ProductKind::Sale, 10);
        let catalog: Catalog = [p.clone()].into_iter().collect();

        let mut cart = Cart::default();
        cart.add(&p, 3).unwrap();

        let request = OrderRequest::build(&cart, &catalog, contact()).unwrap();
        assert_eq!(request.lines.len(), 1);
        assert!((request.totals.subtotal_exclusive - 300.0).abs() < EPS);
    }

    #[test]
    fn test_empty_selection_cannot_submit() {
        let catalog = Catalog::new();
        let rates = RateBook::new();

        assert!(matches!(
            QuoteRequest::build(&QuoteList::new(), &catalog, &rates, contact()),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            OrderRequest::build(&Cart::default(), &catalog, contact()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_stale_stock_caught_at_submission() {
        let p = product("p", ProductKind::Sale, 10);
        let mut cart = Cart::default();
        cart.add(&p, 3).unwrap();

        // Stock dropped to 2 since the add; the fresh snapshot says no
        let mut stale = p.clone();
        stale.stock_quantity = 2;
        let fresh: Catalog = [stale].into_iter().collect();

        assert!(matches!(
            OrderRequest::build(&cart, &fresh, contact()),
            Err(CoreError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_invalid_contact_rejected() {
        let p = product("p", ProductKind::Sale, 10);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::default();
        cart.add(&p, 1).unwrap();

        let mut bad = contact();
        bad.email = "not-an-email".to_string();
        assert!(OrderRequest::build(&cart, &catalog, bad).is_err());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let p = product("p", ProductKind::Sale, 10);
        let catalog: Catalog = [p.clone()].into_iter().collect();
        let mut cart = Cart::default();
        cart.add(&p, 1).unwrap();

        let request = OrderRequest::build(&cart, &catalog, contact()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("requestId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["contact"].get("name").is_some());
    }
}
