//! # Session Operations
//!
//! The operations the storefront frontend invokes on a session.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Container Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  Lines   │────►│ Contact  │────►│Submitted │       │
//! │  │container │     │ selected │     │   form   │     │ request  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                 │            │
//! │                   add_to_cart      submit_order /          │            │
//! │                   update_line      submit_quote_request    │            │
//! │                   remove / clear        │                  │            │
//! │                        │                └── success clears ┘            │
//! │                        ▼                    the container               │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation resolves products against the catalog snapshot the caller
//! supplies, mutates under the session's container mutex, and returns either
//! an updated view or a [`SessionError`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use loca_core::contracts::{RequestSink, SubmissionReceipt};
use loca_core::{
    Cart, CartLine, CartTotals, Catalog, CustomerContact, OrderRequest, Product, QuoteList,
    QuoteRequest, QuoteTotals, QuotedLine, RateBook, RentalDuration,
};

use crate::error::SessionError;
use crate::state::{CartState, QuoteState};

// =============================================================================
// Views
// =============================================================================

/// Cart contents and totals, as the storefront panel renders them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Quote list contents and estimates.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub lines: Vec<QuotedLine>,
    pub totals: QuoteTotals,
}

fn view_of_cart(cart: &Cart, catalog: &Catalog) -> Result<CartView, SessionError> {
    Ok(CartView {
        lines: cart.priced_lines(catalog)?,
        totals: cart.totals(catalog)?,
    })
}

fn view_of_quote(quote: &QuoteList, rates: &RateBook) -> Result<QuoteView, SessionError> {
    Ok(QuoteView {
        lines: quote.priced_lines(rates)?,
        totals: quote.totals(rates)?,
    })
}

/// Resolves a product from the snapshot and checks it is still purchasable.
fn resolve_product<'a>(
    catalog: &'a Catalog,
    product_id: &str,
) -> Result<&'a Product, SessionError> {
    let product = catalog
        .product(product_id)
        .ok_or_else(|| SessionError::not_found("Product", product_id))?;

    if !product.is_active {
        return Err(SessionError::validation("Product is no longer available"));
    }

    Ok(product)
}

// =============================================================================
// Cart Operations
// =============================================================================

/// Gets the current cart contents.
pub fn cart_view(cart: &CartState, catalog: &Catalog) -> Result<CartView, SessionError> {
    debug!("cart_view");
    cart.with_cart(|c| view_of_cart(c, catalog))
}

/// Adds a sale product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line
/// - The stock check sees the resulting quantity, not the increment
pub fn add_to_cart(
    cart: &CartState,
    catalog: &Catalog,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartView, SessionError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity, "add_to_cart");

    let product = resolve_product(catalog, product_id)?;

    cart.with_cart_mut(|c| {
        c.add(product, quantity)?;
        view_of_cart(c, catalog)
    })
}

/// Replaces a cart line's quantity; `quantity <= 0` removes the line.
pub fn update_cart_line(
    cart: &CartState,
    catalog: &Catalog,
    product_id: &str,
    quantity: i64,
) -> Result<CartView, SessionError> {
    debug!(product_id = %product_id, quantity, "update_cart_line");

    let product = resolve_product(catalog, product_id)?;

    cart.with_cart_mut(|c| {
        c.set_quantity(product, quantity)?;
        view_of_cart(c, catalog)
    })
}

/// Removes a line from the cart; absent lines are a no-op.
pub fn remove_from_cart(
    cart: &CartState,
    catalog: &Catalog,
    product_id: &str,
) -> Result<CartView, SessionError> {
    debug!(product_id = %product_id, "remove_from_cart");

    cart.with_cart_mut(|c| {
        c.remove(product_id);
        view_of_cart(c, catalog)
    })
}

/// Clears all lines from the cart.
///
/// ## When Used
/// - User empties the cart
/// - After an order request is captured (new transaction)
pub fn clear_cart(cart: &CartState, catalog: &Catalog) -> Result<CartView, SessionError> {
    debug!("clear_cart");

    cart.with_cart_mut(|c| {
        c.clear();
        view_of_cart(c, catalog)
    })
}

// =============================================================================
// Quote List Operations
// =============================================================================

/// Gets the current quote list contents.
pub fn quote_view(quote: &QuoteState, rates: &RateBook) -> Result<QuoteView, SessionError> {
    debug!("quote_view");
    quote.with_quote(|q| view_of_quote(q, rates))
}

/// Adds a rental product to the quote list for a contract length in months.
///
/// The duration must be one the storefront offers and must be priced on the
/// product's rate card; otherwise the list is left untouched.
pub fn add_to_quote(
    quote: &QuoteState,
    catalog: &Catalog,
    rates: &RateBook,
    product_id: &str,
    quantity: Option<i64>,
    months: u32,
) -> Result<QuoteView, SessionError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity, months, "add_to_quote");

    let duration = parse_duration(months)?;
    let product = resolve_product(catalog, product_id)?;

    quote.with_quote_mut(|q| {
        q.add(product, quantity, duration, rates)?;
        view_of_quote(q, rates)
    })
}

/// Replaces a quote line's quantity; `quantity <= 0` removes the line.
pub fn update_quote_line(
    quote: &QuoteState,
    catalog: &Catalog,
    rates: &RateBook,
    product_id: &str,
    quantity: i64,
) -> Result<QuoteView, SessionError> {
    debug!(product_id = %product_id, quantity, "update_quote_line");

    let product = resolve_product(catalog, product_id)?;

    quote.with_quote_mut(|q| {
        q.set_quantity(product, quantity)?;
        view_of_quote(q, rates)
    })
}

/// Switches a quote line to another contract length.
pub fn set_quote_duration(
    quote: &QuoteState,
    rates: &RateBook,
    product_id: &str,
    months: u32,
) -> Result<QuoteView, SessionError> {
    debug!(product_id = %product_id, months, "set_quote_duration");

    let duration = parse_duration(months)?;

    quote.with_quote_mut(|q| {
        q.set_duration(product_id, duration, rates)?;
        view_of_quote(q, rates)
    })
}

/// Removes a line from the quote list; absent lines are a no-op.
pub fn remove_from_quote(
    quote: &QuoteState,
    rates: &RateBook,
    product_id: &str,
) -> Result<QuoteView, SessionError> {
    debug!(product_id = %product_id, "remove_from_quote");

    quote.with_quote_mut(|q| {
        q.remove(product_id);
        view_of_quote(q, rates)
    })
}

/// Clears all lines from the quote list.
pub fn clear_quote(quote: &QuoteState, rates: &RateBook) -> Result<QuoteView, SessionError> {
    debug!("clear_quote");

    quote.with_quote_mut(|q| {
        q.clear();
        view_of_quote(q, rates)
    })
}

fn parse_duration(months: u32) -> Result<RentalDuration, SessionError> {
    RentalDuration::from_months(months).ok_or_else(|| {
        SessionError::validation(format!("Unsupported contract duration: {months} months"))
    })
}

// =============================================================================
// Submission
// =============================================================================

/// Builds a quote request against FRESH snapshots and hands it to the
/// request-capture collaborator. The quote list is cleared only once the
/// collaborator accepts.
pub fn submit_quote_request(
    quote: &QuoteState,
    catalog: &Catalog,
    rates: &RateBook,
    contact: CustomerContact,
    sink: &dyn RequestSink,
) -> Result<SubmissionReceipt, SessionError> {
    let request = quote.with_quote(|q| QuoteRequest::build(q, catalog, rates, contact))?;

    let receipt = sink.submit_quote(&request).map_err(|err| {
        warn!(request_id = %request.request_id, error = %err, "quote submission failed");
        SessionError::submission(format!("Quote request could not be captured: {err}"))
    })?;

    quote.with_quote_mut(|q| q.clear());
    info!(
        request_id = %request.request_id,
        reference = %receipt.reference,
        lines = request.lines.len(),
        "quote request submitted"
    );

    Ok(receipt)
}

/// Builds an order request against a FRESH snapshot and hands it to the
/// request-capture collaborator. The cart is cleared only once the
/// collaborator accepts.
pub fn submit_order(
    cart: &CartState,
    catalog: &Catalog,
    contact: CustomerContact,
    sink: &dyn RequestSink,
) -> Result<SubmissionReceipt, SessionError> {
    let request = cart.with_cart(|c| OrderRequest::build(c, catalog, contact))?;

    let receipt = sink.submit_order(&request).map_err(|err| {
        warn!(request_id = %request.request_id, error = %err, "order submission failed");
        SessionError::submission(format!("Order could not be captured: {err}"))
    })?;

    cart.with_cart_mut(|c| c.clear());
    info!(
        request_id = %request.request_id,
        reference = %receipt.reference,
        lines = request.lines.len(),
        "order submitted"
    );

    Ok(receipt)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use loca_core::contracts::ContractError;
    use loca_core::{Product, ProductKind};
    use std::sync::Mutex;

    const EPS: f64 = 1e-9;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn product(id: &str, kind: ProductKind, price: f64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            description: None,
            unit_price_exclusive: price,
            stock_quantity: stock,
            low_stock_threshold: 2,
            kind,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Catalog {
        [
            product("sale-1", ProductKind::Sale, 100.0, 5),
            product("rent-1", ProductKind::Rental, 0.0, 10),
        ]
        .into_iter()
        .collect()
    }

    fn rates() -> RateBook {
        let mut book = RateBook::new();
        book.upsert_tier("rent-1", RentalDuration::TwelveMonths, 450.0, 500.0)
            .unwrap();
        book.upsert_tier("rent-1", RentalDuration::TwentyFourMonths, 350.0, 0.0)
            .unwrap();
        book
    }

    fn contact() -> CustomerContact {
        CustomerContact {
            name: "Marie Dupont".to_string(),
            email: "marie@example.com".to_string(),
            phone: None,
            company: Some("Dupont BTP".to_string()),
            message: None,
        }
    }

    /// In-memory request sink recording what was captured.
    #[derive(Default)]
    struct RecordingSink {
        quotes: Mutex<Vec<QuoteRequest>>,
        orders: Mutex<Vec<OrderRequest>>,
    }

    impl RequestSink for RecordingSink {
        fn submit_quote(
            &self,
            request: &QuoteRequest,
        ) -> Result<SubmissionReceipt, ContractError> {
            self.quotes.lock().unwrap().push(request.clone());
            Ok(SubmissionReceipt {
                reference: format!("DEV-{}", self.quotes.lock().unwrap().len()),
                received_at: Utc::now(),
            })
        }

        fn submit_order(
            &self,
            request: &OrderRequest,
        ) -> Result<SubmissionReceipt, ContractError> {
            self.orders.lock().unwrap().push(request.clone());
            Ok(SubmissionReceipt {
                reference: format!("CMD-{}", self.orders.lock().unwrap().len()),
                received_at: Utc::now(),
            })
        }
    }

    /// A sink whose collaborator is down.
    struct FailingSink;

    impl RequestSink for FailingSink {
        fn submit_quote(&self, _: &QuoteRequest) -> Result<SubmissionReceipt, ContractError> {
            Err("request capture unreachable".into())
        }

        fn submit_order(&self, _: &OrderRequest) -> Result<SubmissionReceipt, ContractError> {
            Err("request capture unreachable".into())
        }
    }

    #[test]
    fn test_cart_flow() {
        init_tracing();
        let catalog = catalog();
        let cart = CartState::default();

        let view = add_to_cart(&cart, &catalog, "sale-1", Some(3)).unwrap();
        assert_eq!(view.lines.len(), 1);
        assert!((view.totals.subtotal_exclusive - 300.0).abs() < EPS);

        // Second add exceeding stock fails and leaves the cart unchanged
        let err = add_to_cart(&cart, &catalog, "sale-1", Some(3)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        let view = cart_view(&cart, &catalog).unwrap();
        assert_eq!(view.lines[0].quantity, 3);

        let view = update_cart_line(&cart, &catalog, "sale-1", 5).unwrap();
        assert_eq!(view.lines[0].quantity, 5);

        let view = remove_from_cart(&cart, &catalog, "sale-1").unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.totals.total_inclusive, 0.0);
    }

    #[test]
    fn test_unknown_and_inactive_products() {
        let mut catalog = catalog();
        let cart = CartState::default();

        let err = add_to_cart(&cart, &catalog, "ghost", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let mut retired = product("retired", ProductKind::Sale, 10.0, 5);
        retired.is_active = false;
        catalog.insert(retired);
        let err = add_to_cart(&cart, &catalog, "retired", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_quote_flow() {
        init_tracing();
        let catalog = catalog();
        let rates = rates();
        let quote = QuoteState::new();

        let view = add_to_quote(&quote, &catalog, &rates, "rent-1", Some(2), 12).unwrap();
        assert!((view.totals.monthly_estimate - 900.0).abs() < EPS);
        assert!((view.totals.upfront_total - 1000.0).abs() < EPS);

        let view = set_quote_duration(&quote, &rates, "rent-1", 24).unwrap();
        assert!((view.totals.monthly_estimate - 700.0).abs() < EPS);
        assert_eq!(view.totals.upfront_total, 0.0);

        // A length the storefront does not offer
        let err = set_quote_duration(&quote, &rates, "rent-1", 18).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // An offered length the product has no tier for
        let err = set_quote_duration(&quote, &rates, "rent-1", 6).unwrap_err();
        assert_eq!(err.code, ErrorCode::TierNotFound);

        let view = clear_quote(&quote, &rates).unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.totals.monthly_estimate, 0.0);
    }

    #[test]
    fn test_wrong_container_rejected() {
        let catalog = catalog();
        let rates = rates();
        let cart = CartState::default();
        let quote = QuoteState::new();

        let err = add_to_cart(&cart, &catalog, "rent-1", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::SelectionError);

        let err = add_to_quote(&quote, &catalog, &rates, "sale-1", None, 12).unwrap_err();
        assert_eq!(err.code, ErrorCode::SelectionError);
    }

    #[test]
    fn test_submit_quote_request_clears_on_success() {
        init_tracing();
        let catalog = catalog();
        let rates = rates();
        let quote = QuoteState::new();
        let sink = RecordingSink::default();

        add_to_quote(&quote, &catalog, &rates, "rent-1", Some(2), 12).unwrap();
        let receipt = submit_quote_request(&quote, &catalog, &rates, contact(), &sink).unwrap();

        assert_eq!(receipt.reference, "DEV-1");
        assert_eq!(sink.quotes.lock().unwrap().len(), 1);
        assert!((sink.quotes.lock().unwrap()[0].totals.monthly_estimate - 900.0).abs() < EPS);
        assert!(quote.with_quote(|q| q.is_empty()));
    }

    #[test]
    fn test_submit_order_clears_on_success() {
        let catalog = catalog();
        let cart = CartState::default();
        let sink = RecordingSink::default();

        add_to_cart(&cart, &catalog, "sale-1", Some(2)).unwrap();
        let receipt = submit_order(&cart, &catalog, contact(), &sink).unwrap();

        assert_eq!(receipt.reference, "CMD-1");
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_failed_submission_keeps_selection() {
        let catalog = catalog();
        let rates = rates();
        let quote = QuoteState::new();

        add_to_quote(&quote, &catalog, &rates, "rent-1", Some(1), 12).unwrap();
        let err =
            submit_quote_request(&quote, &catalog, &rates, contact(), &FailingSink).unwrap_err();

        assert_eq!(err.code, ErrorCode::SubmissionFailed);
        // The customer keeps their list and may retry
        assert_eq!(quote.with_quote(|q| q.line_count()), 1);
    }

    #[test]
    fn test_empty_selection_cannot_submit() {
        let catalog = catalog();
        let rates = rates();
        let sink = RecordingSink::default();

        let err = submit_quote_request(&QuoteState::new(), &catalog, &rates, contact(), &sink)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(sink.quotes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_views_serialize_camel_case() {
        let catalog = catalog();
        let cart = CartState::default();

        let view = add_to_cart(&cart, &catalog, "sale-1", Some(1)).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["totals"].get("subtotalExclusive").is_some());
        assert!(json["lines"][0].get("unitPriceExclusive").is_some());
    }
}
