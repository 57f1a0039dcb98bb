//! # Stock Validator
//!
//! Pure, stateless stock checks against the caller-supplied snapshot.
//!
//! Every mutating operation on a selection container runs through here
//! before any state changes. The check always sees the *resulting* quantity
//! for a product (existing + requested), so stock cannot be exceeded through
//! repeated small additions.

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

/// True iff `0 < requested <= product.stock_quantity`.
///
/// ## Example
/// ```rust
/// use loca_core::stock::can_reserve;
/// use loca_core::types::{Product, ProductKind};
/// use chrono::Utc;
///
/// let product = Product {
///     id: "p".into(),
///     sku: "SKU-P".into(),
///     name: "Pallet truck".into(),
///     description: None,
///     unit_price_exclusive: 100.0,
///     stock_quantity: 5,
///     low_stock_threshold: 2,
///     kind: ProductKind::Sale,
///     is_active: true,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// assert!(can_reserve(&product, 5));
/// assert!(!can_reserve(&product, 6));
/// assert!(!can_reserve(&product, 0));
/// ```
#[inline]
pub fn can_reserve(product: &Product, requested: i64) -> bool {
    requested > 0 && requested <= product.stock_quantity
}

/// Typed-error form of [`can_reserve`], called with the resulting total
/// quantity for the product.
pub fn ensure_available(product: &Product, resulting: i64) -> CoreResult<()> {
    if can_reserve(product, resulting) {
        Ok(())
    } else {
        Err(CoreError::InsufficientStock {
            sku: product.sku.clone(),
            available: product.stock_quantity,
            requested: resulting,
        })
    }
}
