//! # External Collaborator Contracts
//!
//! The engine is a library between three external collaborators: the catalog
//! (read-only product data), the tier store (rate card persistence) and the
//! request-capture service (finalized quote/order submission). Only their
//! contracts live here; implementations belong to the hosting application
//! and are injected at the edges.
//!
//! No wire protocol, file format, or CLI surface belongs to this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rates::{RateCard, RateTier};
use crate::submission::{OrderRequest, QuoteRequest};
use crate::types::{Product, RentalDuration};

/// Boxed error for collaborator failures; the hosting application decides
/// the concrete error types behind each contract.
pub type ContractError = Box<dyn std::error::Error + Send + Sync>;

/// Read access to the product catalog.
///
/// The engine never writes back to the catalog; products arrive as
/// snapshots and stock figures are only as fresh as the snapshot.
pub trait CatalogSource: Send + Sync {
    /// Looks up one product by id, `Ok(None)` when unknown.
    fn product(&self, product_id: &str) -> Result<Option<Product>, ContractError>;
}

/// Persistence for rental rate tiers, keyed by `(product_id, duration)`.
///
/// Validation rules live in [`crate::rates`]; the storage format is the
/// store's own business.
pub trait RateStore: Send + Sync {
    /// Loads the full rate card for a product, `Ok(None)` when the product
    /// has never been priced.
    fn card(&self, product_id: &str) -> Result<Option<RateCard>, ContractError>;

    /// Persists one tier (insert or replace).
    fn put_tier(&self, product_id: &str, tier: &RateTier) -> Result<(), ContractError>;

    /// Deletes one tier; returns whether it existed.
    fn delete_tier(
        &self,
        product_id: &str,
        duration: RentalDuration,
    ) -> Result<bool, ContractError>;
}

/// Captures finalized quote and order requests.
///
/// The engine produces the snapshot; the transport (HTTP, queue, mailer)
/// is the sink's concern.
pub trait RequestSink: Send + Sync {
    fn submit_quote(&self, request: &QuoteRequest) -> Result<SubmissionReceipt, ContractError>;

    fn submit_order(&self, request: &OrderRequest) -> Result<SubmissionReceipt, ContractError>;
}

/// Acknowledgement returned by the request-capture collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Reference the customer can quote back ("DEV-2024-0042").
    pub reference: String,

    /// When the collaborator accepted the request.
    pub received_at: DateTime<Utc>,
}
