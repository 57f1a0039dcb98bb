//! # loca-core: Pure Pricing & Quoting Logic for LocaKit
//!
//! This crate is the **heart** of the LocaKit storefront. It contains the
//! pricing and quoting engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LocaKit Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront & Admin Back Office (web)               │   │
//! │  │    Catalog UI ──► Cart UI ──► Quote UI ──► Request forms        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    loca-session                                 │   │
//! │  │    per-session container state, config, user-facing errors     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ loca-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   rates   │  │ cart/quote│  │   stock   │  │   │
//! │  │   │  HT ⇄ TTC │  │ RateCard  │  │ Selection │  │ validator │  │   │
//! │  │   │  TaxRate  │  │ TierQuote │  │ containers│  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        External collaborators (contracts.rs)                    │   │
//! │  │   catalog read • rate tier store • request-capture sink        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductKind, RentalDuration, Catalog)
//! - [`money`] - Tax-exclusive/-inclusive conversion, unrounded amounts
//! - [`rates`] - Duration-tiered rental pricing (RateCard, RateBook)
//! - [`stock`] - Stock validation against caller-supplied snapshots
//! - [`selection`] - Shared selection-line mechanics
//! - [`cart`] / [`quote`] - The two selection containers and their totals
//! - [`submission`] - Finalized quote/order request snapshots
//! - [`contracts`] - External collaborator trait contracts
//! - [`error`] / [`validation`] - Typed errors and input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every derivation is deterministic - same snapshot,
//!    same totals
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Unrounded Amounts**: Totals leave as raw f64; display rounds once
//! 4. **Explicit Errors**: All errors are typed, never strings or panics;
//!    a failed mutation leaves its container untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use loca_core::money::TaxRate;
//! use loca_core::rates::RateBook;
//! use loca_core::types::RentalDuration;
//!
//! // Administrator prices a product: 12 months at 450/month + 500 upfront
//! let mut rates = RateBook::new();
//! rates.upsert_tier("prod-1", RentalDuration::TwelveMonths, 450.0, 500.0)?;
//!
//! // Full contract cost for that duration
//! let quote = rates.quote("prod-1", RentalDuration::TwelveMonths, TaxRate::standard())?;
//! assert_eq!(quote.total_exclusive, 5900.0); // 450 × 12 + 500
//! assert_eq!(quote.total_inclusive, 7080.0); // × 1.20
//! # Ok::<(), loca_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod contracts;
pub mod error;
pub mod money;
pub mod quote;
pub mod rates;
pub mod selection;
pub mod stock;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use loca_core::Cart` instead of
// `use loca_core::cart::Cart`

pub use cart::{Cart, CartLine, CartTotals, CheckoutPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::TaxRate;
pub use quote::{QuoteList, QuoteTotals, QuotedLine};
pub use rates::{RateBook, RateCard, RateTier, TierQuote};
pub use selection::SelectionLine;
pub use submission::{CustomerContact, OrderRequest, QuoteRequest};
pub use types::{Catalog, Product, ProductKind, RentalDuration};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Standard tax rate for this deployment (20% French TVA).
///
/// ## Why a constant?
/// The conversion functions always take the rate as a parameter; this is
/// only the deployment default handed to them, so tests and future
/// multi-region deployments can vary the rate without touching the engine.
pub const STANDARD_TAX_RATE: f64 = 0.20;

/// Maximum unique lines allowed in a single selection container
///
/// ## Business Reason
/// Prevents runaway selections and keeps quote requests reviewable by the
/// sales team. Can be made configurable per-deployment in future versions.
pub const MAX_SELECTION_LINES: usize = 100;

/// Maximum quantity of a single line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-deployment in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;
