//! # loca-session: Session State Layer for LocaKit
//!
//! Owns the per-session selection containers and the operations the
//! storefront frontend invokes on them.
//!
//! ## Why Multiple State Types?
//! Instead of a single `SessionState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can mock/inject individual states
//! 3. **Clearer Operation Signatures**: Operations declare exactly what state they need
//! 4. **Reduced Contention**: The cart and the quote list don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Hosting web application                        │   │
//! │  │  one CartState + one QuoteState per customer session            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │  QuoteState  │  │ StorefrontConfig │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  tax rate        │              │
//! │  │    Cart      │  │   QuoteList  │  │  shipping fee    │              │
//! │  │  >>          │  │  >>          │  │  threshold       │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState / QuoteState: Arc<Mutex<T>> for exclusive access          │
//! │  • StorefrontConfig: read-only after initialization                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod ops;
pub mod state;

pub use config::StorefrontConfig;
pub use error::{ErrorCode, SessionError};
pub use ops::{CartView, QuoteView};
pub use state::{CartState, QuoteState};
