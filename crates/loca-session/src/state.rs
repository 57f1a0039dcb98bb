//! # Session Container State
//!
//! One cart and one quote list per active customer session.
//!
//! ## Thread Safety
//! Each container is wrapped in `Arc<Mutex<T>>` because:
//! 1. A session may span concurrent requests (multi-tab browsing)
//! 2. Only one request may modify a container at a time
//! 3. The engine's "no operation partially applies" guarantee needs a
//!    single mutual-exclusion point per container instance
//!
//! ## Why Not RwLock?
//! Container operations are quick, and most operations modify state.
//! A RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use loca_core::{Cart, CheckoutPolicy, QuoteList};

// =============================================================================
// Cart State
// =============================================================================

/// Session-managed cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates an empty cart under the given checkout policy.
    pub fn new(policy: CheckoutPolicy) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new(policy))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.line_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new(CheckoutPolicy::default())
    }
}

// =============================================================================
// Quote State
// =============================================================================

/// Session-managed quote list state.
#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    quote: Arc<Mutex<QuoteList>>,
}

impl QuoteState {
    /// Creates an empty quote list.
    pub fn new() -> Self {
        QuoteState {
            quote: Arc::new(Mutex::new(QuoteList::new())),
        }
    }

    /// Executes a function with read access to the quote list.
    pub fn with_quote<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&QuoteList) -> R,
    {
        let quote = self.quote.lock().expect("Quote mutex poisoned");
        f(&quote)
    }

    /// Executes a function with write access to the quote list.
    pub fn with_quote_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut QuoteList) -> R,
    {
        let mut quote = self.quote.lock().expect("Quote mutex poisoned");
        f(&mut quote)
    }
}
