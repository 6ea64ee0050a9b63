//! # Playgrid Testing
//!
//! Testing utilities and helpers for the Playgrid widget architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A recording stub for the Storefront API
//! - A fluent Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use playgrid_testing::mocks::StubStorefront;
//!
//! #[tokio::test]
//! async fn test_checkout_flow() {
//!     let storefront = Arc::new(StubStorefront::new().with_product(event_fixture()));
//!     let store = Store::new(PageState::default(), PageReducer, env(storefront.clone()));
//!
//!     store.send(PageAction::Checkout(CheckoutAction::Submit)).await?;
//!
//!     assert_eq!(storefront.cart_creations(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use playgrid_core::environment::Clock;


pub use reducer_test::ReducerTest;
pub use reducer_test::assertions;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use async_trait::async_trait;
    use playgrid_storefront::{
        Cart, CartLineInput, Product, ProductId, Storefront, StorefrontError,
    };
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use playgrid_testing::mocks::FixedClock;
    /// use playgrid_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Recording stub for the Storefront API.
    ///
    /// Serves catalog fixtures from memory and records every cart-create
    /// request. Cart results can be queued to simulate rejections; when the
    /// queue is empty, creation succeeds with a canned checkout URL.
    #[derive(Debug, Default)]
    pub struct StubStorefront {
        products: Vec<Product>,
        cart_results: Mutex<VecDeque<Result<Cart, StorefrontError>>>,
        recorded_carts: Mutex<Vec<Vec<CartLineInput>>>,
    }

    impl StubStorefront {
        /// Create an empty stub.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a catalog fixture.
        #[must_use]
        pub fn with_product(mut self, product: Product) -> Self {
            self.products.push(product);
            self
        }

        /// Queue a result for the next cart creation.
        pub fn push_cart_result(&self, result: Result<Cart, StorefrontError>) {
            lock(&self.cart_results).push_back(result);
        }

        /// Number of cart creations attempted so far.
        #[must_use]
        pub fn cart_creations(&self) -> usize {
            lock(&self.recorded_carts).len()
        }

        /// The lines of every cart creation, in call order.
        #[must_use]
        pub fn recorded_carts(&self) -> Vec<Vec<CartLineInput>> {
            lock(&self.recorded_carts).clone()
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn canned_cart() -> Cart {
        Cart {
            id: "gid://shopify/Cart/stub".to_string(),
            checkout_url: "https://checkout.test/cart/stub".to_string(),
        }
    }

    #[async_trait]
    impl Storefront for StubStorefront {
        async fn product_by_handle(
            &self,
            handle: &str,
        ) -> Result<Option<Product>, StorefrontError> {
            Ok(self
                .products
                .iter()
                .find(|p| p.handle.as_deref() == Some(handle))
                .cloned())
        }

        async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorefrontError> {
            Ok(self.products.iter().find(|p| &p.id == id).cloned())
        }

        async fn products_by_ids(
            &self,
            ids: &[ProductId],
        ) -> Result<Vec<Product>, StorefrontError> {
            Ok(ids
                .iter()
                .filter_map(|id| self.products.iter().find(|p| &p.id == id).cloned())
                .collect())
        }

        async fn create_cart(&self, lines: &[CartLineInput]) -> Result<Cart, StorefrontError> {
            lock(&self.recorded_carts).push(lines.to_vec());
            match lock(&self.cart_results).pop_front() {
                Some(result) => result,
                None => Ok(canned_cart()),
            }
        }
    }
}
