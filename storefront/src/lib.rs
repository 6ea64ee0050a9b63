//! # Playgrid Storefront
//!
//! Client for the commerce platform's Storefront API: catalog reads (event
//! products, variants, metafields, complementary add-ons) and the one write
//! this system performs, cart creation.
//!
//! The widgets depend on the [`Storefront`] trait, never on HTTP directly,
//! so tests can substitute a stub. [`HttpStorefront`] is the production
//! implementation.
//!
//! ## Example
//!
//! ```ignore
//! let config = StorefrontConfig::from_env();
//! let storefront = HttpStorefront::new(&config);
//! if let Some(event) = storefront.product_by_handle("friday-night-standard").await? {
//!     for variant in event.variants_by_price() {
//!         println!("{} – {}", variant.title, variant.price);
//!     }
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub use catalog::{
    Attribute, Cart, CartLineInput, ComplementaryProduct, Product, SelectedOption, Variant,
};
pub use client::{HttpStorefront, Storefront};
pub use config::StorefrontConfig;
pub use error::{StorefrontError, UserError};
pub use ids::{ProductId, VariantId};
pub use money::Money;
