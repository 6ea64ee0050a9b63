//! Error types for the Storefront API client.

use thiserror::Error;

/// A field-scoped error returned by a cart mutation.
///
/// These are business rejections (stock ran out between selection and
/// submission, a variant was unpublished), not transport failures.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserError {
    /// Field path the error applies to, if the API provided one
    pub field: Option<Vec<String>>,
    /// Human-readable message
    pub message: String,
}

/// Errors from the Storefront API boundary.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Network or protocol failure while talking to the API
    #[error("storefront transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a top-level GraphQL error
    #[error("storefront API error: {message}")]
    Api {
        /// First GraphQL error message
        message: String,
    },

    /// A mutation succeeded at the transport level but was rejected
    #[error("cart rejected: {}", first_user_error(.0))]
    UserErrors(Vec<UserError>),

    /// Cart creation returned no checkout URL
    #[error("cart created without a checkout URL")]
    MissingCheckoutUrl,

    /// An identifier was empty or not convertible to a GID
    #[error("invalid storefront id: {raw:?}")]
    InvalidId {
        /// The offending raw value
        raw: String,
    },

    /// A price amount string could not be parsed
    #[error("invalid amount: {raw:?}")]
    InvalidAmount {
        /// The offending raw value
        raw: String,
    },
}

fn first_user_error(errors: &[UserError]) -> &str {
    errors
        .first()
        .map_or("cart create failed", |e| e.message.as_str())
}
