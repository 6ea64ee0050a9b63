//! Storefront configuration.
//!
//! Loads connection settings from environment variables with defaults for
//! the development shop. The access token is a public storefront token, not
//! a secret.

use serde::{Deserialize, Serialize};
use std::env;

/// Connection settings for the Storefront API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shop domain, e.g. `ll-theme.myshopify.com`
    pub store_domain: String,
    /// API version, e.g. `2025-07`
    pub api_version: String,
    /// Public storefront access token
    pub access_token: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            store_domain: env::var("STOREFRONT_DOMAIN")
                .unwrap_or_else(|_| "ll-theme.myshopify.com".to_string()),
            api_version: env::var("STOREFRONT_API_VERSION")
                .unwrap_or_else(|_| "2025-07".to_string()),
            access_token: env::var("STOREFRONT_ACCESS_TOKEN")
                .unwrap_or_else(|_| "b2506cf21eef17d954028e02a4f3eb46".to_string()),
        }
    }

    /// The GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }
}
