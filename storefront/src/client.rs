//! Storefront API client.
//!
//! [`Storefront`] is the seam the widgets depend on: catalog reads plus the
//! one write this system performs (cart creation). [`HttpStorefront`] is the
//! production implementation, speaking GraphQL over HTTP with the public
//! access token. Tests substitute their own implementation.

use crate::catalog::{Cart, CartLineInput, Product, wire};
use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, UserError};
use crate::ids::ProductId;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const PRODUCT_FIELDS: &str = r#"
    id
    title
    handle
    description
    gameType:  metafield(namespace: "custom", key: "game_type") { value }
    startTime: metafield(namespace: "custom", key: "start_time") { value }
    duration:  metafield(namespace: "custom", key: "duration") { value }
    format:    metafield(namespace: "custom", key: "format") { value }
    bandai:    metafield(namespace: "custom", key: "bandai_tcg") { value }
    complementaryProducts: metafield(namespace: "shopify--discovery--product_recommendation", key: "complementary_products") {
      references(first: 20) {
        edges { node { ... on Product {
          id
          title
          variants(first: 4) {
            edges { node {
              id
              title
              quantityAvailable
              price { amount currencyCode }
            } }
          }
        } } }
      }
    }
    variants(first: 50) {
      edges { node {
        id
        title
        quantityAvailable
        price { amount currencyCode }
        selectedOptions { name value }
      } }
    }
"#;

/// Read and write operations against the commerce platform.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Fetch an event product by URL handle.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or API failure. An unknown handle is
    /// `Ok(None)`.
    async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, StorefrontError>;

    /// Fetch an event product by GID.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or API failure. An unknown id is
    /// `Ok(None)`.
    async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorefrontError>;

    /// Fetch several products at once, preserving only those that resolve.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or API failure.
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StorefrontError>;

    /// Create a cart with the given lines and return its checkout URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UserErrors`] when the platform rejects a
    /// line, and [`StorefrontError::MissingCheckoutUrl`] when no redirect
    /// target came back.
    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<Cart, StorefrontError>;
}

/// GraphQL-over-HTTP implementation of [`Storefront`].
#[derive(Debug, Clone)]
pub struct HttpStorefront {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByHandleData {
    product_by_handle: Option<wire::ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ByIdData {
    product: Option<wire::ProductNode>,
}

#[derive(Debug, Deserialize)]
struct NodesData {
    nodes: Vec<Option<wire::ProductNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: CartCreatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreatePayload {
    cart: Option<wire::CartNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl HttpStorefront {
    /// Build a client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint(),
            access_token: config.access_token.clone(),
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, StorefrontError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        let envelope: GraphQlResponse<T> = response.json().await?;

        if let Some(errors) = envelope.errors {
            let message = errors
                .into_iter()
                .next()
                .map_or_else(|| "unknown GraphQL error".to_string(), |e| e.message);
            tracing::warn!(%message, "storefront query failed");
            return Err(StorefrontError::Api { message });
        }

        envelope.data.ok_or(StorefrontError::Api {
            message: "response carried neither data nor errors".to_string(),
        })
    }
}

#[async_trait]
impl Storefront for HttpStorefront {
    async fn product_by_handle(&self, handle: &str) -> Result<Option<Product>, StorefrontError> {
        let query = format!(
            "query EventByHandle($handle: String!) {{ productByHandle(handle: $handle) {{ {PRODUCT_FIELDS} }} }}"
        );
        let data: ByHandleData = self
            .request(&query, json!({ "handle": handle }))
            .await?;
        data.product_by_handle.map(Product::try_from).transpose()
    }

    async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorefrontError> {
        let query = format!(
            "query EventById($id: ID!) {{ product(id: $id) {{ {PRODUCT_FIELDS} }} }}"
        );
        let data: ByIdData = self
            .request(&query, json!({ "id": id.as_str() }))
            .await?;
        data.product.map(Product::try_from).transpose()
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StorefrontError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "query ProductsByIds($ids: [ID!]!) {{ nodes(ids: $ids) {{ ... on Product {{ {PRODUCT_FIELDS} }} }} }}"
        );
        let gids: Vec<&str> = ids.iter().map(ProductId::as_str).collect();
        let data: NodesData = self.request(&query, json!({ "ids": gids })).await?;
        data.nodes
            .into_iter()
            .flatten()
            .map(Product::try_from)
            .collect()
    }

    async fn create_cart(&self, lines: &[CartLineInput]) -> Result<Cart, StorefrontError> {
        let query = "mutation CartCreate($input: CartInput) { cartCreate(input: $input) { \
                     cart { id checkoutUrl } userErrors { field message } } }";
        let data: CartCreateData = self
            .request(query, json!({ "input": { "lines": lines } }))
            .await?;

        if !data.cart_create.user_errors.is_empty() {
            return Err(StorefrontError::UserErrors(data.cart_create.user_errors));
        }

        let cart = data.cart_create.cart.ok_or(StorefrontError::MissingCheckoutUrl)?;
        let checkout_url = cart.checkout_url.ok_or(StorefrontError::MissingCheckoutUrl)?;

        tracing::info!(cart_id = %cart.id, "cart created");
        Ok(Cart {
            id: cart.id,
            checkout_url,
        })
    }
}
