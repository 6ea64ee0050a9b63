//! Storefront global identifiers.
//!
//! The API accepts and returns GIDs (`gid://shopify/Product/123`). Page
//! embeds and data attributes often carry only the numeric tail, so both
//! newtypes normalize on construction: a value already in GID form passes
//! through, anything else is treated as a numeric id and wrapped.

use crate::error::StorefrontError;
use serde::{Deserialize, Serialize};
use std::fmt;

const PRODUCT_PREFIX: &str = "gid://shopify/Product/";
const VARIANT_PREFIX: &str = "gid://shopify/ProductVariant/";

/// Normalized product GID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Normalized product variant GID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl ProductId {
    /// Build a product id from either a full GID or a bare numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::InvalidId`] when `raw` is empty or
    /// whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StorefrontError> {
        Ok(Self(normalize(raw.as_ref(), PRODUCT_PREFIX)?))
    }

    /// The full GID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric tail of the GID.
    #[must_use]
    pub fn numeric(&self) -> &str {
        numeric_tail(&self.0)
    }
}

impl VariantId {
    /// Build a variant id from either a full GID or a bare numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::InvalidId`] when `raw` is empty or
    /// whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, StorefrontError> {
        Ok(Self(normalize(raw.as_ref(), VARIANT_PREFIX)?))
    }

    /// The full GID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric tail of the GID.
    #[must_use]
    pub fn numeric(&self) -> &str {
        numeric_tail(&self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(raw: &str, prefix: &str) -> Result<String, StorefrontError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StorefrontError::InvalidId { raw: raw.into() });
    }
    if trimmed.starts_with("gid://") {
        return Ok(trimmed.to_string());
    }
    Ok(format!("{prefix}{trimmed}"))
}

fn numeric_tail(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_numeric_ids_are_wrapped() {
        let id = ProductId::new("8609026441520").unwrap();
        assert_eq!(id.as_str(), "gid://shopify/Product/8609026441520");
        assert_eq!(id.numeric(), "8609026441520");

        let v = VariantId::new("49903425388848").unwrap();
        assert_eq!(v.as_str(), "gid://shopify/ProductVariant/49903425388848");
    }

    #[test]
    fn full_gids_pass_through() {
        let raw = "gid://shopify/ProductVariant/42";
        let id = VariantId::new(raw).unwrap();
        assert_eq!(id.as_str(), raw);
        assert_eq!(id.numeric(), "42");
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert!(ProductId::new("").is_err());
        assert!(VariantId::new("   ").is_err());
    }
}
