//! Catalog types: products, variants, and the wire shapes they come from.
//!
//! The GraphQL API answers in edge/node connections with metafields as
//! `{ value }` wrappers and prices as decimal strings. The `wire` module
//! mirrors that shape for serde; the public types here are the flattened
//! domain model the widgets consume.

use crate::error::StorefrontError;
use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named option on a variant (`Seat` / `A1`, `Size` / `L`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name
    pub name: String,
    /// Option value
    pub value: String,
}

/// A purchasable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant GID
    pub id: VariantId,
    /// Variant title (`"Default Title"` for single-variant products)
    pub title: String,
    /// Unit price
    pub price: Money,
    /// ISO currency code for the price (`"USD"` unless the shop says otherwise)
    pub currency: String,
    /// Remaining sellable quantity, if the API exposed it
    pub quantity_available: Option<i64>,
    /// Option name/value pairs
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// Remaining stock, treating unknown as none.
    #[must_use]
    pub fn available(&self) -> i64 {
        self.quantity_available.unwrap_or(0)
    }

    /// Whether the variant can still be sold.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.available() <= 0
    }

    /// Whether the variant is close to selling out (five or fewer left).
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        (1..=5).contains(&self.available())
    }

    /// The value of the named option, if present.
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|opt| opt.name.eq_ignore_ascii_case(name))
            .map(|opt| opt.value.as_str())
    }
}

/// A recommended add-on product attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementaryProduct {
    /// Product GID
    pub id: ProductId,
    /// Product title
    pub title: String,
    /// Purchasable variants
    pub variants: Vec<Variant>,
}

/// An event product with its metafields flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product GID
    pub id: ProductId,
    /// Product title
    pub title: String,
    /// URL handle
    pub handle: Option<String>,
    /// Plain-text description
    pub description: Option<String>,
    /// Game system (`"Pokemon"`, `"Magic"`, ...)
    pub game_type: Option<String>,
    /// Scheduled start, UTC
    pub start_time: Option<DateTime<Utc>>,
    /// Scheduled length in minutes
    pub duration_minutes: Option<u32>,
    /// Play format (`"Standard"`, `"Draft"`, ...)
    pub format: Option<String>,
    /// Whether participants must hold a partner game account
    pub requires_partner_account: bool,
    /// Total sellable inventory across variants, if exposed
    pub total_inventory: Option<i64>,
    /// Purchasable variants
    pub variants: Vec<Variant>,
    /// Recommended add-ons
    pub complementary: Vec<ComplementaryProduct>,
}

impl Product {
    /// Variants ordered by ascending price (stable for equal prices).
    #[must_use]
    pub fn variants_by_price(&self) -> Vec<&Variant> {
        let mut sorted: Vec<&Variant> = self.variants.iter().collect();
        sorted.sort_by_key(|v| v.price);
        sorted
    }

    /// Look up a variant by id.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }
}

/// A created cart, ready for checkout redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart GID
    pub id: String,
    /// Hosted checkout URL
    pub checkout_url: String,
}

/// A custom key/value attribute attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute key
    pub key: String,
    /// Attribute value
    pub value: String,
}

/// One line of a cart-create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Variant to purchase
    pub merchandise_id: VariantId,
    /// Quantity
    pub quantity: u32,
    /// Participant details and other line metadata
    pub attributes: Vec<Attribute>,
}

/// Serde mirrors of the GraphQL response shapes.
pub(crate) mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Connection<T> {
        #[serde(default = "Vec::new")]
        pub edges: Vec<Edge<T>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Edge<T> {
        pub node: T,
    }

    #[derive(Debug, Deserialize)]
    pub struct Metafield {
        pub value: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Price {
        pub amount: String,
        #[serde(default)]
        pub currency_code: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SelectedOptionNode {
        pub name: String,
        pub value: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantNode {
        pub id: String,
        #[serde(default)]
        pub title: Option<String>,
        pub quantity_available: Option<i64>,
        pub price: Price,
        #[serde(default)]
        pub selected_options: Option<Vec<SelectedOptionNode>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ComplementaryNode {
        // `... on Product` fragments yield empty objects for other types
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub variants: Option<Connection<VariantNode>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ComplementaryMetafield {
        pub references: Option<Connection<ComplementaryNode>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub id: String,
        pub title: String,
        #[serde(default)]
        pub handle: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub game_type: Option<Metafield>,
        #[serde(default)]
        pub start_time: Option<Metafield>,
        #[serde(default)]
        pub duration: Option<Metafield>,
        #[serde(default)]
        pub format: Option<Metafield>,
        #[serde(default)]
        pub bandai: Option<Metafield>,
        #[serde(default)]
        pub total_inventory: Option<i64>,
        #[serde(default)]
        pub complementary_products: Option<ComplementaryMetafield>,
        #[serde(default)]
        pub variants: Option<Connection<VariantNode>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CartNode {
        pub id: String,
        #[serde(rename = "checkoutUrl")]
        pub checkout_url: Option<String>,
    }
}

impl TryFrom<wire::VariantNode> for Variant {
    type Error = StorefrontError;

    fn try_from(node: wire::VariantNode) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VariantId::new(&node.id)?,
            title: node.title.unwrap_or_default(),
            price: Money::parse_decimal(&node.price.amount)?,
            currency: node
                .price
                .currency_code
                .unwrap_or_else(|| "USD".to_string()),
            quantity_available: node.quantity_available,
            selected_options: node
                .selected_options
                .unwrap_or_default()
                .into_iter()
                .map(|opt| SelectedOption {
                    name: opt.name,
                    value: opt.value,
                })
                .collect(),
        })
    }
}

impl TryFrom<wire::ProductNode> for Product {
    type Error = StorefrontError;

    fn try_from(node: wire::ProductNode) -> Result<Self, Self::Error> {
        let variants = node
            .variants
            .map(collect_variants)
            .transpose()?
            .unwrap_or_default();

        let complementary = node
            .complementary_products
            .and_then(|mf| mf.references)
            .map(|refs| {
                refs.edges
                    .into_iter()
                    .filter_map(|edge| complementary_from_node(edge.node).transpose())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            id: ProductId::new(&node.id)?,
            title: node.title,
            handle: node.handle,
            description: node.description,
            game_type: node.game_type.map(|mf| mf.value),
            start_time: node.start_time.and_then(|mf| parse_start_time(&mf.value)),
            duration_minutes: node.duration.and_then(|mf| mf.value.trim().parse().ok()),
            format: node.format.map(|mf| mf.value),
            requires_partner_account: node.bandai.is_some_and(|mf| truthy(&mf.value)),
            total_inventory: node.total_inventory,
            variants,
            complementary,
        })
    }
}

fn collect_variants(conn: wire::Connection<wire::VariantNode>) -> Result<Vec<Variant>, StorefrontError> {
    conn.edges
        .into_iter()
        .map(|edge| Variant::try_from(edge.node))
        .collect()
}

fn complementary_from_node(
    node: wire::ComplementaryNode,
) -> Result<Option<ComplementaryProduct>, StorefrontError> {
    // non-Product references come back as empty objects
    let (Some(id), Some(title)) = (node.id, node.title) else {
        return Ok(None);
    };
    Ok(Some(ComplementaryProduct {
        id: ProductId::new(&id)?,
        title,
        variants: node
            .variants
            .map(collect_variants)
            .transpose()?
            .unwrap_or_default(),
    }))
}

fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    // metafields sometimes store naive local-less timestamps
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    tracing::debug!(raw = trimmed, "unparseable start_time metafield");
    None
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_from_json(json: &str) -> Product {
        let node: wire::ProductNode = serde_json::from_str(json).unwrap();
        Product::try_from(node).unwrap()
    }

    #[test]
    fn flattens_metafields_and_connections() {
        let product = product_from_json(
            r#"{
                "id": "gid://shopify/Product/1",
                "title": "Friday Night Standard",
                "handle": "friday-night-standard",
                "gameType": { "value": "Magic" },
                "startTime": { "value": "2025-07-12T18:30:00Z" },
                "duration": { "value": "180" },
                "format": { "value": "Standard" },
                "bandai": { "value": "true" },
                "variants": { "edges": [
                    { "node": {
                        "id": "gid://shopify/ProductVariant/11",
                        "title": "Seat A1",
                        "quantityAvailable": 3,
                        "price": { "amount": "25.0" },
                        "selectedOptions": [{ "name": "Seat", "value": "A1" }]
                    } }
                ] }
            }"#,
        );

        assert_eq!(product.game_type.as_deref(), Some("Magic"));
        assert_eq!(product.duration_minutes, Some(180));
        assert!(product.requires_partner_account);
        assert_eq!(product.variants.len(), 1);

        let variant = &product.variants[0];
        assert_eq!(variant.price, Money::from_cents(2500));
        assert!(variant.is_low_stock());
        assert_eq!(variant.option_value("seat"), Some("A1"));
    }

    #[test]
    fn naive_start_times_are_assumed_utc() {
        let product = product_from_json(
            r#"{
                "id": "2",
                "title": "Draft Night",
                "startTime": { "value": "2025-07-12T18:30" }
            }"#,
        );
        let start = product.start_time.unwrap();
        assert_eq!(start.to_rfc3339(), "2025-07-12T18:30:00+00:00");
    }

    #[test]
    fn non_product_references_are_skipped() {
        let product = product_from_json(
            r#"{
                "id": "3",
                "title": "Sealed Night",
                "complementaryProducts": { "references": { "edges": [
                    { "node": {} },
                    { "node": {
                        "id": "gid://shopify/Product/9",
                        "title": "Sleeves",
                        "variants": { "edges": [] }
                    } }
                ] } }
            }"#,
        );
        assert_eq!(product.complementary.len(), 1);
        assert_eq!(product.complementary[0].title, "Sleeves");
    }

    #[test]
    fn variants_sort_by_price_stably() {
        let mk = |id: &str, cents: i64| Variant {
            id: VariantId::new(id).unwrap(),
            title: String::new(),
            price: Money::from_cents(cents),
            currency: "USD".into(),
            quantity_available: Some(10),
            selected_options: vec![],
        };
        let product = Product {
            id: ProductId::new("1").unwrap(),
            title: "t".into(),
            handle: None,
            description: None,
            game_type: None,
            start_time: None,
            duration_minutes: None,
            format: None,
            requires_partner_account: false,
            total_inventory: None,
            variants: vec![mk("3", 2000), mk("1", 1000), mk("2", 2000)],
            complementary: vec![],
        };

        let sorted = product.variants_by_price();
        assert_eq!(sorted[0].price, Money::from_cents(1000));
        // equal prices keep their input order
        assert_eq!(sorted[1].id, VariantId::new("3").unwrap());
        assert_eq!(sorted[2].id, VariantId::new("2").unwrap());
    }

    #[test]
    fn unknown_stock_counts_as_sold_out() {
        let variant = Variant {
            id: VariantId::new("1").unwrap(),
            title: String::new(),
            price: Money::ZERO,
            currency: "USD".into(),
            quantity_available: None,
            selected_options: vec![],
        };
        assert!(variant.is_sold_out());
        assert!(!variant.is_low_stock());
    }
}
