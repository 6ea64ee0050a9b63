//! Event summaries for listing cards: price range, seats left, clickability.

use crate::format::{date_label, money_label, price_label, time_label};
use chrono::{DateTime, Utc};
use playgrid_storefront::{Money, Product};

/// A listing-card view of an event product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Product title
    pub title: String,
    /// URL handle for the card link
    pub handle: Option<String>,
    /// Game system label
    pub game_type: String,
    /// Play format label
    pub format: String,
    /// `"180 MINS"`, empty without a duration
    pub duration_label: String,
    /// `"Sat, Sep 13"`, when scheduled
    pub date_label: Option<String>,
    /// `"7:00 PM"`, when scheduled
    pub time_label: Option<String>,
    /// `"$15.00"`, `"Free"`, or `"$15.00 — $50.00"`
    pub price_label: Option<String>,
    /// `"12 / 40 Open"`, `"12 Open"`, `"Sold Out"`, or `"Past Event"`
    pub seats_label: String,
    /// Cards link through only with seats left on a future event
    pub clickable: bool,
}

impl EventSummary {
    /// Build the card view for `product` as of `now`.
    #[must_use]
    pub fn from_product(product: &Product, now: DateTime<Utc>) -> Self {
        let seats_left: i64 = product.variants.iter().map(|v| v.available().max(0)).sum();
        let is_past = product.start_time.is_some_and(|start| start < now);
        let clickable = seats_left > 0 && !is_past;

        let seats_label = if is_past {
            "Past Event".to_string()
        } else if seats_left <= 0 {
            "Sold Out".to_string()
        } else {
            match product.total_inventory {
                Some(cap) if cap > 0 => format!("{seats_left} / {cap} Open"),
                _ => format!("{seats_left} Open"),
            }
        };

        Self {
            title: product.title.clone(),
            handle: product.handle.clone(),
            game_type: product.game_type.clone().unwrap_or_default(),
            format: product.format.clone().unwrap_or_default(),
            duration_label: product
                .duration_minutes
                .map(|mins| format!("{mins} MINS"))
                .unwrap_or_default(),
            date_label: product.start_time.map(date_label),
            time_label: product.start_time.map(time_label),
            price_label: price_range_label(product),
            seats_label,
            clickable,
        }
    }
}

fn price_range_label(product: &Product) -> Option<String> {
    let prices: Vec<Money> = product.variants.iter().map(|v| v.price).collect();
    let min = *prices.iter().min()?;
    let max = *prices.iter().max()?;
    let currency = product
        .variants
        .first()
        .map_or("USD", |v| v.currency.as_str());

    if min == max {
        Some(price_label(min, currency))
    } else {
        Some(format!(
            "{} — {}",
            money_label(min, currency),
            money_label(max, currency)
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use playgrid_storefront::{ProductId, Variant, VariantId};

    fn variant(numeric_id: &str, cents: i64, qty: i64) -> Variant {
        Variant {
            id: VariantId::new(numeric_id).unwrap(),
            title: "t".into(),
            price: Money::from_cents(cents),
            currency: "USD".into(),
            quantity_available: Some(qty),
            selected_options: vec![],
        }
    }

    fn product(variants: Vec<Variant>, start: Option<&str>, cap: Option<i64>) -> Product {
        Product {
            id: ProductId::new("1").unwrap(),
            title: "Friday Night".into(),
            handle: Some("friday-night".into()),
            description: None,
            game_type: Some("Magic".into()),
            start_time: start.map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .unwrap()
                    .with_timezone(&Utc)
            }),
            duration_minutes: Some(180),
            format: Some("Standard".into()),
            requires_partner_account: false,
            total_inventory: cap,
            variants,
            complementary: vec![],
        }
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn upcoming_event_with_capacity() {
        let summary = EventSummary::from_product(
            &product(
                vec![variant("1", 1500, 7), variant("2", 5000, 5)],
                Some("2025-09-14T02:00:00Z"),
                Some(40),
            ),
            at("2025-09-01T00:00:00Z"),
        );

        assert_eq!(summary.seats_label, "12 / 40 Open");
        assert_eq!(summary.price_label.as_deref(), Some("$15.00 — $50.00"));
        assert_eq!(summary.duration_label, "180 MINS");
        assert_eq!(summary.date_label.as_deref(), Some("Sat, Sep 13"));
        assert!(summary.clickable);
    }

    #[test]
    fn past_events_are_not_clickable_even_with_seats() {
        let summary = EventSummary::from_product(
            &product(vec![variant("1", 1500, 7)], Some("2025-09-14T02:00:00Z"), None),
            at("2025-10-01T00:00:00Z"),
        );
        assert_eq!(summary.seats_label, "Past Event");
        assert!(!summary.clickable);
    }

    #[test]
    fn sold_out_beats_capacity_label() {
        let summary = EventSummary::from_product(
            &product(vec![variant("1", 1500, 0)], Some("2025-09-14T02:00:00Z"), Some(40)),
            at("2025-09-01T00:00:00Z"),
        );
        assert_eq!(summary.seats_label, "Sold Out");
        assert!(!summary.clickable);
    }

    #[test]
    fn single_free_price_renders_free() {
        let summary = EventSummary::from_product(
            &product(vec![variant("1", 0, 3)], None, None),
            at("2025-09-01T00:00:00Z"),
        );
        assert_eq!(summary.price_label.as_deref(), Some("Free"));
        assert_eq!(summary.seats_label, "3 Open");
        assert!(summary.date_label.is_none());
    }

    #[test]
    fn variantless_product_has_no_price_label() {
        let summary = EventSummary::from_product(
            &product(vec![], None, None),
            at("2025-09-01T00:00:00Z"),
        );
        assert!(summary.price_label.is_none());
        assert_eq!(summary.seats_label, "Sold Out");
    }
}
