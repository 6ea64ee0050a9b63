//! Display formatters: money, dates and times in the store's time zone.
//!
//! All arithmetic stays in cents; formatting happens exactly once, here.

use chrono::{DateTime, Utc};
use chrono_tz::America::Los_Angeles;
use playgrid_storefront::Money;

/// A money label: `"$35.00"` for USD, `"35.00 CAD"` otherwise.
#[must_use]
pub fn money_label(amount: Money, currency: &str) -> String {
    if currency == "USD" {
        format!("${amount}")
    } else {
        format!("{amount} {currency}")
    }
}

/// A price label: like [`money_label`], but zero renders as `"Free"`.
#[must_use]
pub fn price_label(amount: Money, currency: &str) -> String {
    if amount.is_zero() {
        "Free".to_string()
    } else {
        money_label(amount, currency)
    }
}

/// The event date in the store's zone: `"Sat, Sep 13"`.
#[must_use]
pub fn date_label(start: DateTime<Utc>) -> String {
    start
        .with_timezone(&Los_Angeles)
        .format("%a, %b %-d")
        .to_string()
}

/// The event start time in the store's zone: `"7:00 PM"`.
#[must_use]
pub fn time_label(start: DateTime<Utc>) -> String {
    start
        .with_timezone(&Los_Angeles)
        .format("%-I:%M %p")
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn money_labels_follow_the_currency() {
        assert_eq!(money_label(Money::from_cents(3500), "USD"), "$35.00");
        assert_eq!(money_label(Money::from_cents(3500), "CAD"), "35.00 CAD");
        assert_eq!(money_label(Money::ZERO, "USD"), "$0.00");
    }

    #[test]
    fn price_labels_render_zero_as_free() {
        assert_eq!(price_label(Money::ZERO, "USD"), "Free");
        assert_eq!(price_label(Money::from_cents(1), "USD"), "$0.01");
    }

    #[test]
    fn dates_and_times_render_in_store_local_time() {
        // 2025-09-14 02:00 UTC is Sep 13, 7:00 PM in Los Angeles (PDT)
        let start = DateTime::parse_from_rfc3339("2025-09-14T02:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(date_label(start), "Sat, Sep 13");
        assert_eq!(time_label(start), "7:00 PM");
    }

    #[test]
    fn winter_dates_use_standard_time() {
        // 2025-01-11 03:30 UTC is Jan 10, 7:30 PM in Los Angeles (PST)
        let start = DateTime::parse_from_rfc3339("2025-01-11T03:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(date_label(start), "Fri, Jan 10");
        assert_eq!(time_label(start), "7:30 PM");
    }
}
