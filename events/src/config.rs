//! Configuration for the event page widgets.
//!
//! Loads from environment variables with the production defaults; the
//! storefront connection piggybacks on [`StorefrontConfig`].

use playgrid_storefront::StorefrontConfig;
use std::env;
use std::time::Duration;

/// Debounce windows and notice lifetimes, in one place so tests can shrink
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Quiet period between a ticket selection and its cart write
    pub ticket_commit: Duration,
    /// Quiet period between an add-to-cart press and its commit
    pub upsell_commit: Duration,
    /// How long an inventory notice stays up
    pub notice_ttl: Duration,
    /// How long a checkout error stays up
    pub error_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            ticket_commit: Duration::from_millis(150),
            upsell_commit: Duration::from_millis(300),
            notice_ttl: Duration::from_secs(5),
            error_ttl: Duration::from_secs(8),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Storefront API connection
    pub storefront: StorefrontConfig,
    /// Debounce and notice timings
    pub timings: Timings,
}

impl EventsConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Timings::default();
        Self {
            storefront: StorefrontConfig::from_env(),
            timings: Timings {
                ticket_commit: millis_var("TICKET_COMMIT_DEBOUNCE_MS", defaults.ticket_commit),
                upsell_commit: millis_var("UPSELL_COMMIT_DEBOUNCE_MS", defaults.upsell_commit),
                notice_ttl: millis_var("NOTICE_TTL_MS", defaults.notice_ttl),
                error_ttl: millis_var("ERROR_TTL_MS", defaults.error_ttl),
            },
        }
    }
}

fn millis_var(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or(default, Duration::from_millis)
}
