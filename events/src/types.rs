//! Shared types for the event page widgets.

use playgrid_storefront::{Money, VariantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a cart line.
///
/// Exactly one line may carry the reserved [`LineId::EVENT`] id (the event
/// registration); add-on lines derive their id from the variant's numeric
/// tail so repeated adds of the same variant merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(String);

impl LineId {
    /// The reserved event-registration line.
    pub const EVENT: &'static str = "event";

    /// The event-registration line id.
    #[must_use]
    pub fn event() -> Self {
        Self(Self::EVENT.to_string())
    }

    /// The add-on line id for a variant (`upsell_<numeric id>`).
    #[must_use]
    pub fn upsell(variant: &VariantId) -> Self {
        Self(format!("upsell_{}", variant.numeric()))
    }

    /// Whether this is the reserved event line.
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.0 == Self::EVENT
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the page-local cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identity
    pub id: LineId,
    /// Display title
    pub title: String,
    /// Variant label shown under the title (empty for add-ons)
    pub variant_label: String,
    /// Price of one unit at the time the line was created
    pub unit_price: Money,
    /// Quantity; `None` for the event line, which is always a single seat
    pub quantity: Option<u32>,
    /// Variant reference used at checkout; lines without one stay display-only
    pub variant_id: Option<VariantId>,
}

impl LineItem {
    /// Line total: unit price scaled by quantity where present.
    #[must_use]
    pub fn total(&self) -> Money {
        match self.quantity {
            Some(qty) => self.unit_price.times(qty),
            None => self.unit_price,
        }
    }
}

/// A transient user-facing notice (inventory rejection, checkout failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text
    pub message: String,
    /// Severity, which the shell may style differently
    pub severity: NoticeSeverity,
}

/// How loud a notice should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    /// Inventory and validation feedback
    Warning,
    /// Checkout and network failures
    Error,
}

impl Notice {
    /// Build a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: NoticeSeverity::Warning,
        }
    }

    /// Build an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: NoticeSeverity::Error,
        }
    }
}
