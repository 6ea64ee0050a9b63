//! Cart view models: pure mappings from cart state to display rows.
//!
//! The rendering layer owns turning these records into concrete UI; nothing
//! here touches state.

use crate::cart::CartState;
use crate::format::money_label;
use crate::types::{LineId, LineItem};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Line identity, for remove actions
    pub line_id: LineId,
    /// Title, suffixed `"(2x)"` for multi-quantity lines
    pub title_label: String,
    /// Variant label under the title
    pub variant_label: String,
    /// Line total label
    pub price_label: String,
    /// The event line shows no remove affordance
    pub removable: bool,
}

/// The rendered cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Rows in cart order
    pub lines: Vec<CartLineView>,
    /// Subtotal label
    pub subtotal_label: String,
}

impl CartView {
    /// Render the cart in the given currency.
    #[must_use]
    pub fn from_cart(cart: &CartState, currency: &str) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| line_view(line, currency))
                .collect(),
            subtotal_label: money_label(cart.subtotal(), currency),
        }
    }
}

fn line_view(line: &LineItem, currency: &str) -> CartLineView {
    let title_label = match line.quantity {
        Some(qty) if qty > 1 => format!("{} ({qty}x)", line.title),
        _ => line.title.clone(),
    };
    CartLineView {
        line_id: line.id.clone(),
        title_label,
        variant_label: line.variant_label.clone(),
        price_label: money_label(line.total(), currency),
        removable: !line.id.is_event(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartReducer};
    use playgrid_core::Reducer;
    use playgrid_storefront::{Money, VariantId};

    fn cart_with_event_and_upsell() -> CartState {
        let mut cart = CartState::default();
        CartReducer.reduce(
            &mut cart,
            CartAction::SetEventLine {
                title: "Friday Night".into(),
                variant_label: "Seat A1".into(),
                unit_price: Money::from_cents(2500),
            },
            &(),
        );
        let variant = VariantId::new("7").unwrap();
        CartReducer.reduce(
            &mut cart,
            CartAction::AddUpsell(LineItem {
                id: LineId::upsell(&variant),
                title: "Sleeves - Red".into(),
                variant_label: String::new(),
                unit_price: Money::from_cents(500),
                quantity: Some(2),
                variant_id: Some(variant),
            }),
            &(),
        );
        cart
    }

    #[test]
    fn event_line_renders_first_and_is_not_removable() {
        let view = CartView::from_cart(&cart_with_event_and_upsell(), "USD");

        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].title_label, "Friday Night");
        assert_eq!(view.lines[0].variant_label, "Seat A1");
        assert!(!view.lines[0].removable);
        assert_eq!(view.lines[0].price_label, "$25.00");
    }

    #[test]
    fn multi_quantity_lines_get_a_count_suffix_and_total() {
        let view = CartView::from_cart(&cart_with_event_and_upsell(), "USD");

        assert_eq!(view.lines[1].title_label, "Sleeves - Red (2x)");
        assert_eq!(view.lines[1].price_label, "$10.00");
        assert!(view.lines[1].removable);
        assert_eq!(view.subtotal_label, "$35.00");
    }

    #[test]
    fn empty_cart_renders_a_zero_subtotal() {
        let view = CartView::from_cart(&CartState::default(), "USD");
        assert!(view.lines.is_empty());
        assert_eq!(view.subtotal_label, "$0.00");
    }
}
