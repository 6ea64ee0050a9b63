//! Page-local cart: ordered lines, derived subtotal, no persistence.
//!
//! The cart is pure bookkeeping. Inventory checks belong to the upsell
//! gate and stock never changes here; the one write against the commerce
//! platform happens at checkout.

use crate::types::{LineId, LineItem};
use playgrid_core::{Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::Money;

/// The in-memory cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: Vec<LineItem>,
}

impl CartState {
    /// The lines in insertion order, event line first by construction.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// A snapshot clone of the lines, stable across later mutations.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.lines.clone()
    }

    /// Sum of stored line totals. Never recomputed from catalog data.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(LineItem::total).sum()
    }

    /// The line with the given id, if present.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// How many units of the given line are already in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: &LineId) -> u32 {
        self.line(id).map_or(0, |l| l.quantity.unwrap_or(1))
    }
}

/// Cart mutations.
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Replace the reserved event line with a fresh one.
    #[command]
    SetEventLine {
        /// Event product title
        title: String,
        /// Chosen variant label
        variant_label: String,
        /// Unit price of the chosen variant
        unit_price: Money,
    },
    /// Add or merge an add-on line. Inventory is the caller's concern.
    #[command]
    AddUpsell(LineItem),
    /// Remove a line; no-op when absent.
    #[command]
    RemoveLine(LineId),
}

/// Reducer over [`CartState`].
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::SetEventLine {
                title,
                variant_label,
                unit_price,
            } => {
                state.lines.retain(|l| !l.id.is_event());
                state.lines.insert(
                    0,
                    LineItem {
                        id: LineId::event(),
                        title,
                        variant_label,
                        unit_price,
                        quantity: None,
                        variant_id: None,
                    },
                );
            },
            CartAction::AddUpsell(incoming) => {
                match state.lines.iter_mut().find(|l| l.id == incoming.id) {
                    Some(existing) => {
                        // merge keeps the original unit price; the total is
                        // always unit_price x quantity
                        let merged = existing.quantity.unwrap_or(1)
                            + incoming.quantity.unwrap_or(1);
                        existing.quantity = Some(merged);
                    },
                    None => state.lines.push(incoming),
                }
            },
            CartAction::RemoveLine(id) => {
                state.lines.retain(|l| l.id != id);
            },
        }
        smallvec![]
    }
}
