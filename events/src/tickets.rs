//! Ticket selector: price-ordered single-select over an event's variants.
//!
//! Selection updates are immediate; only the resulting cart write is
//! debounced, so a burst of clicks settles into one
//! [`TicketAction::SelectionCommitted`].

use crate::cart::CartAction;
use crate::config::Timings;
use playgrid_core::{DebounceKey, Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::{Money, Product, Variant, VariantId};

const SENTINEL_TITLE: &str = "Default Title";
const DEBOUNCE_KEY: &str = "ticket-commit";

/// One selectable ticket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketOption {
    /// Variant behind the row
    pub variant_id: VariantId,
    /// Display label ("Seat A1", "Single Entry")
    pub label: String,
    /// Unit price
    pub price: Money,
    /// Currency code for the price label
    pub currency: String,
    /// Remaining seats
    pub available: i64,
}

impl TicketOption {
    /// Sold-out rows render disabled and are never selectable.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available <= 0
    }

    /// Seats label: `"3 / 20 Open"` with capacity, `"3 Open"` without,
    /// `"Sold out"` at zero.
    #[must_use]
    pub fn seats_label(&self, capacity: Option<i64>) -> String {
        if self.available <= 0 {
            return "Sold out".to_string();
        }
        match capacity {
            Some(cap) if cap > 0 => format!("{} / {cap} Open", self.available),
            _ => format!("{} Open", self.available),
        }
    }
}

/// Ticket selector state, seeded once from the fetched product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketState {
    event_title: String,
    capacity: Option<i64>,
    options: Vec<TicketOption>,
    chosen: Option<VariantId>,
}

impl TicketState {
    /// Derive the selector from a product snapshot.
    ///
    /// Variants are stably sorted by ascending price. Sentinel-titled
    /// variants are skipped when the product has several; a sole sentinel
    /// variant renders as "Single Entry". The first available option in
    /// sorted order becomes the default selection.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let multiple = product.variants.len() > 1;
        let options: Vec<TicketOption> = product
            .variants_by_price()
            .into_iter()
            .filter(|v| !(multiple && raw_label(v) == SENTINEL_TITLE))
            .map(|v| TicketOption {
                variant_id: v.id.clone(),
                label: display_label(v),
                price: v.price,
                currency: v.currency.clone(),
                available: v.available(),
            })
            .collect();

        let chosen = options
            .iter()
            .find(|o| !o.is_sold_out())
            .map(|o| o.variant_id.clone());

        Self {
            event_title: product.title.clone(),
            capacity: product.total_inventory,
            options,
            chosen,
        }
    }

    /// The rows in display order.
    #[must_use]
    pub fn options(&self) -> &[TicketOption] {
        &self.options
    }

    /// The event product title.
    #[must_use]
    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    /// Total seat capacity, when the catalog exposed it.
    #[must_use]
    pub const fn capacity(&self) -> Option<i64> {
        self.capacity
    }

    /// The currently chosen variant; `None` means the event is sold out.
    #[must_use]
    pub const fn chosen_variant_id(&self) -> Option<&VariantId> {
        self.chosen.as_ref()
    }

    /// The option backing the current choice.
    #[must_use]
    pub fn chosen_option(&self) -> Option<&TicketOption> {
        let chosen = self.chosen.as_ref()?;
        self.options.iter().find(|o| &o.variant_id == chosen)
    }

    /// Whether the given row renders as active.
    #[must_use]
    pub fn is_active(&self, id: &VariantId) -> bool {
        self.chosen.as_ref() == Some(id)
    }

    /// The cart write for the current choice.
    #[must_use]
    pub fn event_line(&self) -> Option<CartAction> {
        self.chosen_option().map(|option| CartAction::SetEventLine {
            title: self.event_title.clone(),
            variant_label: option.label.clone(),
            unit_price: option.price,
        })
    }
}

/// Ticket selector actions.
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    /// Choose a row. Sold-out and unknown variants are ignored.
    #[command]
    Select {
        /// Variant to select
        variant_id: VariantId,
    },
    /// The debounced cart write for the latest selection.
    #[event]
    SelectionCommitted,
}

/// Reducer over [`TicketState`].
pub struct TicketReducer;

impl Reducer for TicketReducer {
    type State = TicketState;
    type Action = TicketAction;
    type Environment = Timings;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TicketAction::Select { variant_id } => {
                let selectable = state
                    .options
                    .iter()
                    .any(|o| o.variant_id == variant_id && !o.is_sold_out());
                if !selectable {
                    return smallvec![];
                }
                state.chosen = Some(variant_id);
                smallvec![Effect::Debounce {
                    key: DebounceKey::new(DEBOUNCE_KEY),
                    duration: env.ticket_commit,
                    action: Box::new(TicketAction::SelectionCommitted),
                }]
            },
            // routed by the page reducer into the cart write
            TicketAction::SelectionCommitted => smallvec![],
        }
    }
}

fn raw_label(variant: &Variant) -> &str {
    let meaningful = variant
        .selected_options
        .iter()
        .find(|o| !o.name.eq_ignore_ascii_case("title") && o.value != SENTINEL_TITLE);
    if let Some(option) = meaningful {
        return &option.value;
    }
    let title_option = variant
        .selected_options
        .iter()
        .find(|o| o.name.eq_ignore_ascii_case("title") && o.value != SENTINEL_TITLE);
    match title_option {
        Some(option) => &option.value,
        None => &variant.title,
    }
}

fn display_label(variant: &Variant) -> String {
    let raw = raw_label(variant);
    if raw == SENTINEL_TITLE {
        "Single Entry".to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use playgrid_storefront::{ProductId, SelectedOption};
    use playgrid_testing::{
        ReducerTest,
        assertions::{assert_has_debounce_effect, assert_no_effects},
    };

    fn variant(numeric_id: &str, title: &str, cents: i64, qty: i64) -> Variant {
        Variant {
            id: VariantId::new(numeric_id).unwrap(),
            title: title.into(),
            price: Money::from_cents(cents),
            currency: "USD".into(),
            quantity_available: Some(qty),
            selected_options: vec![],
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: ProductId::new("1").unwrap(),
            title: "Friday Night Standard".into(),
            handle: Some("friday-night-standard".into()),
            description: None,
            game_type: None,
            start_time: None,
            duration_minutes: None,
            format: None,
            requires_partner_account: false,
            total_inventory: Some(40),
            variants,
            complementary: vec![],
        }
    }

    #[test]
    fn defaults_to_cheapest_available_variant() {
        let state = TicketState::from_product(&product(vec![
            variant("3", "Premium", 5000, 4),
            variant("1", "Cheap but gone", 1000, 0),
            variant("2", "Standard", 2500, 9),
        ]));

        // price order with the sold-out cheapest still listed first
        let labels: Vec<_> = state.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Cheap but gone", "Standard", "Premium"]);

        let chosen = state.chosen_option().unwrap();
        assert_eq!(chosen.label, "Standard");
        assert!(state.is_active(&VariantId::new("2").unwrap()));
    }

    #[test]
    fn sole_sentinel_variant_becomes_single_entry() {
        let state =
            TicketState::from_product(&product(vec![variant("1", "Default Title", 1500, 10)]));
        assert_eq!(state.options().len(), 1);
        assert_eq!(state.options()[0].label, "Single Entry");
    }

    #[test]
    fn sentinel_variants_are_skipped_among_several() {
        let state = TicketState::from_product(&product(vec![
            variant("1", "Default Title", 1500, 10),
            variant("2", "Seat A1", 2500, 3),
        ]));
        let labels: Vec<_> = state.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Seat A1"]);
    }

    #[test]
    fn meaningful_selected_option_wins_over_title() {
        let mut v = variant("1", "Default Title", 2500, 5);
        v.selected_options = vec![
            SelectedOption {
                name: "Title".into(),
                value: "Default Title".into(),
            },
            SelectedOption {
                name: "Seat".into(),
                value: "A1".into(),
            },
        ];
        let state = TicketState::from_product(&product(vec![v]));
        assert_eq!(state.options()[0].label, "A1");
    }

    #[test]
    fn all_sold_out_means_no_selection() {
        let state = TicketState::from_product(&product(vec![
            variant("1", "A", 1000, 0),
            variant("2", "B", 2000, 0),
        ]));
        assert!(state.chosen_variant_id().is_none());
        assert!(state.event_line().is_none());
    }

    #[test]
    fn select_updates_choice_and_debounces_the_commit() {
        let state = TicketState::from_product(&product(vec![
            variant("1", "A", 1000, 5),
            variant("2", "B", 2000, 5),
        ]));

        ReducerTest::new(TicketReducer)
            .with_env(Timings::default())
            .given_state(state)
            .when_action(TicketAction::Select {
                variant_id: VariantId::new("2").unwrap(),
            })
            .then_state(|s| {
                assert!(s.is_active(&VariantId::new("2").unwrap()));
                assert!(!s.is_active(&VariantId::new("1").unwrap()));
            })
            .then_effects(|effects| assert_has_debounce_effect(effects, "ticket-commit"))
            .run();
    }

    #[test]
    fn selecting_a_sold_out_variant_is_ignored() {
        let state = TicketState::from_product(&product(vec![
            variant("1", "A", 1000, 5),
            variant("2", "B", 2000, 0),
        ]));

        ReducerTest::new(TicketReducer)
            .with_env(Timings::default())
            .given_state(state)
            .when_action(TicketAction::Select {
                variant_id: VariantId::new("2").unwrap(),
            })
            .then_state(|s| assert!(s.is_active(&VariantId::new("1").unwrap())))
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn seat_labels_include_capacity_when_known() {
        let option = TicketOption {
            variant_id: VariantId::new("1").unwrap(),
            label: "A".into(),
            price: Money::ZERO,
            currency: "USD".into(),
            available: 3,
        };
        assert_eq!(option.seats_label(Some(20)), "3 / 20 Open");
        assert_eq!(option.seats_label(None), "3 Open");

        let gone = TicketOption {
            available: 0,
            ..option
        };
        assert_eq!(gone.seats_label(Some(20)), "Sold out");
    }
}
