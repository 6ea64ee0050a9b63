//! Upsell cards: per-product variant pickers, quantity steppers, and the
//! inventory gate that protects the cart.
//!
//! Stock is only ever read from the catalog snapshot; the gate compares the
//! requested quantity plus what the cart already holds against it and
//! rejects with a transient notice instead of clamping.

use crate::config::Timings;
use crate::types::{LineId, LineItem};
use playgrid_core::{DebounceKey, Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::{Money, Product, Variant, VariantId};

const SENTINEL_TITLE: &str = "Default Title";
const MAX_STEP: u32 = 10;

/// One choice in a card's variant picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsellVariantOption {
    /// Variant behind the choice
    pub variant_id: VariantId,
    /// Picker label ("Red / Large", "Standard")
    pub label: String,
    /// Unit price
    pub price: Money,
    /// Currency code for the price label
    pub currency: String,
    /// Remaining stock
    pub available: i64,
}

impl UpsellVariantOption {
    /// Whether the choice has no stock left.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available <= 0
    }

    /// Low-stock badge: shown only for one through five remaining.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        0 < self.available && self.available <= 5
    }
}

/// One add-on product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsellCard {
    title: String,
    options: Vec<UpsellVariantOption>,
    selected: usize,
    quantity: u32,
}

impl UpsellCard {
    /// The product title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All picker choices in catalog order.
    #[must_use]
    pub fn options(&self) -> &[UpsellVariantOption] {
        &self.options
    }

    /// Index of the selected choice.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected choice.
    ///
    /// # Panics
    ///
    /// Never panics: cards are only constructed with at least one option and
    /// the reducer keeps `selected` in bounds.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn selected_option(&self) -> &UpsellVariantOption {
        &self.options[self.selected]
    }

    /// The picker is rendered only when there is something to pick.
    #[must_use]
    pub fn shows_picker(&self) -> bool {
        self.options.len() > 1
    }

    /// Current stepper value.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Upper stepper bound: ten or the remaining stock, whichever is lower.
    #[must_use]
    pub fn max_quantity(&self) -> u32 {
        let available = u32::try_from(self.selected_option().available.max(0)).unwrap_or(MAX_STEP);
        MAX_STEP.min(available)
    }

    /// Whether the selected choice is out of stock, disabling all controls.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.selected_option().is_sold_out()
    }

    /// Label for the add control.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.is_sold_out() {
            "Out of Stock"
        } else {
            "Add to Cart"
        }
    }

    /// Cart line title: `"<product> - <variant label>"`.
    #[must_use]
    pub fn line_title(&self) -> String {
        format!("{} - {}", self.title, self.selected_option().label)
    }

    /// Cart line id for the selected choice.
    #[must_use]
    pub fn line_id(&self) -> LineId {
        LineId::upsell(&self.selected_option().variant_id)
    }
}

/// All upsell cards for the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsellState {
    cards: Vec<UpsellCard>,
}

impl UpsellState {
    /// Derive the cards from the event product's complementary products.
    ///
    /// Products without variants are dropped. The default choice prefers
    /// in-stock variants, then lowest price, ties broken by catalog order;
    /// the stepper starts at one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let cards = product
            .complementary
            .iter()
            .filter(|p| !p.variants.is_empty())
            .map(|p| {
                let options: Vec<UpsellVariantOption> =
                    p.variants.iter().map(picker_option).collect();
                UpsellCard {
                    title: p.title.clone(),
                    selected: default_choice(&options),
                    options,
                    quantity: 1,
                }
            })
            .collect();
        Self { cards }
    }

    /// The cards in catalog order; empty hides the whole section.
    #[must_use]
    pub fn cards(&self) -> &[UpsellCard] {
        &self.cards
    }

    /// The card at `index`, if valid.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&UpsellCard> {
        self.cards.get(index)
    }
}

/// What an attempted add should do to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Merge this line into the cart
    Added(LineItem),
    /// Leave the cart alone and show this message briefly
    Rejected(String),
}

/// The inventory gate, evaluated at commit time against the cart's current
/// quantity for the line.
#[must_use]
pub fn gate_add(card: &UpsellCard, cart_quantity: u32) -> AddOutcome {
    let option = card.selected_option();
    let available = u32::try_from(option.available.max(0)).unwrap_or(0);
    let requested = card.quantity();

    if cart_quantity.saturating_add(requested) > available {
        let headroom = available.saturating_sub(cart_quantity);
        let message = if headroom == 0 {
            format!(
                "{}: This item is already at maximum quantity in your cart.",
                card.line_title()
            )
        } else {
            format!(
                "{}: Only {headroom} more available. {available} total in stock.",
                card.line_title()
            )
        };
        return AddOutcome::Rejected(message);
    }

    AddOutcome::Added(LineItem {
        id: card.line_id(),
        title: card.line_title(),
        variant_label: String::new(),
        unit_price: option.price,
        quantity: Some(requested),
        variant_id: Some(option.variant_id.clone()),
    })
}

/// Upsell actions. Indices out of range are ignored.
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum UpsellAction {
    /// Pick a variant on a card; resets the stepper to one.
    #[command]
    SelectVariant {
        /// Card index
        card: usize,
        /// Option index within the card
        option: usize,
    },
    /// Step the quantity up, capped at the card's maximum.
    #[command]
    IncrementQuantity {
        /// Card index
        card: usize,
    },
    /// Step the quantity down, floored at one.
    #[command]
    DecrementQuantity {
        /// Card index
        card: usize,
    },
    /// Ask to add the card's selection to the cart.
    #[command]
    RequestAdd {
        /// Card index
        card: usize,
    },
    /// The debounced commit; the page runs the inventory gate.
    #[event]
    CommitAdd {
        /// Card index
        card: usize,
    },
}

/// Reducer over [`UpsellState`].
pub struct UpsellReducer;

impl Reducer for UpsellReducer {
    type State = UpsellState;
    type Action = UpsellAction;
    type Environment = Timings;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            UpsellAction::SelectVariant { card, option } => {
                if let Some(c) = state.cards.get_mut(card) {
                    if option < c.options.len() {
                        c.selected = option;
                        c.quantity = 1;
                    }
                }
                smallvec![]
            },
            UpsellAction::IncrementQuantity { card } => {
                if let Some(c) = state.cards.get_mut(card) {
                    let max = c.max_quantity();
                    if c.quantity < max {
                        c.quantity += 1;
                    }
                }
                smallvec![]
            },
            UpsellAction::DecrementQuantity { card } => {
                if let Some(c) = state.cards.get_mut(card) {
                    if c.quantity > 1 {
                        c.quantity -= 1;
                    }
                }
                smallvec![]
            },
            UpsellAction::RequestAdd { card } => {
                let addable = state.card(card).is_some_and(|c| !c.is_sold_out());
                if !addable {
                    return smallvec![];
                }
                smallvec![Effect::Debounce {
                    key: DebounceKey::new(format!("upsell-add:{card}")),
                    duration: env.upsell_commit,
                    action: Box::new(UpsellAction::CommitAdd { card }),
                }]
            },
            // routed by the page reducer through the inventory gate
            UpsellAction::CommitAdd { .. } => smallvec![],
        }
    }
}

fn picker_option(variant: &Variant) -> UpsellVariantOption {
    UpsellVariantOption {
        variant_id: variant.id.clone(),
        label: option_label(variant),
        price: variant.price,
        currency: variant.currency.clone(),
        available: variant.available(),
    }
}

fn option_label(variant: &Variant) -> String {
    let meaningful: Vec<&str> = variant
        .selected_options
        .iter()
        .filter(|o| o.value != SENTINEL_TITLE && !o.name.eq_ignore_ascii_case("title"))
        .map(|o| o.value.as_str())
        .collect();

    if !meaningful.is_empty() {
        return meaningful.join(" / ");
    }
    if variant.title == SENTINEL_TITLE {
        "Standard".to_string()
    } else {
        variant.title.clone()
    }
}

fn default_choice(options: &[UpsellVariantOption]) -> usize {
    // first-wins on price ties, matching catalog order
    let cheapest = |sold_out_ok: bool| {
        let mut best: Option<(usize, Money)> = None;
        for (i, o) in options.iter().enumerate() {
            if !sold_out_ok && o.is_sold_out() {
                continue;
            }
            if best.is_none_or(|(_, price)| o.price < price) {
                best = Some((i, o.price));
            }
        }
        best.map(|(i, _)| i)
    };
    cheapest(false).or_else(|| cheapest(true)).unwrap_or(0)
}
