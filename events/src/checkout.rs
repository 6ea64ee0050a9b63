//! Checkout submission: the double-submit guard, line assembly, and the
//! terminal states of the one network write.
//!
//! The reducer owns only the submission lifecycle; validation and the
//! actual cart-create call are orchestrated by the page reducer, which has
//! the other components' state in scope.

use crate::cart::CartState;
use crate::form::FormState;
use crate::tickets::TicketState;
use playgrid_core::{Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::{Attribute, CartLineInput, Product};

/// Shown when submission is attempted with no selectable variant.
pub const SOLD_OUT_ERROR: &str = "This event is sold out.";

/// Shown for any checkout failure; the cause goes to the log, not the user.
pub const GENERIC_CHECKOUT_ERROR: &str = "Something went wrong. Please try again.";

/// Submission lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutState {
    /// Submit control is disabled while true
    pub submitting: bool,
    /// Hosted checkout URL for the shell to navigate to
    pub redirect_to: Option<String>,
    /// Last user-facing error
    pub last_error: Option<String>,
}

impl CheckoutState {
    /// Whether the submit control accepts a press.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.submitting
    }
}

/// Checkout actions.
#[derive(Action, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAction {
    /// A validated submission is starting; disables the control.
    #[command]
    Submit,
    /// The user edited the form; re-enables the control.
    #[command]
    FormTouched,
    /// The page became visible again; re-enables the control.
    #[command]
    PageVisible,
    /// The window regained focus; re-enables the control.
    #[command]
    WindowFocused,
    /// Cart creation succeeded.
    #[event]
    CartCreated {
        /// Hosted checkout URL
        checkout_url: String,
    },
    /// Cart creation failed; `cause` is for the log only.
    #[event]
    CartCreationFailed {
        /// Underlying failure description
        cause: String,
    },
}

/// Reducer over [`CheckoutState`].
pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Submit => {
                state.submitting = true;
                state.last_error = None;
            },
            CheckoutAction::FormTouched
            | CheckoutAction::PageVisible
            | CheckoutAction::WindowFocused => {
                // re-enable after a failed or abandoned attempt; a stored
                // redirect means navigation is already underway
                if state.redirect_to.is_none() {
                    state.submitting = false;
                }
            },
            CheckoutAction::CartCreated { checkout_url } => {
                state.redirect_to = Some(checkout_url);
            },
            CheckoutAction::CartCreationFailed { cause } => {
                tracing::warn!(%cause, "checkout failed");
                state.submitting = false;
                state.last_error = Some(GENERIC_CHECKOUT_ERROR.to_string());
            },
        }
        smallvec![]
    }
}

/// Assemble the cart-create lines: the event registration first, then one
/// line per cart add-on that carries a variant reference. Lines without a
/// reference are display-only and excluded.
///
/// Returns `None` when no variant is chosen (the event is sold out).
#[must_use]
pub fn assemble_lines(
    product: &Product,
    tickets: &TicketState,
    form: &FormState,
    cart: &CartState,
) -> Option<Vec<CartLineInput>> {
    let chosen = tickets.chosen_variant_id()?;

    let attr = |key: &str, value: String| Attribute {
        key: key.to_string(),
        value,
    };
    let mut attributes = vec![
        attr("Game", product.game_type.clone().unwrap_or_default()),
        attr("Format", product.format.clone().unwrap_or_default()),
        attr("Player Name", form.player_name()),
        attr("Phone Number", form.phone().to_string()),
        attr("Date of Birth", form.birthday().to_string()),
    ];
    attributes.extend(form.account_attributes());

    let mut lines = vec![CartLineInput {
        merchandise_id: chosen.clone(),
        quantity: 1,
        attributes,
    }];

    for line in cart.lines() {
        if line.id.is_event() {
            continue;
        }
        let Some(variant_id) = &line.variant_id else {
            continue;
        };
        lines.push(CartLineInput {
            merchandise_id: variant_id.clone(),
            quantity: line.quantity.unwrap_or(1),
            attributes: Vec::new(),
        });
    }

    Some(lines)
}
