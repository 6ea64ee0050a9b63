//! The event page reducer: one store composing cart, ticket selector,
//! upsell section, attendee form and checkout.
//!
//! Child reducers own their slices of state; this reducer routes their event
//! actions across component boundaries (committed ticket selection into the
//! cart, committed upsell adds through the inventory gate) and orchestrates
//! the checkout submission against the storefront.

use std::sync::Arc;

use playgrid_core::{DebounceKey, Effect, Reducer, SmallVec, smallvec};
use playgrid_macros::Action;
use playgrid_storefront::{Product, Storefront};

use crate::cart::{CartAction, CartReducer, CartState};
use crate::checkout::{
    CheckoutAction, CheckoutReducer, CheckoutState, SOLD_OUT_ERROR, assemble_lines,
};
use crate::config::Timings;
use crate::form::{FormAction, FormReducer, FormState};
use crate::tickets::{TicketAction, TicketReducer, TicketState};
use crate::types::Notice;
use crate::upsells::{AddOutcome, UpsellAction, UpsellReducer, UpsellState, gate_add};
use crate::view::CartView;

/// Debounce key for the single visible notice's expiry. Reusing the key
/// means a fresh notice reschedules the expiry instead of racing it.
const NOTICE_EXPIRY_KEY: &str = "notice-expiry";

/// Page lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagePhase {
    /// Product fetch in flight
    #[default]
    Loading,
    /// No product for the requested handle; the shell shows a fallback
    NotFound,
    /// Interactive
    Ready,
}

/// Full page state.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// Lifecycle phase
    pub phase: PagePhase,
    /// The fetched event product
    pub product: Option<Product>,
    /// Order-in-progress
    pub cart: CartState,
    /// Ticket selector
    pub tickets: TicketState,
    /// Upsell section
    pub upsells: UpsellState,
    /// Attendee form
    pub form: FormState,
    /// Submission lifecycle
    pub checkout: CheckoutState,
    /// Transient user-facing notice, at most one at a time
    pub notice: Option<Notice>,
}

impl PageState {
    /// Currency of the event product, defaulting to USD before load.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.variants.first())
            .map_or("USD", |v| v.currency.as_str())
    }

    /// Render the cart panel.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from_cart(&self.cart, self.currency())
    }
}

/// Everything the page can do.
#[derive(Action, Debug)]
pub enum PageAction {
    /// Fetch the event product and seed the components.
    #[command]
    Load {
        /// Product handle from the page URL
        handle: String,
    },
    /// The product fetch resolved.
    #[event]
    Loaded(Option<Box<Product>>),
    /// The product fetch failed.
    #[event]
    LoadFailed {
        /// Description for the log
        message: String,
    },
    /// The visible notice timed out.
    #[event]
    NoticeExpired,
    /// Cart component action
    Cart(CartAction),
    /// Ticket selector action
    Ticket(TicketAction),
    /// Upsell section action
    Upsell(UpsellAction),
    /// Attendee form action
    Form(FormAction),
    /// Checkout action
    Checkout(CheckoutAction),
}

/// Injected dependencies for the page.
#[derive(Clone)]
pub struct PageEnvironment {
    /// Catalog and cart-create API
    pub storefront: Arc<dyn Storefront>,
    /// Debounce and notice durations
    pub timings: Timings,
}

/// Reducer over [`PageState`].
pub struct EventPageReducer;

type PageEffects = SmallVec<[Effect<PageAction>; 4]>;

impl Reducer for EventPageReducer {
    type State = PageState;
    type Action = PageAction;
    type Environment = PageEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> PageEffects {
        tracing::debug!(action = action.label(), "page action");
        match action {
            PageAction::Load { handle } => {
                state.phase = PagePhase::Loading;
                let storefront = Arc::clone(&env.storefront);
                smallvec![Effect::Future(Box::pin(async move {
                    match storefront.product_by_handle(&handle).await {
                        Ok(product) => Some(PageAction::Loaded(product.map(Box::new))),
                        Err(error) => Some(PageAction::LoadFailed {
                            message: error.to_string(),
                        }),
                    }
                }))]
            },
            PageAction::Loaded(Some(product)) => {
                seed(state, *product);
                smallvec![]
            },
            PageAction::Loaded(None) => {
                state.phase = PagePhase::NotFound;
                smallvec![]
            },
            PageAction::LoadFailed { message } => {
                tracing::error!(%message, "event page load failed");
                state.phase = PagePhase::NotFound;
                smallvec![]
            },
            PageAction::NoticeExpired => {
                state.notice = None;
                smallvec![]
            },
            PageAction::Cart(action) => {
                lift(
                    CartReducer.reduce(&mut state.cart, action, &()),
                    PageAction::Cart,
                )
            },
            PageAction::Ticket(TicketAction::SelectionCommitted) => {
                if let Some(write) = state.tickets.event_line() {
                    CartReducer.reduce(&mut state.cart, write, &());
                }
                smallvec![]
            },
            PageAction::Ticket(action) => {
                lift(
                    TicketReducer.reduce(&mut state.tickets, action, &env.timings),
                    PageAction::Ticket,
                )
            },
            PageAction::Upsell(UpsellAction::CommitAdd { card }) => {
                commit_upsell(state, card, env)
            },
            PageAction::Upsell(action) => {
                lift(
                    UpsellReducer.reduce(&mut state.upsells, action, &env.timings),
                    PageAction::Upsell,
                )
            },
            PageAction::Form(action) => {
                // any edit re-enables a submit that soft-failed
                let mut effects = lift(
                    FormReducer.reduce(&mut state.form, action, &()),
                    PageAction::Form,
                );
                effects.extend(lift(
                    CheckoutReducer.reduce(
                        &mut state.checkout,
                        CheckoutAction::FormTouched,
                        &(),
                    ),
                    PageAction::Checkout,
                ));
                effects
            },
            PageAction::Checkout(CheckoutAction::Submit) => submit(state, env),
            PageAction::Checkout(action) => {
                let failed = matches!(&action, CheckoutAction::CartCreationFailed { .. });
                let mut effects = lift(
                    CheckoutReducer.reduce(&mut state.checkout, action, &()),
                    PageAction::Checkout,
                );
                if failed {
                    if let Some(message) = state.checkout.last_error.clone() {
                        effects.extend(show_notice(state, Notice::error(message), env));
                    }
                }
                effects
            },
        }
    }
}

/// Seed every component from the fetched product, then write the default
/// selection into the cart immediately (the debounce only applies to user
/// reselection).
fn seed(state: &mut PageState, product: Product) {
    state.tickets = TicketState::from_product(&product);
    state.upsells = UpsellState::from_product(&product);
    state.form = FormState::from_product(&product);
    state.product = Some(product);
    state.phase = PagePhase::Ready;
    if let Some(write) = state.tickets.event_line() {
        CartReducer.reduce(&mut state.cart, write, &());
    }
}

/// Run the inventory gate for a committed upsell add.
fn commit_upsell(state: &mut PageState, card: usize, env: &PageEnvironment) -> PageEffects {
    let Some(card) = state.upsells.card(card) else {
        return smallvec![];
    };
    let in_cart = state.cart.quantity_of(&card.line_id());
    match gate_add(card, in_cart) {
        AddOutcome::Added(line) => {
            CartReducer.reduce(&mut state.cart, CartAction::AddUpsell(line), &());
            smallvec![]
        },
        AddOutcome::Rejected(message) => show_notice(state, Notice::warning(message), env),
    }
}

/// Validate and, when clean, start the cart creation.
fn submit(state: &mut PageState, env: &PageEnvironment) -> PageEffects {
    if !state.checkout.can_submit() || state.checkout.redirect_to.is_some() {
        return smallvec![];
    }
    let Some(product) = &state.product else {
        return smallvec![];
    };
    if state.tickets.chosen_variant_id().is_none() {
        return show_notice(state, Notice::error(SOLD_OUT_ERROR), env);
    }
    if let Err(error) = state.form.validate() {
        return show_notice(state, Notice::warning(error.to_string()), env);
    }
    let Some(lines) = assemble_lines(product, &state.tickets, &state.form, &state.cart) else {
        return smallvec![];
    };

    let mut effects = lift(
        CheckoutReducer.reduce(&mut state.checkout, CheckoutAction::Submit, &()),
        PageAction::Checkout,
    );
    let storefront = Arc::clone(&env.storefront);
    effects.push(Effect::Future(Box::pin(async move {
        let action = match storefront.create_cart(&lines).await {
            Ok(cart) => CheckoutAction::CartCreated {
                checkout_url: cart.checkout_url,
            },
            Err(error) => CheckoutAction::CartCreationFailed {
                cause: error.to_string(),
            },
        };
        Some(PageAction::Checkout(action))
    })));
    effects
}

/// Show a notice and reschedule its expiry; errors linger longer.
fn show_notice(state: &mut PageState, notice: Notice, env: &PageEnvironment) -> PageEffects {
    let ttl = match notice.severity {
        crate::types::NoticeSeverity::Warning => env.timings.notice_ttl,
        crate::types::NoticeSeverity::Error => env.timings.error_ttl,
    };
    state.notice = Some(notice);
    smallvec![Effect::Debounce {
        key: DebounceKey::new(NOTICE_EXPIRY_KEY),
        duration: ttl,
        action: Box::new(PageAction::NoticeExpired),
    }]
}

fn lift<A, F>(effects: SmallVec<[Effect<A>; 4]>, f: F) -> PageEffects
where
    A: Send + 'static,
    F: Fn(A) -> PageAction + Send + Sync + Clone + 'static,
{
    effects.into_iter().map(|e| e.map(f.clone())).collect()
}
