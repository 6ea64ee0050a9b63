//! Event page widgets for the Playgrid storefront.
//!
//! Everything an event product page does between "the visitor arrived" and
//! "the browser navigates to hosted checkout" lives here, as composable
//! reducers over plain state:
//!
//! - [`cart`]: the order-in-progress, one event line plus merged add-ons
//! - [`tickets`]: single-select ticket variants with a debounced cart write
//! - [`upsells`]: per-product variant pickers, steppers and the inventory
//!   gate
//! - [`form`]: attendee details and the game-account question
//! - [`checkout`]: submission lifecycle, line assembly and the redirect
//! - [`page`]: the composition root routing events across components
//!
//! [`summary`], [`format`] and [`view`] are the pure display layer: listing
//! cards, money/date labels, cart rows.
//!
//! The reducers never touch the network themselves; the page reducer returns
//! [`playgrid_core::Effect`] values and the store executes them against the
//! injected [`playgrid_storefront::Storefront`].

pub mod cart;
pub mod checkout;
pub mod config;
pub mod form;
pub mod format;
pub mod page;
pub mod summary;
pub mod tickets;
pub mod types;
pub mod upsells;
pub mod view;

pub use cart::{CartAction, CartReducer, CartState};
pub use checkout::{CheckoutAction, CheckoutReducer, CheckoutState, assemble_lines};
pub use config::{EventsConfig, Timings};
pub use form::{FormAction, FormReducer, FormState};
pub use page::{EventPageReducer, PageAction, PageEnvironment, PagePhase, PageState};
pub use summary::EventSummary;
pub use tickets::{TicketAction, TicketReducer, TicketState};
pub use types::{LineId, LineItem, Notice, NoticeSeverity};
pub use upsells::{AddOutcome, UpsellAction, UpsellReducer, UpsellState, gate_add};
pub use view::{CartLineView, CartView};
