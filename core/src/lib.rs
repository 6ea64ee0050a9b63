//! # Playgrid Core
//!
//! Core traits and types for the Playgrid widget architecture.
//!
//! The event-page widgets are built as unidirectional state machines:
//!
//! - **State**: owned domain state for one component (cart, tickets, ...)
//! - **Action**: all possible inputs to a reducer (user intents and
//!   committed facts)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side-effect descriptions (not execution), delayed and
//!   debounced dispatches, async work feeding actions back
//! - **Environment**: injected dependencies behind traits
//!
//! The runtime crate owns effect execution; reducers never perform I/O.
//!
//! ## Example
//!
//! ```
//! use playgrid_core::{Effect, Reducer, SmallVec, smallvec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Self::State,
//!         action: Self::Action,
//!         _env: &Self::Environment,
//!     ) -> SmallVec<[Effect<Self::Action>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 smallvec![]
//!             }
//!         }
//!     }
//! }
//! ```

pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod effect;
pub mod environment;
pub mod reducer;

pub use effect::{DebounceKey, Effect};
pub use environment::{Clock, SystemClock};
pub use reducer::Reducer;
