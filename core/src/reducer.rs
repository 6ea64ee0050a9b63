//! The core trait for widget business logic.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait, the core abstraction for component logic.
///
/// Reducers are pure functions: `(State, Action, Environment) → Effects`.
/// They validate the action, update state in place, and return effect
/// descriptions for the runtime to execute. All I/O lives in effects.
///
/// # Example
///
/// ```ignore
/// impl Reducer for CartReducer {
///     type State = CartState;
///     type Action = CartAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut CartState,
///         action: CartAction,
///         _env: &(),
///     ) -> SmallVec<[Effect<CartAction>; 4]> {
///         // business logic here
///         smallvec![]
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects.
    ///
    /// Most reductions produce zero or one effect; the inline capacity of
    /// four keeps the common case off the heap.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
