//! Side-effect descriptions returned from reducers.
//!
//! Effects are values, not execution: a reducer describes what should
//! happen and the Store runtime performs it. This keeps reducers pure and
//! lets tests assert on the returned descriptions without running them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Identity of a debounced control.
///
/// Effects scheduled under the same key coalesce: dispatching a new
/// [`Effect::Debounce`] cancels the pending one, so only the trailing
/// invocation of a burst executes. Keys are usually a control name plus a
/// discriminator, e.g. `"upsell-add:49903425388848"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DebounceKey(String);

impl DebounceKey {
    /// Create a key from a control identifier.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DebounceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A description of a side effect to be executed by the Store runtime.
///
/// # Type Parameters
///
/// - `Action`: the action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects concurrently
    Parallel(Vec<Effect<Action>>),

    /// Run effects one after another
    Sequential(Vec<Effect<Action>>),

    /// Dispatch an action after a fixed delay (timeouts, auto-hiding
    /// notices)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after the delay
        action: Box<Action>,
    },

    /// Trailing-edge debounce: dispatch `action` after `duration` of quiet,
    /// cancelling any pending effect scheduled under the same `key`.
    Debounce {
        /// Identity under which bursts coalesce
        key: DebounceKey,
        /// Quiet period before the action fires
        duration: Duration,
        /// Action to dispatch once the burst settles
        action: Box<Action>,
    },

    /// Arbitrary async computation.
    ///
    /// Returns `Option<Action>`: if `Some`, the action is fed back into
    /// the reducer.
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug since Future doesn't implement Debug.
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Debounce {
                key,
                duration,
                action,
            } => f
                .debug_struct("Effect::Debounce")
                .field("key", key)
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run concurrently
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }

    /// Map the action type produced by this effect.
    ///
    /// Used when a parent reducer embeds a child reducer: the child's
    /// effects are lifted into the parent's action space so the feedback
    /// loop stays within one store.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        Action: Send + 'static,
        B: Send + 'static,
        F: Fn(Action) -> B + Send + Sync + 'static,
    {
        let f: Arc<dyn Fn(Action) -> B + Send + Sync> = Arc::new(f);
        self.map_shared(&f)
    }

    fn map_shared<B>(self, f: &Arc<dyn Fn(Action) -> B + Send + Sync>) -> Effect<B>
    where
        Action: Send + 'static,
        B: Send + 'static,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Parallel(effects) => {
                Effect::Parallel(effects.into_iter().map(|e| e.map_shared(f)).collect())
            },
            Effect::Sequential(effects) => {
                Effect::Sequential(effects.into_iter().map(|e| e.map_shared(f)).collect())
            },
            Effect::Delay { duration, action } => Effect::Delay {
                duration,
                action: Box::new(f(*action)),
            },
            Effect::Debounce {
                key,
                duration,
                action,
            } => Effect::Debounce {
                key,
                duration,
                action: Box::new(f(*action)),
            },
            Effect::Future(fut) => {
                let f = Arc::clone(f);
                Effect::Future(Box::pin(async move { fut.await.map(|a| f(a)) }))
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Child {
        Done,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Parent {
        FromChild(Child),
    }

    #[test]
    fn map_lifts_delayed_actions() {
        let effect: Effect<Child> = Effect::Delay {
            duration: Duration::from_millis(150),
            action: Box::new(Child::Done),
        };

        let mapped = effect.map(Parent::FromChild);
        match mapped {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(150));
                assert_eq!(*action, Parent::FromChild(Child::Done));
            },
            other => panic!("expected Delay, got {other:?}"),
        }
    }

    #[test]
    fn map_preserves_debounce_key() {
        let effect: Effect<Child> = Effect::Debounce {
            key: DebounceKey::new("ticket-select"),
            duration: Duration::from_millis(150),
            action: Box::new(Child::Done),
        };

        match effect.map(Parent::FromChild) {
            Effect::Debounce { key, .. } => assert_eq!(key.as_str(), "ticket-select"),
            other => panic!("expected Debounce, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn map_wraps_future_output() {
        let effect: Effect<Child> = Effect::Future(Box::pin(async { Some(Child::Done) }));

        match effect.map(Parent::FromChild) {
            Effect::Future(fut) => {
                assert_eq!(fut.await, Some(Parent::FromChild(Child::Done)));
            },
            other => panic!("expected Future, got {other:?}"),
        }
    }
}
