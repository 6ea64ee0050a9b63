//! # Playgrid Runtime
//!
//! The Store runtime that coordinates reducer execution and effect
//! handling for the widget architecture.
//!
//! A [`Store`] owns one component's state, runs its reducer for every
//! dispatched action, notifies a single registered change observer (the
//! rendering layer's refresh hook), and executes the returned effects:
//!
//! - `Effect::Future` runs async work and feeds the resulting action back
//! - `Effect::Delay` dispatches an action after a fixed wait
//! - `Effect::Debounce` coalesces bursts: scheduling under an already
//!   pending key aborts the earlier task, so only the trailing invocation
//!   fires
//!
//! Everything here is cooperative: reducers run to completion under the
//! state lock, and effect tasks re-enter through [`Store::send`].
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::new(CartState::default(), CartReducer, ());
//! store.observe(|state| render(state));
//! store.send(CartAction::RemoveLine(id)).await?;
//! let total = store.state(|s| s.subtotal()).await;
//! ```

use playgrid_core::effect::Effect;
use playgrid_core::effect::DebounceKey;
use playgrid_core::reducer::Reducer;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Single-slot change observer: at most one subscriber, last registration
/// wins.
type ChangeObserver<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct StoreInner<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: RwLock<S>,
    reducer: R,
    environment: E,
    observer: Mutex<Option<ChangeObserver<S>>>,
    debounces: Mutex<HashMap<DebounceKey, JoinHandle<()>>>,
    shutdown: AtomicBool,
}

/// The Store, runtime coordinator for one reducer.
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop and per-key debouncing)
///
/// Cloning a Store is cheap and shares the same state, observer slot and
/// debounce registry.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    inner: Arc<StoreInner<S, A, E, R>>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial_state),
                reducer,
                environment,
                observer: Mutex::new(None),
                debounces: Mutex::new(HashMap::new()),
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    /// Register the change observer.
    ///
    /// The observer is invoked with a reference to the state after every
    /// processed action. There is at most one: registering again replaces
    /// the previous callback.
    pub fn observe<F>(&self, f: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        if let Ok(mut slot) = self.inner.observer.lock() {
            *slot = Some(Arc::new(f));
        }
    }

    /// Remove the registered observer, if any.
    pub fn clear_observer(&self) {
        if let Ok(mut slot) = self.inner.observer.lock() {
            *slot = None;
        }
    }

    /// Dispatch an action: run the reducer, notify the observer, execute
    /// the returned effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if [`Store::shutdown`]
    /// was called.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.inner.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        let effects = {
            let mut state = self.inner.state.write().await;
            self.inner
                .reducer
                .reduce(&mut state, action, &self.inner.environment)
        };

        self.notify().await;

        for effect in effects {
            self.spawn_effect(effect);
        }

        Ok(())
    }

    /// Read the current state through a projection function.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.inner.state.read().await;
        f(&state)
    }

    /// Stop accepting actions and abort pending debounce tasks.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::Release);
        if let Ok(mut pending) = self.inner.debounces.lock() {
            for (_, handle) in pending.drain() {
                handle.abort();
            }
        }
    }

    /// Number of debounced dispatches currently waiting to fire.
    ///
    /// Exposed for tests asserting that bursts coalesce.
    #[must_use]
    pub fn pending_debounces(&self) -> usize {
        self.inner
            .debounces
            .lock()
            .map(|pending| pending.len())
            .unwrap_or(0)
    }

    async fn notify(&self) {
        let observer = self
            .inner
            .observer
            .lock()
            .ok()
            .and_then(|slot| slot.clone());
        if let Some(observer) = observer {
            let state = self.inner.state.read().await;
            observer(&state);
        }
    }

    fn spawn_effect(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.spawn_effect(effect);
                }
            },
            Effect::Sequential(effects) => {
                let store = self.clone();
                tokio::spawn(async move {
                    for effect in effects {
                        store.run_effect(effect).await;
                    }
                });
            },
            Effect::Delay { duration, action } => {
                let store = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                });
            },
            Effect::Debounce {
                key,
                duration,
                action,
            } => self.schedule_debounce(key, duration, *action),
            Effect::Future(fut) => {
                let store = self.clone();
                tokio::spawn(async move {
                    if let Some(action) = fut.await {
                        store.feed_back(action).await;
                    }
                });
            },
        }
    }

    fn schedule_debounce(&self, key: DebounceKey, duration: std::time::Duration, action: A) {
        let store = self.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Ok(mut pending) = store.inner.debounces.lock() {
                pending.remove(&task_key);
            }
            store.feed_back(action).await;
        });

        if let Ok(mut pending) = self.inner.debounces.lock() {
            if let Some(superseded) = pending.insert(key.clone(), handle) {
                tracing::trace!(key = %key, "debounce superseded");
                superseded.abort();
            }
        }
    }

    /// Execute one effect to completion, awaiting nested effects in order.
    fn run_effect(&self, effect: Effect<A>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let store = self.clone();
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        store.run_effect(effect).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    store.feed_back(*action).await;
                },
                Effect::Debounce {
                    key,
                    duration,
                    action,
                } => store.schedule_debounce(key, duration, *action),
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        store.feed_back(action).await;
                    }
                },
            }
        })
    }

    async fn feed_back(&self, action: A) {
        if let Err(err) = Box::pin(self.send(action)).await {
            tracing::debug!(error = %err, "effect feedback dropped");
        }
    }
}
