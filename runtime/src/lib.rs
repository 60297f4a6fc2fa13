//! # CampusConnect Runtime
//!
//! The `Store` runtime that coordinates reducer execution and effect
//! handling for interactive screen state.
//!
//! A [`Store`] owns a state value behind a write lock. Every action,
//! whether sent by a caller or fed back by a completed effect, runs
//! through the reducer under that lock, so state transitions are
//! serialized through a single writer. Effects returned by the reducer
//! are spawned onto the runtime; [`Store::send`] hands back an
//! [`EffectHandle`] so callers can await their completion before relying
//! on post-conditions.
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::new(HomeState::default(), HomeReducer::new(), env);
//!
//! let mut handle = store.send(HomeAction::FetchRequested).await;
//! handle.wait().await;
//!
//! let count = store.state(|s| s.events.len()).await;
//! ```

use campus_connect_core::effect::Effect;
use campus_connect_core::reducer::Reducer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

pub use error::StoreError;

/// Error types for the Store runtime.
pub mod error {
    use thiserror::Error;

    /// Errors that can occur waiting on Store operations.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Timeout expired before the awaited effects completed.
        ///
        /// Some effects were still running when the timeout elapsed; they
        /// keep running, only the wait gave up.
        #[error("Timeout waiting for {0} effects to complete")]
        Timeout(usize),
    }
}

/// Handle for tracking effect completion.
///
/// Returned by [`Store::send`]. The handle completes when every effect
/// spawned by the action (and any effects of actions those effects fed
/// back) has finished.
#[derive(Debug, Clone)]
pub struct EffectHandle {
    pending: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new handle plus the tracking half used during execution.
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            pending: Arc::clone(&counter),
            completion: rx,
        };
        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that is already complete.
    ///
    /// Useful as the initial value when accumulating the last handle of a
    /// loop of sends.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        drop(tx);

        Self {
            pending: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Wait for all tracked effects to complete.
    pub async fn wait(&mut self) {
        while self.pending.load(Ordering::SeqCst) > 0 {
            // Err means every tracking half is gone, which only happens
            // after the counter has reached zero.
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all tracked effects to complete, up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects were still running when
    /// the timeout expired.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        let outcome = tokio::time::timeout(timeout, self.wait()).await;
        match outcome {
            Ok(()) => Ok(()),
            Err(_) => Err(StoreError::Timeout(self.pending())),
        }
    }
}

/// Internal: counter + notifier carried by running effect tasks.
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Effect started.
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Effect completed; notify waiters when the counter reaches zero.
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

impl Clone for EffectTracking {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            notifier: self.notifier.clone(),
        }
    }
}

/// Internal: RAII guard so the counter is decremented even if an effect
/// task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

struct StoreInner<S, E, R> {
    state: RwLock<S>,
    reducer: R,
    environment: E,
}

/// The Store - runtime coordinator for a reducer.
///
/// The Store manages:
/// 1. State (behind a write lock; all transitions serialized)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with the action feedback loop)
///
/// Cloning a Store is cheap and yields a second handle to the same state.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    inner: Arc<StoreInner<S, E, R>>,
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
            }),
        }
    }

    /// Send an action through the reducer and spawn its effects.
    ///
    /// The returned [`EffectHandle`] completes once every spawned effect
    /// (and the effects of any feedback actions) has finished. Callers
    /// that depend on effect post-conditions must await it.
    pub async fn send(&self, action: A) -> EffectHandle {
        let (handle, tracking) = EffectHandle::new();

        tracing::debug!("Processing action");
        let effects = self.run_reducer(action).await;

        tracing::trace!("Executing {} effects", effects.len());
        for effect in effects {
            self.spawn_effect(effect, &tracking);
        }

        handle
    }

    /// Read current state via a closure.
    ///
    /// The closure runs under a read lock; keep it short.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.inner.state.read().await;
        f(&state)
    }

    /// Run the reducer for one action under the write lock.
    async fn run_reducer(&self, action: A) -> campus_connect_core::reducer::Effects<A> {
        let mut state = self.inner.state.write().await;
        tracing::trace!("Acquired write lock on state");
        self.inner
            .reducer
            .reduce(&mut state, action, &self.inner.environment)
    }

    /// Spawn one effect onto the runtime, tracked by `tracking`.
    fn spawn_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
        match effect {
            Effect::None => {}
            Effect::Future(fut) => {
                tracking.increment();
                let guard = DecrementGuard(tracking.clone());
                let store = self.clone();
                tokio::spawn(async move {
                    // Guard lives for the whole task: the counter drops
                    // only after any feedback action has been reduced and
                    // its own effects have run.
                    let _guard = guard;
                    if let Some(action) = fut.await {
                        store.feed_back(action).await;
                    }
                });
            }
        }
    }

    /// Reduce a feedback action and run its effects inline.
    async fn feed_back(&self, action: A) {
        tracing::debug!("Processing feedback action");
        let effects = self.run_reducer(action).await;
        for effect in effects {
            if let Effect::Future(fut) = effect {
                if let Some(next) = fut.await {
                    Box::pin(self.feed_back(next)).await;
                }
            }
        }
    }
}
