//! # Kiosk Runtime
//!
//! Runtime for kiosk reducers.
//!
//! The [`Store`] serializes actions through a reducer and runs the effects it
//! returns on tokio.
//!
//! ## Core Components
//!
//! - **Store**: Owns the session state and is its only mutator
//! - **Effects**: delays and futures run in spawned tasks; their actions loop back
//! - **Shutdown**: Rejects new actions and cancels sleeping timers
//!
//! ## Example
//!
//! ```ignore
//! use kiosk_runtime::Store;
//!
//! let store = Store::new(SessionState::new(now), KioskReducer::new(), environment);
//!
//! // Send an action
//! store.send(KioskAction::Interaction).await?;
//!
//! // Read state
//! let step = store.state(|s| s.step).await;
//! ```

use kiosk_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store errors
pub mod error {
    use thiserror::Error;

    /// Why a store call failed
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// `send()` after `shutdown()` started
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects were still running when the shutdown timeout elapsed
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// `send_and_wait_for` saw no matching action in time
        #[error("Timeout waiting for action")]
        Timeout,

        /// The store and all its clones were dropped
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Store tuning
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
///
/// let store = Store::with_config(state, reducer, env, config);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of effect-produced actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// Budget used by `shutdown_default`
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Explicit capacity and shutdown budget
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Override the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Override the shutdown budget
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Completion handle for the effects started by one `send`
///
/// Returned by [`Store::send()`] to allow waiting for the effects started by
/// that action. Effects of actions they feed back are not included.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(KioskAction::SelectPaymentMethod(PaymentMethod::Card)).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a handle together with the tracker the effects decrement
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        let (_tx, rx) = watch::channel(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Resolves once every tracked effect has finished
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, nothing left to wait for
                break;
            }
        }
    }

    /// [`EffectHandle::wait`] bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    ///
    /// # Example
    ///
    /// ```ignore
    /// handle.wait_with_timeout(Duration::from_secs(5)).await?;
    /// ```
    #[allow(clippy::result_unit_err)] // Only the elapsed case can fail
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Counter shared between a handle and the effects it tracks
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    /// An effect started
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// An effect finished; the last one wakes waiters
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Marks an effect finished when its task ends, panics included
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Same for the store-wide count that shutdown waits on
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The store
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };
    use tokio::sync::{broadcast, watch};

    /// Sole owner and mutator of a state value
    ///
    /// Holds the state behind a `RwLock`, runs every action through the
    /// reducer under the write lock, and spawns the effects it returns.
    /// Clones share everything.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        /// Flipped to `true` on shutdown; sleeping delays wake up and exit.
        cancel: Arc<watch::Sender<bool>>,
        pending_effects: Arc<AtomicUsize>,
        default_shutdown_timeout: Duration,
        /// Actions produced by effects, for observers
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Store with [`StoreConfig::default()`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Store with explicit tuning
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (cancel, _) = watch::channel(false);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                cancel: Arc::new(cancel),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                default_shutdown_timeout: config.default_shutdown_timeout,
                action_broadcast,
            }
        }

        /// Number of effects currently running across all actions
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Timeout used by [`Store::shutdown_default`]
        #[must_use]
        pub const fn default_shutdown_timeout(&self) -> Duration {
            self.default_shutdown_timeout
        }

        /// Stop the store
        ///
        /// 1. New actions are rejected with [`StoreError::ShutdownInProgress`]
        /// 2. Sleeping delays are cancelled without dispatching their action
        /// 3. Running futures are given `timeout` to finish
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Store shutting down");
            metrics::counter!("kiosk.store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);
            self.cancel.send_replace(true);

            let start = tokio::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("Store stopped");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    metrics::counter!("kiosk.store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::debug!(pending_effects = pending, "Draining effects");
                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Shutdown with the configured default timeout
        ///
        /// # Errors
        ///
        /// See [`Store::shutdown`].
        pub async fn shutdown_default(&self) -> Result<(), StoreError> {
            self.shutdown(self.default_shutdown_timeout).await
        }

        /// Reduce `action` and start its effects
        ///
        /// `send()` returns after starting effect execution, not completion.
        /// Concurrent `send()` calls serialize at the reducer.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let mut handle = store.send(KioskAction::ClearCart).await?;
        /// handle.wait().await;
        /// ```
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Action rejected during shutdown");
                metrics::counter!("kiosk.store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("kiosk.store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("kiosk.store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!(effects = effects.len(), "Reduced");
                effects
            };

            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send `action`, then wait for an effect-produced action matching `predicate`
        ///
        /// Subscribes to the action broadcast before sending, so an action
        /// produced immediately by an effect is not missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        ///
        /// # Example
        ///
        /// ```ignore
        /// let settled = store.send_and_wait_for(
        ///     KioskAction::SelectPaymentMethod(PaymentMethod::Card),
        ///     |a| matches!(a, KioskAction::PaymentSettled { .. }),
        ///     Duration::from_secs(10),
        /// ).await?;
        /// ```
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            R: Clone,
            E: Clone,
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to actions produced by effects
        ///
        /// Only actions produced by effects are broadcast (timer expiries,
        /// payment results), not the actions passed to `send`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let items = store.state(|s| s.cart.items().len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Start one effect
        ///
        /// A panicking effect only takes down its own task; the guards keep the
        /// counters right.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    tracing::trace!("Effect::None");
                },
                Effect::Future(fut) => {
                    tracing::trace!("Spawning Effect::Future");
                    metrics::counter!("kiosk.store.effects.executed", "type" => "future")
                        .increment(1);
                    let (guard, pending_guard) = self.track(tracking);
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = guard;
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Future produced an action");
                            store.feed_back(action).await;
                        } else {
                            tracing::trace!("Future produced nothing");
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "Spawning Effect::Delay");
                    metrics::counter!("kiosk.store.effects.executed", "type" => "delay")
                        .increment(1);
                    let (guard, pending_guard) = self.track(tracking);
                    let store = self.clone();
                    let mut cancelled = self.cancel.subscribe();

                    tokio::spawn(async move {
                        let _guard = guard;
                        let _pending_guard = pending_guard;

                        tokio::select! {
                            () = tokio::time::sleep(duration) => {
                                tracing::trace!("Delay elapsed");
                                store.feed_back(*action).await;
                            }
                            () = async {
                                let _ = cancelled.wait_for(|cancelled| *cancelled).await;
                            } => {
                                tracing::trace!("Effect::Delay cancelled by shutdown");
                            }
                        }
                    });
                },
            }
        }

        /// Count a spawned effect against its handle and against shutdown
        fn track(&self, tracking: &EffectTracking) -> (DecrementGuard, AtomicCounterGuard) {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            (
                DecrementGuard(tracking.clone()),
                AtomicCounterGuard(Arc::clone(&self.pending_effects)),
            )
        }

        /// Send an effect-produced action back through the reducer, then broadcast it
        ///
        /// Observers woken by the broadcast already see the state it produced.
        async fn feed_back(&self, action: A)
        where
            R: Clone,
            E: Clone,
        {
            if let Err(error) = self.send(action.clone()).await {
                tracing::debug!(%error, "Dropped effect-produced action");
            }
            let _ = self.action_broadcast.send(action);
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                cancel: Arc::clone(&self.cancel),
                pending_effects: Arc::clone(&self.pending_effects),
                default_shutdown_timeout: self.default_shutdown_timeout,
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;
