//! # Kiosk Core
//!
//! Core traits and domain types for the self-order kiosk.
//!
//! A kiosk session is built from the Reducer pattern:
//!
//! - **State**: the session value (step, cart, customer, order)
//! - **Action**: every user input plus the internal actions timers feed back
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies (clock, ids, payments)
//!
//! The domain modules ([`money`], [`menu`], [`cart`], [`step`]) are plain data
//! with no I/O. [`config`] holds the tunables shared by the reducer and the
//! demo binary.
//!
//! ## Example
//!
//! ```ignore
//! use kiosk_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for KioskReducer {
//!     type State = SessionState;
//!     type Action = KioskAction;
//!     type Environment = KioskEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut SessionState,
//!         action: KioskAction,
//!         env: &KioskEnvironment,
//!     ) -> SmallVec<[Effect<KioskAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod cart;
pub mod config;
pub mod menu;
pub mod money;
pub mod step;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// fn reduce(
    ///     &self,
    ///     state: &mut SessionState,
    ///     action: KioskAction,
    ///     env: &KioskEnvironment,
    /// ) -> SmallVec<[Effect<KioskAction>; 4]> {
    ///     match action {
    ///         KioskAction::ClearCart => {
    ///             state.cart.clear();
    ///             smallvec![Effect::None]
    ///         }
    ///         _ => smallvec![Effect::None],
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

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce at most a couple of effects, so the return
        /// type keeps up to four inline without allocating.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution); whatever action they produce is fed
/// back into the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Delayed action (idle deadlines, countdown ticks)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Dispatch `action` after `duration`
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Self {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Wrap an async computation whose output is fed back as an action
        #[must_use]
        pub fn future<F>(future: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(future))
        }

        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. Production implementations live here;
/// deterministic ones live in `kiosk-testing`.
pub mod environment {
    use crate::money::Money;
    use crate::step::PaymentMethod;
    use chrono::{DateTime, Utc};
    use futures::future::{BoxFuture, FutureExt};
    use rand::Rng;
    use serde::{Deserialize, Serialize};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use kiosk_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let _now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of cart line ids, order ids and customer-facing order numbers
    pub trait IdGenerator: Send + Sync {
        /// Id for a new cart line
        fn cart_item_id(&self) -> String;

        /// Internal id for a placed order
        fn order_id(&self) -> String;

        /// Number called out at the counter, e.g. `A123`
        fn order_number(&self) -> String;
    }

    /// Length of generated ids.
    const ID_LEN: usize = 7;

    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Random ids: 7 base-36 characters, order numbers `A100` to `Z999`
    #[derive(Clone, Copy, Debug, Default)]
    pub struct RandomIds;

    impl RandomIds {
        fn short_id() -> String {
            let mut rng = rand::thread_rng();
            (0..ID_LEN)
                .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
                .collect()
        }
    }

    impl IdGenerator for RandomIds {
        fn cart_item_id(&self) -> String {
            Self::short_id()
        }

        fn order_id(&self) -> String {
            Self::short_id()
        }

        fn order_number(&self) -> String {
            let mut rng = rand::thread_rng();
            let letter = char::from(rng.gen_range(b'A'..=b'Z'));
            let number: u16 = rng.gen_range(100..=999);
            format!("{letter}{number}")
        }
    }

    /// Result of a payment authorization
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum PaymentOutcome {
        /// Funds captured
        Approved,
        /// Payment refused by the terminal
        Declined {
            /// Reason shown to the customer
            reason: String,
        },
    }

    /// Boxed future returned by [`PaymentProcessor::authorize`]
    pub type PaymentFuture = BoxFuture<'static, PaymentOutcome>;

    /// Payment terminal abstraction
    ///
    /// Cash never goes through the processor; every other method does.
    pub trait PaymentProcessor: Send + Sync {
        /// Authorize `amount` with `method`
        fn authorize(&self, method: PaymentMethod, amount: Money) -> PaymentFuture;
    }

    /// Terminal that approves every payment
    #[derive(Clone, Copy, Debug, Default)]
    pub struct AlwaysApprove;

    impl PaymentProcessor for AlwaysApprove {
        fn authorize(&self, _method: PaymentMethod, _amount: Money) -> PaymentFuture {
            futures::future::ready(PaymentOutcome::Approved).boxed()
        }
    }
}
