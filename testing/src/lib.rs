//! # Kiosk Testing
//!
//! Testing utilities and helpers for the self-order kiosk.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Menu fixtures
//! - Property-based testing strategies
//! - Assertion helpers for reducers ([`ReducerTest`])
//!
//! ## Example
//!
//! ```ignore
//! use kiosk_testing::{test_clock, SequentialIds, ScriptedPayments};
//!
//! #[tokio::test(start_paused = true)]
//! async fn card_payment_places_order() {
//!     let env = KioskEnvironment::new(
//!         Arc::new(test_clock()),
//!         Arc::new(SequentialIds::new()),
//!         Arc::new(ScriptedPayments::approving()),
//!         KioskConfig::default(),
//!     );
//!     let store = Store::new(SessionState::new(env.clock.now()), KioskReducer::new(), env);
//!     // ...
//! }
//! ```

use chrono::{DateTime, Utc};
use kiosk_core::environment::{Clock, IdGenerator, PaymentFuture, PaymentOutcome, PaymentProcessor};
use kiosk_core::money::Money;
use kiosk_core::step::PaymentMethod;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{
        Clock, DateTime, IdGenerator, Money, PaymentFuture, PaymentMethod, PaymentOutcome,
        PaymentProcessor, Utc,
    };
    use futures::future::FutureExt;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use kiosk_testing::mocks::FixedClock;
    /// use kiosk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: `item-1`, `item-2`, ..., `order-1`, ..., `A101`, `A102`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        items: AtomicU64,
        orders: AtomicU64,
        numbers: AtomicU64,
    }

    impl SequentialIds {
        /// Start every sequence at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                items: AtomicU64::new(0),
                orders: AtomicU64::new(0),
                numbers: AtomicU64::new(0),
            }
        }
    }

    fn next(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    impl IdGenerator for SequentialIds {
        fn cart_item_id(&self) -> String {
            format!("item-{}", next(&self.items))
        }

        fn order_id(&self) -> String {
            format!("order-{}", next(&self.orders))
        }

        fn order_number(&self) -> String {
            format!("A{}", 100 + next(&self.numbers))
        }
    }

    /// Payment terminal that replays scripted outcomes
    ///
    /// Outcomes are consumed in order; once the script runs out every
    /// payment is approved. Every call is recorded.
    ///
    /// # Example
    ///
    /// ```
    /// use kiosk_testing::mocks::ScriptedPayments;
    ///
    /// let payments = ScriptedPayments::declining_once("card declined");
    /// assert!(payments.calls().is_empty());
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct ScriptedPayments {
        script: Arc<Mutex<VecDeque<PaymentOutcome>>>,
        calls: Arc<Mutex<Vec<(PaymentMethod, Money)>>>,
    }

    impl ScriptedPayments {
        /// Approve everything
        #[must_use]
        pub fn approving() -> Self {
            Self::default()
        }

        /// Replay `outcomes` in order, then approve
        #[must_use]
        pub fn with_outcomes(outcomes: impl IntoIterator<Item = PaymentOutcome>) -> Self {
            Self {
                script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
                calls: Arc::default(),
            }
        }

        /// Decline the first payment with `reason`, then approve
        #[must_use]
        pub fn declining_once(reason: impl Into<String>) -> Self {
            Self::with_outcomes([PaymentOutcome::Declined {
                reason: reason.into(),
            }])
        }

        /// Method and amount of every authorization so far
        #[must_use]
        pub fn calls(&self) -> Vec<(PaymentMethod, Money)> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl PaymentProcessor for ScriptedPayments {
        fn authorize(&self, method: PaymentMethod, amount: Money) -> PaymentFuture {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((method, amount));
            let outcome = self
                .script
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or(PaymentOutcome::Approved);
            futures::future::ready(outcome).boxed()
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use kiosk_core::menu::{CategoryId, OptionGroup, OptionId, Product, ProductId, ProductOption};
    use kiosk_core::money::Money;

    /// Active, non-combo product in `cat-1` priced at `cents`
    #[must_use]
    pub fn product(id: &str, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            category_id: CategoryId::new("cat-1"),
            name: name.to_string(),
            description: String::new(),
            base_price: Money::from_cents(cents),
            image_url: None,
            is_combo: false,
            is_active: true,
            sort_order: 1,
        }
    }

    /// Option of `product_id` with an extra price of `cents`
    #[must_use]
    pub fn option(
        id: &str,
        product_id: &str,
        group: OptionGroup,
        label: &str,
        cents: i64,
    ) -> ProductOption {
        ProductOption {
            id: OptionId::new(id),
            product_id: ProductId::new(product_id),
            group,
            label: label.to_string(),
            extra_price: Money::from_cents(cents),
            is_default: false,
            sort_order: 1,
        }
    }

    /// The $8.99 chicken used in pricing examples
    #[must_use]
    pub fn chicken() -> Product {
        product("prod-1", "Original Chicken", 899)
    }

    /// The $1.50 large upgrade for [`chicken`]
    #[must_use]
    pub fn large_upgrade() -> ProductOption {
        option("opt-2", "prod-1", OptionGroup::Size, "Large", 150)
    }

    /// A $2.99 side
    #[must_use]
    pub fn fries() -> Product {
        product("prod-8", "Fries", 299)
    }

    /// Route `tracing` output to the test harness
    ///
    /// Safe to call from every test; only the first call installs a subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use kiosk_core::menu::{CategoryId, OptionGroup, OptionId, Product, ProductId, ProductOption};
    use kiosk_core::money::Money;
    use proptest::prelude::*;

    const OPTION_GROUPS: [OptionGroup; 5] = [
        OptionGroup::Size,
        OptionGroup::Side,
        OptionGroup::Drink,
        OptionGroup::Sauce,
        OptionGroup::Addon,
    ];

    /// Product priced between $0.50 and $50.00
    pub fn arb_product() -> impl Strategy<Value = Product> {
        (1u32..20, 50i64..5_000).prop_map(|(n, cents)| Product {
            id: ProductId::new(format!("prod-{n}")),
            category_id: CategoryId::new("cat-1"),
            name: format!("Product {n}"),
            description: String::new(),
            base_price: Money::from_cents(cents),
            image_url: None,
            is_combo: false,
            is_active: true,
            sort_order: n,
        })
    }

    /// Option whose extra price is between -$1.00 and $3.00
    ///
    /// Every field follows from the id number, so two options with the same id
    /// are the same option.
    pub fn arb_option() -> impl Strategy<Value = ProductOption> {
        (1u32..40).prop_map(|n| ProductOption {
            id: OptionId::new(format!("opt-{n}")),
            product_id: ProductId::new("prod-1"),
            group: OPTION_GROUPS[n as usize % OPTION_GROUPS.len()],
            label: format!("Option {n}"),
            extra_price: Money::from_cents(i64::from(n * 37 % 400) - 100),
            is_default: false,
            sort_order: n,
        })
    }

    /// Quantity a customer would plausibly pick
    pub fn arb_quantity() -> impl Strategy<Value = u32> {
        1u32..10
    }

    /// One cart mutation; `line` picks a line by index modulo the cart length
    #[derive(Debug, Clone)]
    pub enum CartOp {
        /// Append a line
        Add {
            /// Product to add
            product: Product,
            /// Chosen options
            options: Vec<ProductOption>,
            /// Units, zero included
            quantity: u32,
        },
        /// Change a line's quantity, zero included
        Update {
            /// Line index
            line: usize,
            /// New quantity
            quantity: u32,
        },
        /// Delete a line
        Remove {
            /// Line index
            line: usize,
        },
        /// Use an id no line has
        RemoveUnknown,
    }

    /// Any cart mutation
    pub fn arb_cart_op() -> impl Strategy<Value = CartOp> {
        prop_oneof![
            4 => (arb_product(), prop::collection::vec(arb_option(), 0..3), 0u32..6)
                .prop_map(|(product, options, quantity)| CartOp::Add { product, options, quantity }),
            2 => (any::<usize>(), 0u32..6).prop_map(|(line, quantity)| CartOp::Update { line, quantity }),
            1 => any::<usize>().prop_map(|line| CartOp::Remove { line }),
            1 => Just(CartOp::RemoveUnknown),
        ]
    }

    /// A sequence of up to `max` cart mutations
    pub fn arb_cart_ops(max: usize) -> impl Strategy<Value = Vec<CartOp>> {
        prop::collection::vec(arb_cart_op(), 0..max)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ScriptedPayments, SequentialIds, test_clock};
