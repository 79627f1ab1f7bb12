//! Kiosk reducer: step flow, cart editing, payment and idle handling.
//!
//! Every user action restarts the idle deadline. Timers and the payment
//! terminal report back through internal actions tagged with the generation
//! they were started in; answers from an older generation are dropped.

use crate::types::{KioskAction, OrderId, OrderNumber, PlacedOrder, SessionState};
use kiosk_core::cart::CartItemId;
use kiosk_core::config::KioskConfig;
use kiosk_core::effect::Effect;
use kiosk_core::environment::{Clock, IdGenerator, PaymentOutcome, PaymentProcessor};
use kiosk_core::reducer::Reducer;
use kiosk_core::step::{KioskStep, PaymentMethod};
use kiosk_core::{SmallVec, smallvec};
use std::sync::Arc;

type Effects = SmallVec<[Effect<KioskAction>; 4]>;

/// Dependencies of the kiosk reducer
#[derive(Clone)]
pub struct KioskEnvironment {
    /// Timestamps for interactions and orders
    pub clock: Arc<dyn Clock>,
    /// Cart line ids and order numbers
    pub ids: Arc<dyn IdGenerator>,
    /// Card, QR and gift card terminal
    pub payments: Arc<dyn PaymentProcessor>,
    /// Pricing and timing
    pub config: KioskConfig,
}

impl KioskEnvironment {
    /// Creates a new kiosk environment
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        payments: Arc<dyn PaymentProcessor>,
        config: KioskConfig,
    ) -> Self {
        Self {
            clock,
            ids,
            payments,
            config,
        }
    }
}

/// Reducer driving a kiosk session
#[derive(Clone, Debug, Default)]
pub struct KioskReducer;

impl KioskReducer {
    /// Creates a new kiosk reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves to `step` and starts whatever the new screen runs on entry.
    ///
    /// Staying on the same screen does nothing.
    fn enter_step(
        state: &mut SessionState,
        env: &KioskEnvironment,
        step: KioskStep,
        effects: &mut Effects,
    ) {
        if state.step == step {
            return;
        }
        if step == KioskStep::PaymentProcessing
            && !state
                .payment_method
                .is_some_and(PaymentMethod::needs_processing)
        {
            tracing::warn!(
                payment_method = ?state.payment_method,
                "Ignoring payment processing without a terminal payment method"
            );
            return;
        }

        tracing::debug!(from = %state.step, to = %step, "Step change");
        state.step = step;
        state.flow_generation += 1;
        state.countdown = None;

        match step {
            KioskStep::PaymentProcessing => {
                state.payment_error = None;
                if let Some(method) = state.payment_method {
                    effects.push(Self::authorize(state, env, method));
                }
            },
            KioskStep::PaymentSuccess => {
                Self::place_order(state, env);
                state.countdown = Some(env.config.success_countdown_secs);
                effects.push(Effect::delay(
                    env.config.countdown_tick(),
                    KioskAction::CountdownTick {
                        generation: state.flow_generation,
                    },
                ));
            },
            _ => {},
        }
    }

    /// Waits out the terminal delay, then asks the processor for the cart total
    fn authorize(
        state: &SessionState,
        env: &KioskEnvironment,
        method: PaymentMethod,
    ) -> Effect<KioskAction> {
        let amount = state.totals(env.config.tax_rate).total;
        let payments = Arc::clone(&env.payments);
        let delay = env.config.payment_delay();
        let generation = state.flow_generation;

        Effect::future(async move {
            tokio::time::sleep(delay).await;
            let outcome = payments.authorize(method, amount).await;
            Some(KioskAction::PaymentSettled {
                generation,
                outcome,
            })
        })
    }

    fn place_order(state: &mut SessionState, env: &KioskEnvironment) {
        if state.order.is_some() {
            return;
        }
        let order = PlacedOrder {
            order_id: OrderId::new(env.ids.order_id()),
            order_number: OrderNumber::new(env.ids.order_number()),
            placed_at: env.clock.now(),
        };
        tracing::info!(
            order_number = %order.order_number,
            total = %state.totals(env.config.tax_rate).total,
            payment_method = ?state.payment_method,
            "Order placed"
        );
        state.order = Some(order);
    }
}

impl Reducer for KioskReducer {
    type State = SessionState;
    type Action = KioskAction;
    type Environment = KioskEnvironment;

    #[allow(clippy::cognitive_complexity)] // One arm per action
    #[allow(clippy::too_many_lines)] // Match on every action
    fn reduce(
        &self,
        state: &mut SessionState,
        action: KioskAction,
        env: &KioskEnvironment,
    ) -> SmallVec<[Effect<KioskAction>; 4]> {
        let user_input = action.is_user_input();
        if user_input {
            state.last_interaction = env.clock.now();
            state.idle_generation += 1;
        }

        let mut effects = Effects::new();

        match action {
            // ========== Navigation ==========
            KioskAction::SetStep(step) => {
                Self::enter_step(state, env, step, &mut effects);
            },

            KioskAction::GoBack => match state.step.previous() {
                Some(previous) => Self::enter_step(state, env, previous, &mut effects),
                None => tracing::debug!(step = %state.step, "No previous step"),
            },

            KioskAction::SelectOrderType(order_type) => {
                state.order_type = Some(order_type);
                Self::enter_step(state, env, KioskStep::Categories, &mut effects);
            },

            KioskAction::SelectCategory(category) => {
                state.selected_category = category;
            },

            KioskAction::SelectProduct(product) => {
                state.selected_product = product;
            },

            // ========== Cart ==========
            KioskAction::AddToCart {
                product,
                options,
                quantity,
            } => {
                let id = CartItemId::new(env.ids.cart_item_id());
                let product_id = product.id.clone();
                if state.cart.add(id, product, options, quantity).is_none() {
                    tracing::warn!(product_id = %product_id, "Ignoring add with zero quantity");
                }
            },

            KioskAction::QuickAdd { product } => {
                let existing = state
                    .cart
                    .find_by_product(&product.id)
                    .map(|line| (line.id().clone(), line.quantity()));
                match existing {
                    Some((id, quantity)) => {
                        state.cart.update(&id, quantity.saturating_add(1));
                    },
                    None => {
                        let id = CartItemId::new(env.ids.cart_item_id());
                        state.cart.add(id, product, Vec::new(), 1);
                    },
                }
            },

            KioskAction::QuickRemove { product_id } => {
                let existing = state
                    .cart
                    .find_by_product(&product_id)
                    .map(|line| (line.id().clone(), line.quantity()));
                match existing {
                    Some((id, quantity)) => {
                        state.cart.update(&id, quantity - 1);
                    },
                    None => {
                        tracing::warn!(product_id = %product_id, "Ignoring remove of product not in cart");
                    },
                }
            },

            KioskAction::UpdateCartItem { id, quantity } => {
                if !state.cart.update(&id, quantity) {
                    tracing::warn!(cart_item_id = %id, "Ignoring update of unknown cart item");
                }
            },

            KioskAction::RemoveFromCart { id } => {
                if !state.cart.remove(&id) {
                    tracing::warn!(cart_item_id = %id, "Ignoring removal of unknown cart item");
                }
            },

            KioskAction::ClearCart => {
                state.cart.clear();
            },

            // ========== Checkout ==========
            KioskAction::SetCustomerName(name) => {
                state.customer_name = name;
            },

            KioskAction::SelectPaymentMethod(method) => {
                state.payment_method = Some(method);
                let next = if method.needs_processing() {
                    KioskStep::PaymentProcessing
                } else {
                    KioskStep::PaymentSuccess
                };
                Self::enter_step(state, env, next, &mut effects);
            },

            // ========== Preferences ==========
            KioskAction::SetLanguage(language) => {
                state.language = language;
            },

            KioskAction::ToggleHighContrast => {
                state.high_contrast = !state.high_contrast;
            },

            // ========== Session ==========
            KioskAction::Interaction => {},

            KioskAction::Reset => {
                tracing::info!(step = %state.step, "Session reset");
                state.reset(env.clock.now());
            },

            // ========== Internal ==========
            KioskAction::IdleTimeout { generation } => {
                if generation == state.idle_generation && state.step.tracks_idle() {
                    tracing::info!(step = %state.step, "Idle timeout, resetting session");
                    state.reset(env.clock.now());
                } else {
                    tracing::trace!(generation, "Stale idle deadline");
                }
            },

            KioskAction::PaymentSettled {
                generation,
                outcome,
            } => {
                if generation != state.flow_generation
                    || state.step != KioskStep::PaymentProcessing
                {
                    tracing::debug!(generation, "Ignoring stale payment result");
                } else {
                    match outcome {
                        PaymentOutcome::Approved => {
                            Self::enter_step(state, env, KioskStep::PaymentSuccess, &mut effects);
                        },
                        PaymentOutcome::Declined { reason } => {
                            tracing::warn!(reason = %reason, "Payment declined");
                            state.payment_error = Some(reason);
                            Self::enter_step(state, env, KioskStep::PaymentFailed, &mut effects);
                        },
                    }
                }
            },

            KioskAction::CountdownTick { generation } => {
                if generation != state.flow_generation || state.step != KioskStep::PaymentSuccess
                {
                    tracing::trace!(generation, "Stale countdown tick");
                } else {
                    let remaining = state.countdown.unwrap_or(0).saturating_sub(1);
                    if remaining == 0 {
                        tracing::info!("Success countdown finished, resetting session");
                        state.reset(env.clock.now());
                    } else {
                        state.countdown = Some(remaining);
                        effects.push(Effect::delay(
                            env.config.countdown_tick(),
                            KioskAction::CountdownTick { generation },
                        ));
                    }
                }
            },
        }

        if user_input && state.step.tracks_idle() {
            effects.push(Effect::delay(
                env.config.idle_timeout(),
                KioskAction::IdleTimeout {
                    generation: state.idle_generation,
                },
            ));
        }

        if effects.is_empty() {
            return smallvec![Effect::None];
        }
        effects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use kiosk_core::money::Money;
    use kiosk_core::step::OrderType;
    use kiosk_testing::helpers::{chicken, fries, large_upgrade};
    use kiosk_testing::{ReducerTest, ScriptedPayments, SequentialIds, assertions, test_clock};
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn test_env() -> KioskEnvironment {
        KioskEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIds::new()),
            Arc::new(ScriptedPayments::approving()),
            KioskConfig::default(),
        )
    }

    fn state_on(step: KioskStep) -> SessionState {
        let mut state = SessionState::new(test_clock().now());
        state.step = step;
        state
    }

    fn idle_deadline(generation: u64) -> (Duration, KioskAction) {
        (
            Duration::from_secs(60),
            KioskAction::IdleTimeout { generation },
        )
    }

    fn owned(effects: &[Effect<KioskAction>]) -> Vec<(Duration, KioskAction)> {
        assertions::delayed_actions(effects)
            .into_iter()
            .map(|(duration, action)| (duration, action.clone()))
            .collect()
    }

    // ========== Navigation ==========

    #[test]
    fn select_order_type_opens_menu_and_arms_idle() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::OrderType))
            .when_action(KioskAction::SelectOrderType(OrderType::TakeAway))
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Categories);
                assert_eq!(state.order_type, Some(OrderType::TakeAway));
                assert_eq!(state.idle_generation, 1);
                assert_eq!(state.flow_generation, 1);
            })
            .then_effects(|effects| {
                assert_eq!(owned(effects), vec![idle_deadline(1)]);
            })
            .run();
    }

    #[test]
    fn input_on_welcome_arms_no_idle_deadline() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Welcome))
            .when_action(KioskAction::ToggleHighContrast)
            .then_state(|state| {
                assert!(state.high_contrast);
                assert_eq!(state.idle_generation, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn go_back_follows_previous_step() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::PaymentFailed))
            .when_actions([KioskAction::GoBack, KioskAction::GoBack])
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::CustomerName);
            })
            .run();
    }

    #[test]
    fn go_back_on_processing_stays_put() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::PaymentProcessing))
            .when_action(KioskAction::GoBack)
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentProcessing);
                assert_eq!(state.flow_generation, 0);
            })
            .run();
    }

    #[test]
    fn set_step_to_current_step_is_a_no_op() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Cart))
            .when_action(KioskAction::SetStep(KioskStep::Cart))
            .then_state(|state| {
                assert_eq!(state.flow_generation, 0);
            })
            .run();
    }

    #[test]
    fn manual_processing_without_terminal_method_is_ignored() {
        let mut state = state_on(KioskStep::PaymentMethod);
        state.payment_method = Some(PaymentMethod::Cash);

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::SetStep(KioskStep::PaymentProcessing))
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentMethod);
            })
            .then_effects(|effects| {
                assertions::assert_no_future_effect(effects);
            })
            .run();
    }

    // ========== Cart ==========

    #[test]
    fn add_to_cart_prices_options() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_action(KioskAction::AddToCart {
                product: chicken(),
                options: vec![large_upgrade()],
                quantity: 2,
            })
            .then_state(|state| {
                let line = &state.cart.items()[0];
                assert_eq!(line.id().as_str(), "item-1");
                assert_eq!(line.unit_price(), Money::parse("10.49").unwrap());
                assert_eq!(line.total_price(), Money::parse("20.98").unwrap());

                let totals = state.totals(Decimal::new(10, 2));
                assert_eq!(totals.tax, Money::parse("2.098").unwrap());
                assert_eq!(totals.total, Money::parse("23.078").unwrap());
            })
            .run();
    }

    #[test]
    fn add_to_cart_never_merges() {
        let add = || KioskAction::AddToCart {
            product: chicken(),
            options: Vec::new(),
            quantity: 1,
        };

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_actions([add(), add()])
            .then_state(|state| {
                assert_eq!(state.cart.items().len(), 2);
                assert_eq!(state.cart.item_count(), 2);
            })
            .run();
    }

    #[test]
    fn add_with_zero_quantity_is_ignored() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_action(KioskAction::AddToCart {
                product: chicken(),
                options: Vec::new(),
                quantity: 0,
            })
            .then_state(|state| {
                assert!(state.cart.is_empty());
            })
            .run();
    }

    #[test]
    fn quick_add_increments_existing_line() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_actions([
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::QuickAdd { product: fries() },
            ])
            .then_state(|state| {
                let items = state.cart.items();
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].quantity(), 2);
                assert_eq!(items[0].total_price(), Money::from_cents(1798));
                assert_eq!(items[1].quantity(), 1);
            })
            .run();
    }

    #[test]
    fn quick_remove_decrements_then_removes() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_actions([
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::QuickRemove {
                    product_id: chicken().id,
                },
            ])
            .then_state(|state| {
                assert_eq!(state.cart.items()[0].quantity(), 1);
            })
            .run();

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_actions([
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::QuickRemove {
                    product_id: chicken().id,
                },
                KioskAction::QuickRemove {
                    product_id: chicken().id,
                },
            ])
            .then_state(|state| {
                assert!(state.cart.is_empty());
            })
            .run();
    }

    #[test]
    fn update_to_zero_removes_line() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Cart))
            .when_actions([
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::UpdateCartItem {
                    id: CartItemId::new("item-1"),
                    quantity: 0,
                },
            ])
            .then_state(|state| {
                assert!(state.cart.is_empty());
            })
            .run();
    }

    #[test]
    fn unknown_cart_ids_leave_cart_unchanged() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Cart))
            .when_actions([
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::RemoveFromCart {
                    id: CartItemId::new("missing"),
                },
                KioskAction::UpdateCartItem {
                    id: CartItemId::new("missing"),
                    quantity: 4,
                },
            ])
            .then_state(|state| {
                assert_eq!(state.cart.items().len(), 1);
                assert_eq!(state.cart.item_count(), 1);
            })
            .then_effects(|effects| {
                assert_eq!(owned(effects), vec![idle_deadline(3)]);
            })
            .run();
    }

    // ========== Payment ==========

    #[test]
    fn cash_skips_processing_and_places_order() {
        let mut state = state_on(KioskStep::PaymentMethod);
        state.cart.add(CartItemId::new("line"), chicken(), Vec::new(), 1);

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::SelectPaymentMethod(PaymentMethod::Cash))
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentSuccess);
                assert_eq!(state.payment_method, Some(PaymentMethod::Cash));
                let order = state.order.as_ref().unwrap();
                assert_eq!(order.order_number.as_str(), "A101");
                assert_eq!(order.order_id.as_str(), "order-1");
                assert_eq!(order.placed_at, test_clock().now());
                assert_eq!(state.countdown, Some(15));
            })
            .then_effects(|effects| {
                assertions::assert_no_future_effect(effects);
                assert_eq!(
                    owned(effects),
                    vec![
                        (
                            Duration::from_secs(1),
                            KioskAction::CountdownTick { generation: 1 }
                        ),
                        idle_deadline(1),
                    ]
                );
            })
            .run();
    }

    #[test]
    fn terminal_methods_go_through_processing() {
        for method in [PaymentMethod::Card, PaymentMethod::Qr, PaymentMethod::GiftCard] {
            ReducerTest::new(KioskReducer::new())
                .with_env(test_env())
                .given_state(state_on(KioskStep::PaymentMethod))
                .when_action(KioskAction::SelectPaymentMethod(method))
                .then_state(move |state| {
                    assert_eq!(state.step, KioskStep::PaymentProcessing);
                    assert_eq!(state.payment_method, Some(method));
                    assert!(state.order.is_none());
                })
                .then_effects(|effects| {
                    assertions::assert_has_future_effect(effects);
                    assertions::assert_effects_count(effects, 2);
                })
                .run();
        }
    }

    #[test]
    fn approved_payment_moves_to_success() {
        let mut state = state_on(KioskStep::PaymentProcessing);
        state.payment_method = Some(PaymentMethod::Card);
        state.flow_generation = 3;

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::PaymentSettled {
                generation: 3,
                outcome: PaymentOutcome::Approved,
            })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentSuccess);
                assert!(state.order.is_some());
                assert_eq!(state.flow_generation, 4);
                // Terminal answers are not customer input
                assert_eq!(state.idle_generation, 0);
            })
            .then_effects(|effects| {
                assert_eq!(
                    owned(effects),
                    vec![(
                        Duration::from_secs(1),
                        KioskAction::CountdownTick { generation: 4 }
                    )]
                );
            })
            .run();
    }

    #[test]
    fn declined_payment_moves_to_failed() {
        let mut state = state_on(KioskStep::PaymentProcessing);
        state.payment_method = Some(PaymentMethod::Card);

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::PaymentSettled {
                generation: 0,
                outcome: PaymentOutcome::Declined {
                    reason: "insufficient funds".to_string(),
                },
            })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentFailed);
                assert_eq!(state.payment_error.as_deref(), Some("insufficient funds"));
                assert!(state.order.is_none());
            })
            .run();
    }

    #[test]
    fn retry_from_failed_clears_error_and_pays_again() {
        let mut state = state_on(KioskStep::PaymentFailed);
        state.payment_method = Some(PaymentMethod::Qr);
        state.payment_error = Some("timeout".to_string());

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::SetStep(KioskStep::PaymentProcessing))
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentProcessing);
                assert_eq!(state.payment_error, None);
            })
            .then_effects(|effects| {
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn stale_payment_result_is_ignored() {
        let mut state = state_on(KioskStep::PaymentProcessing);
        state.payment_method = Some(PaymentMethod::Card);
        state.flow_generation = 5;

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::PaymentSettled {
                generation: 4,
                outcome: PaymentOutcome::Approved,
            })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::PaymentProcessing);
                assert!(state.order.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    // ========== Countdown ==========

    #[test]
    fn countdown_tick_decrements_and_rearms() {
        let mut state = state_on(KioskStep::PaymentSuccess);
        state.countdown = Some(15);
        state.flow_generation = 2;

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::CountdownTick { generation: 2 })
            .then_state(|state| {
                assert_eq!(state.countdown, Some(14));
                assert_eq!(state.step, KioskStep::PaymentSuccess);
            })
            .then_effects(|effects| {
                assert_eq!(
                    owned(effects),
                    vec![(
                        Duration::from_secs(1),
                        KioskAction::CountdownTick { generation: 2 }
                    )]
                );
            })
            .run();
    }

    #[test]
    fn last_countdown_tick_resets_session() {
        let mut state = state_on(KioskStep::PaymentSuccess);
        state.countdown = Some(1);
        state.customer_name = "Jesse".to_string();
        state.cart.add(CartItemId::new("line"), fries(), Vec::new(), 3);

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::CountdownTick { generation: 0 })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Welcome);
                assert!(state.cart.is_empty());
                assert_eq!(state.customer_name, "");
                assert_eq!(state.countdown, None);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn stale_countdown_tick_is_ignored() {
        let mut state = state_on(KioskStep::PaymentSuccess);
        state.countdown = Some(3);
        state.flow_generation = 7;

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::CountdownTick { generation: 6 })
            .then_state(|state| {
                assert_eq!(state.countdown, Some(3));
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    // ========== Idle ==========

    #[test]
    fn current_idle_deadline_resets_session() {
        let mut state = state_on(KioskStep::Cart);
        state.idle_generation = 4;
        state.payment_method = Some(PaymentMethod::Card);

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::IdleTimeout { generation: 4 })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Welcome);
                assert_eq!(state.payment_method, None);
                assert_eq!(state.idle_generation, 5);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn timed_resets_stamp_the_new_session() {
        let now = test_clock().now();
        let earlier = now - chrono::Duration::seconds(75);

        let mut idle = state_on(KioskStep::Cart);
        idle.last_interaction = earlier;
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(idle)
            .when_action(KioskAction::IdleTimeout { generation: 0 })
            .then_state(move |state| {
                assert_eq!(state.step, KioskStep::Welcome);
                assert_eq!(state.last_interaction, now);
            })
            .run();

        let mut success = state_on(KioskStep::PaymentSuccess);
        success.countdown = Some(1);
        success.last_interaction = earlier;
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(success)
            .when_action(KioskAction::CountdownTick { generation: 0 })
            .then_state(move |state| {
                assert_eq!(state.step, KioskStep::Welcome);
                assert_eq!(state.last_interaction, now);
            })
            .run();
    }

    #[test]
    fn stale_idle_deadline_is_ignored() {
        let mut state = state_on(KioskStep::Cart);
        state.idle_generation = 4;

        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(KioskAction::IdleTimeout { generation: 3 })
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Cart);
            })
            .run();
    }

    #[test]
    fn interaction_restarts_idle_deadline() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Categories))
            .when_actions([
                KioskAction::Interaction,
                KioskAction::Interaction,
                KioskAction::IdleTimeout { generation: 1 },
            ])
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Categories);
                assert_eq!(state.idle_generation, 2);
            })
            .run();
    }

    // ========== Session ==========

    #[test]
    fn reset_clears_the_session() {
        ReducerTest::new(KioskReducer::new())
            .with_env(test_env())
            .given_state(state_on(KioskStep::Welcome))
            .when_actions([
                KioskAction::SetStep(KioskStep::OrderType),
                KioskAction::SelectOrderType(OrderType::DineIn),
                KioskAction::QuickAdd { product: chicken() },
                KioskAction::SetCustomerName("Saul".to_string()),
                KioskAction::SetStep(KioskStep::PaymentMethod),
                KioskAction::SelectPaymentMethod(PaymentMethod::Cash),
                KioskAction::Reset,
            ])
            .then_state(|state| {
                assert_eq!(state.step, KioskStep::Welcome);
                assert!(state.cart.is_empty());
                assert_eq!(state.customer_name, "");
                assert_eq!(state.payment_method, None);
                assert_eq!(state.order_type, None);
                assert!(state.order.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }
}
