//! End-to-end session tests through the store, on virtual time.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use kiosk::{KioskAction, KioskEnvironment, KioskReducer, Receipt, SessionState};
use kiosk_core::config::KioskConfig;
use kiosk_core::environment::{Clock, PaymentOutcome};
use kiosk_core::money::Money;
use kiosk_core::step::{KioskStep, OrderType, PaymentMethod};
use kiosk_runtime::{Store, StoreError};
use kiosk_testing::helpers::{chicken, fries, init_test_tracing};
use kiosk_testing::{ScriptedPayments, SequentialIds, test_clock};
use std::sync::Arc;
use std::time::Duration;

type KioskStore = Store<SessionState, KioskAction, KioskEnvironment, KioskReducer>;

fn kiosk(payments: &ScriptedPayments) -> KioskStore {
    init_test_tracing();
    let env = KioskEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIds::new()),
        Arc::new(payments.clone()),
        KioskConfig::default(),
    );
    Store::new(SessionState::new(test_clock().now()), KioskReducer::new(), env)
}

async fn step(store: &KioskStore) -> KioskStep {
    store.state(|s| s.step).await
}

async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Welcome through to the payment method screen with chicken and fries in the cart
async fn fill_cart_and_checkout(store: &KioskStore) {
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();
    store
        .send(KioskAction::SelectOrderType(OrderType::DineIn))
        .await
        .unwrap();
    store.send(KioskAction::QuickAdd { product: chicken() }).await.unwrap();
    store.send(KioskAction::QuickAdd { product: fries() }).await.unwrap();
    store.send(KioskAction::SetStep(KioskStep::Cart)).await.unwrap();
    store.send(KioskAction::SetStep(KioskStep::CustomerName)).await.unwrap();
    store
        .send(KioskAction::SetCustomerName("Skyler".to_string()))
        .await
        .unwrap();
    store.send(KioskAction::SetStep(KioskStep::PaymentMethod)).await.unwrap();
}

// ========== Idle timer ==========

#[tokio::test(start_paused = true)]
async fn idle_session_returns_to_welcome_after_a_minute() {
    let store = kiosk(&ScriptedPayments::approving());
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();
    store
        .send(KioskAction::SelectOrderType(OrderType::TakeAway))
        .await
        .unwrap();
    store.send(KioskAction::QuickAdd { product: chicken() }).await.unwrap();

    advance(Duration::from_secs(59)).await;
    assert_eq!(step(&store).await, KioskStep::Categories);

    advance(Duration::from_secs(2)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
    assert!(store.state(|s| s.cart.is_empty()).await);
    assert_eq!(store.state(|s| s.order_type).await, None);
}

#[tokio::test(start_paused = true)]
async fn interaction_restarts_the_idle_countdown() {
    let store = kiosk(&ScriptedPayments::approving());
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();

    advance(Duration::from_secs(40)).await;
    store.send(KioskAction::Interaction).await.unwrap();

    advance(Duration::from_secs(40)).await;
    assert_eq!(step(&store).await, KioskStep::OrderType);

    advance(Duration::from_secs(21)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
}

#[tokio::test(start_paused = true)]
async fn welcome_screen_never_times_out() {
    let store = kiosk(&ScriptedPayments::approving());
    store.send(KioskAction::SetLanguage(kiosk_core::step::Language::Id)).await.unwrap();

    advance(Duration::from_secs(600)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test(start_paused = true)]
async fn deadlines_from_a_previous_customer_are_ignored() {
    let store = kiosk(&ScriptedPayments::approving());
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();

    advance(Duration::from_secs(10)).await;
    store.send(KioskAction::Reset).await.unwrap();

    advance(Duration::from_secs(20)).await;
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();

    // First customer's deadline at 60s
    advance(Duration::from_secs(35)).await;
    assert_eq!(step(&store).await, KioskStep::OrderType);

    // Second customer's deadline at 90s
    advance(Duration::from_secs(30)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
}

// ========== Payment ==========

#[tokio::test(start_paused = true)]
async fn cash_skips_processing() {
    let payments = ScriptedPayments::approving();
    let store = kiosk(&payments);
    fill_cart_and_checkout(&store).await;

    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Cash))
        .await
        .unwrap();

    assert_eq!(step(&store).await, KioskStep::PaymentSuccess);
    let number = store
        .state(|s| s.order.as_ref().map(|o| o.order_number.to_string()))
        .await;
    assert_eq!(number.as_deref(), Some("A101"));
    assert!(payments.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn card_payment_goes_through_processing() {
    let payments = ScriptedPayments::approving();
    let store = kiosk(&payments);
    let mut observed = store.subscribe_actions();
    fill_cart_and_checkout(&store).await;

    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(step(&store).await, KioskStep::PaymentProcessing);

    advance(Duration::from_millis(2_400)).await;
    assert_eq!(step(&store).await, KioskStep::PaymentProcessing);

    advance(Duration::from_millis(200)).await;
    assert_eq!(step(&store).await, KioskStep::PaymentSuccess);
    assert!(store.state(|s| s.order.is_some()).await);

    assert_eq!(
        observed.recv().await.unwrap(),
        KioskAction::PaymentSettled {
            generation: 6,
            outcome: PaymentOutcome::Approved,
        }
    );
    assert_eq!(
        payments.calls(),
        vec![(PaymentMethod::Card, Money::parse("13.178").unwrap())]
    );
}

#[tokio::test(start_paused = true)]
async fn send_and_wait_for_sees_the_placed_order() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;

    store
        .send_and_wait_for(
            KioskAction::SelectPaymentMethod(PaymentMethod::Qr),
            |action| matches!(action, KioskAction::PaymentSettled { .. }),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    let receipt = store
        .state(|s| Receipt::from_session(s, KioskConfig::default().tax_rate))
        .await
        .unwrap();
    assert_eq!(receipt.customer_name, "Skyler");
    assert_eq!(receipt.total, Money::parse("13.178").unwrap());
}

#[tokio::test(start_paused = true)]
async fn declined_payment_can_be_retried() {
    let payments = ScriptedPayments::declining_once("card declined");
    let store = kiosk(&payments);
    fill_cart_and_checkout(&store).await;

    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::GiftCard))
        .await
        .unwrap();
    advance(Duration::from_secs(3)).await;

    assert_eq!(step(&store).await, KioskStep::PaymentFailed);
    assert_eq!(
        store.state(|s| s.payment_error.clone()).await.as_deref(),
        Some("card declined")
    );
    assert!(store.state(|s| s.order.is_none()).await);

    store
        .send(KioskAction::SetStep(KioskStep::PaymentProcessing))
        .await
        .unwrap();
    advance(Duration::from_secs(3)).await;

    assert_eq!(step(&store).await, KioskStep::PaymentSuccess);
    assert_eq!(payments.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn leaving_processing_discards_the_payment_result() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;

    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Card))
        .await
        .unwrap();
    store.send(KioskAction::Reset).await.unwrap();

    advance(Duration::from_secs(3)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
    assert!(store.state(|s| s.order.is_none()).await);
}

// ========== Success countdown ==========

#[tokio::test(start_paused = true)]
async fn success_screen_resets_after_countdown() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;
    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Cash))
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.countdown).await, Some(15));

    advance(Duration::from_millis(14_500)).await;
    assert_eq!(step(&store).await, KioskStep::PaymentSuccess);
    assert_eq!(store.state(|s| s.countdown).await, Some(1));

    advance(Duration::from_secs(1)).await;
    assert_eq!(step(&store).await, KioskStep::Welcome);
    assert!(store.state(|s| s.order.is_none()).await);
}

#[tokio::test(start_paused = true)]
async fn start_new_order_skips_the_countdown() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;
    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Cash))
        .await
        .unwrap();

    store.send(KioskAction::Reset).await.unwrap();
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await.unwrap();

    // The old countdown would have reset the kiosk at 15s
    advance(Duration::from_secs(20)).await;
    assert_eq!(step(&store).await, KioskStep::OrderType);
}

// ========== Session ==========

#[tokio::test(start_paused = true)]
async fn reset_clears_every_customer_field() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;
    store.send(KioskAction::ToggleHighContrast).await.unwrap();

    store.send(KioskAction::Reset).await.unwrap();

    store
        .state(|s| {
            assert_eq!(s.step, KioskStep::Welcome);
            assert!(s.cart.is_empty());
            assert_eq!(s.customer_name, "");
            assert_eq!(s.payment_method, None);
            assert_eq!(s.order_type, None);
            assert!(s.high_contrast);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timers() {
    let store = kiosk(&ScriptedPayments::approving());
    fill_cart_and_checkout(&store).await;
    assert!(store.pending_effects() > 0);

    store.shutdown(Duration::from_secs(1)).await.unwrap();
    assert_eq!(store.pending_effects(), 0);
    assert_eq!(step(&store).await, KioskStep::PaymentMethod);

    let result = store.send(KioskAction::Interaction).await;
    assert_eq!(result.unwrap_err(), StoreError::ShutdownInProgress);
}
