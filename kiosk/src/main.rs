//! Kiosk demo binary
//!
//! Walks two customers through the kiosk: one paying by card, one paying cash
//! at the counter, and prints both receipts.
//!
//! ```bash
//! KIOSK_PAYMENT_DELAY_MS=500 cargo run --bin kiosk
//! ```

use anyhow::Context;
use kiosk::catalog;
use kiosk::{KioskAction, KioskEnvironment, KioskReducer, RECEIPT_WIDTH, Receipt, SessionState};
use kiosk_core::config::KioskConfig;
use kiosk_core::environment::{AlwaysApprove, RandomIds, SystemClock};
use kiosk_core::menu::{Menu, ProductId};
use kiosk_core::money::Money;
use kiosk_core::step::{KioskStep, OrderType, PaymentMethod};
use kiosk_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type KioskStore = Store<SessionState, KioskAction, KioskEnvironment, KioskReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiosk=debug,kiosk_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = KioskConfig::from_env().context("invalid kiosk configuration")?;
    tracing::info!(?config, "Starting kiosk");

    let env = KioskEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(RandomIds),
        Arc::new(AlwaysApprove),
        config.clone(),
    );
    let store = Store::new(SessionState::new(env.clock.now()), KioskReducer::new(), env);
    let menu = catalog::los_pollos();

    println!("=== Customer 1: card ===\n");
    let gus_special = menu
        .product(&ProductId::new("prod-1"))
        .cloned()
        .context("menu has no prod-1")?;
    let options = menu.default_options(&gus_special.id);
    start_order(&store, OrderType::DineIn).await?;
    store
        .send(KioskAction::AddToCart {
            product: gus_special,
            options,
            quantity: 2,
        })
        .await?;
    quick_add(&store, &menu, "prod-10").await?;
    checkout(&store, "Walter").await?;

    store
        .send_and_wait_for(
            KioskAction::SelectPaymentMethod(PaymentMethod::Card),
            |action| matches!(action, KioskAction::PaymentSettled { .. }),
            config.payment_delay() + Duration::from_secs(5),
        )
        .await?;
    print_receipt(&store, &config, None).await?;
    store.send(KioskAction::Reset).await?;

    println!("\n=== Customer 2: cash ===\n");
    start_order(&store, OrderType::TakeAway).await?;
    quick_add(&store, &menu, "prod-8").await?;
    quick_add(&store, &menu, "prod-8").await?;
    quick_add(&store, &menu, "prod-9").await?;
    checkout(&store, "").await?;
    store
        .send(KioskAction::SelectPaymentMethod(PaymentMethod::Cash))
        .await?;
    print_receipt(&store, &config, Some(Money::from_cents(2_000))).await?;
    store.send(KioskAction::Reset).await?;

    store.shutdown_default().await?;
    tracing::info!("Kiosk stopped");
    Ok(())
}

async fn start_order(store: &KioskStore, order_type: OrderType) -> anyhow::Result<()> {
    store.send(KioskAction::SetStep(KioskStep::OrderType)).await?;
    store.send(KioskAction::SelectOrderType(order_type)).await?;
    Ok(())
}

async fn quick_add(store: &KioskStore, menu: &Menu, id: &str) -> anyhow::Result<()> {
    let product = menu
        .product(&ProductId::new(id))
        .cloned()
        .with_context(|| format!("menu has no {id}"))?;
    store.send(KioskAction::QuickAdd { product }).await?;
    Ok(())
}

async fn checkout(store: &KioskStore, name: &str) -> anyhow::Result<()> {
    store.send(KioskAction::SetStep(KioskStep::Cart)).await?;
    store.send(KioskAction::SetStep(KioskStep::CustomerName)).await?;
    store
        .send(KioskAction::SetCustomerName(name.to_string()))
        .await?;
    store.send(KioskAction::SetStep(KioskStep::PaymentMethod)).await?;
    Ok(())
}

async fn print_receipt(
    store: &KioskStore,
    config: &KioskConfig,
    cash: Option<Money>,
) -> anyhow::Result<()> {
    let receipt = store
        .state(|s| Receipt::from_session(s, config.tax_rate))
        .await
        .context("no order was placed")?;
    let receipt = match cash {
        Some(amount) => receipt.with_cash_tendered(amount),
        None => receipt,
    };
    println!("{}", receipt.render_text(RECEIPT_WIDTH));
    Ok(())
}

