//! Self-order kiosk session for a fast-food counter.
//!
//! One [`SessionState`] per kiosk screen, driven by [`KioskReducer`]:
//!
//! - **Step flow**: `welcome → order-type → categories → cart → customer-name →
//!   payment-method`, then cash goes straight to `payment-success` while card,
//!   QR and gift card go through `payment-processing`
//! - **Cart pricing**: exact decimal line totals, subtotal, tax and total
//!   derived on demand
//! - **Idle reset**: 60 seconds without input on any screen but `welcome`
//!   abandons the session
//! - **Success countdown**: the confirmation screen resets the kiosk after 15 seconds
//!
//! # Example Usage
//!
//! ```no_run
//! use kiosk::{KioskAction, KioskEnvironment, KioskReducer, SessionState};
//! use kiosk_core::config::KioskConfig;
//! use kiosk_core::environment::{AlwaysApprove, RandomIds, SystemClock};
//! use kiosk_core::step::{KioskStep, OrderType};
//! use kiosk_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = KioskEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(RandomIds),
//!     Arc::new(AlwaysApprove),
//!     KioskConfig::from_env()?,
//! );
//! let store = Store::new(SessionState::new(env.clock.now()), KioskReducer::new(), env);
//!
//! store.send(KioskAction::SetStep(KioskStep::OrderType)).await?;
//! store.send(KioskAction::SelectOrderType(OrderType::DineIn)).await?;
//!
//! let step = store.state(|s| s.step).await;
//! assert_eq!(step, KioskStep::Categories);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod receipt;
pub mod reducer;
pub mod types;

pub use receipt::{RECEIPT_WIDTH, Receipt};
pub use reducer::{KioskEnvironment, KioskReducer};
pub use types::{KioskAction, OrderId, OrderNumber, PlacedOrder, SessionState};
