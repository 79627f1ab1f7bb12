//! Session state and actions for the kiosk.
//!
//! A session walks `welcome → order-type → categories → cart → customer-name →
//! payment-method`, then either straight to `payment-success` (cash) or through
//! `payment-processing` to `payment-success` or `payment-failed`.

use chrono::{DateTime, Utc};
use kiosk_core::cart::{Cart, CartItemId, CartTotals};
use kiosk_core::environment::PaymentOutcome;
use kiosk_core::menu::{CategoryId, Product, ProductId, ProductOption};
use kiosk_core::step::{KioskStep, Language, OrderType, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal identifier of a placed order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new `OrderId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number called out at the counter, e.g. `A123`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Creates a new `OrderNumber` from a string
    #[must_use]
    pub const fn new(number: String) -> Self {
        Self(number)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order metadata recorded once payment succeeds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    /// Internal id
    pub order_id: OrderId,
    /// Counter number
    pub order_number: OrderNumber,
    /// When the order was placed
    pub placed_at: DateTime<Utc>,
}

/// State of one kiosk session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Screen currently shown
    pub step: KioskStep,
    /// Interface language
    pub language: Language,
    /// Accessibility contrast mode
    pub high_contrast: bool,
    /// Dine in or take away
    pub order_type: Option<OrderType>,
    /// Category open on the menu screen
    pub selected_category: Option<CategoryId>,
    /// Product open in the customization sheet
    pub selected_product: Option<Product>,
    /// Cart lines
    pub cart: Cart,
    /// Name called out with the order, may be empty
    pub customer_name: String,
    /// Chosen payment method
    pub payment_method: Option<PaymentMethod>,
    /// Set once payment succeeds
    pub order: Option<PlacedOrder>,
    /// Seconds left on the success screen
    pub countdown: Option<u32>,
    /// Reason of the last declined payment
    pub payment_error: Option<String>,
    /// Time of the last user input
    pub last_interaction: DateTime<Utc>,
    /// Bumped on every user input; idle deadlines carry the value they were armed with
    pub idle_generation: u64,
    /// Bumped on every step change; payment and countdown work carry the value they started with
    pub flow_generation: u64,
}

impl SessionState {
    /// Fresh session on the welcome screen
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            step: KioskStep::Welcome,
            language: Language::default(),
            high_contrast: false,
            order_type: None,
            selected_category: None,
            selected_product: None,
            cart: Cart::new(),
            customer_name: String::new(),
            payment_method: None,
            order: None,
            countdown: None,
            payment_error: None,
            last_interaction: now,
            idle_generation: 0,
            flow_generation: 0,
        }
    }

    /// Cart figures at `tax_rate`
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        self.cart.totals(tax_rate)
    }

    /// Back to the welcome screen for the next customer.
    ///
    /// Language and contrast are kiosk preferences and survive. Both
    /// generations move on so no pending timer applies to the new session.
    /// `now` becomes the new session's last interaction.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.step = KioskStep::Welcome;
        self.order_type = None;
        self.selected_category = None;
        self.selected_product = None;
        self.cart.clear();
        self.customer_name.clear();
        self.payment_method = None;
        self.order = None;
        self.countdown = None;
        self.payment_error = None;
        self.last_interaction = now;
        self.idle_generation += 1;
        self.flow_generation += 1;
    }
}

/// Everything that can happen to a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum KioskAction {
    // ========== Navigation ==========
    /// Jump to a screen
    SetStep(KioskStep),
    /// Back button
    GoBack,
    /// Choose dine in or take away; opens the menu
    SelectOrderType(OrderType),
    /// Open a category, or none
    SelectCategory(Option<CategoryId>),
    /// Open a product sheet, or close it
    SelectProduct(Option<Product>),

    // ========== Cart ==========
    /// Add a customized product as a new line
    AddToCart {
        /// Product to add
        product: Product,
        /// Chosen options
        options: Vec<ProductOption>,
        /// Units
        quantity: u32,
    },
    /// Plus button on the menu grid
    QuickAdd {
        /// Product to add
        product: Product,
    },
    /// Minus button on the menu grid
    QuickRemove {
        /// Product to take one of
        product_id: ProductId,
    },
    /// Change a line's quantity; zero removes it
    UpdateCartItem {
        /// Line to change
        id: CartItemId,
        /// New quantity
        quantity: u32,
    },
    /// Delete a line
    RemoveFromCart {
        /// Line to delete
        id: CartItemId,
    },
    /// Empty the cart
    ClearCart,

    // ========== Checkout ==========
    /// Name for the order
    SetCustomerName(String),
    /// Choose how to pay
    SelectPaymentMethod(PaymentMethod),

    // ========== Preferences ==========
    /// Switch interface language
    SetLanguage(Language),
    /// Flip contrast mode
    ToggleHighContrast,

    // ========== Session ==========
    /// Touch, click, key press or scroll
    Interaction,
    /// Start over
    Reset,

    // ========== Internal ==========
    /// Idle deadline elapsed
    IdleTimeout {
        /// Idle generation the deadline was armed with
        generation: u64,
    },
    /// Payment terminal answered
    PaymentSettled {
        /// Flow generation the payment started in
        generation: u64,
        /// Terminal answer
        outcome: PaymentOutcome,
    },
    /// One second of the success countdown elapsed
    CountdownTick {
        /// Flow generation the countdown started in
        generation: u64,
    },
}

impl KioskAction {
    /// True for actions a customer triggers; these restart the idle deadline
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::IdleTimeout { .. } | Self::PaymentSettled { .. } | Self::CountdownTick { .. }
        )
    }
}
