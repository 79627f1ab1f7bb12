//! Kiosk screens and the small enums chosen along the way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing one of the kebab-case enums below
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Implements `Display`/`FromStr` from a list of `Variant => "name"` pairs.
macro_rules! kebab_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Kebab-case name
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// The screen the kiosk is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KioskStep {
    /// Attract screen, idle state
    #[default]
    Welcome,
    /// Dine in or take away
    OrderType,
    /// Menu browsing
    Categories,
    /// Cart review
    Cart,
    /// Name for the order call-out
    CustomerName,
    /// Payment method choice
    PaymentMethod,
    /// Waiting on the payment terminal
    PaymentProcessing,
    /// Order placed
    PaymentSuccess,
    /// Payment refused
    PaymentFailed,
}

kebab_names!(KioskStep, "step", {
    Welcome => "welcome",
    OrderType => "order-type",
    Categories => "categories",
    Cart => "cart",
    CustomerName => "customer-name",
    PaymentMethod => "payment-method",
    PaymentProcessing => "payment-processing",
    PaymentSuccess => "payment-success",
    PaymentFailed => "payment-failed",
});

impl KioskStep {
    /// Target of the on-screen back button, if the screen has one
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::OrderType => Some(Self::Welcome),
            Self::Categories => Some(Self::OrderType),
            Self::Cart => Some(Self::Categories),
            Self::CustomerName => Some(Self::Cart),
            Self::PaymentMethod => Some(Self::CustomerName),
            Self::PaymentFailed => Some(Self::PaymentMethod),
            Self::Welcome | Self::PaymentProcessing | Self::PaymentSuccess => None,
        }
    }

    /// Whether inactivity on this screen should end the session
    #[must_use]
    pub const fn tracks_idle(self) -> bool {
        !matches!(self, Self::Welcome)
    }
}

/// Where the customer will eat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Eat in the restaurant
    DineIn,
    /// Packed to go
    TakeAway,
}

kebab_names!(OrderType, "order type", {
    DineIn => "dine-in",
    TakeAway => "take-away",
});

/// How the customer pays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Card terminal
    Card,
    /// QR wallet
    Qr,
    /// Pay at the counter
    Cash,
    /// Store gift card
    GiftCard,
}

kebab_names!(PaymentMethod, "payment method", {
    Card => "card",
    Qr => "qr",
    Cash => "cash",
    GiftCard => "gift-card",
});

impl PaymentMethod {
    /// Cash skips the payment terminal
    #[must_use]
    pub const fn needs_processing(self) -> bool {
        !matches!(self, Self::Cash)
    }
}

/// Interface language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
    /// Indonesian
    Id,
}

kebab_names!(Language, "language", {
    En => "en",
    Es => "es",
    Id => "id",
});
