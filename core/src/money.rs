//! Exact currency amounts.
//!
//! Prices, option surcharges and totals are kept as [`Decimal`] so that
//! `8.99 + 1.50 = 10.49` and `20.98 * 0.10 = 2.098` hold exactly. Rounding to
//! cents only happens when an amount is displayed.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use thiserror::Error;

/// Number of decimal places shown for a currency amount.
const DISPLAY_PLACES: u32 = 2;

/// Errors produced when parsing a money amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input was not a decimal number
    #[error("invalid money amount: {0:?}")]
    Invalid(String),
}

/// A signed, exact amount of currency (dollars with fractional cents allowed)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount
    #[must_use]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from whole cents (`899` is `$8.99`)
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, DISPLAY_PLACES))
    }

    /// Parses a decimal string such as `"8.99"` or `"-1.00"`
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Invalid`] when the input is not a decimal number.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        Decimal::from_str(input.trim())
            .map(Self)
            .map_err(|_| MoneyError::Invalid(input.to_string()))
    }

    /// The exact decimal value
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiplies by a quantity
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Multiplies by a rate (`0.10` for 10%) without rounding
    #[must_use]
    pub fn apply_rate(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }

    /// Rounds to cents, half away from zero
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns true for amounts below zero (e.g. a "No Drink" option)
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.rounded().0.abs();
        shown.rescale(DISPLAY_PLACES);
        if self.rounded().is_negative() {
            write!(f, "-${shown}")
        } else {
            write!(f, "${shown}")
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
