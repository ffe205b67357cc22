//! US dollar amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::lenient;

/// A dollar amount.
///
/// Sums are exact; rounding to cents happens only when displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parses user input the forgiving way: anything unparseable is $0.00.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self(lenient::parse_decimal(raw))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Amount rounded to cents, half away from zero.
    #[must_use]
    pub fn to_cents(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded
    }
}

/// Saturates at the largest representable amount instead of overflowing.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.0.checked_add(rhs.0).map_or_else(
            || {
                if rhs.0.is_sign_negative() {
                    Self(Decimal::MIN)
                } else {
                    Self(Decimal::MAX)
                }
            },
            Self,
        )
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Formats as `$1,234.56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.to_cents();
        let text = cents.abs().to_string();
        let (int_part, dec_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}${}.{dec_part}", lenient::group_thousands(int_part))
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
