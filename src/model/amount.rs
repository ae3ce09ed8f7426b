//! Amount type for handling monetary values with an optional currency prefix.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include the `Rs.` prefix and thousands separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// Currency prefixes that are stripped while parsing. Longest first.
const CURRENCY_PREFIXES: [&str; 2] = ["Rs.", "Rs"];

/// Represents a monetary amount.
///
/// Amounts are stored exactly as decimals. The value is serialized as a decimal string so that a
/// stored ledger round-trips without floating point drift.
///
/// # Examples
///
/// Parsing with a currency prefix and separators:
/// ```
/// # use salebook::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("Rs. 1,250.50").unwrap();
/// assert_eq!(amount.to_string(), "1250.50");
/// ```
///
/// Formatting for display:
/// ```
/// # use salebook::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1250.5").unwrap();
/// assert_eq!(amount.display_with("Rs."), "Rs. 1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// Divides the amount into `count` equal parts. Returns zero when `count` is zero.
    pub fn average_over(&self, count: usize) -> Amount {
        if count == 0 {
            return Amount::ZERO;
        }
        Amount(self.0 / Decimal::from(count))
    }

    /// `self * quantity`, or `None` if the product is not representable.
    pub fn checked_mul(&self, quantity: u32) -> Option<Amount> {
        self.0.checked_mul(Decimal::from(quantity)).map(Amount)
    }

    /// Formats the amount to two decimal places with thousands separators, prefixed by `label`
    /// when it is non-empty, e.g. `Rs. 60,000.00`.
    pub fn display_with(&self, label: &str) -> String {
        let num = format_num::format_num!(",.2", self.0.to_f64().unwrap_or_default());
        if label.is_empty() {
            num
        } else {
            format!("{label} {num}")
        }
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let without_prefix = CURRENCY_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed)
            .trim_start();

        // Remove commas (thousand separators)
        let without_commas = without_prefix.replace(',', "");

        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        // Go through the shortest round-trip text form so 19.99 stays 19.99.
        Amount::from_str(&v.to_string()).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

// Sums and products saturate at the decimal limits instead of panicking.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Mul<u32> for Amount {
    type Output = Amount;

    fn mul(self, rhs: u32) -> Amount {
        Amount(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}
