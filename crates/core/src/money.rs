//! Exact monetary amounts.

use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Non-negative decimal amount of money, held exactly as `mantissa × 10^-scale`.
///
/// Always normalized (no trailing fractional zeros), so derived equality is
/// equality by value: `19.90 == 19.9`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Money {
    mantissa: u128,
    scale: u32,
}

impl Money {
    pub const ZERO: Money = Money { mantissa: 0, scale: 0 };

    fn normalized(mut mantissa: u128, mut scale: u32) -> Self {
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        if mantissa == 0 {
            scale = 0;
        }
        Self { mantissa, scale }
    }

    /// Whole units (e.g. dollars).
    pub fn from_units(units: u64) -> Self {
        Self::normalized(units as u128, 0)
    }

    /// Minor units (hundredths).
    pub fn from_cents(cents: u64) -> Self {
        Self::normalized(cents as u128, 2)
    }

    /// Exact value of a finite, non-negative float, using its shortest
    /// round-trip representation (`19.999_f64` is `19.999`).
    pub fn from_f64(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::invalid_amount(format!("{amount} is not finite")));
        }
        if amount < 0.0 {
            return Err(DomainError::invalid_amount(format!("{amount} is negative")));
        }
        format!("{amount}").parse()
    }

    /// `true` when the amount has no fractional part.
    pub fn is_whole(&self) -> bool {
        self.scale == 0
    }

    /// `self × quantity`, or `None` on overflow.
    pub fn checked_mul(self, quantity: u64) -> Option<Money> {
        self.mantissa
            .checked_mul(quantity as u128)
            .map(|mantissa| Self::normalized(mantissa, self.scale))
    }

    /// Whole amount as `u64`, if it is whole and fits.
    pub fn as_u64(&self) -> Option<u64> {
        if self.is_whole() { u64::try_from(self.mantissa).ok() } else { None }
    }

    /// Nearest float (may round).
    pub fn as_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::MAX)
    }
}

impl ValueObject for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        let scale = self.scale.max(other.scale);
        let widen = |m: &Money| {
            10u128
                .checked_pow(scale - m.scale)
                .and_then(|factor| m.mantissa.checked_mul(factor))
        };
        match (widen(self), widen(other)) {
            (Some(a), Some(b)) => a.cmp(&b),
            // the side that overflows when widened is the larger one
            (None, Some(_)) => core::cmp::Ordering::Greater,
            (Some(_), None) => core::cmp::Ordering::Less,
            (None, None) => self.to_string().len().cmp(&other.to_string().len()),
        }
    }
}

/// Plain decimal, no currency symbol and no exponent: `1000`, `19.999`.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let digits = format!("{:0>width$}", self.mantissa, width = self.scale as usize + 1);
        let (int, frac) = digits.split_at(digits.len() - self.scale as usize);
        write!(f, "{int}.{frac}")
    }
}

/// Parses `123` or `123.456`. Signs and exponents are rejected.
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        let valid = !int.is_empty() && int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit());
        if !valid {
            return Err(DomainError::invalid_amount(format!("'{s}' is not a plain non-negative decimal")));
        }

        let too_large = || DomainError::invalid_amount(format!("{s} is too large"));
        let mut mantissa: u128 = 0;
        for digit in int.bytes().chain(frac.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(digit - b'0')))
                .ok_or_else(too_large)?;
        }
        let scale = u32::try_from(frac.len()).map_err(|_| too_large())?;
        Ok(Self::normalized(mantissa, scale))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(units) => serializer.serialize_u64(units),
            None => serializer.serialize_f64(self.as_f64()),
        }
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a non-negative number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_units(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        u64::try_from(v)
            .map(Money::from_units)
            .map_err(|_| E::custom(DomainError::invalid_amount(format!("{v} is negative"))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_f64(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
