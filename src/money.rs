//! Fixed-point money type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so that balance
//! comparisons against a threshold never suffer from binary floating-point
//! rounding. Amounts cross the JSON boundary as exact decimal text.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount that maintains exactly 2 decimal places of precision.
///
/// Values with more fractional digits are rounded half-to-even on the way in.
/// Values too large to carry 2 decimal places are rejected.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use banksweep::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, Self::SCALE))
    }

    /// Const-friendly constructor for built-in amounts.
    pub const fn from_unsigned_cents(cents: u32) -> Self {
        Money(Decimal::from_parts(cents, 0, 0, false, Self::SCALE))
    }

    /// Returns `true` if this amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Adds two amounts, returning `None` if the sum cannot be held at
    /// 2 decimal places.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self.0.checked_add(rhs.0)?;
        Money::try_from(sum).ok()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = rust_decimal::Error;

    /// Rounds to 2 decimal places; fails when the magnitude leaves no room
    /// for them.
    fn try_from(value: Decimal) -> std::result::Result<Self, Self::Error> {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        normalized.rescale(Self::SCALE);
        if normalized.scale() != Self::SCALE {
            return Err(rust_decimal::Error::ExceedsMaximumPossibleValue);
        }
        Ok(Money(normalized))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Money::try_from(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Serialized as a JSON number carrying the exact decimal text, so consumers
/// of the sweep summary keep receiving numeric fields without float rounding.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = serde_json::Number::from_str(&self.to_string())
            .map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

/// Accepts a JSON number or a string. Numbers are read from their source
/// text, never through `f64`.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected a decimal amount as a number or string, got {}",
                    other
                )));
            }
        };
        Money::from_str(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid amount {:?}: {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Money::from_str("1").unwrap().to_string(), "1.00");
        assert_eq!(Money::from_str("1.5").unwrap().to_string(), "1.50");
        assert_eq!(Money::from_str("  2.25  ").unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_extra_digits_round_half_even() {
        assert_eq!(Money::from_str("1.005").unwrap().to_string(), "1.00");
        assert_eq!(Money::from_str("1.015").unwrap().to_string(), "1.02");
        assert_eq!(Money::from_str("1.0151").unwrap().to_string(), "1.02");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("NaN").is_err());
        assert!(Money::from_str("inf").is_err());
    }

    #[test]
    fn test_rejects_amount_too_large_for_cents() {
        assert!(Money::from_str("79228162514264337593543950335").is_err());

        let largest = Money::from_str("792281625142643375935439503.35").unwrap();
        assert_eq!(largest.to_string(), "792281625142643375935439503.35");
    }

    #[test]
    fn test_comparison_is_exact() {
        let threshold = Money::from_str("20.00").unwrap();
        assert!(Money::from_str("20.01").unwrap() > threshold);
        assert!(Money::from_str("20").unwrap() <= threshold);
        assert_eq!(Money::from_cents(2000), threshold);
    }

    #[test]
    fn test_checked_add() {
        let sum = Money::from_str("0.10")
            .unwrap()
            .checked_add(Money::from_str("0.20").unwrap())
            .unwrap();
        assert_eq!(sum.to_string(), "0.30");
    }

    #[test]
    fn test_checked_add_overflow_is_none() {
        let largest = Money::from_str("792281625142643375935439503.35").unwrap();
        assert_eq!(largest.checked_add(largest), None);
        assert_eq!(largest.checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::from_str("-0.01").unwrap().is_negative());
        assert!(!Money::from_str("-0.00").unwrap().is_negative());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_deserialize_from_number_and_string() {
        let from_num: Money = serde_json::from_str("20.01").unwrap();
        let from_int: Money = serde_json::from_str("20").unwrap();
        let from_str: Money = serde_json::from_str("\"20.01\"").unwrap();
        assert_eq!(from_num, Money::from_cents(2001));
        assert_eq!(from_int, Money::from_cents(2000));
        assert_eq!(from_str, from_num);
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn test_serialize_as_exact_number() {
        let json = serde_json::to_string(&Money::from_cents(2500)).unwrap();
        assert_eq!(json, "25.00");
    }

    #[test]
    fn test_large_balance_keeps_its_cents() {
        let from_num: Money = serde_json::from_str("12345678901234567.89").unwrap();
        let from_str = Money::from_str("12345678901234567.89").unwrap();
        assert_eq!(from_num, from_str);

        let json = serde_json::to_string(&from_str).unwrap();
        assert_eq!(json, "12345678901234567.89");
    }
}
