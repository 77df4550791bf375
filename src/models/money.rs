//! Money type for currency amounts
//!
//! Amounts are stored as `i64` minor units (hundredths) so that balances can
//! be added and reversed exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Whole currency units, e.g. `from_major(150)` is 150.00
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn minor(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// `None` on `i64` overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Parse amounts such as `"10"`, `"10.5"`, `"-10.50"` or `"1,250.00"`
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (negative, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let body: String = body.chars().filter(|c| *c != ',' && *c != '_').collect();
        if body.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body.as_str(), ""),
        };
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -minor } else { minor }))
    }

    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, self.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Returned when a string cannot be read as an amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

/// `numerator / denominator * 100`, rounded half-up; zero when the
/// denominator is zero.
pub fn percent_of(numerator: Money, denominator: Money) -> i64 {
    if denominator.is_zero() {
        return 0;
    }
    let ratio = numerator.minor() as f64 / denominator.minor() as f64 * 100.0;
    (ratio + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_major(1).checked_add(Money::from_major(2)),
            Some(Money::from_major(3))
        );
        assert_eq!(Money::from_minor(i64::MAX).checked_add(Money::from_minor(1)), None);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(10).minor(), 1000);
        assert_eq!(Money::from_minor(1050).minor(), 1050);
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1050).to_string(), "10.50");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
        assert_eq!(Money::from_major(45_000_000).to_string(), "45000000.00");
        assert_eq!(Money::from_minor(-1050).format_with_symbol("Rp"), "-Rp10.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10").unwrap(), Money::from_major(10));
        assert_eq!(Money::parse("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().minor(), -1050);
        assert_eq!(Money::parse("1,250.00").unwrap().minor(), 125_000);
        assert_eq!(Money::parse(".25").unwrap().minor(), 25);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_major(100);
        let b = Money::from_major(30);
        assert_eq!(a - b, Money::from_major(70));
        assert_eq!(-(a + b), Money::from_major(-130));

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_major(160));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(Money::from_major(300), Money::from_major(1000)), 30);
        assert_eq!(percent_of(Money::from_major(1), Money::from_major(8)), 13);
        assert_eq!(percent_of(Money::from_major(5), Money::zero()), 0);
        // half-up, not half-away-from-zero
        assert_eq!(percent_of(Money::from_minor(-5), Money::from_minor(200)), -2);
    }
}
