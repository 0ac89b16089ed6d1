//! Arbitrary-precision signed amounts.
//!
//! Every balance, delta and supply figure is an `Amount`. On the wire and in
//! the store it is always base-10 ASCII text, never fixed-width binary.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use crate::error::{LedgerError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigInt);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigInt::zero())
    }

    pub fn from_bigint(value: BigInt) -> Self {
        Amount(value)
    }

    /// Parse a signed decimal integer: an optional `-` followed by ASCII digits.
    ///
    /// Anything else (`+`, whitespace, underscores, exponents, empty input) is a
    /// `ValidationError`.
    pub fn parse(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LedgerError::ValidationError(format!(
                "'{}' is not a decimal integer",
                text
            )));
        }
        BigInt::from_str(text)
            .map(Amount)
            .map_err(|e| LedgerError::ValidationError(format!("'{}': {}", text, e)))
    }

    /// Parse an amount that must be strictly greater than zero.
    pub fn parse_positive(text: &str) -> Result<Self> {
        let amount = Self::parse(text)?;
        if !amount.is_positive() {
            return Err(LedgerError::ValidationError(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        Ok(amount)
    }

    /// Parse an amount that may be zero but not negative (fees).
    pub fn parse_non_negative(text: &str) -> Result<Self> {
        let amount = Self::parse(text)?;
        if amount.is_negative() {
            return Err(LedgerError::ValidationError(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }
        Ok(amount)
    }

    /// Decode a stored record value. A value that does not parse means the
    /// store holds something the ledger never wrote.
    pub fn from_record_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| Self::parse(text).ok())
            .ok_or_else(|| LedgerError::StoreFault(format!("corrupt amount under key {:?}", key)))
    }

    pub fn to_record_bytes(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Amount::parse(s)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigInt::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(BigInt::from(value))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-&self.0)
    }
}

impl Add<&Amount> for &Amount {
    type Output = Amount;

    fn add(self, rhs: &Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Sub<&Amount> for &Amount {
    type Output = Amount;

    fn sub(self, rhs: &Amount) -> Amount {
        Amount(&self.0 - &rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Amount::parse(&text).map_err(serde::de::Error::custom)
    }
}
