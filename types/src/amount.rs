//! Signed token amounts.
//!
//! `Int` is a sign-magnitude integer with a 256-bit magnitude. Every arithmetic
//! operation is checked and returns `None` on overflow, so callers decide whether
//! an overflow is a recoverable error or a halt. Zero is always stored as
//! non-negative, which keeps equality and hashing structural.
//!
//! Amounts serialize as their canonical decimal string (`"-1"`, `"100"`), so the
//! encoding is identical on every node.

use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::TypesError;

/// An arbitrary-precision signed token amount.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int {
    negative: bool,
    magnitude: U256,
}

impl Int {
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: U256([0; 4]),
    };

    pub fn new(value: i128) -> Self {
        Self::from_parts(value < 0, U256::from(value.unsigned_abs()))
    }

    /// Build an amount from an explicit sign and magnitude.
    pub fn from_parts(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_parts(false, U256::from(value))
    }

    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_positive(&self) -> bool {
        !self.negative && !self.magnitude.is_zero()
    }

    pub fn abs(self) -> Self {
        Self::from_parts(false, self.magnitude)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        if self.negative == rhs.negative {
            let magnitude = self.magnitude.checked_add(rhs.magnitude)?;
            return Some(Self::from_parts(self.negative, magnitude));
        }
        // Opposite signs: the larger magnitude decides the sign.
        match self.magnitude.cmp(&rhs.magnitude) {
            Ordering::Less => Some(Self::from_parts(
                rhs.negative,
                rhs.magnitude - self.magnitude,
            )),
            _ => Some(Self::from_parts(
                self.negative,
                self.magnitude - rhs.magnitude,
            )),
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_add(-rhs)
    }

    /// Convert to `u128` if the amount is non-negative and fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.negative || self.magnitude > U256::from(u128::MAX) {
            return None;
        }
        Some(self.magnitude.low_u128())
    }
}

impl Default for Int {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Neg for Int {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_parts(!self.negative, self.magnitude)
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u128> for Int {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<U256> for Int {
    fn from(magnitude: U256) -> Self {
        Self::from_parts(false, magnitude)
    }
}

impl FromStr for Int {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        let magnitude = U256::from_dec_str(digits)
            .map_err(|_| TypesError::InvalidAmount(s.to_string()))?;
        Ok(Self::from_parts(negative, magnitude))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

impl fmt::Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self)
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_normalizes() {
        let z = Int::from_parts(true, U256::zero());
        assert_eq!(z, Int::ZERO);
        assert!(!z.is_negative());
        assert_eq!(-Int::ZERO, Int::ZERO);
    }

    #[test]
    fn mixed_sign_addition() {
        assert_eq!(Int::new(5).checked_add(Int::new(-8)), Some(Int::new(-3)));
        assert_eq!(Int::new(-5).checked_add(Int::new(8)), Some(Int::new(3)));
        assert_eq!(Int::new(-5).checked_add(Int::new(5)), Some(Int::ZERO));
        assert_eq!(Int::new(10).checked_sub(Int::new(15)), Some(Int::new(-5)));
    }

    #[test]
    fn overflow_is_reported() {
        let max = Int::from(U256::MAX);
        assert_eq!(max.checked_add(Int::new(1)), None);
        assert_eq!((-max).checked_sub(Int::new(1)), None);
        assert_eq!(max.checked_add(Int::new(-1)), Some(Int::from(U256::MAX - U256::one())));
    }

    #[test]
    fn ordering_respects_sign() {
        assert!(Int::new(-10) < Int::new(-1));
        assert!(Int::new(-1) < Int::ZERO);
        assert!(Int::ZERO < Int::new(1));
        assert!(Int::new(2) > Int::new(1));
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Int::new(-1).to_string(), "-1");
        assert_eq!(Int::new(100_000_000_000).to_string(), "100000000000");
        assert_eq!("-42".parse::<Int>().unwrap(), Int::new(-42));
        assert_eq!("-0".parse::<Int>().unwrap(), Int::ZERO);
        assert!("".parse::<Int>().is_err());
        assert!("-".parse::<Int>().is_err());
        assert!("1e3".parse::<Int>().is_err());
        assert!("+5".parse::<Int>().is_err());
    }

    #[test]
    fn to_u128_rejects_negative_and_large() {
        assert_eq!(Int::new(7).to_u128(), Some(7));
        assert_eq!(Int::new(-7).to_u128(), None);
        assert_eq!(Int::from(U256::MAX).to_u128(), None);
    }

    #[test]
    fn bincode_encoding_is_canonical_decimal() {
        let encoded = bincode::serialize(&Int::new(-1)).unwrap();
        let as_string = bincode::serialize(&"-1".to_string()).unwrap();
        assert_eq!(encoded, as_string);
        let decoded: Int = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, Int::new(-1));
    }
}
