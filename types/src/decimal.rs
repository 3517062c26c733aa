//! Fixed-point decimals with 18 fractional digits.
//!
//! Used for ratios handed to inflation and reward formulas. Division always
//! truncates toward zero so every validator computes the same bits.

use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Int;

/// Number of fractional decimal digits carried by [`Dec`].
pub const PRECISION: usize = 18;

fn scale() -> U256 {
    U256::exp10(PRECISION)
}

/// A signed fixed-point decimal, stored as an [`Int`] scaled by `10^18`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dec(Int);

impl Dec {
    pub const ZERO: Self = Self(Int::ZERO);

    pub fn one() -> Self {
        Self(Int::from(scale()))
    }

    /// Wrap an already-scaled value.
    pub fn from_raw(raw: Int) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> Int {
        self.0
    }

    /// Convert a whole amount, or `None` if the scaled value overflows.
    pub fn from_int(value: Int) -> Option<Self> {
        let scaled = value.magnitude().checked_mul(scale())?;
        Some(Self(Int::from_parts(value.is_negative(), scaled)))
    }

    /// `numerator / denominator`, truncated toward zero.
    ///
    /// Returns `None` for a zero denominator or when the quotient does not fit.
    pub fn quo_int(numerator: Int, denominator: Int) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let wide = numerator.magnitude().full_mul(scale());
        let quotient = wide / U512::from(denominator.magnitude());
        let magnitude = U256::try_from(quotient).ok()?;
        let negative = numerator.is_negative() != denominator.is_negative();
        Some(Self(Int::from_parts(negative, magnitude)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.magnitude();
        let whole = magnitude / scale();
        let frac = magnitude % scale();
        if self.0.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}.{:0>width$}", whole, frac.to_string(), width = PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_displays_with_full_precision() {
        assert_eq!(Dec::one().to_string(), "1.000000000000000000");
        assert_eq!(Dec::ZERO.to_string(), "0.000000000000000000");
    }

    #[test]
    fn quotient_truncates() {
        let third = Dec::quo_int(Int::new(1), Int::new(3)).unwrap();
        assert_eq!(third.to_string(), "0.333333333333333333");
        let two_thirds = Dec::quo_int(Int::new(2), Int::new(3)).unwrap();
        assert_eq!(two_thirds.to_string(), "0.666666666666666666");
        let neg = Dec::quo_int(Int::new(-2), Int::new(3)).unwrap();
        assert_eq!(neg.to_string(), "-0.666666666666666666");
    }

    #[test]
    fn quotient_of_equal_values_is_one() {
        let big = Int::new(100_000_000_000);
        assert_eq!(Dec::quo_int(big, big), Some(Dec::one()));
    }

    #[test]
    fn zero_denominator_is_none() {
        assert_eq!(Dec::quo_int(Int::new(5), Int::ZERO), None);
    }

    #[test]
    fn from_int_scales() {
        assert_eq!(Dec::from_int(Int::new(1)), Some(Dec::one()));
        assert_eq!(Dec::from_int(Int::from(U256::MAX)), None);
    }
}
