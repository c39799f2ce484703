//! Numeric kinds for score levels.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use num_traits::Zero;

#[cfg(feature = "decimal")]
use rust_decimal::Decimal;

/// The numeric kind of one score level.
///
/// Implemented for `i32`, `i64`, `f64` and (behind the `decimal` feature)
/// `rust_decimal::Decimal`. Integer kinds detect overflow and report it
/// through the checked operations instead of wrapping; the decimal kind
/// uses exact arithmetic so that millions of incremental updates cannot
/// accumulate rounding drift.
pub trait ScoreValue:
    Copy + Debug + Display + PartialEq + PartialOrd + Zero + Send + Sync + 'static
{
    /// Adds, returning `None` on overflow.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Subtracts, returning `None` on overflow.
    fn checked_sub(self, other: Self) -> Option<Self>;

    /// Negates, returning `None` on overflow.
    fn checked_neg(self) -> Option<Self>;

    /// Multiplies by a scalar. Integer kinds round to the nearest value.
    fn checked_scale(self, factor: f64) -> Option<Self>;

    /// Divides by a scalar. Integer kinds round to the nearest value.
    fn checked_div_scalar(self, divisor: f64) -> Option<Self>;

    /// Total ordering over level magnitudes.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Parses a level magnitude from its display form.
    fn parse_value(s: &str) -> Option<Self>;
}

macro_rules! impl_integer_score_value {
    ($t:ty) => {
        impl ScoreValue for $t {
            #[inline]
            fn checked_add(self, other: Self) -> Option<Self> {
                <$t>::checked_add(self, other)
            }

            #[inline]
            fn checked_sub(self, other: Self) -> Option<Self> {
                <$t>::checked_sub(self, other)
            }

            #[inline]
            fn checked_neg(self) -> Option<Self> {
                <$t>::checked_neg(self)
            }

            fn checked_scale(self, factor: f64) -> Option<Self> {
                let scaled = (self as f64 * factor).round();
                if scaled.is_finite() && scaled >= <$t>::MIN as f64 && scaled <= <$t>::MAX as f64
                {
                    Some(scaled as $t)
                } else {
                    None
                }
            }

            fn checked_div_scalar(self, divisor: f64) -> Option<Self> {
                let scaled = (self as f64 / divisor).round();
                if scaled.is_finite() && scaled >= <$t>::MIN as f64 && scaled <= <$t>::MAX as f64
                {
                    Some(scaled as $t)
                } else {
                    None
                }
            }

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            fn parse_value(s: &str) -> Option<Self> {
                s.parse().ok()
            }
        }
    };
}

impl_integer_score_value!(i32);
impl_integer_score_value!(i64);

impl ScoreValue for f64 {
    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    #[inline]
    fn checked_sub(self, other: Self) -> Option<Self> {
        Some(self - other)
    }

    #[inline]
    fn checked_neg(self) -> Option<Self> {
        Some(-self)
    }

    #[inline]
    fn checked_scale(self, factor: f64) -> Option<Self> {
        Some(self * factor)
    }

    #[inline]
    fn checked_div_scalar(self, divisor: f64) -> Option<Self> {
        Some(self / divisor)
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    fn parse_value(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

#[cfg(feature = "decimal")]
impl ScoreValue for Decimal {
    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        Decimal::checked_add(self, other)
    }

    #[inline]
    fn checked_sub(self, other: Self) -> Option<Self> {
        Decimal::checked_sub(self, other)
    }

    #[inline]
    fn checked_neg(self) -> Option<Self> {
        Some(-self)
    }

    fn checked_scale(self, factor: f64) -> Option<Self> {
        Decimal::from_f64_retain(factor).and_then(|f| self.checked_mul(f))
    }

    fn checked_div_scalar(self, divisor: f64) -> Option<Self> {
        Decimal::from_f64_retain(divisor).and_then(|d| self.checked_div(d))
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    fn parse_value(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}
