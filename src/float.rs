//! Floating-point abstraction trait for generic coordinate math.

use core::cmp::PartialOrd;
use core::ops::{Add, Sub, Mul, Div, Neg};

/// Scalar operations the mesh and its views rely on.
///
/// Only `f64` implements it today. `sqrt`, `floor` and `ceil` go through
/// `libm` because `core` has no float math.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Convert from a grid index.
    fn from_usize(v: usize) -> Self;
    /// Truncating conversion to a grid index. Negative values map to 0.
    fn to_usize(self) -> usize;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn floor(self) -> Self { libm::floor(self) }
    fn ceil(self) -> Self { libm::ceil(self) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_usize(v: usize) -> Self { v as f64 }
    fn to_usize(self) -> usize { self as usize }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_usize_saturates_negative() {
        assert_eq!((-2.5f64).to_usize(), 0);
        assert_eq!(3.9f64.to_usize(), 3);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(Float::clamp(5.0f64, 0.0, 1.0), 1.0);
        assert_eq!(Float::clamp(-5.0f64, 0.0, 1.0), 0.0);
    }

    #[test]
    fn finite_checks() {
        assert!(Float::is_finite(1.0f64));
        assert!(!Float::is_finite(f64::NAN));
        assert!(!Float::is_finite(f64::INFINITY));
    }

    #[test]
    fn rounding_goes_through_libm() {
        assert_eq!(Float::ceil(1.2f64), 2.0);
        assert_eq!(Float::floor(-1.2f64), -2.0);
    }
}
