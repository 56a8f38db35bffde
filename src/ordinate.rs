/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

A scalar time value, [`Ordinate`], with a known base representation
(floating point or exact rational), plus the epsilon-comparison rules every
other module in this crate is required to funnel its comparisons through.

Two ordinates of different representations compare by converting the
rational side to `f64`; this loses exactness but keeps the comparison
total, which is what the topology algebra needs. Code that must keep exact
rational arithmetic end to end should stay on [`Ordinate::Rational`]
throughout and only drop to `f64` at presentation boundaries.

*/

use num_rational::Ratio;
use num_traits::ToPrimitive;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The default tolerance used by [`Ordinate::approx_eq_abs`] when callers
/// don't supply their own. Must stay strictly positive.
pub const EPSILON: f64 = 1e-9;

/// A time-like scalar, represented either as a 64-bit float or an exact
/// rational of 64-bit integers.
#[derive(Debug, Clone, Copy)]
pub enum Ordinate {
    Float(f64),
    Rational(Ratio<i64>),
}

impl Ordinate {
    /// The canonical zero value, represented as a float.
    pub const ZERO: Ordinate = Ordinate::Float(0.0);
    /// The canonical one value, represented as a float.
    pub const ONE: Ordinate = Ordinate::Float(1.0);

    pub fn from_f64(v: f64) -> Self {
        Ordinate::Float(v)
    }

    pub fn rational(numer: i64, denom: i64) -> Self {
        Ordinate::Rational(Ratio::new(numer, denom))
    }

    /// Lossy conversion to `f64`, used for comparisons and for feeding the
    /// numerical root-finder behind [`crate::mapping::Mapping::Bezier`].
    pub fn as_f64(self) -> f64 {
        match self {
            Ordinate::Float(v) => v,
            Ordinate::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Exact equality of the underlying representation. Two values that are
    /// numerically equal but stored in different representations
    /// (`Float(1.0)` vs. `Rational(1/1)`) are *not* exactly equal by this
    /// test -- use [`Ordinate::approx_eq_abs`] for that.
    pub fn exact_eq(self, other: Ordinate) -> bool {
        match (self, other) {
            (Ordinate::Float(a), Ordinate::Float(b)) => a == b,
            (Ordinate::Rational(a), Ordinate::Rational(b)) => a == b,
            _ => false,
        }
    }

    /// Approximate equality within an absolute epsilon. This is the
    /// comparison every other module must use when the representations
    /// might differ.
    pub fn approx_eq_abs(self, other: Ordinate, epsilon: f64) -> bool {
        (self.as_f64() - other.as_f64()).abs() <= epsilon
    }

    /// Convenience wrapper around [`Ordinate::approx_eq_abs`] using
    /// [`EPSILON`].
    pub fn approx_eq(self, other: Ordinate) -> bool {
        self.approx_eq_abs(other, EPSILON)
    }

    pub fn lt(self, other: Ordinate) -> bool {
        self.as_f64() < other.as_f64()
    }

    pub fn le(self, other: Ordinate) -> bool {
        self.as_f64() <= other.as_f64()
    }

    pub fn gt(self, other: Ordinate) -> bool {
        self.as_f64() > other.as_f64()
    }

    pub fn ge(self, other: Ordinate) -> bool {
        self.as_f64() >= other.as_f64()
    }

    pub fn min(self, other: Ordinate) -> Ordinate {
        if self.le(other) {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Ordinate) -> Ordinate {
        if self.ge(other) {
            self
        } else {
            other
        }
    }

    pub fn is_finite(self) -> bool {
        self.as_f64().is_finite()
    }
}

impl Default for Ordinate {
    fn default() -> Self {
        Ordinate::ZERO
    }
}

impl PartialEq for Ordinate {
    /// `PartialEq` is the approximate comparison, not the exact one: this is
    /// what lets `ContinuousInterval` and friends use `==`/`assert_eq!`
    /// without every call site spelling out an epsilon. Use
    /// [`Ordinate::exact_eq`] when the representation itself matters.
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other)
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Ordinate {
            type Output = Ordinate;
            fn $method(self, rhs: Ordinate) -> Ordinate {
                match (self, rhs) {
                    (Ordinate::Rational(a), Ordinate::Rational(b)) => Ordinate::Rational(a $op b),
                    _ => Ordinate::Float(self.as_f64() $op rhs.as_f64()),
                }
            }
        }
    };
}

impl_binop!(Add, add, +);
impl_binop!(Sub, sub, -);
impl_binop!(Mul, mul, *);
impl_binop!(Div, div, /);

impl Neg for Ordinate {
    type Output = Ordinate;
    fn neg(self) -> Ordinate {
        match self {
            Ordinate::Float(v) => Ordinate::Float(-v),
            Ordinate::Rational(r) => Ordinate::Rational(-r),
        }
    }
}

impl From<f64> for Ordinate {
    fn from(v: f64) -> Self {
        Ordinate::Float(v)
    }
}

impl From<i64> for Ordinate {
    fn from(v: i64) -> Self {
        Ordinate::Rational(Ratio::from_integer(v))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Ordinate::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_is_positive() {
        assert!(EPSILON > 0.0);
    }

    #[test]
    fn float_and_rational_compare_approximately() {
        let a = Ordinate::from_f64(0.5);
        let b = Ordinate::rational(1, 2);
        assert!(a.approx_eq(b));
        assert!(!a.exact_eq(b));
    }

    #[test]
    fn arithmetic_stays_rational_when_possible() {
        let a = Ordinate::rational(1, 3);
        let b = Ordinate::rational(1, 3);
        match a + b {
            Ordinate::Rational(r) => assert_eq!(r, Ratio::new(2, 3)),
            Ordinate::Float(_) => panic!("expected rational arithmetic to stay exact"),
        }
    }

    #[test]
    fn min_max() {
        let a = Ordinate::from_f64(1.0);
        let b = Ordinate::from_f64(2.0);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }
}
