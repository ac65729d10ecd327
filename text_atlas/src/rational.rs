// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact fractions.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// An exact fraction with a positive denominator.
///
/// Equality and ordering compare the represented values, so `1/2 == 100/200`.
/// Hashing uses the reduced form to stay consistent with equality.
#[derive(Copy, Clone, Debug)]
pub struct Rational {
    num: i32,
    den: u32,
}

impl Rational {
    /// Creates the fraction `num / den`.
    ///
    /// A zero denominator is treated as one.
    pub const fn new(num: i32, den: u32) -> Self {
        Self {
            num,
            den: if den == 0 { 1 } else { den },
        }
    }

    /// The numerator as constructed.
    #[inline]
    pub const fn numerator(self) -> i32 {
        self.num
    }

    /// The denominator as constructed.
    #[inline]
    pub const fn denominator(self) -> u32 {
        self.den
    }

    /// Whether the value is exactly zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    /// The reciprocal, or `None` for zero.
    pub fn invert(self) -> Option<Self> {
        if self.num == 0 {
            return None;
        }
        let sign: i64 = if self.num < 0 { -1 } else { 1 };
        let num = i64::from(self.den) * sign;
        let den = i64::from(self.num).unsigned_abs();
        Some(Self {
            num: i32::try_from(num).ok()?,
            den: u32::try_from(den).ok()?,
        })
    }

    /// The value as `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// The value as `f32`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scale buckets are small and exactly representable as f32 fractions"
    )]
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    fn reduced(self) -> (i32, u32) {
        let g = gcd(self.num.unsigned_abs(), self.den);
        if g <= 1 {
            return (self.num, self.den);
        }
        // `g` divides `num` exactly, so the quotient always fits.
        let num = i32::try_from(i64::from(self.num) / i64::from(g)).unwrap_or(self.num);
        (num, self.den / g)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i64::from(self.num) * i64::from(other.den);
        let rhs = i64::from(other.num) * i64::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (num, den) = self.reduced();
        num.hash(state);
        den.hash(state);
    }
}

impl From<Rational> for f64 {
    fn from(value: Rational) -> Self {
        value.to_f64()
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
