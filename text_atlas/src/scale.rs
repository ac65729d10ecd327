// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quantization of the rasterization scale used as part of every atlas key.
//!
//! Rounding to a fixed grid of 1/[`SCALE_DENOMINATOR`] and clamping to
//! [`MAX_TEXT_SCALE`] bounds the number of distinct atlas entries a glyph can
//! have across arbitrary zoom levels.

use crate::Rational;

#[cfg(not(feature = "std"))]
use peniko::kurbo::common::FloatFuncs as _;

/// Denominator of every quantized scale.
pub const SCALE_DENOMINATOR: u32 = 200;

/// Largest quantized scale. Larger scales are clamped so a glyph always fits
/// in the atlas.
pub const MAX_TEXT_SCALE: i32 = 48;

const MAX_NUMERATOR: i32 = MAX_TEXT_SCALE * SCALE_DENOMINATOR as i32;

/// Rounds a continuous scale to the nearest multiple of 1/200 in `[0, 48]`.
///
/// NaN rounds to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is clamped to [0, 9600] before the cast"
)]
pub fn round_scale(scale: f64) -> Rational {
    if scale > f64::from(MAX_TEXT_SCALE) {
        return Rational::new(MAX_NUMERATOR, SCALE_DENOMINATOR);
    }
    let numerator = (scale * f64::from(SCALE_DENOMINATOR)).round();
    if numerator.is_nan() || numerator <= 0.0 {
        return Rational::new(0, SCALE_DENOMINATOR);
    }
    Rational::new((numerator as i32).min(MAX_NUMERATOR), SCALE_DENOMINATOR)
}

/// Re-rounds an exact scale onto the 1/200 grid and re-clamps it to `[0, 48]`.
///
/// Used when composing an already quantized scale with another transform.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is clamped to [0, 9600] before the cast"
)]
pub fn round_rational_scale(scale: Rational) -> Rational {
    let numerator = (f64::from(scale.numerator()) * f64::from(SCALE_DENOMINATOR)
        / f64::from(scale.denominator()))
    .round()
    .clamp(0.0, f64::from(MAX_NUMERATOR));
    Rational::new(numerator as i32, SCALE_DENOMINATOR)
}
