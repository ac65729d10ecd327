// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mathematical helper functions.

use core::ops::Sub;

use crate::kurbo::{Affine, Vec2};

/// Tolerance within which a basis component is snapped to exactly ±1.
pub(crate) const ATTRACT_TO_ONE_TOLERANCE: f64 = 0.005;

/// A number of useful methods for f64 numbers.
pub(crate) trait FloatExt: Sized + Sub<f64, Output = f64> {
    /// Whether the number is approximately 0, with a given tolerance.
    fn is_nearly_zero_within_tolerance(&self, tolerance: f64) -> bool;

    /// Returns ±1 when the number is within `tolerance` of ±1, otherwise the
    /// number itself.
    fn attract_to_one(self, tolerance: f64) -> f64;
}

impl FloatExt for f64 {
    #[inline(always)]
    fn is_nearly_zero_within_tolerance(&self, tolerance: f64) -> bool {
        debug_assert!(tolerance >= 0.0, "tolerance must be positive");

        self.abs() <= tolerance
    }

    #[inline(always)]
    fn attract_to_one(self, tolerance: f64) -> f64 {
        if (self - 1.0).is_nearly_zero_within_tolerance(tolerance) {
            1.0
        } else if (self + 1.0).is_nearly_zero_within_tolerance(tolerance) {
            -1.0
        } else {
            self
        }
    }
}

/// The images of the unit x and y vectors under the linear part of `transform`.
#[inline]
pub(crate) fn basis(transform: Affine) -> (Vec2, Vec2) {
    let [a, b, c, d, _, _] = transform.as_coeffs();
    (Vec2::new(a, b), Vec2::new(c, d))
}

/// Lengths of the two basis vectors of `transform`.
#[inline]
pub(crate) fn basis_lengths(transform: Affine) -> (f64, f64) {
    let (x, y) = basis(transform);
    (x.length(), y.length())
}

/// The larger of the two basis vector lengths, i.e. the maximum magnification
/// `transform` applies along either axis of the source space.
#[inline]
pub(crate) fn max_basis_length_xy(transform: Affine) -> f64 {
    let (x, y) = basis_lengths(transform);
    x.max(y)
}

/// Whether `transform` only translates and scales, without rotation or shear.
#[inline]
pub(crate) fn is_translation_scale_only(transform: Affine) -> bool {
    let [_, b, c, _, _, _] = transform.as_coeffs();
    b == 0.0 && c == 0.0
}
