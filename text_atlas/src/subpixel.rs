// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subpixel quantization of glyph positions.

use crate::GlyphPosition;
use crate::kurbo::Affine;

#[cfg(not(feature = "std"))]
use peniko::kurbo::common::FloatFuncs as _;

/// Number of subpixel buckets per axis.
pub(crate) const SUBPIXEL_BUCKETS: u8 = 4;

/// Bias added before bucketing so that positions near a pixel boundary land in
/// bucket 0 rather than flickering between 0 and 3.
const SUBPIXEL_BIAS: f64 = 0.125;

/// Which axes of a font's glyph positions are quantized to subpixel buckets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisAlignment {
    /// No subpixel positioning; every glyph uses bucket 0.
    #[default]
    None,
    /// Horizontal subpixel positioning only.
    X,
    /// Vertical subpixel positioning only.
    Y,
    /// Subpixel positioning on both axes.
    All,
}

impl AxisAlignment {
    /// Whether the x axis is quantized.
    #[inline]
    pub fn aligns_x(self) -> bool {
        matches!(self, Self::X | Self::All)
    }

    /// Whether the y axis is quantized.
    #[inline]
    pub fn aligns_y(self) -> bool {
        matches!(self, Self::Y | Self::All)
    }
}

/// A quantized subpixel offset.
///
/// Bits 0-1 hold the x bucket and bits 2-3 the y bucket, giving 16 distinct
/// values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubpixelPosition(u8);

impl SubpixelPosition {
    /// No subpixel offset.
    pub const ZERO: Self = Self(0);

    /// Combines an x and a y bucket. Buckets are taken modulo 4.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self((x % SUBPIXEL_BUCKETS) | ((y % SUBPIXEL_BUCKETS) << 2))
    }

    /// The x bucket, 0 to 3.
    #[inline]
    pub const fn x(self) -> u8 {
        self.0 & 0b11
    }

    /// The y bucket, 0 to 3.
    #[inline]
    pub const fn y(self) -> u8 {
        (self.0 >> 2) & 0b11
    }

    /// The packed 4-bit value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The subpixel offset this bucket stands for along each axis, in pixels.
    #[inline]
    pub fn offset(self) -> (f32, f32) {
        (
            f32::from(self.x()) / f32::from(SUBPIXEL_BUCKETS),
            f32::from(self.y()) / f32::from(SUBPIXEL_BUCKETS),
        )
    }
}

/// Quantizes the fractional part of `value` into one of four buckets.
///
/// `value` is biased by 0.125 first, so `[0.875, 1.125)` maps to bucket 0,
/// `[0.125, 0.375)` to bucket 1 and so on.
pub fn fractional_bucket(value: f64) -> u8 {
    let biased = value + SUBPIXEL_BIAS;
    let fraction = biased - biased.floor();
    if fraction < 0.25 {
        0
    } else if fraction < 0.5 {
        1
    } else if fraction < 0.75 {
        2
    } else {
        3
    }
}

/// Computes the subpixel bucket of a glyph anchor under `transform`.
///
/// Both the atlas collection pass and the vertex generator call this with the
/// same transform so their keys agree.
pub fn compute_subpixel_position(
    glyph_position: &GlyphPosition,
    alignment: AxisAlignment,
    transform: Affine,
) -> SubpixelPosition {
    let pos = transform * glyph_position.position;
    match alignment {
        AxisAlignment::None => SubpixelPosition::ZERO,
        AxisAlignment::X => SubpixelPosition::new(fractional_bucket(pos.x), 0),
        AxisAlignment::Y => SubpixelPosition::new(0, fractional_bucket(pos.y)),
        AxisAlignment::All => {
            SubpixelPosition::new(fractional_bucket(pos.x), fractional_bucket(pos.y))
        }
    }
}
