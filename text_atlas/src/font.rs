// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font handles and the glyph keys built from them.

use core::hash::{Hash, Hasher};

use crate::color::{AlphaColor, Srgb, palette::css::BLACK};
use crate::kurbo::{Cap, Join, Stroke};
use crate::{AxisAlignment, Rational, SubpixelPosition};
use peniko::FontData;

/// A resolved font at a given size.
///
/// Two fonts compare equal when they refer to the same font blob, collection
/// index and size, and use the same subpixel policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    /// Unique identifier for the font blob.
    pub font_id: u64,
    /// Index within font collection (for TTC files).
    pub font_index: u32,
    /// Font size as f32 bits (exact match, no quantization).
    size_bits: u32,
    axis_alignment: AxisAlignment,
}

impl Font {
    /// Creates a font handle from raw identifiers.
    pub fn new(font_id: u64, font_index: u32, size: f32, axis_alignment: AxisAlignment) -> Self {
        Self {
            font_id,
            font_index,
            size_bits: size.to_bits(),
            axis_alignment,
        }
    }

    /// Creates a font handle for a loaded font.
    pub fn from_font_data(font: &FontData, size: f32, axis_alignment: AxisAlignment) -> Self {
        Self::new(font.data.id(), font.index, size, axis_alignment)
    }

    /// The font size in pixels per em.
    #[inline]
    pub fn size(&self) -> f32 {
        f32::from_bits(self.size_bits)
    }

    /// Which axes glyph positions of this font are quantized on.
    #[inline]
    pub fn axis_alignment(&self) -> AxisAlignment {
        self.axis_alignment
    }
}

/// A font together with the quantized scale it is rasterized at.
///
/// Each distinct `ScaledFont` owns one sub-table of a [`GlyphAtlas`](crate::GlyphAtlas).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScaledFont {
    /// The font.
    pub font: Font,
    /// The quantized rasterization scale, see [`round_scale`](crate::round_scale).
    pub scale: Rational,
}

/// Line join of a stroked glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrokeJoin {
    /// Bevel join.
    Bevel,
    /// Miter join.
    Miter,
    /// Round join.
    Round,
}

/// Line cap of a stroked glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrokeCap {
    /// Flat cap.
    Butt,
    /// Square cap.
    Square,
    /// Round cap.
    Round,
}

/// Stroke settings that change how a glyph is rasterized.
#[derive(Copy, Clone, Debug)]
pub struct StrokeParameters {
    /// Stroke width in glyph space.
    pub width: f32,
    /// Miter limit, only meaningful with [`StrokeJoin::Miter`].
    pub miter_limit: f32,
    /// Join style.
    pub join: StrokeJoin,
    /// Cap style.
    pub cap: StrokeCap,
}

impl Default for StrokeParameters {
    fn default() -> Self {
        Self {
            width: 0.0,
            miter_limit: 4.0,
            join: StrokeJoin::Miter,
            cap: StrokeCap::Butt,
        }
    }
}

impl PartialEq for StrokeParameters {
    fn eq(&self, other: &Self) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.miter_limit.to_bits() == other.miter_limit.to_bits()
            && self.join == other.join
            && self.cap == other.cap
    }
}

impl Eq for StrokeParameters {}

impl Hash for StrokeParameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.to_bits().hash(state);
        self.miter_limit.to_bits().hash(state);
        self.join.hash(state);
        self.cap.hash(state);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "stroke widths are small values where f32 precision is sufficient"
)]
impl From<&Stroke> for StrokeParameters {
    fn from(stroke: &Stroke) -> Self {
        Self {
            width: stroke.width as f32,
            miter_limit: stroke.miter_limit as f32,
            join: match stroke.join {
                Join::Bevel => StrokeJoin::Bevel,
                Join::Miter => StrokeJoin::Miter,
                Join::Round => StrokeJoin::Round,
            },
            cap: match stroke.start_cap {
                Cap::Butt => StrokeCap::Butt,
                Cap::Square => StrokeCap::Square,
                Cap::Round => StrokeCap::Round,
            },
        }
    }
}

/// Paint properties that are baked into an atlas entry.
///
/// Only present in a key when they affect the rasterized bitmap: a stroke is
/// always baked in, the color only for color-bitmap fonts.
#[derive(Copy, Clone, Debug)]
pub struct GlyphProperties {
    /// Paint color used when rasterizing color glyphs.
    pub color: AlphaColor<Srgb>,
    /// Stroke settings, `None` for fills.
    pub stroke: Option<StrokeParameters>,
}

impl Default for GlyphProperties {
    fn default() -> Self {
        Self {
            color: BLACK,
            stroke: None,
        }
    }
}

impl PartialEq for GlyphProperties {
    fn eq(&self, other: &Self) -> bool {
        color_bits(self.color) == color_bits(other.color) && self.stroke == other.stroke
    }
}

impl Eq for GlyphProperties {}

impl Hash for GlyphProperties {
    fn hash<H: Hasher>(&self, state: &mut H) {
        color_bits(self.color).hash(state);
        self.stroke.hash(state);
    }
}

fn color_bits(color: AlphaColor<Srgb>) -> [u32; 4] {
    color.components.map(f32::to_bits)
}

/// Identifies one rasterized glyph bitmap within a [`ScaledFont`]'s sub-table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubpixelGlyph {
    /// Glyph index within the font.
    pub glyph_id: u32,
    /// Quantized subpixel offset of the glyph anchor.
    pub subpixel: SubpixelPosition,
    /// Paint properties baked into the bitmap, if any.
    pub properties: Option<GlyphProperties>,
}

impl SubpixelGlyph {
    /// Creates a new key.
    #[inline]
    pub fn new(
        glyph_id: u32,
        subpixel: SubpixelPosition,
        properties: Option<GlyphProperties>,
    ) -> Self {
        Self {
            glyph_id,
            subpixel,
            properties,
        }
    }
}
