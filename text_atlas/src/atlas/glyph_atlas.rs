// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Realized glyph atlas data.

use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

use crate::kurbo::{Rect, Size};
use crate::{ScaledFont, SubpixelGlyph, TextureId};

/// The bitmap format of an atlas.
///
/// Alpha and color glyphs need different texture formats and never share an
/// atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtlasType {
    /// Single channel coverage masks, tinted with the paint color at draw time.
    AlphaBitmap,
    /// Full RGBA bitmaps for color fonts.
    ColorBitmap,
}

impl AtlasType {
    /// Both atlas types, in slot order.
    pub const ALL: [Self; 2] = [Self::AlphaBitmap, Self::ColorBitmap];

    /// Slot index of this type.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::AlphaBitmap => 0,
            Self::ColorBitmap => 1,
        }
    }
}

/// The GPU texture backing an atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasTexture {
    /// Handle of the texture in the GPU resource layer.
    pub id: TextureId,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

impl AtlasTexture {
    /// Texture dimensions as a size.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Where a glyph lives in the atlas and how large it is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameBounds {
    /// Rectangle of the glyph bitmap within the atlas texture, in texels.
    pub atlas_bounds: Rect,
    /// Bounds of the rasterized glyph relative to its origin, in scaled
    /// (device) pixels.
    pub glyph_bounds: Rect,
    /// The key was recorded but its atlas location is not known yet. Treated
    /// as a cache miss.
    pub is_placeholder: bool,
}

impl FrameBounds {
    /// A recorded key with no resolved location.
    pub const PLACEHOLDER: Self = Self {
        atlas_bounds: Rect::ZERO,
        glyph_bounds: Rect::ZERO,
        is_placeholder: true,
    };

    /// Resolved bounds.
    #[inline]
    pub fn new(atlas_bounds: Rect, glyph_bounds: Rect) -> Self {
        Self {
            atlas_bounds,
            glyph_bounds,
            is_placeholder: false,
        }
    }
}

impl Default for FrameBounds {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

/// The glyphs of one [`ScaledFont`] held by an atlas.
#[derive(Clone, Debug, Default)]
pub struct FontGlyphAtlas {
    positions: HashMap<SubpixelGlyph, FrameBounds>,
}

impl FontGlyphAtlas {
    /// Looks up the bounds of a glyph.
    #[inline]
    pub fn find_glyph_bounds(&self, glyph: &SubpixelGlyph) -> Option<FrameBounds> {
        self.positions.get(glyph).copied()
    }

    /// Records the bounds of a glyph, replacing any previous entry.
    pub fn append_glyph(&mut self, glyph: SubpixelGlyph, bounds: FrameBounds) {
        self.positions.insert(glyph, bounds);
    }

    /// Number of glyphs in this sub-table.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the sub-table holds no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over every glyph and its bounds.
    pub fn iter(&self) -> impl Iterator<Item = (&SubpixelGlyph, &FrameBounds)> {
        self.positions.iter()
    }
}

/// A realized glyph atlas: a texture plus the location of every glyph in it.
///
/// Built by a [`GlyphAtlasBuilder`](crate::GlyphAtlasBuilder) once per
/// rendering cycle and type, then shared read-only by every draw in that cycle.
pub struct GlyphAtlas {
    atlas_type: AtlasType,
    texture: Option<AtlasTexture>,
    font_atlas_map: HashMap<ScaledFont, FontGlyphAtlas>,
}

impl GlyphAtlas {
    /// Creates an empty atlas with no texture.
    pub fn new(atlas_type: AtlasType) -> Self {
        Self {
            atlas_type,
            texture: None,
            font_atlas_map: HashMap::new(),
        }
    }

    /// The bitmap format of this atlas.
    #[inline]
    pub fn atlas_type(&self) -> AtlasType {
        self.atlas_type
    }

    /// Whether the atlas has a texture and can be drawn from.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.texture.is_some()
    }

    /// The backing texture, if one has been assigned.
    #[inline]
    pub fn texture(&self) -> Option<&AtlasTexture> {
        self.texture.as_ref()
    }

    /// Assigns the backing texture.
    pub fn set_texture(&mut self, texture: AtlasTexture) {
        self.texture = Some(texture);
    }

    /// The sub-table of a scaled font, if any of its glyphs were collected.
    #[inline]
    pub fn font_glyph_atlas(&self, scaled_font: &ScaledFont) -> Option<&FontGlyphAtlas> {
        self.font_atlas_map.get(scaled_font)
    }

    /// Looks up a glyph, returning `None` when either the scaled font or the
    /// glyph is absent.
    pub fn find_font_glyph_bounds(
        &self,
        scaled_font: &ScaledFont,
        glyph: &SubpixelGlyph,
    ) -> Option<FrameBounds> {
        self.font_atlas_map
            .get(scaled_font)
            .and_then(|font_atlas| font_atlas.find_glyph_bounds(glyph))
    }

    /// Records the bounds of a glyph, creating the scaled font's sub-table on
    /// first use.
    pub fn add_glyph_bounds(
        &mut self,
        scaled_font: ScaledFont,
        glyph: SubpixelGlyph,
        bounds: FrameBounds,
    ) {
        self.font_atlas_map
            .entry(scaled_font)
            .or_default()
            .append_glyph(glyph, bounds);
    }

    /// Total number of glyphs across all scaled fonts.
    pub fn glyph_count(&self) -> usize {
        self.font_atlas_map.values().map(FontGlyphAtlas::len).sum()
    }

    /// Iterates over every glyph of every scaled font.
    pub fn iter_glyphs(&self) -> impl Iterator<Item = (&ScaledFont, &SubpixelGlyph, &FrameBounds)> {
        self.font_atlas_map.iter().flat_map(|(scaled_font, font_atlas)| {
            font_atlas
                .iter()
                .map(move |(glyph, bounds)| (scaled_font, glyph, bounds))
        })
    }
}

impl Debug for GlyphAtlas {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("atlas_type", &self.atlas_type)
            .field("texture", &self.texture)
            .field("fonts", &self.font_atlas_map.len())
            .field("glyph_count", &self.glyph_count())
            .finish_non_exhaustive()
    }
}
