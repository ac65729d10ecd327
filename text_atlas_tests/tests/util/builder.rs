// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A glyph atlas builder that packs every collected glyph into a fixed grid.

use peniko::kurbo::Rect;
use text_atlas::{
    AtlasTexture, AtlasType, FrameBounds, GlyphAtlas, GlyphAtlasBuilder, HostBuffer,
    RenderableText, TextureId, collect_glyph_keys,
};

/// Width and height of every fake atlas texture.
pub(crate) const ATLAS_SIZE: u32 = 256;

/// Side of the grid cell each glyph occupies.
pub(crate) const CELL_SIZE: f64 = 16.0;

/// Glyph bounds at scale 1, relative to the glyph origin.
pub(crate) const GLYPH_BOUNDS: Rect = Rect::new(1.0, -9.0, 9.0, 1.0);

#[derive(Debug)]
pub(crate) struct BuildCall {
    pub(crate) atlas_type: AtlasType,
    pub(crate) frame_count: usize,
    pub(crate) key_count: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBuilder {
    pub(crate) builds: Vec<BuildCall>,
    /// Return `None` from every build.
    pub(crate) fail: bool,
    /// Report the builder itself as unusable.
    pub(crate) invalid: bool,
    /// Glyph ids recorded without a resolved location.
    pub(crate) placeholder_glyphs: Vec<u32>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeAtlasContext {
    generation: u64,
}

impl GlyphAtlasBuilder for FakeBuilder {
    type Context = ();
    type AtlasContext = FakeAtlasContext;

    fn is_valid(&self) -> bool {
        !self.invalid
    }

    fn create_atlas_context(&self, _atlas_type: AtlasType) -> FakeAtlasContext {
        FakeAtlasContext::default()
    }

    fn build_glyph_atlas(
        &mut self,
        _context: &(),
        atlas_type: AtlasType,
        host_buffer: &mut HostBuffer,
        atlas_context: &mut FakeAtlasContext,
        frames: &[RenderableText],
    ) -> Option<GlyphAtlas> {
        let keys = collect_glyph_keys(frames);
        self.builds.push(BuildCall {
            atlas_type,
            frame_count: frames.len(),
            key_count: keys.values().map(|glyphs| glyphs.len()).sum(),
        });
        if self.fail {
            return None;
        }

        atlas_context.generation += 1;
        let mut atlas = GlyphAtlas::new(atlas_type);
        atlas.set_texture(AtlasTexture {
            id: TextureId(atlas_context.generation * 2 + atlas_type.index() as u64),
            width: ATLAS_SIZE,
            height: ATLAS_SIZE,
        });

        let per_row = (f64::from(ATLAS_SIZE) / CELL_SIZE) as usize;
        let mut cell = 0;
        for (scaled_font, glyphs) in keys {
            let scale = scaled_font.scale.to_f64();
            for glyph in glyphs {
                let bounds = if self.placeholder_glyphs.contains(&glyph.glyph_id) {
                    FrameBounds::PLACEHOLDER
                } else {
                    let x = (cell % per_row) as f64 * CELL_SIZE;
                    let y = (cell / per_row) as f64 * CELL_SIZE;
                    cell += 1;
                    FrameBounds::new(
                        Rect::new(x, y, x + CELL_SIZE, y + CELL_SIZE),
                        GLYPH_BOUNDS.scale_from_origin(scale),
                    )
                };
                atlas.add_glyph_bounds(scaled_font, glyph, bounds);
            }
        }
        // Stand-in for the bitmap upload.
        host_buffer.emplace(cell * 4, 4, |bytes| bytes.fill(0xff));
        Some(atlas)
    }
}
