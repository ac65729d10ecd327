// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The atlas building backend.

use crate::{AtlasType, GlyphAtlas, HostBuffer, RenderableText};

/// Rasterizes glyphs and packs them into a [`GlyphAtlas`].
///
/// [`LazyGlyphAtlas`](crate::LazyGlyphAtlas) calls the builder at most once
/// per atlas type and rendering cycle, passing every frame registered for
/// that type. Builders typically run [`collect_glyph_keys`](crate::collect_glyph_keys)
/// over the frames to discover which glyphs to rasterize.
pub trait GlyphAtlasBuilder {
    /// The GPU device context textures are created with.
    type Context;

    /// State the builder keeps between cycles for one atlas type, such as a
    /// rectangle packer or a previously uploaded texture.
    type AtlasContext;

    /// Whether the builder can currently produce atlases.
    fn is_valid(&self) -> bool {
        true
    }

    /// Creates the persistent state for one atlas type.
    fn create_atlas_context(&self, atlas_type: AtlasType) -> Self::AtlasContext;

    /// Builds the atlas for `frames`.
    ///
    /// Returns `None` on failure. Transient upload data may be written to
    /// `host_buffer`.
    fn build_glyph_atlas(
        &mut self,
        context: &Self::Context,
        atlas_type: AtlasType,
        host_buffer: &mut HostBuffer,
        atlas_context: &mut Self::AtlasContext,
        frames: &[RenderableText],
    ) -> Option<GlyphAtlas>;
}
