// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph atlas cache for efficient text rendering.
//!
//! This module provides:
//! - [`LazyGlyphAtlas`], which queues the text drawn during a rendering cycle
//!   and realizes at most one atlas per [`AtlasType`] per cycle
//! - [`GlyphAtlas`], the realized lookup table from scaled font and subpixel
//!   glyph key to atlas rectangle
//! - [`GlyphAtlasBuilder`], the seam to the backend that rasterizes and packs
//!   glyphs
//! - [`collect_glyph_keys`], the collection pass builders use to discover
//!   which bitmaps are needed

mod builder;
mod collect;
mod glyph_atlas;
mod lazy;
mod slot;

pub use builder::GlyphAtlasBuilder;
pub use collect::collect_glyph_keys;
pub use glyph_atlas::{AtlasTexture, AtlasType, FontGlyphAtlas, FrameBounds, GlyphAtlas};
pub use lazy::LazyGlyphAtlas;
pub use slot::SlotState;
