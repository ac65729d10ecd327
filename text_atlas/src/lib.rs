// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Atlas renders shaped text by mapping glyph runs onto a shared glyph atlas
//! and emitting one textured quad per glyph.
//!
//! The moving parts, in the order a rendering cycle touches them:
//!
//! - [`TextFrame`]: an immutable collection of shaped [`TextRun`]s.
//! - [`LazyGlyphAtlas`]: collects every frame drawn in a cycle, then asks a
//!   [`GlyphAtlasBuilder`] to realize one [`GlyphAtlas`] per [`AtlasType`].
//! - [`compute_vertex_data`]: looks each glyph up in the realized atlas and
//!   produces pixel-snapped (or freely transformed) quad vertices.
//! - [`TextContents`]: per-draw orchestration that picks the sampler, fills the
//!   [`HostBuffer`]s and submits the draw through a [`RenderPass`].
//!
//! Atlas entries are keyed on a quantized scale (see [`round_scale`]) and a
//! quantized subpixel offset (see [`compute_subpixel_position`]) so the same
//! rasterized bitmap is shared across many draws.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("text_atlas requires either the `std` or `libm` feature to be enabled");

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko::{color, kurbo};

pub mod atlas;

mod contents;
mod error;
mod font;
mod gpu;
mod math;
mod rational;
mod scale;
mod subpixel;
mod text_frame;
mod vertex;

pub use atlas::{
    AtlasTexture, AtlasType, FontGlyphAtlas, FrameBounds, GlyphAtlas, GlyphAtlasBuilder,
    LazyGlyphAtlas, SlotState, collect_glyph_keys,
};
pub use contents::{
    ContentContext, Entity, FragInfo, FrameInfo, SamplingOptions, TextContents,
    glyph_atlas_sampler,
};
pub use error::{Error, ErrorKind};
pub use font::{
    Font, GlyphProperties, ScaledFont, StrokeCap, StrokeJoin, StrokeParameters, SubpixelGlyph,
};
pub use gpu::{
    BufferView, HostBuffer, IndexType, MinMagFilter, MipFilter, RenderPass, SamplerDescriptor,
    TextureId,
};
pub use rational::Rational;
pub use scale::{MAX_TEXT_SCALE, SCALE_DENOMINATOR, round_rational_scale, round_scale};
pub use subpixel::{AxisAlignment, SubpixelPosition, compute_subpixel_position, fractional_bucket};
pub use text_frame::{GlyphPosition, PathCreator, RenderableText, TextFrame, TextRun};
pub use vertex::{
    GlyphVertex, QUAD_INDEX_PATTERN, compute_vertex_data, write_quad_index_bytes,
    write_quad_indices,
};
