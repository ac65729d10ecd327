// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod builder;
mod pass;

use std::sync::Arc;

use bytemuck::Pod;
use peniko::kurbo::{Point, Rect};
use text_atlas::{AxisAlignment, ContentContext, Font, GlyphPosition, TextFrame, TextRun};

pub(crate) use builder::{ATLAS_SIZE, CELL_SIZE, FakeBuilder, GLYPH_BOUNDS};
pub(crate) use pass::RecordingPass;

/// Horizontal advance between consecutive glyphs of [`text_frame`].
pub(crate) const ADVANCE: f64 = 10.0;

pub(crate) type TestContext = ContentContext<FakeBuilder>;

/// A context with a working fake builder.
pub(crate) fn context() -> TestContext {
    ContentContext::new(Some(FakeBuilder::default()), ())
}

pub(crate) fn font(font_id: u64, alignment: AxisAlignment) -> Font {
    Font::new(font_id, 0, 12.0, alignment)
}

/// A single-run frame with glyphs laid out left to right on the baseline.
pub(crate) fn text_frame(font: Font, glyph_ids: &[u32], has_color: bool) -> Arc<TextFrame> {
    let run = TextRun::new(
        font,
        glyph_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| GlyphPosition::new(id, Point::new(i as f64 * ADVANCE, 0.0))),
    );
    let width = glyph_ids.len() as f64 * ADVANCE;
    TextFrame::new([run], Rect::new(0.0, -10.0, width, 2.0), has_color).into_shared()
}

/// Decodes a tightly packed byte range into values.
pub(crate) fn read_pod<T: Pod>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(size_of::<T>())
        .map(bytemuck::pod_read_unaligned)
        .collect()
}
