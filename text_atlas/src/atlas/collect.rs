// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The collection pass: which glyph bitmaps a set of frames needs.

use hashbrown::{HashMap, HashSet};

use crate::math::max_basis_length_xy;
use crate::{RenderableText, ScaledFont, SubpixelGlyph, compute_subpixel_position, round_scale};

/// Gathers the atlas keys needed to draw `frames`.
///
/// Uses the same scale rounding and subpixel bucketing as
/// [`compute_vertex_data`](crate::compute_vertex_data), so every key recorded
/// here is found again when geometry is generated with the same transform.
/// Frames whose scale rounds to zero are invisible and contribute nothing.
pub fn collect_glyph_keys(
    frames: &[RenderableText],
) -> HashMap<ScaledFont, HashSet<SubpixelGlyph>> {
    let mut keys: HashMap<ScaledFont, HashSet<SubpixelGlyph>> = HashMap::new();
    for text in frames {
        let transform = text.origin_transform;
        let scale = round_scale(max_basis_length_xy(transform));
        if scale.is_zero() {
            continue;
        }
        for run in text.text_frame.runs() {
            let font = *run.font();
            let glyphs = keys.entry(ScaledFont { font, scale }).or_default();
            for glyph_position in run.glyph_positions() {
                let subpixel =
                    compute_subpixel_position(glyph_position, font.axis_alignment(), transform);
                glyphs.insert(SubpixelGlyph::new(
                    glyph_position.glyph_id,
                    subpixel,
                    text.properties,
                ));
            }
        }
    }
    keys
}
