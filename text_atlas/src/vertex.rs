// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-glyph quad generation.

use bytemuck::{Pod, Zeroable};

use crate::kurbo::{Affine, Point, Vec2};
use crate::math::{
    ATTRACT_TO_ONE_TOLERANCE, FloatExt, is_translation_scale_only, max_basis_length_xy,
};
use crate::{
    GlyphAtlas, GlyphProperties, IndexType, ScaledFont, SubpixelGlyph, TextFrame,
    compute_subpixel_position, round_scale,
};

/// One corner of a glyph quad.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    /// Position in the entity's output space, in pixels.
    pub position: [f32; 2],
    /// Normalized texture coordinate in the atlas.
    pub uv: [f32; 2],
}

/// The two triangles of a quad, as offsets into its four vertices.
pub const QUAD_INDEX_PATTERN: [u16; 6] = [0, 1, 2, 1, 2, 3];

/// Quad corners in vertex order.
const UNIT_POINTS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Writes the vertices of every glyph of `frame` found in `atlas` to `out`,
/// four per glyph, and returns the number of quads written.
///
/// Atlas keys are computed from `screen_transform`, the transform the frame
/// was registered with, while vertex positions use `entity_transform`. The
/// two differ when drawing into an offscreen target.
///
/// When the entity transform only translates and scales, quads are snapped to
/// the pixel grid. Otherwise the atlas bounds are transformed directly.
///
/// Runs whose scaled font is missing from the atlas and glyphs without
/// resolved bounds are skipped and logged; the remaining quads are packed at
/// the front of `out`. `out` should hold four vertices per glyph of the frame.
pub fn compute_vertex_data(
    out: &mut [GlyphVertex],
    entity_transform: Affine,
    frame: &TextFrame,
    position: Point,
    screen_transform: Affine,
    glyph_properties: Option<GlyphProperties>,
    atlas: &GlyphAtlas,
) -> usize {
    let Some(texture) = atlas.texture() else {
        log::warn!("Cannot compute glyph vertices against an atlas without a texture.");
        return 0;
    };
    let atlas_size = texture.size();
    if atlas_size.is_zero_area() {
        log::warn!("Cannot compute glyph vertices against an empty atlas texture.");
        return 0;
    }

    let offset = Affine::translate(position.to_vec2());
    let entity_offset_transform = entity_transform * offset;
    let is_translation_scale = is_translation_scale_only(entity_offset_transform);
    let [a, b, c, d, _, _] = entity_offset_transform.as_coeffs();
    let basis_transform = Affine::new([a, b, c, d, 0.0, 0.0]);

    let frame_transform = screen_transform * offset;
    let rounded_scale = round_scale(max_basis_length_xy(frame_transform));
    let Some(inverted_scale) = rounded_scale.invert().map(|scale| scale.to_f64()) else {
        log::debug!("Text frame scale rounds to zero; nothing to draw.");
        return 0;
    };

    // Typically ±1 at scales below the ceiling; snap away the drift.
    let unscaled_basis = Affine::new([
        (a * inverted_scale).attract_to_one(ATTRACT_TO_ONE_TOLERANCE),
        b * inverted_scale,
        c * inverted_scale,
        (d * inverted_scale).attract_to_one(ATTRACT_TO_ONE_TOLERANCE),
        0.0,
        0.0,
    ]);
    let screen_offset = (entity_offset_transform * Point::ZERO).to_vec2();

    let mut quads = out.chunks_exact_mut(4);
    let mut written = 0;
    for run in frame.runs() {
        let font = *run.font();
        let scaled_font = ScaledFont {
            font,
            scale: rounded_scale,
        };
        let Some(font_atlas) = atlas.font_glyph_atlas(&scaled_font) else {
            log::warn!("Could not find font in the atlas: {scaled_font:?}");
            continue;
        };

        let alignment = font.axis_alignment();
        let subpixel_adjustment = Vec2::new(
            if alignment.aligns_x() { 0.125 } else { 0.5 },
            if alignment.aligns_y() { 0.125 } else { 0.5 },
        );

        for glyph_position in run.glyph_positions() {
            let subpixel = compute_subpixel_position(glyph_position, alignment, frame_transform);
            let key = SubpixelGlyph::new(glyph_position.glyph_id, subpixel, glyph_properties);
            let bounds = font_atlas.find_glyph_bounds(&key).unwrap_or_default();
            if bounds.is_placeholder {
                log::warn!("Frame bounds are not present in the atlas: {key:?}");
                continue;
            }
            let Some(quad) = quads.next() else {
                log::warn!("Vertex output holds fewer quads than the frame has glyphs.");
                return written;
            };

            let uv_origin = bounds.atlas_bounds.origin();
            let uv_size = bounds.atlas_bounds.size();
            let glyph_bounds = bounds.glyph_bounds;
            let scaled_bounds = glyph_bounds.scale_from_origin(inverted_scale);

            for (vertex, corner) in quad.iter_mut().zip(UNIT_POINTS) {
                let vertex_position = if is_translation_scale {
                    let unrounded = (unscaled_basis * glyph_bounds.origin()).to_vec2()
                        + (basis_transform * glyph_position.position).to_vec2();
                    let snapped = (Point::ZERO + screen_offset + unrounded + subpixel_adjustment)
                        .floor();
                    let extent = unscaled_basis
                        * Point::new(
                            corner.x * glyph_bounds.width(),
                            corner.y * glyph_bounds.height(),
                        );
                    (snapped + extent.to_vec2()).round()
                } else {
                    entity_offset_transform
                        * (glyph_position.position
                            + scaled_bounds.origin().to_vec2()
                            + Vec2::new(
                                corner.x * scaled_bounds.width(),
                                corner.y * scaled_bounds.height(),
                            ))
                };
                let uv = Point::new(
                    (uv_origin.x + corner.x * uv_size.width) / atlas_size.width,
                    (uv_origin.y + corner.y * uv_size.height) / atlas_size.height,
                );
                *vertex = GlyphVertex {
                    position: to_f32(vertex_position),
                    uv: to_f32(uv),
                };
            }
            written += 1;
        }
    }
    written
}

/// Fills `indices` with [`QUAD_INDEX_PATTERN`] for consecutive quads.
///
/// Every six indices address the next four vertices. Use `u32` indices when
/// more than 65536 vertices are addressed; indices that do not fit `T` are
/// left untouched.
pub fn write_quad_indices<T: TryFrom<usize>>(indices: &mut [T]) {
    for (position, index) in indices.iter_mut().enumerate() {
        let value = T::try_from(quad_index(position));
        debug_assert!(value.is_ok(), "quad index {position} out of range");
        if let Ok(value) = value {
            *index = value;
        }
    }
}

/// Fills `bytes` with [`QUAD_INDEX_PATTERN`] for consecutive quads, encoded
/// as native endian indices of `index_type`.
///
/// This writes straight into a reserved staging range, see
/// [`HostBuffer::emplace`](crate::HostBuffer::emplace). Trailing bytes that
/// do not form a whole index are left untouched.
pub fn write_quad_index_bytes(bytes: &mut [u8], index_type: IndexType) {
    match index_type {
        IndexType::U16 => fill_index_bytes(bytes, u16::to_ne_bytes),
        IndexType::U32 => fill_index_bytes(bytes, u32::to_ne_bytes),
    }
}

fn fill_index_bytes<T: TryFrom<usize>, const N: usize>(
    bytes: &mut [u8],
    to_bytes: fn(T) -> [u8; N],
) {
    for (position, slot) in bytes.chunks_exact_mut(N).enumerate() {
        let value = T::try_from(quad_index(position));
        debug_assert!(value.is_ok(), "quad index {position} out of range");
        if let Ok(value) = value {
            slot.copy_from_slice(&to_bytes(value));
        }
    }
}

/// The vertex addressed by the index at `position` of a quad index buffer.
#[inline]
fn quad_index(position: usize) -> usize {
    (position / 6) * 4 + usize::from(QUAD_INDEX_PATTERN[position % 6])
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "vertex attributes are single precision on the GPU"
)]
#[inline]
fn to_f32(point: Point) -> [f32; 2] {
    [point.x as f32, point.y as f32]
}
