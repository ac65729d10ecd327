// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for per-draw orchestration via `TextContents::render`.

use std::sync::Arc;

use peniko::color::palette::css::{RED, TRANSPARENT, WHITE};
use peniko::color::{AlphaColor, Srgb};
use peniko::kurbo::{Affine, Point};
use text_atlas::{
    AtlasType, AxisAlignment, ContentContext, Entity, Error, ErrorKind, FragInfo, FrameInfo,
    GlyphVertex, IndexType, MinMagFilter, MipFilter, SlotState, TextContents, TextFrame,
    TextureId,
};

use crate::util::{
    ATLAS_SIZE, CELL_SIZE, FakeBuilder, GLYPH_BOUNDS, RecordingPass, TestContext, context, font,
    read_pod, text_frame,
};

/// Registers `frame` for this cycle and returns contents that draw it.
fn prepare(
    context: &mut TestContext,
    frame: &Arc<TextFrame>,
    position: Point,
    screen_transform: Affine,
    color: AlphaColor<Srgb>,
) -> TextContents {
    let mut contents = TextContents::new();
    contents.set_text_frame(frame.clone());
    contents.set_color(color);
    contents.set_position(position);
    contents.set_screen_transform(screen_transform);
    context.lazy_atlas_mut().add_text_frame(
        frame.clone(),
        position,
        screen_transform,
        contents.glyph_properties(),
    );
    contents
}

fn render(
    context: &mut TestContext,
    contents: &TextContents,
    transform: Affine,
) -> (Result<(), Error>, RecordingPass) {
    let mut pass = RecordingPass::new(256.0, 128.0);
    let entity = Entity {
        transform,
        clip_depth: 0,
    };
    let result = contents.render(context, &entity, &mut pass);
    (result, pass)
}

fn vertices(context: &TestContext, pass: &RecordingPass) -> Vec<GlyphVertex> {
    let view = pass.vertex_buffer.unwrap();
    read_pod(context.data_buffer().view_bytes(view))
}

fn build_count(context: &TestContext) -> usize {
    context.lazy_atlas().builder().unwrap().builds.len()
}

#[test]
fn render_transparent_color_is_noop() {
    let mut context = context();
    let frame = text_frame(font(1, AxisAlignment::None), &[1, 2], false);
    let mut contents = prepare(
        &mut context,
        &frame,
        Point::ZERO,
        Affine::IDENTITY,
        TRANSPARENT,
    );

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    assert!(result.is_ok());
    assert!(pass.is_untouched());
    assert!(context.data_buffer().is_empty());
    assert!(context.index_buffer().is_empty());

    // Fully faded by an enclosing layer.
    contents.set_color(RED);
    contents.set_inherited_opacity(0.0);
    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    assert!(result.is_ok());
    assert!(pass.is_untouched());
    assert!(context.data_buffer().is_empty());
    assert_eq!(build_count(&context), 0);
}

#[test]
fn render_rotation_samples_bilinear() {
    let mut context = context();
    let transform = Affine::rotate(0.3);
    let frame = text_frame(font(1, AxisAlignment::None), &[1, 2, 3], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, transform, RED);

    let (result, pass) = render(&mut context, &contents, transform);
    result.unwrap();
    let sampler = pass.sampler();
    assert_eq!(sampler.min_filter, MinMagFilter::Linear);
    assert_eq!(sampler.mag_filter, MinMagFilter::Linear);
    assert_eq!(sampler.mip_filter, MipFilter::Base);
}

#[test]
fn render_anisotropic_scale_samples_bilinear() {
    let mut context = context();
    let transform = Affine::scale_non_uniform(2.0, 1.0);
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, transform, RED);

    let (result, pass) = render(&mut context, &contents, transform);
    result.unwrap();
    assert_eq!(pass.sampler().min_filter, MinMagFilter::Linear);
    assert_eq!(pass.sampler().mag_filter, MinMagFilter::Linear);
}

#[test]
fn render_uniform_scale_samples_nearest() {
    let mut context = context();
    let transform = Affine::translate((0.5, 0.5)) * Affine::scale(2.0);
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, transform, RED);

    let (result, pass) = render(&mut context, &contents, transform);
    result.unwrap();
    assert_eq!(pass.sampler().min_filter, MinMagFilter::Nearest);
    assert_eq!(pass.sampler().mip_filter, MipFilter::Base);
}

#[test]
fn render_emits_pixel_snapped_quads() {
    let mut context = context();
    let position = Point::new(10.25, 20.0);
    let frame = text_frame(font(1, AxisAlignment::None), &[7, 8], false);
    let contents = prepare(&mut context, &frame, position, Affine::IDENTITY, RED);

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    assert_eq!(pass.draws, 1);
    assert_eq!(pass.labels, ["TextFrame"]);
    assert_eq!(pass.element_count, Some(12));

    let vertices = vertices(&context, &pass);
    let positions: Vec<[f32; 2]> = vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        [
            [11.0, 11.0],
            [19.0, 11.0],
            [11.0, 21.0],
            [19.0, 21.0],
            [21.0, 11.0],
            [29.0, 11.0],
            [21.0, 21.0],
            [29.0, 21.0],
        ]
    );
    let cell_uv = (CELL_SIZE / f64::from(ATLAS_SIZE)) as f32;
    for quad in vertices.chunks_exact(4) {
        assert_eq!(quad[1].uv[0] - quad[0].uv[0], cell_uv);
        assert_eq!(quad[2].uv[1] - quad[0].uv[1], cell_uv);
    }

    let (index_view, index_type) = pass.index_buffer.unwrap();
    assert_eq!(index_type, IndexType::U16);
    let indices: Vec<u16> = read_pod(context.index_buffer().view_bytes(index_view));
    assert_eq!(indices, [0, 1, 2, 1, 2, 3, 4, 5, 6, 5, 6, 7]);
}

#[test]
fn render_aligned_axes_round_with_eighth_pixel_bias() {
    let position = Point::new(10.6, 20.6);
    let cases = [
        (AxisAlignment::None, [12.0, 12.0]),
        (AxisAlignment::X, [11.0, 12.0]),
        (AxisAlignment::Y, [12.0, 11.0]),
        (AxisAlignment::All, [11.0, 11.0]),
    ];
    for (alignment, origin) in cases {
        let mut context = context();
        let frame = text_frame(font(1, alignment), &[1], false);
        let contents = prepare(&mut context, &frame, position, Affine::IDENTITY, RED);

        let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
        result.unwrap();
        let vertices = vertices(&context, &pass);
        assert_eq!(vertices[0].position, origin, "{alignment:?}");
        let far_corner = [
            origin[0] + GLYPH_BOUNDS.width() as f32,
            origin[1] + GLYPH_BOUNDS.height() as f32,
        ];
        assert_eq!(vertices[3].position, far_corner, "{alignment:?}");
    }
}

#[test]
fn render_scaled_quads_stay_on_pixel_grid() {
    let mut context = context();
    let transform = Affine::translate((10.3, 20.6)) * Affine::scale(1.5);
    let position = Point::new(4.2, 0.7);
    let frame = text_frame(font(1, AxisAlignment::X), &[1, 2, 3, 4, 5], false);
    let contents = prepare(&mut context, &frame, position, transform, RED);

    let (result, pass) = render(&mut context, &contents, transform);
    result.unwrap();
    assert_eq!(pass.element_count, Some(30));
    for vertex in vertices(&context, &pass) {
        assert_eq!(vertex.position[0].fract(), 0.0, "{vertex:?}");
        assert_eq!(vertex.position[1].fract(), 0.0, "{vertex:?}");
    }
}

#[test]
fn render_binds_uniforms() {
    let mut context = context();
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let mut contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);
    contents.set_inherited_opacity(0.5);

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();

    let frame_info =
        read_pod::<FrameInfo>(context.data_buffer().view_bytes(pass.frame_info.unwrap()))[0];
    assert_eq!(frame_info.project([0.0, 0.0]), [-1.0, 1.0]);
    assert_eq!(frame_info.project([256.0, 128.0]), [1.0, -1.0]);

    let frag_info =
        read_pod::<FragInfo>(context.data_buffer().view_bytes(pass.frag_info.unwrap()))[0];
    assert_eq!(frag_info.text_color, [0.5, 0.0, 0.0, 0.5], "premultiplied");
    assert_eq!(frag_info.use_text_color, 0.0);
    assert_eq!(frag_info.is_color_glyph, 0.0);
    assert_eq!(pass.atlas.map(|(texture, _)| texture), Some(TextureId(2)));
}

#[test]
fn render_color_frame_uses_color_atlas() {
    let mut context = context();
    let frame = text_frame(font(1, AxisAlignment::None), &[1], true);
    let mut contents = TextContents::new();
    contents.set_text_frame(frame.clone());
    contents.set_color(WHITE);
    contents.set_force_text_color(true);
    contents.set_text_properties(RED.with_alpha(0.5), None);
    context.lazy_atlas_mut().add_text_frame(
        frame,
        Point::ZERO,
        Affine::IDENTITY,
        contents.glyph_properties(),
    );

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    assert_eq!(
        pass.element_count,
        Some(6),
        "color glyph found under its key"
    );
    let frag_info =
        read_pod::<FragInfo>(context.data_buffer().view_bytes(pass.frag_info.unwrap()))[0];
    assert_eq!(frag_info.use_text_color, 1.0);
    assert_eq!(frag_info.is_color_glyph, 1.0);
    assert_eq!(pass.atlas.map(|(texture, _)| texture), Some(TextureId(3)));
    assert_eq!(
        context.lazy_atlas().slot_state(AtlasType::AlphaBitmap),
        SlotState::Empty
    );
}

#[test]
fn render_without_builder_reports_unavailable_atlas() {
    let mut context: TestContext = ContentContext::new(None, ());
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AtlasUnavailable);
    assert_eq!(err.atlas_type(), Some(AtlasType::AlphaBitmap));
    assert!(pass.is_untouched());
}

#[test]
fn render_failed_build_is_attempted_once() {
    let mut context: TestContext = ContentContext::new(
        Some(FakeBuilder {
            fail: true,
            ..FakeBuilder::default()
        }),
        (),
    );
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);

    for _ in 0..2 {
        let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::AtlasUnavailable);
        assert_eq!(pass.draws, 0);
    }
    assert_eq!(build_count(&context), 1);
}

#[test]
fn render_draw_failure_propagates() {
    let mut context = context();
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);

    let mut pass = RecordingPass::new(256.0, 128.0);
    pass.fail_draw = true;
    let err = contents
        .render(&mut context, &Entity::default(), &mut pass)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DrawFailed);
}

#[test]
fn render_skipped_glyphs_leave_gaps() {
    let mut context: TestContext = ContentContext::new(
        Some(FakeBuilder {
            placeholder_glyphs: vec![2],
            ..FakeBuilder::default()
        }),
        (),
    );
    let frame = text_frame(font(1, AxisAlignment::None), &[1, 2, 3], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    assert_eq!(pass.draws, 1, "the frame still renders");
    assert_eq!(pass.element_count, Some(12));
    let vertices = vertices(&context, &pass);
    assert_eq!(vertices.len(), 12, "buffers are sized for every glyph");
    assert_eq!(
        vertices[4].position,
        [21.0, -9.0],
        "glyph 3 follows glyph 1"
    );
}

#[test]
fn render_unregistered_frame_draws_nothing() {
    let mut context = context();
    let registered = text_frame(font(1, AxisAlignment::None), &[1], false);
    prepare(
        &mut context,
        &registered,
        Point::ZERO,
        Affine::IDENTITY,
        RED,
    );

    let mut contents = TextContents::new();
    contents.set_text_frame(text_frame(font(2, AxisAlignment::None), &[1], false));
    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    assert_eq!(pass.element_count, Some(0));
}

#[test]
fn render_large_frame_uses_wide_indices() {
    let mut context = context();
    let glyphs = vec![1; 16_385];
    let frame = text_frame(font(1, AxisAlignment::None), &glyphs, false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);

    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    let (index_view, index_type) = pass.index_buffer.unwrap();
    assert_eq!(index_type, IndexType::U32);
    let indices: Vec<u32> = read_pod(context.index_buffer().view_bytes(index_view));
    assert_eq!(indices.len(), 16_385 * 6);
    assert_eq!(indices[indices.len() - 1], 16_385 * 4 - 1);
}

#[test]
fn render_end_cycle_resets_everything() {
    let mut context = context();
    let frame = text_frame(font(1, AxisAlignment::None), &[1], false);
    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);
    render(&mut context, &contents, Affine::IDENTITY).0.unwrap();
    assert!(!context.data_buffer().is_empty());

    context.end_cycle();
    assert!(context.data_buffer().is_empty());
    assert!(context.index_buffer().is_empty());
    assert_eq!(
        context.lazy_atlas().slot_state(AtlasType::AlphaBitmap),
        SlotState::Empty
    );

    let contents = prepare(&mut context, &frame, Point::ZERO, Affine::IDENTITY, RED);
    let (result, pass) = render(&mut context, &contents, Affine::IDENTITY);
    result.unwrap();
    assert_eq!(pass.atlas.map(|(texture, _)| texture), Some(TextureId(4)));
    assert_eq!(build_count(&context), 2);
}
