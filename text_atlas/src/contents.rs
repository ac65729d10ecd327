// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-draw text rendering.

use alloc::sync::Arc;
use alloc::vec::Vec;
use bytemuck::{Pod, Zeroable};

use crate::color::{AlphaColor, Srgb, palette::css::BLACK};
use crate::kurbo::{Affine, Point, Rect, Size};
use crate::math::{basis_lengths, is_translation_scale_only};
use crate::{
    AtlasType, Error, GlyphAtlasBuilder, GlyphProperties, GlyphVertex, HostBuffer, IndexType,
    LazyGlyphAtlas, MinMagFilter, MipFilter, RenderPass, SamplerDescriptor, StrokeParameters,
    TextFrame, compute_vertex_data, write_quad_index_bytes,
};

/// Alignment of uniform blocks in the data buffer.
const UNIFORM_ALIGNMENT: usize = 256;

/// Depth step between consecutive clip depths.
const DEPTH_EPSILON: f32 = 1.0 / 262_144.0;

/// Largest vertex count addressable with `u16` indices.
const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

/// Where and how deep in the clip stack a draw happens.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entity {
    /// Transform from the frame's space to the render target, in pixels.
    pub transform: Affine,
    /// Clip stack depth, encoded into the vertex depth.
    pub clip_depth: u32,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clip_depth: 0,
        }
    }
}

/// Tunables of the atlas sampler policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingOptions {
    /// Ratio of the larger to the smaller axis scale above which a
    /// translation and scale transform is sampled bilinearly.
    pub anisotropic_threshold: f64,
    /// Lower bound for the smaller axis scale when computing that ratio.
    pub min_scale_for_ratio: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            anisotropic_threshold: 1.15,
            min_scale_for_ratio: 0.001,
        }
    }
}

/// Chooses how the atlas is sampled for a draw under `entity_transform`.
///
/// Grid aligned glyphs are sampled with nearest neighbor filtering. Strongly
/// anisotropic scales minify one axis and rotated or sheared glyphs are off
/// the pixel grid, so both use bilinear filtering. Atlases have no mip chain.
pub fn glyph_atlas_sampler(
    entity_transform: Affine,
    options: &SamplingOptions,
) -> SamplerDescriptor {
    let filter = if is_translation_scale_only(entity_transform) {
        let (sx, sy) = basis_lengths(entity_transform);
        let ratio = if sx > sy {
            sx / sy.max(options.min_scale_for_ratio)
        } else {
            sy / sx.max(options.min_scale_for_ratio)
        };
        if ratio > options.anisotropic_threshold {
            MinMagFilter::Linear
        } else {
            MinMagFilter::Nearest
        }
    } else {
        MinMagFilter::Linear
    };
    SamplerDescriptor {
        min_filter: filter,
        mag_filter: filter,
        mip_filter: MipFilter::Base,
    }
}

/// Vertex stage uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameInfo {
    /// Column-major projection from render target pixels to clip space.
    pub mvp: [f32; 16],
}

impl FrameInfo {
    /// Orthographic projection of a render target of `size`, with the depth
    /// of `clip_depth`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "uniforms are single precision on the GPU"
    )]
    pub fn new(size: Size, clip_depth: u32) -> Self {
        let depth = clip_depth as f32 * DEPTH_EPSILON;
        let mut mvp = [0.0; 16];
        mvp[0] = (2.0 / size.width) as f32;
        mvp[5] = (-2.0 / size.height) as f32;
        mvp[12] = -1.0;
        mvp[13] = 1.0;
        mvp[14] = 0.5 * DEPTH_EPSILON + depth;
        mvp[15] = 1.0;
        Self { mvp }
    }

    /// Projects a render target position to normalized device coordinates.
    pub fn project(&self, point: [f32; 2]) -> [f32; 2] {
        [
            self.mvp[0] * point[0] + self.mvp[4] * point[1] + self.mvp[12],
            self.mvp[1] * point[0] + self.mvp[5] * point[1] + self.mvp[13],
        ]
    }
}

/// Fragment stage uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FragInfo {
    /// Premultiplied paint color.
    pub text_color: [f32; 4],
    /// 1.0 to tint color glyphs with `text_color`, 0.0 otherwise.
    pub use_text_color: f32,
    /// 1.0 when sampling a color atlas, 0.0 for an alpha atlas.
    pub is_color_glyph: f32,
    _padding: [f32; 2],
}

impl FragInfo {
    /// Packs the fragment uniforms.
    pub fn new(text_color: [f32; 4], use_text_color: bool, is_color_glyph: bool) -> Self {
        Self {
            text_color,
            use_text_color: if use_text_color { 1.0 } else { 0.0 },
            is_color_glyph: if is_color_glyph { 1.0 } else { 0.0 },
            _padding: [0.0; 2],
        }
    }
}

/// Everything shared by the draws of one rendering cycle: the lazy atlas,
/// the GPU context atlases are built with, and the transient buffers.
pub struct ContentContext<B: GlyphAtlasBuilder> {
    lazy_atlas: LazyGlyphAtlas<B>,
    gpu_context: B::Context,
    data_buffer: HostBuffer,
    index_buffer: HostBuffer,
    vertex_scratch: Vec<GlyphVertex>,
    sampling: SamplingOptions,
}

impl<B: GlyphAtlasBuilder> ContentContext<B> {
    /// Creates a context. Without a builder, text draws fail with
    /// [`ErrorKind::AtlasUnavailable`](crate::ErrorKind::AtlasUnavailable).
    pub fn new(builder: Option<B>, gpu_context: B::Context) -> Self {
        Self {
            lazy_atlas: LazyGlyphAtlas::new(builder),
            gpu_context,
            data_buffer: HostBuffer::new(),
            index_buffer: HostBuffer::new(),
            vertex_scratch: Vec::new(),
            sampling: SamplingOptions::default(),
        }
    }

    /// The lazy atlas text frames are registered with.
    #[inline]
    pub fn lazy_atlas(&self) -> &LazyGlyphAtlas<B> {
        &self.lazy_atlas
    }

    /// Mutable access to the lazy atlas, for registering text frames.
    #[inline]
    pub fn lazy_atlas_mut(&mut self) -> &mut LazyGlyphAtlas<B> {
        &mut self.lazy_atlas
    }

    /// The GPU context passed to the atlas builder.
    #[inline]
    pub fn gpu_context(&self) -> &B::Context {
        &self.gpu_context
    }

    /// Transient uniforms, vertices and atlas uploads.
    #[inline]
    pub fn data_buffer(&self) -> &HostBuffer {
        &self.data_buffer
    }

    /// Transient indices.
    #[inline]
    pub fn index_buffer(&self) -> &HostBuffer {
        &self.index_buffer
    }

    /// The sampler policy tunables.
    #[inline]
    pub fn sampling_options(&self) -> &SamplingOptions {
        &self.sampling
    }

    /// Replaces the sampler policy tunables.
    pub fn set_sampling_options(&mut self, sampling: SamplingOptions) {
        self.sampling = sampling;
    }

    /// Ends the rendering cycle: drops queued frames and realized atlases and
    /// releases both transient buffers.
    pub fn end_cycle(&mut self) {
        log::debug!(
            "Ending text cycle: {} data bytes, {} index bytes",
            self.data_buffer.len(),
            self.index_buffer.len()
        );
        self.lazy_atlas.reset_text_frames();
        self.data_buffer.reset();
        self.index_buffer.reset();
    }
}

impl<B: GlyphAtlasBuilder> core::fmt::Debug for ContentContext<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentContext")
            .field("lazy_atlas", &self.lazy_atlas)
            .field("data_buffer", &self.data_buffer.len())
            .field("index_buffer", &self.index_buffer.len())
            .field("sampling", &self.sampling)
            .finish_non_exhaustive()
    }
}

/// A text frame drawn at a position with a paint.
#[derive(Clone, Debug)]
pub struct TextContents {
    frame: Option<Arc<TextFrame>>,
    color: AlphaColor<Srgb>,
    inherited_opacity: f32,
    position: Point,
    screen_transform: Affine,
    force_text_color: bool,
    properties: GlyphProperties,
}

impl Default for TextContents {
    fn default() -> Self {
        Self::new()
    }
}

impl TextContents {
    /// Creates contents with no frame, painted opaque black.
    pub fn new() -> Self {
        Self {
            frame: None,
            color: BLACK,
            inherited_opacity: 1.0,
            position: Point::ZERO,
            screen_transform: Affine::IDENTITY,
            force_text_color: false,
            properties: GlyphProperties::default(),
        }
    }

    /// Sets the frame to draw.
    pub fn set_text_frame(&mut self, frame: Arc<TextFrame>) {
        self.frame = Some(frame);
    }

    /// The frame to draw.
    pub fn text_frame(&self) -> Option<&Arc<TextFrame>> {
        self.frame.as_ref()
    }

    /// Sets the paint color.
    pub fn set_color(&mut self, color: AlphaColor<Srgb>) {
        self.color = color;
    }

    /// Sets the opacity inherited from enclosing layers.
    pub fn set_inherited_opacity(&mut self, opacity: f32) {
        self.inherited_opacity = opacity;
    }

    /// Sets the frame origin within the entity's space.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Sets the true screen transform, used for atlas lookups. Differs from the
    /// entity transform when drawing into an offscreen target.
    pub fn set_screen_transform(&mut self, transform: Affine) {
        self.screen_transform = transform;
    }

    /// Tints color glyphs with the paint color instead of their own colors.
    pub fn set_force_text_color(&mut self, force: bool) {
        self.force_text_color = force;
    }

    /// Sets the paint properties that affect rasterization.
    ///
    /// The color only matters for color-bitmap frames and is kept opaque,
    /// since alpha is applied when drawing. Call after
    /// [`set_text_frame`](Self::set_text_frame).
    pub fn set_text_properties(
        &mut self,
        color: AlphaColor<Srgb>,
        stroke: Option<StrokeParameters>,
    ) {
        if self.frame.as_ref().is_some_and(|frame| frame.has_color()) {
            self.properties.color = color.with_alpha(1.0);
        }
        self.properties.stroke = stroke;
    }

    /// The paint color with the inherited opacity applied.
    pub fn color(&self) -> AlphaColor<Srgb> {
        self.color.multiply_alpha(self.inherited_opacity)
    }

    /// The properties that are part of the atlas key, present only for
    /// stroked text and color frames.
    pub fn glyph_properties(&self) -> Option<GlyphProperties> {
        let has_color = self.frame.as_ref().is_some_and(|frame| frame.has_color());
        (self.properties.stroke.is_some() || has_color).then_some(self.properties)
    }

    /// The area of the render target the draw may touch.
    pub fn coverage(&self, entity: &Entity) -> Option<Rect> {
        let frame = self.frame.as_ref()?;
        let transform = entity.transform * Affine::translate(self.position.to_vec2());
        Some(transform.transform_rect_bbox(frame.bounds()))
    }

    /// Draws the frame.
    ///
    /// Succeeds without drawing when the resolved color is fully transparent
    /// or no frame is set. Fails when the frame's atlas could not be realized
    /// or the pass rejects the draw.
    pub fn render<B: GlyphAtlasBuilder>(
        &self,
        renderer: &mut ContentContext<B>,
        entity: &Entity,
        pass: &mut impl RenderPass,
    ) -> Result<(), Error> {
        let color = self.color();
        if color.components[3] <= 0.0 {
            return Ok(());
        }
        let Some(frame) = self.frame.as_deref() else {
            return Ok(());
        };

        let ContentContext {
            lazy_atlas,
            gpu_context,
            data_buffer,
            index_buffer,
            vertex_scratch,
            sampling,
        } = renderer;
        let atlas_type = frame.atlas_type();
        let Some(atlas) = lazy_atlas.create_or_get_glyph_atlas(gpu_context, data_buffer, atlas_type)
        else {
            log::error!("Cannot render glyphs without prepared atlas.");
            return Err(Error::atlas_unavailable(atlas_type));
        };
        let Some(texture) = atlas.texture().copied() else {
            return Err(Error::atlas_unavailable(atlas_type));
        };

        pass.set_command_label("TextFrame");

        let frame_info = FrameInfo::new(pass.render_target_size(), entity.clip_depth);
        pass.bind_frame_info(data_buffer.emplace_slice(&[frame_info], UNIFORM_ALIGNMENT));

        let frag_info = FragInfo::new(
            color.premultiply().components,
            self.force_text_color,
            atlas_type == AtlasType::ColorBitmap,
        );
        pass.bind_frag_info(data_buffer.emplace_slice(&[frag_info], UNIFORM_ALIGNMENT));

        let sampler = glyph_atlas_sampler(entity.transform, sampling);
        log::trace!(
            "Glyph atlas sampler for {:?}: {sampler:?}",
            entity.transform
        );
        pass.bind_glyph_atlas(texture.id, &sampler);

        let glyph_count = frame.glyph_count();
        let vertex_count = glyph_count * 4;
        let index_count = glyph_count * 6;

        vertex_scratch.clear();
        vertex_scratch.resize(vertex_count, GlyphVertex::default());
        let written = compute_vertex_data(
            vertex_scratch,
            entity.transform,
            frame,
            self.position,
            self.screen_transform,
            self.glyph_properties(),
            atlas,
        );
        let vertex_view = data_buffer.emplace_slice(vertex_scratch, align_of::<GlyphVertex>());

        let index_type = if vertex_count <= MAX_U16_VERTICES {
            IndexType::U16
        } else {
            IndexType::U32
        };
        let index_size = index_type.size();
        let index_view = index_buffer.emplace(index_count * index_size, index_size, |bytes| {
            write_quad_index_bytes(bytes, index_type);
        });

        pass.set_vertex_buffer(vertex_view);
        pass.set_index_buffer(index_view, index_type);
        pass.set_element_count(written * 6);
        pass.draw()
    }
}
