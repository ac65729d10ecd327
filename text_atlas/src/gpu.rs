// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The narrow GPU resource layer text rendering talks to.

use alloc::vec::Vec;
use bytemuck::Pod;

use crate::Error;
use crate::kurbo::Size;

/// Opaque handle of a texture owned by the GPU resource layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A byte range reserved in a [`HostBuffer`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferView {
    /// Offset of the first byte.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl BufferView {
    /// The byte range covered by this view.
    #[inline]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// An append-only staging arena for one rendering cycle.
///
/// Every [`emplace`](Self::emplace) reserves a fresh, aligned and disjoint
/// byte range. Nothing is released until [`reset`](Self::reset).
#[derive(Clone, Debug, Default)]
pub struct HostBuffer {
    data: Vec<u8>,
    emplace_count: usize,
}

impl HostBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `len` zeroed bytes starting at a multiple of `align` and lets
    /// `write` fill them.
    ///
    /// # Panics
    ///
    /// If `align` is not a power of two.
    pub fn emplace(
        &mut self,
        len: usize,
        align: usize,
        write: impl FnOnce(&mut [u8]),
    ) -> BufferView {
        assert!(align.is_power_of_two(), "alignment must be a power of two");
        let offset = self.data.len().next_multiple_of(align);
        self.data.resize(offset + len, 0);
        write(&mut self.data[offset..]);
        self.emplace_count += 1;
        BufferView { offset, len }
    }

    /// Copies `items` into the buffer at `align`, which is raised to the
    /// alignment of `T` if smaller.
    pub fn emplace_slice<T: Pod>(&mut self, items: &[T], align: usize) -> BufferView {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        self.emplace(
            bytes.len(),
            align.max(align_of::<T>()),
            |dst| dst.copy_from_slice(bytes),
        )
    }

    /// The bytes of a previously reserved range.
    #[inline]
    pub fn view_bytes(&self, view: BufferView) -> &[u8] {
        &self.data[view.range()]
    }

    /// Everything written this cycle, including alignment padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Total bytes in use, including alignment padding.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing was written this cycle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of reservations made this cycle.
    #[inline]
    pub fn emplace_count(&self) -> usize {
        self.emplace_count
    }

    /// Releases every reservation. The allocation is kept for reuse.
    pub fn reset(&mut self) {
        self.data.clear();
        self.emplace_count = 0;
    }
}

/// Width of the indices in an index buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexType {
    /// `u16` indices.
    U16,
    /// `u32` indices.
    U32,
}

impl IndexType {
    /// Size of one index in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// Texture minification and magnification filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinMagFilter {
    /// Nearest neighbor. Pixel exact for grid aligned glyphs.
    #[default]
    Nearest,
    /// Bilinear interpolation.
    Linear,
}

/// Filter between mip levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MipFilter {
    /// Sample the base level only.
    #[default]
    Base,
    /// Nearest mip level.
    Nearest,
    /// Interpolate between mip levels.
    Linear,
}

/// How the atlas texture is sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SamplerDescriptor {
    /// Minification filter.
    pub min_filter: MinMagFilter,
    /// Magnification filter.
    pub mag_filter: MinMagFilter,
    /// Mip filter.
    pub mip_filter: MipFilter,
}

/// The draw submission seam: a pass targeting one render target.
///
/// Implemented by the host on top of its graphics API. All buffer views refer
/// to the [`HostBuffer`]s of the same [`ContentContext`](crate::ContentContext).
pub trait RenderPass {
    /// Size of the render target in pixels.
    fn render_target_size(&self) -> Size;

    /// Labels the next draw for debugging tools.
    fn set_command_label(&mut self, _label: &str) {}

    /// Binds the vertex stage uniforms, a [`FrameInfo`](crate::FrameInfo) in
    /// the data buffer.
    fn bind_frame_info(&mut self, view: BufferView);

    /// Binds the fragment stage uniforms, a [`FragInfo`](crate::FragInfo) in
    /// the data buffer.
    fn bind_frag_info(&mut self, view: BufferView);

    /// Binds the atlas texture with the given sampler.
    fn bind_glyph_atlas(&mut self, texture: TextureId, sampler: &SamplerDescriptor);

    /// Sets the vertex buffer, [`GlyphVertex`](crate::GlyphVertex)es in the
    /// data buffer.
    fn set_vertex_buffer(&mut self, view: BufferView);

    /// Sets the index buffer, in the index buffer.
    fn set_index_buffer(&mut self, view: BufferView, index_type: IndexType);

    /// Sets the number of indices to draw.
    fn set_element_count(&mut self, count: usize);

    /// Submits the draw.
    fn draw(&mut self) -> Result<(), Error>;
}
