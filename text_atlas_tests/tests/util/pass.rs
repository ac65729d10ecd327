// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A render pass that records what it is asked to do.

use peniko::kurbo::Size;
use text_atlas::{BufferView, Error, IndexType, RenderPass, SamplerDescriptor, TextureId};

#[derive(Debug)]
pub(crate) struct RecordingPass {
    pub(crate) size: Size,
    /// Reject every draw.
    pub(crate) fail_draw: bool,
    pub(crate) labels: Vec<String>,
    pub(crate) frame_info: Option<BufferView>,
    pub(crate) frag_info: Option<BufferView>,
    pub(crate) atlas: Option<(TextureId, SamplerDescriptor)>,
    pub(crate) vertex_buffer: Option<BufferView>,
    pub(crate) index_buffer: Option<(BufferView, IndexType)>,
    pub(crate) element_count: Option<usize>,
    pub(crate) draws: usize,
}

impl RecordingPass {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            fail_draw: false,
            labels: Vec::new(),
            frame_info: None,
            frag_info: None,
            atlas: None,
            vertex_buffer: None,
            index_buffer: None,
            element_count: None,
            draws: 0,
        }
    }

    /// Whether anything at all was bound or submitted.
    pub(crate) fn is_untouched(&self) -> bool {
        self.labels.is_empty()
            && self.frame_info.is_none()
            && self.frag_info.is_none()
            && self.atlas.is_none()
            && self.vertex_buffer.is_none()
            && self.index_buffer.is_none()
            && self.element_count.is_none()
            && self.draws == 0
    }

    pub(crate) fn sampler(&self) -> SamplerDescriptor {
        self.atlas.expect("no atlas bound").1
    }
}

impl RenderPass for RecordingPass {
    fn render_target_size(&self) -> Size {
        self.size
    }

    fn set_command_label(&mut self, label: &str) {
        self.labels.push(label.to_owned());
    }

    fn bind_frame_info(&mut self, view: BufferView) {
        self.frame_info = Some(view);
    }

    fn bind_frag_info(&mut self, view: BufferView) {
        self.frag_info = Some(view);
    }

    fn bind_glyph_atlas(&mut self, texture: TextureId, sampler: &SamplerDescriptor) {
        self.atlas = Some((texture, *sampler));
    }

    fn set_vertex_buffer(&mut self, view: BufferView) {
        self.vertex_buffer = Some(view);
    }

    fn set_index_buffer(&mut self, view: BufferView, index_type: IndexType) {
        self.index_buffer = Some((view, index_type));
    }

    fn set_element_count(&mut self, count: usize) {
        self.element_count = Some(count);
    }

    fn draw(&mut self) -> Result<(), Error> {
        if self.fail_draw {
            return Err(Error::draw_failed());
        }
        self.draws += 1;
        Ok(())
    }
}
