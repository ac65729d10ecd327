// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred, per-cycle realization of glyph atlases.

use alloc::sync::Arc;
use core::fmt::{Debug, Formatter};

use super::slot::AtlasSlot;
use crate::kurbo::{Affine, Point};
use crate::{
    AtlasType, Error, GlyphAtlas, GlyphAtlasBuilder, GlyphProperties, HostBuffer, RenderableText,
    SlotState, TextFrame,
};

/// Collects the text drawn during a rendering cycle and realizes one glyph
/// atlas per [`AtlasType`] on first use.
///
/// The protocol for one cycle is:
///
/// 1. [`add_text_frame`](Self::add_text_frame) for every frame drawn.
/// 2. [`create_or_get_glyph_atlas`](Self::create_or_get_glyph_atlas) from each
///    draw; the first call per type builds the atlas, later calls return it.
/// 3. [`reset_text_frames`](Self::reset_text_frames) once every draw is done.
pub struct LazyGlyphAtlas<B: GlyphAtlasBuilder> {
    builder: Option<B>,
    slots: [AtlasSlot<B::AtlasContext>; 2],
}

impl<B: GlyphAtlasBuilder> LazyGlyphAtlas<B> {
    /// Creates a cache around `builder`.
    ///
    /// Without a builder every atlas request fails (and is logged), so text is
    /// skipped rather than rendered.
    pub fn new(builder: Option<B>) -> Self {
        let slots = AtlasType::ALL.map(|atlas_type| {
            let context = builder
                .as_ref()
                .map(|builder| builder.create_atlas_context(atlas_type));
            AtlasSlot::new(atlas_type, context)
        });
        Self { builder, slots }
    }

    /// The atlas building backend.
    #[inline]
    pub fn builder(&self) -> Option<&B> {
        self.builder.as_ref()
    }

    /// Mutable access to the atlas building backend.
    #[inline]
    pub fn builder_mut(&mut self) -> Option<&mut B> {
        self.builder.as_mut()
    }

    /// Lifecycle state of the slot for `atlas_type`.
    #[inline]
    pub fn slot_state(&self, atlas_type: AtlasType) -> SlotState {
        self.slots[atlas_type.index()].state()
    }

    /// Frames queued for `atlas_type` this cycle.
    #[inline]
    pub fn renderable_frames(&self, atlas_type: AtlasType) -> &[RenderableText] {
        self.slots[atlas_type.index()].renderable_frames()
    }

    /// Registers a frame drawn at `position` under `transform`.
    ///
    /// # Panics
    ///
    /// If the atlas for the frame's type was already realized this cycle. This
    /// is a caller bug: all registration must precede the first draw.
    pub fn add_text_frame(
        &mut self,
        frame: Arc<TextFrame>,
        position: Point,
        transform: Affine,
        properties: Option<GlyphProperties>,
    ) {
        if let Err(err) = self.try_add_text_frame(frame, position, transform, properties) {
            panic!("{err}");
        }
    }

    /// Like [`add_text_frame`](Self::add_text_frame), but reports the illegal
    /// transition instead of panicking.
    pub fn try_add_text_frame(
        &mut self,
        frame: Arc<TextFrame>,
        position: Point,
        transform: Affine,
        properties: Option<GlyphProperties>,
    ) -> Result<(), Error> {
        let slot = &mut self.slots[frame.atlas_type().index()];
        slot.push(RenderableText {
            text_frame: frame,
            origin_transform: transform * Affine::translate(position.to_vec2()),
            properties,
        })
    }

    /// Returns the atlas for `atlas_type`, building it on the first call of
    /// the cycle.
    ///
    /// Returns `None`, after logging the reason, when no builder is
    /// configured, the builder is invalid, or the build failed. The builder is
    /// invoked at most once per type and cycle either way.
    pub fn create_or_get_glyph_atlas(
        &mut self,
        context: &B::Context,
        host_buffer: &mut HostBuffer,
        atlas_type: AtlasType,
    ) -> Option<&GlyphAtlas> {
        let Self { builder, slots } = self;
        let slot = &mut slots[atlas_type.index()];
        if slot.is_settled() {
            return slot.atlas();
        }

        let Some(builder) = builder.as_mut() else {
            log::error!("Unable to render text because a glyph atlas builder has not been set.");
            slot.settle(None);
            return None;
        };
        if !builder.is_valid() {
            log::error!("Unable to render text because the glyph atlas builder is invalid.");
            slot.settle(None);
            return None;
        }

        let (frames, atlas_context) = slot.build_inputs();
        let built = match atlas_context {
            Some(atlas_context) => {
                builder.build_glyph_atlas(context, atlas_type, host_buffer, atlas_context, frames)
            }
            None => None,
        };
        log::debug!(
            "Built {atlas_type:?} glyph atlas from {} frames: {}",
            frames.len(),
            if built.is_some() { "ok" } else { "failed" }
        );
        slot.settle(built);

        let atlas = slot.atlas();
        if atlas.is_none() {
            log::error!("Could not create valid {atlas_type:?} glyph atlas.");
        }
        atlas
    }

    /// Drops every queued frame and both realized atlases.
    ///
    /// Call exactly once per rendering cycle, after all draws of the cycle.
    pub fn reset_text_frames(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
    }
}

impl<B: GlyphAtlasBuilder> Debug for LazyGlyphAtlas<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyGlyphAtlas")
            .field("builder", &self.builder.is_some())
            .field("slots", &self.slots)
            .finish()
    }
}
