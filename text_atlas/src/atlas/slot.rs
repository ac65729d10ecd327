// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per atlas type collection state.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::{AtlasType, Error, GlyphAtlas, RenderableText};

/// Lifecycle state of one atlas type of a
/// [`LazyGlyphAtlas`](crate::LazyGlyphAtlas) within one rendering cycle.
///
/// ```text
/// Empty -> Collecting -> Realized | Unavailable -> (reset) -> Empty
///   \___________________/^
/// ```
///
/// Realization may also happen straight from `Empty`, yielding an atlas with
/// no collected frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing registered yet this cycle.
    Empty,
    /// Frames are being registered.
    Collecting,
    /// The atlas was built and is valid.
    Realized,
    /// Realization was attempted and failed; no atlas this cycle.
    Unavailable,
}

enum Status {
    Empty,
    Collecting,
    Realized(GlyphAtlas),
    Unavailable,
}

/// One cache cell of [`LazyGlyphAtlas`](crate::LazyGlyphAtlas): the frames
/// queued for an atlas type, the builder's persistent context, and the
/// realized atlas.
pub(crate) struct AtlasSlot<C> {
    atlas_type: AtlasType,
    renderable_frames: Vec<RenderableText>,
    context: Option<C>,
    status: Status,
}

impl<C> AtlasSlot<C> {
    /// Creates an empty slot.
    pub(crate) fn new(atlas_type: AtlasType, context: Option<C>) -> Self {
        Self {
            atlas_type,
            renderable_frames: Vec::new(),
            context,
            status: Status::Empty,
        }
    }

    /// Current lifecycle state.
    pub(crate) fn state(&self) -> SlotState {
        match self.status {
            Status::Empty => SlotState::Empty,
            Status::Collecting => SlotState::Collecting,
            Status::Realized(_) => SlotState::Realized,
            Status::Unavailable => SlotState::Unavailable,
        }
    }

    /// Whether realization already happened (successfully or not) this cycle.
    #[inline]
    pub(crate) fn is_settled(&self) -> bool {
        matches!(self.status, Status::Realized(_) | Status::Unavailable)
    }

    /// Moves the slot into [`SlotState::Collecting`].
    ///
    /// Fails with [`ErrorKind::RegisterAfterRealize`](crate::ErrorKind::RegisterAfterRealize)
    /// once the slot has been realized this cycle, since a built atlas layout
    /// cannot be amended.
    pub(crate) fn begin_collecting(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Empty | Status::Collecting => {
                self.status = Status::Collecting;
                Ok(())
            }
            Status::Realized(_) | Status::Unavailable => {
                Err(Error::register_after_realize(self.atlas_type))
            }
        }
    }

    /// Queues a frame for the next realization.
    pub(crate) fn push(&mut self, text: RenderableText) -> Result<(), Error> {
        self.begin_collecting()?;
        self.renderable_frames.push(text);
        Ok(())
    }

    /// The frames queued this cycle.
    #[inline]
    pub(crate) fn renderable_frames(&self) -> &[RenderableText] {
        &self.renderable_frames
    }

    /// The realized atlas, if realization succeeded this cycle.
    pub(crate) fn atlas(&self) -> Option<&GlyphAtlas> {
        match &self.status {
            Status::Realized(atlas) => Some(atlas),
            _ => None,
        }
    }

    /// Settles the slot with the outcome of a realization attempt.
    ///
    /// An atlas that fails its own validity check is recorded as unavailable.
    pub(crate) fn settle(&mut self, atlas: Option<GlyphAtlas>) {
        debug_assert!(!self.is_settled(), "slot realized twice in one cycle");
        self.status = match atlas {
            Some(atlas) if atlas.is_valid() => Status::Realized(atlas),
            _ => Status::Unavailable,
        };
    }

    /// Splits the slot into the queued frames and the builder context, as
    /// needed to invoke the builder.
    pub(crate) fn build_inputs(&mut self) -> (&[RenderableText], Option<&mut C>) {
        (&self.renderable_frames, self.context.as_mut())
    }

    /// Clears queued frames and drops the realized atlas. The builder context
    /// is kept for the next cycle.
    pub(crate) fn reset(&mut self) {
        self.renderable_frames.clear();
        self.status = Status::Empty;
    }
}

impl<C> Debug for AtlasSlot<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtlasSlot")
            .field("atlas_type", &self.atlas_type)
            .field("renderable_frames", &self.renderable_frames.len())
            .field("context", &self.context.is_some())
            .field("status", &self.state())
            .finish()
    }
}
