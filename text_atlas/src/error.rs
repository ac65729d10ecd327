// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::atlas::AtlasType;

/// Error type for recoverable text rendering failures and checked contract violations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the [`AtlasType`] involved, when
/// the failure is tied to one of the two atlases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The atlas the failure relates to, if any.
    atlas_type: Option<AtlasType>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The atlas this error relates to, if any.
    pub fn atlas_type(&self) -> Option<AtlasType> {
        self.atlas_type
    }

    pub(crate) fn no_path_creator() -> Self {
        Self {
            kind: ErrorKind::NoPathCreator,
            atlas_type: None,
        }
    }

    /// An error reported by a [`PathCreator`](crate::PathCreator) that could not
    /// produce an outline.
    pub fn path_creation_failed() -> Self {
        Self {
            kind: ErrorKind::PathCreationFailed,
            atlas_type: None,
        }
    }

    pub(crate) fn register_after_realize(atlas_type: AtlasType) -> Self {
        Self {
            kind: ErrorKind::RegisterAfterRealize,
            atlas_type: Some(atlas_type),
        }
    }

    pub(crate) fn atlas_unavailable(atlas_type: AtlasType) -> Self {
        Self {
            kind: ErrorKind::AtlasUnavailable,
            atlas_type: Some(atlas_type),
        }
    }

    /// An error reported by a [`RenderPass`](crate::RenderPass) that failed to
    /// submit its draw.
    pub fn draw_failed() -> Self {
        Self {
            kind: ErrorKind::DrawFailed,
            atlas_type: None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::NoPathCreator => write!(f, "no path creator specified"),
            ErrorKind::PathCreationFailed => write!(f, "path creator failed to produce an outline"),
            ErrorKind::RegisterAfterRealize => match self.atlas_type {
                Some(ty) => write!(
                    f,
                    "text frame registered after the {ty:?} glyph atlas was realized this cycle"
                ),
                None => write!(f, "text frame registered after glyph atlas realization"),
            },
            ErrorKind::AtlasUnavailable => match self.atlas_type {
                Some(ty) => write!(f, "no valid {ty:?} glyph atlas for this cycle"),
                None => write!(f, "no valid glyph atlas for this cycle"),
            },
            ErrorKind::DrawFailed => write!(f, "draw submission failed"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// [`TextFrame::path`](crate::TextFrame::path) was called on a frame built
    /// without an outline producer.
    NoPathCreator,

    /// The frame's outline producer ran but failed.
    PathCreationFailed,

    /// A text frame was registered with an atlas slot that was already realized
    /// in the current cycle.
    RegisterAfterRealize,

    /// The glyph atlas for the frame's type could not be realized this cycle.
    AtlasUnavailable,

    /// The render pass rejected the draw.
    DrawFailed,
}
