// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaped text as consumed by the atlas and the vertex generator.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use smallvec::SmallVec;

use crate::atlas::AtlasType;
use crate::kurbo::{Affine, BezPath, Point, Rect};
use crate::{Error, Font, GlyphProperties};

/// Lazily produces the outline of a whole [`TextFrame`].
pub type PathCreator = Box<dyn Fn() -> Result<BezPath, Error> + Send + Sync>;

/// A glyph and the position of its origin, relative to the frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPosition {
    /// The font-specific identifier for this glyph.
    ///
    /// This ID is specific to the font being used and corresponds to the
    /// glyph index within that font. It is *not* a Unicode code point.
    pub glyph_id: u32,
    /// Glyph origin in frame space.
    pub position: Point,
}

impl GlyphPosition {
    /// Creates a positioned glyph.
    #[inline]
    pub fn new(glyph_id: u32, position: Point) -> Self {
        Self { glyph_id, position }
    }
}

/// A sequence of glyphs that share one font.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    font: Font,
    glyph_positions: Vec<GlyphPosition>,
}

impl TextRun {
    /// Creates a run from already shaped glyphs.
    pub fn new(font: Font, glyph_positions: impl IntoIterator<Item = GlyphPosition>) -> Self {
        Self {
            font,
            glyph_positions: glyph_positions.into_iter().collect(),
        }
    }

    /// The font shared by every glyph in the run.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The glyphs of the run, in drawing order.
    #[inline]
    pub fn glyph_positions(&self) -> &[GlyphPosition] {
        &self.glyph_positions
    }

    /// Number of glyphs in the run.
    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyph_positions.len()
    }
}

/// An immutable collection of shaped text runs.
///
/// A frame may be drawn several times within one rendering cycle, but must not
/// be changed between cycles: atlas entries collected for it are looked up
/// again when its geometry is generated.
pub struct TextFrame {
    runs: SmallVec<[TextRun; 1]>,
    bounds: Rect,
    has_color: bool,
    path_creator: Option<PathCreator>,
}

impl TextFrame {
    /// Creates a frame.
    ///
    /// `bounds` is the conservative bounding box of all glyphs in frame space.
    /// `has_color` must be set when any run uses a color (bitmap or COLR) font.
    pub fn new(runs: impl IntoIterator<Item = TextRun>, bounds: Rect, has_color: bool) -> Self {
        Self {
            runs: runs.into_iter().collect(),
            bounds,
            has_color,
            path_creator: None,
        }
    }

    /// Attaches the producer used by [`TextFrame::path`].
    pub fn with_path_creator(mut self, path_creator: PathCreator) -> Self {
        self.path_creator = Some(path_creator);
        self
    }

    /// Wraps the frame for sharing between draw calls.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The conservative bounding box supplied at construction.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The runs of the frame.
    #[inline]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Number of runs in the frame.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Total number of glyphs across all runs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(TextRun::glyph_count).sum()
    }

    /// Whether any run uses a color font.
    #[inline]
    pub fn has_color(&self) -> bool {
        self.has_color
    }

    /// The atlas the glyphs of this frame are rasterized into.
    #[inline]
    pub fn atlas_type(&self) -> AtlasType {
        if self.has_color {
            AtlasType::ColorBitmap
        } else {
            AtlasType::AlphaBitmap
        }
    }

    /// The font of the first run.
    pub fn font(&self) -> Option<&Font> {
        self.runs.first().map(TextRun::font)
    }

    /// Returns the only glyph when the frame holds exactly one run of exactly
    /// one glyph, as icons typically do.
    pub fn as_single_glyph(&self) -> Option<GlyphPosition> {
        match self.runs.as_slice() {
            [run] if run.glyph_count() == 1 => run.glyph_positions.first().copied(),
            _ => None,
        }
    }

    /// Produces the outline of the frame.
    ///
    /// Fails with [`ErrorKind::NoPathCreator`](crate::ErrorKind::NoPathCreator)
    /// if the frame was built without a producer.
    pub fn path(&self) -> Result<BezPath, Error> {
        match &self.path_creator {
            Some(creator) => creator(),
            None => Err(Error::no_path_creator()),
        }
    }
}

impl Debug for TextFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextFrame")
            .field("runs", &self.runs.len())
            .field("bounds", &self.bounds)
            .field("has_color", &self.has_color)
            .field("path_creator", &self.path_creator.is_some())
            .finish()
    }
}

/// A text frame queued for atlas construction.
#[derive(Clone, Debug)]
pub struct RenderableText {
    /// The frame to rasterize glyphs for.
    pub text_frame: Arc<TextFrame>,
    /// Full transform of the frame origin, including the draw position.
    pub origin_transform: Affine,
    /// Paint properties baked into the atlas entries, if any.
    pub properties: Option<GlyphProperties>,
}
