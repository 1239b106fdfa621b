//! Caption font loading and measurement.
//!
//! Advances and kerning come from `fontdue`; glyph outlines are read with
//! `ttf-parser` and turned into `tiny_skia` paths. A bold sans face
//! (DejaVu Sans Bold) is bundled so the core renders without any host font
//! access; callers can load their own face with [`CaptionFont::from_bytes`].

use std::sync::Arc;

use fontdue::{Font, FontSettings};
use thiserror::Error;
use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, OutlineBuilder};

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

/// Errors that can occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes could not be parsed as a TrueType/OpenType face
    #[error("Invalid font data: {0}")]
    InvalidFont(String),
}

/// A glyph positioned along a line, relative to the line's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Pen position of the glyph origin
    pub x: f32,
}

/// A shareable font handle.
///
/// Cloning is cheap; the parsed face and its bytes live behind `Arc`s.
#[derive(Clone)]
pub struct CaptionFont {
    inner: Arc<Font>,
    data: Arc<[u8]>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("name", &self.inner.name())
            .finish()
    }
}

impl CaptionFont {
    /// Parse a font from TrueType/OpenType bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontError> {
        Face::parse(bytes, 0).map_err(|e| FontError::InvalidFont(e.to_string()))?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FontError::InvalidFont(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(font),
            data: Arc::from(bytes),
        })
    }

    /// The bundled bold sans face.
    pub fn bundled() -> Result<Self, FontError> {
        Self::from_bytes(BUNDLED_FONT)
    }

    /// Lay out `text` on a single line, returning each glyph's pen position
    /// and the total advance width.
    pub fn layout_line(&self, text: &str, font_size: f32) -> (Vec<PlacedGlyph>, f32) {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen = 0.0f32;
        let mut prev: Option<char> = None;

        for ch in text.chars() {
            if let Some(left) = prev {
                pen += self
                    .inner
                    .horizontal_kern(left, ch, font_size)
                    .unwrap_or(0.0);
            }
            glyphs.push(PlacedGlyph { ch, x: pen });
            pen += self.inner.metrics(ch, font_size).advance_width;
            prev = Some(ch);
        }

        (glyphs, pen)
    }

    /// Advance width of `text` at `font_size`, in pixels.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        self.layout_line(text, font_size).1
    }

    /// Outline of `text` on one line as a path, with the baseline start at
    /// the origin and y pointing down.
    ///
    /// Returns `None` when no glyph has an outline (empty or all spaces).
    pub fn text_path(&self, text: &str, font_size: f32) -> Option<Path> {
        let face = Face::parse(&self.data, 0).ok()?;
        let (placed, _) = self.layout_line(text, font_size);

        let mut sink = OutlineSink {
            path: PathBuilder::new(),
            scale: font_size / f32::from(face.units_per_em()),
            pen_x: 0.0,
        };
        for glyph in &placed {
            let Some(id) = face.glyph_index(glyph.ch) else {
                continue;
            };
            sink.pen_x = glyph.x;
            face.outline_glyph(id, &mut sink);
        }
        sink.path.finish()
    }
}

/// Feeds font-unit outlines into a pixel-space path.
struct OutlineSink {
    path: PathBuilder,
    scale: f32,
    pen_x: f32,
}

impl OutlineSink {
    #[inline]
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        // Font units are y-up
        (self.pen_x + x * self.scale, -y * self.scale)
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}
