//! Raster drawing surfaces.
//!
//! The compositor draws through the [`Surface`] trait, a small subset of the
//! canvas 2D context: resize, blit an image, set a transform, measure text,
//! stroke text and fill text. [`RasterSurface`] is the software
//! implementation used by the core; hosts with their own canvas can implement
//! the trait instead.

mod font;
mod raster;

pub use font::{CaptionFont, FontError, PlacedGlyph};
pub use raster::RasterSurface;

use crate::decode::Raster;
use crate::layout::Transform;

/// Outline paint for [`Surface::stroke_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Outline colour (RGB)
    pub color: [u8; 3],
    /// Line width in pixels, centred on the glyph outline
    pub width: f32,
}

/// Text measurement in the surface's active font.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size`, in pixels.
    fn measure_text(&self, text: &str, font_size: f32) -> f32;
}

/// A canvas-like raster drawing surface.
///
/// Text positions are baseline origins in the coordinate space of the
/// current transform.
pub trait Surface: TextMeasure {
    /// Resize to exactly `width` x `height`, clearing the contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Current `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Copy `image` 1:1 with its top-left corner at device `(x, y)`.
    /// The current transform does not apply.
    fn draw_image(&mut self, image: &Raster, x: i32, y: i32);

    /// Replace the current transform (canvas `setTransform`).
    fn set_transform(&mut self, transform: Transform);

    /// Restore the identity transform.
    fn reset_transform(&mut self) {
        self.set_transform(Transform::identity());
    }

    /// Draw the outline of `text` with its baseline origin at `(x, y)`.
    fn stroke_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, stroke: &Stroke);

    /// Fill `text` with its baseline origin at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: [u8; 3]);
}

impl TextMeasure for CaptionFont {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.measure(text, font_size)
    }
}
