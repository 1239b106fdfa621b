//! Software implementation of [`Surface`] on a `tiny_skia::Pixmap`.
//!
//! Text is drawn as glyph outline paths: `stroke_path` for the outline and
//! `fill_path` for the body, both under the current transform, so rotated
//! text stays anti-aliased and the cost follows the covered area.

use tiny_skia::{FillRule, LineJoin, Paint, Pixmap, PixmapPaint, Transform};

use super::font::CaptionFont;
use super::{Stroke, Surface, TextMeasure};
use crate::decode::Raster;

/// An RGBA pixmap with a current transform and a font for text operations.
#[derive(Clone)]
pub struct RasterSurface {
    font: CaptionFont,
    size: (u32, u32),
    pixmap: Option<Pixmap>,
    transform: Transform,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("font", &self.font)
            .field("size", &self.size)
            .field("transform", &self.transform)
            .finish()
    }
}

impl RasterSurface {
    /// Create an empty (0x0) surface that draws text with `font`.
    pub fn new(font: CaptionFont) -> Self {
        Self {
            font,
            size: (0, 0),
            pixmap: None,
            transform: Transform::identity(),
        }
    }

    /// Copy the current contents out as RGB.
    pub fn snapshot(&self) -> Raster {
        let (width, height) = self.size;
        let Some(pixmap) = &self.pixmap else {
            return Raster::new(width, height, vec![0; width as usize * height as usize * 3]);
        };

        let mut pixels = Vec::with_capacity(pixmap.pixels().len() * 3);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            pixels.extend_from_slice(&[color.red(), color.green(), color.blue()]);
        }
        Raster::new(width, height, pixels)
    }

    /// Consume the surface, returning its contents as RGB.
    pub fn into_raster(self) -> Raster {
        self.snapshot()
    }

    pub fn font(&self) -> &CaptionFont {
        &self.font
    }
}

fn solid(color: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    paint
}

/// Opaque pixmap holding `raster`, or `None` for an empty raster.
fn pixmap_from_raster(raster: &Raster) -> Option<Pixmap> {
    if raster.is_empty() {
        return None;
    }
    let mut pixmap = Pixmap::new(raster.width, raster.height)?;
    copy_rgb_into(pixmap.data_mut(), &raster.pixels);
    Some(pixmap)
}

fn copy_rgb_into(rgba: &mut [u8], rgb: &[u8]) {
    for (dst, src) in rgba.chunks_exact_mut(4).zip(rgb.chunks_exact(3)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 255;
    }
}

impl TextMeasure for RasterSurface {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.font.measure(text, font_size)
    }
}

impl Surface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.pixmap = Pixmap::new(width, height);
    }

    fn dimensions(&self) -> (u32, u32) {
        self.size
    }

    fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
        let Some(target) = self.pixmap.as_mut() else {
            return;
        };
        if image.is_empty() {
            return;
        }

        // Full-frame blit needs no intermediate pixmap
        if (x, y) == (0, 0) && (image.width, image.height) == self.size {
            copy_rgb_into(target.data_mut(), &image.pixels);
            return;
        }

        if let Some(source) = pixmap_from_raster(image) {
            target.draw_pixmap(
                x,
                y,
                source.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, stroke: &Stroke) {
        if stroke.width <= 0.0 {
            return;
        }
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = self.font.text_path(text, font_size) else {
            return;
        };

        // Canvas defaults: miter joins, miter limit 10
        let outline = tiny_skia::Stroke {
            width: stroke.width,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            ..tiny_skia::Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &solid(stroke.color),
            &outline,
            self.transform.pre_translate(x, y),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: [u8; 3]) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = self.font.text_path(text, font_size) else {
            return;
        };
        pixmap.fill_path(
            &path,
            &solid(color),
            FillRule::Winding,
            self.transform.pre_translate(x, y),
            None,
        );
    }
}
