//! Caption compositing.
//!
//! The compositor is the only code that writes pixels. Every call is a full
//! repaint from the source image, so the result depends only on its inputs.

use thiserror::Error;

use crate::decode::Raster;
use crate::layout::CaptionLayout;
use crate::style::CaptionStyle;
use crate::surface::{CaptionFont, RasterSurface, Stroke, Surface};

/// Errors that can occur while compositing.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The source has no pixels or its buffer does not match its dimensions
    #[error("Source image is empty or malformed ({width}x{height}, {len} bytes)")]
    EmptySource { width: u32, height: u32, len: usize },
}

/// A caption that the user has confirmed for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionOverlay<'a> {
    pub caption: &'a str,
}

impl<'a> CaptionOverlay<'a> {
    pub fn new(caption: &'a str) -> Self {
        Self { caption }
    }

    /// True if there is any non-whitespace text to draw.
    pub fn has_text(&self) -> bool {
        self.caption.split_whitespace().next().is_some()
    }
}

/// Composite `source` and an optional caption onto `surface`.
///
/// The surface is resized to the source dimensions and the source drawn 1:1
/// at the origin. When `overlay` carries text, each wrapped line is stroked
/// and then filled, so the fill sits on top of the outline.
///
/// Returns the layout that was drawn, if any.
pub fn composite<S: Surface>(
    surface: &mut S,
    source: &Raster,
    overlay: Option<CaptionOverlay<'_>>,
    style: &CaptionStyle,
) -> Result<Option<CaptionLayout>, CompositeError> {
    if source.is_empty() {
        return Err(CompositeError::EmptySource {
            width: source.width,
            height: source.height,
            len: source.pixels.len(),
        });
    }

    surface.reset_transform();
    surface.resize(source.width, source.height);
    surface.draw_image(source, 0, 0);

    let Some(overlay) = overlay.filter(CaptionOverlay::has_text) else {
        return Ok(None);
    };

    let layout = CaptionLayout::new(
        overlay.caption,
        source.width,
        source.height,
        style,
        |text, size| surface.measure_text(text, size),
    );
    draw_layout(surface, &layout, style);

    Ok(Some(layout))
}

/// Draw already laid out caption lines, outline first.
pub fn draw_layout<S: Surface>(surface: &mut S, layout: &CaptionLayout, style: &CaptionStyle) {
    let stroke = Stroke {
        color: style.stroke_color,
        width: layout.stroke_width,
    };

    surface.set_transform(layout.transform());
    for (index, line) in layout.lines.iter().enumerate() {
        let (x, y) = layout.line_offset(index);
        surface.stroke_text(line, x, y, layout.font_size, &stroke);
        surface.fill_text(line, x, y, layout.font_size, style.fill_color);
    }
    surface.reset_transform();
}

/// Render a fresh composite.
///
/// This is the pure form of [`composite`]: a new surface each call, so equal
/// inputs always produce equal rasters.
pub fn render(
    source: &Raster,
    overlay: Option<CaptionOverlay<'_>>,
    style: &CaptionStyle,
    font: &CaptionFont,
) -> Result<Raster, CompositeError> {
    let mut surface = RasterSurface::new(font.clone());
    composite(&mut surface, source, overlay, style)?;
    Ok(surface.into_raster())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Transform;
    use crate::surface::TextMeasure;

    /// Records draw calls instead of rasterizing.
    #[derive(Default)]
    struct RecordingSurface {
        size: (u32, u32),
        transform: Option<Transform>,
        calls: Vec<String>,
        /// Transform in effect at each text call
        text_transforms: Vec<Transform>,
    }

    impl TextMeasure for RecordingSurface {
        fn measure_text(&self, text: &str, font_size: f32) -> f32 {
            text.chars().count() as f32 * font_size * 0.6
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
            self.calls.push(format!("resize {width}x{height}"));
        }

        fn dimensions(&self) -> (u32, u32) {
            self.size
        }

        fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
            self.calls
                .push(format!("image {}x{} at {x},{y}", image.width, image.height));
        }

        fn set_transform(&mut self, transform: Transform) {
            self.transform = Some(transform);
        }

        fn stroke_text(&mut self, text: &str, _x: f32, y: f32, _size: f32, stroke: &Stroke) {
            self.text_transforms.push(self.transform.unwrap_or_default());
            self.calls
                .push(format!("stroke {text} @{y} w{}", stroke.width));
        }

        fn fill_text(&mut self, text: &str, _x: f32, y: f32, _size: f32, _color: [u8; 3]) {
            self.text_transforms.push(self.transform.unwrap_or_default());
            self.calls.push(format!("fill {text} @{y}"));
        }
    }

    fn gray(width: u32, height: u32) -> Raster {
        Raster::filled(width, height, [90, 90, 90])
    }

    #[test]
    fn test_no_overlay_draws_only_image() {
        let mut surface = RecordingSurface::default();
        let layout = composite(&mut surface, &gray(40, 30), None, &CaptionStyle::default()).unwrap();

        assert!(layout.is_none());
        assert_eq!(surface.calls, vec!["resize 40x30", "image 40x30 at 0,0"]);
    }

    #[test]
    fn test_blank_caption_is_no_overlay() {
        let mut surface = RecordingSurface::default();
        let layout = composite(
            &mut surface,
            &gray(40, 30),
            Some(CaptionOverlay::new("  ")),
            &CaptionStyle::default(),
        )
        .unwrap();

        assert!(layout.is_none());
        assert_eq!(surface.calls.len(), 2);
    }

    #[test]
    fn test_stroke_before_fill_per_line() {
        let mut surface = RecordingSurface::default();
        // 1000 wide: font 80, max width 400, 48 px per char in the fake measure
        let layout = composite(
            &mut surface,
            &gray(1000, 800),
            Some(CaptionOverlay::new("one two three four")),
            &CaptionStyle::default(),
        )
        .unwrap()
        .unwrap();

        assert!(layout.lines.len() > 1);
        let text_calls = &surface.calls[2..];
        assert_eq!(text_calls.len(), layout.lines.len() * 2);
        for (i, pair) in text_calls.chunks(2).enumerate() {
            assert!(pair[0].starts_with(&format!("stroke {}", layout.lines[i])));
            assert!(pair[1].starts_with(&format!("fill {}", layout.lines[i])));
        }
        // Outline width is 5% of the 80 px font
        assert!(text_calls[0].ends_with("w4"));
    }

    #[test]
    fn test_lines_stacked_by_line_height() {
        let mut surface = RecordingSurface::default();
        let layout = composite(
            &mut surface,
            &gray(1000, 800),
            Some(CaptionOverlay::new("aaaa bbbb cccc")),
            &CaptionStyle::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(layout.lines.len(), 3);
        assert!(surface.calls[2].ends_with("@0 w4"));
        assert!(surface.calls[4].contains("@88"));
    }

    #[test]
    fn test_text_drawn_under_layout_transform() {
        let mut surface = RecordingSurface::default();
        let layout = composite(
            &mut surface,
            &gray(1000, 800),
            Some(CaptionOverlay::new("tilted words on a photo")),
            &CaptionStyle::default(),
        )
        .unwrap()
        .unwrap();

        let expected = Transform::from_translate(100.0, 160.0).pre_rotate(-15.0);
        assert_eq!(layout.transform(), expected);
        assert_eq!(surface.text_transforms.len(), layout.lines.len() * 2);
        assert!(surface.text_transforms.iter().all(|t| *t == expected));
    }

    #[test]
    fn test_transform_reset_after_text() {
        let mut surface = RecordingSurface::default();
        composite(
            &mut surface,
            &gray(100, 100),
            Some(CaptionOverlay::new("hey")),
            &CaptionStyle::default(),
        )
        .unwrap();
        assert_eq!(surface.transform, Some(Transform::identity()));
    }

    #[test]
    fn test_empty_source_is_error() {
        let mut surface = RecordingSurface::default();
        let result = composite(
            &mut surface,
            &Raster::new(0, 0, vec![]),
            None,
            &CaptionStyle::default(),
        );
        assert!(matches!(result, Err(CompositeError::EmptySource { .. })));
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_render_without_caption_is_source() {
        let font = CaptionFont::bundled().unwrap();
        let source = gray(64, 48);
        let out = render(&source, None, &CaptionStyle::default(), &font).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_render_with_caption_changes_pixels() {
        let font = CaptionFont::bundled().unwrap();
        let source = gray(400, 300);
        let out = render(
            &source,
            Some(CaptionOverlay::new("hello")),
            &CaptionStyle::default(),
            &font,
        )
        .unwrap();

        assert_eq!((out.width, out.height), (400, 300));
        assert_ne!(out, source);
        let gold = out
            .pixels
            .chunks_exact(3)
            .filter(|p| *p == [255, 215, 0])
            .count();
        assert!(gold > 0, "fill colour should appear on top of the outline");
    }

    #[test]
    fn test_render_is_idempotent() {
        let font = CaptionFont::bundled().unwrap();
        let source = gray(300, 200);
        let overlay = Some(CaptionOverlay::new("same input same pixels"));
        let style = CaptionStyle::default();

        let first = render(&source, overlay, &style, &font).unwrap();
        let second = render(&source, overlay, &style, &font).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_composite_twice_on_same_surface_is_identical() {
        let font = CaptionFont::bundled().unwrap();
        let mut surface = RasterSurface::new(font);
        let source = gray(300, 200);
        let overlay = Some(CaptionOverlay::new("no accumulation"));
        let style = CaptionStyle::default();

        composite(&mut surface, &source, overlay, &style).unwrap();
        let first = surface.snapshot();
        composite(&mut surface, &source, overlay, &style).unwrap();
        assert_eq!(surface.snapshot(), first);
    }

    #[test]
    fn test_caption_rises_from_anchor_at_fifteen_degrees() {
        let font = CaptionFont::bundled().unwrap();
        let source = gray(1000, 800);
        // Vertically symmetric capitals keep the centroid on the text axis
        let out = render(
            &source,
            Some(CaptionOverlay::new("hihih")),
            &CaptionStyle::default(),
            &font,
        )
        .unwrap();

        let gold: Vec<(f32, f32)> = (0..out.height)
            .flat_map(|y| (0..out.width).map(move |x| (x, y)))
            .filter(|&(x, y)| out.pixel(x, y) == Some([255, 215, 0]))
            .map(|(x, y)| (x as f32 + 0.5, y as f32 + 0.5))
            .collect();
        assert!(gold.len() > 500);

        // The run starts at the anchor (the cap tops lean left of it) and
        // sits on its baseline
        let min_x = gold.iter().map(|p| p.0).fold(f32::MAX, f32::min);
        assert!((85.0..=112.0).contains(&min_x), "left edge {min_x}");
        let near_anchor_bottom = gold
            .iter()
            .filter(|p| p.0 < 130.0)
            .map(|p| p.1)
            .fold(f32::MIN, f32::max);
        assert!((150.0..=165.0).contains(&near_anchor_bottom), "bottom {near_anchor_bottom}");

        // Centroids of the two ends give the slope of the text axis
        let max_x = gold.iter().map(|p| p.0).fold(f32::MIN, f32::max);
        let centroid = |lo: f32, hi: f32| {
            let pts: Vec<_> = gold.iter().filter(|p| p.0 >= lo && p.0 < hi).collect();
            let n = pts.len() as f32;
            (
                pts.iter().map(|p| p.0).sum::<f32>() / n,
                pts.iter().map(|p| p.1).sum::<f32>() / n,
            )
        };
        let left = centroid(min_x, min_x + 80.0);
        let right = centroid(max_x - 80.0, max_x + 1.0);
        let slope = (right.1 - left.1) / (right.0 - left.0);
        let expected = -(15.0f32.to_radians().tan());
        assert!((slope - expected).abs() < 0.06, "slope {slope}, expected {expected}");
    }
}
