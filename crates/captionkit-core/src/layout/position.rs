//! Placement of wrapped caption lines on an image.

use serde::{Deserialize, Serialize};

use tiny_skia::{Point, Transform};

use super::wrap::wrap;
use crate::style::CaptionStyle;

/// A wrapped caption positioned for a specific image size.
///
/// Lines are stacked in local space at `(0, i * font_size * line_height)`,
/// each y being a baseline, and the whole block is rotated about the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionLayout {
    /// Wrapped, uppercased lines, top to bottom
    pub lines: Vec<String>,
    /// Font size in pixels
    pub font_size: f32,
    /// Baseline-to-baseline distance in pixels
    pub line_spacing: f32,
    /// Outline width in pixels
    pub stroke_width: f32,
    /// Line width limit used for wrapping, in pixels
    pub max_width: f32,
    /// Block anchor in image pixels
    pub anchor: (f32, f32),
    /// Block rotation in degrees
    pub rotation_degrees: f32,
}

impl CaptionLayout {
    /// Lay out `caption` for an image of `width` x `height` pixels.
    ///
    /// `measure(text, font_size)` returns the advance width of `text` in the
    /// target font at `font_size`.
    pub fn new<M>(caption: &str, width: u32, height: u32, style: &CaptionStyle, measure: M) -> Self
    where
        M: Fn(&str, f32) -> f32,
    {
        let font_size = style.font_size_for(width);
        let max_width = style.max_line_width_for(width);
        let lines = if style.uppercase {
            wrap(caption, max_width, |s| measure(s, font_size))
        } else {
            super::wrap::wrap_words(caption, max_width, |s| measure(s, font_size))
        };

        Self {
            lines,
            font_size,
            line_spacing: font_size * style.line_height,
            stroke_width: style.stroke_width_for(font_size),
            max_width,
            anchor: (
                width as f32 * style.anchor_x_ratio,
                height as f32 * style.anchor_y_ratio,
            ),
            rotation_degrees: style.rotation_degrees,
        }
    }

    /// Transform from block-local space to image pixels.
    ///
    /// Translate to the anchor, then rotate, as a canvas would.
    pub fn transform(&self) -> Transform {
        Transform::from_translate(self.anchor.0, self.anchor.1).pre_rotate(self.rotation_degrees)
    }

    /// Local baseline origin of line `index`, before rotation.
    pub fn line_offset(&self, index: usize) -> (f32, f32) {
        (0.0, index as f32 * self.line_spacing)
    }

    /// Baseline origin of line `index` in image pixels.
    pub fn line_origin(&self, index: usize) -> (f32, f32) {
        let (x, y) = self.line_offset(index);
        let mut points = [Point::from_xy(x, y)];
        self.transform().map_points(&mut points);
        (points[0].x, points[0].y)
    }

    /// True when there is nothing to draw.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }
}
