//! Caption styling and export settings.
//!
//! Everything here is plain configuration with serde support so the page can
//! pass overrides as a JS object. Defaults reproduce the stock meme look:
//! gold text with a brown outline, tilted up by 15 degrees.

use serde::{Deserialize, Serialize};

use crate::encode::QualitySearch;

/// Default byte ceiling for exported files (1.9 MiB).
pub const DEFAULT_MAX_EXPORT_BYTES: usize = 1_992_294;

/// Default name of the exported file.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "thumbnail.jpg";

/// Layout and paint parameters for the caption overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionStyle {
    /// Font size as a fraction of image width
    pub font_size_ratio: f32,
    /// Legibility floor for the font size, in pixels
    pub min_font_size: f32,
    /// Anchor x as a fraction of image width
    pub anchor_x_ratio: f32,
    /// Anchor y as a fraction of image height
    pub anchor_y_ratio: f32,
    /// Rotation of the text block about the anchor, in degrees.
    /// Canvas convention: negative tilts counter-clockwise on screen.
    pub rotation_degrees: f32,
    /// Baseline-to-baseline distance as a multiple of the font size
    pub line_height: f32,
    /// Outline width as a fraction of the font size
    pub stroke_width_ratio: f32,
    /// Maximum line width as a fraction of image width
    pub max_width_ratio: f32,
    /// Outline colour (RGB)
    pub stroke_color: [u8; 3],
    /// Fill colour (RGB)
    pub fill_color: [u8; 3],
    /// Uppercase the caption before wrapping
    pub uppercase: bool,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size_ratio: 0.08,
            min_font_size: 60.0,
            anchor_x_ratio: 0.1,
            anchor_y_ratio: 0.2,
            rotation_degrees: -15.0,
            line_height: 1.1,
            stroke_width_ratio: 0.05,
            max_width_ratio: 0.4,
            stroke_color: [139, 69, 19],
            fill_color: [255, 215, 0],
            uppercase: true,
        }
    }
}

impl CaptionStyle {
    /// Create a style with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Font size for an image of the given width.
    pub fn font_size_for(&self, image_width: u32) -> f32 {
        (image_width as f32 * self.font_size_ratio).max(self.min_font_size)
    }

    /// Maximum caption line width for an image of the given width.
    pub fn max_line_width_for(&self, image_width: u32) -> f32 {
        image_width as f32 * self.max_width_ratio
    }

    /// Outline width for the given font size.
    pub fn stroke_width_for(&self, font_size: f32) -> f32 {
        font_size * self.stroke_width_ratio
    }
}

/// Parameters for the export step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    /// Encoded size ceiling in bytes (best effort)
    pub max_bytes: usize,
    /// Quality search schedule
    pub search: QualitySearch,
    /// Name offered for the download
    pub file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_EXPORT_BYTES,
            search: QualitySearch::default(),
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}
