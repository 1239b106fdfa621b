//! WASM-compatible wrapper types.
//!
//! JavaScript-facing wrappers around the core raster, encode results and
//! configuration structs, plus the conversions between the two sides.

use captionkit_core::{CaptionFont, CaptionStyle, EncodedArtifact, ExportSettings, ExportedFile, Raster};
use wasm_bindgen::prelude::*;

/// An RGB raster for JavaScript.
///
/// The pixel data lives in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`, ready to wrap in an `ImageData` after adding alpha.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, the layout `ImageData`
    /// expects.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            out.extend_from_slice(rgb);
            out.push(255);
        }
        out
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Copy back to a core raster.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Result of a size-bounded JPEG encode.
#[wasm_bindgen]
pub struct JsEncodedArtifact {
    inner: EncodedArtifact,
}

#[wasm_bindgen]
impl JsEncodedArtifact {
    /// JPEG bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Quality used for the returned bytes, in (0, 1]
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    /// False when even the quality floor is over the byte budget
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.inner.within_budget
    }
}

impl JsEncodedArtifact {
    pub(crate) fn from_artifact(inner: EncodedArtifact) -> Self {
        Self { inner }
    }
}

/// A file ready for download.
#[wasm_bindgen]
pub struct JsExportedFile {
    file_name: String,
    artifact: JsEncodedArtifact,
}

#[wasm_bindgen]
impl JsExportedFile {
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// MIME type of the bytes
    #[wasm_bindgen(getter)]
    pub fn media_type(&self) -> String {
        "image/jpeg".to_string()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.artifact.bytes()
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.artifact.quality()
    }

    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        self.artifact.within_budget()
    }
}

impl JsExportedFile {
    pub(crate) fn from_exported(file: ExportedFile) -> Self {
        Self {
            file_name: file.file_name,
            artifact: JsEncodedArtifact::from_artifact(file.artifact),
        }
    }
}

/// Read an optional `CaptionStyle` override from JS.
///
/// `undefined` or `null` selects the defaults; missing fields fall back to
/// their defaults.
pub(crate) fn style_from_js(value: JsValue) -> Result<CaptionStyle, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CaptionStyle::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid caption style: {}", e)))
}

/// Read an optional `ExportSettings` override from JS.
pub(crate) fn export_settings_from_js(value: JsValue) -> Result<ExportSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ExportSettings::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid export settings: {}", e)))
}

pub(crate) fn bundled_font() -> Result<CaptionFont, JsValue> {
    CaptionFont::bundled().map_err(|e| JsValue::from_str(&e.to_string()))
}
