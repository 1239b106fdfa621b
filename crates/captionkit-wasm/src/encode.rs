//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data at a fixed quality
//! - [`encode_jpeg_bounded`] - Encode a raster, stepping quality down until it
//!   fits a byte budget
//! - [`estimated_bytes_from_base64_len`] - Size of a base64 data URL payload
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_bounded } from '@captionkit/wasm';
//!
//! const result = encode_jpeg_bounded(composite, 1_992_294);
//! if (!result.within_budget) console.warn('export is over budget');
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! ```

use crate::types::{JsEncodedArtifact, JsRaster};
use captionkit_core::encode::{self, QualitySearch};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3` or either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a raster as JPEG within `max_bytes` where achievable.
///
/// Starts at quality 0.95 and steps down by 0.05 to a floor of 0.10 unless
/// `search` (`{ initial, step, min }`, all optional) says otherwise. If even
/// the floor is too large, the floor encoding is returned with
/// `within_budget` false.
///
/// # Errors
///
/// Returns an error for an invalid raster or a search schedule that cannot
/// terminate.
#[wasm_bindgen]
pub fn encode_jpeg_bounded(
    image: &JsRaster,
    max_bytes: usize,
    search: JsValue,
) -> Result<JsEncodedArtifact, JsValue> {
    let search = search_from_js(search)?;
    encode::encode_bounded(&image.to_raster(), max_bytes, search)
        .map(JsEncodedArtifact::from_artifact)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Approximate decoded size of a base64 payload with `encoded_len`
/// characters.
#[wasm_bindgen]
pub fn estimated_bytes_from_base64_len(encoded_len: usize) -> usize {
    encode::estimated_bytes_from_base64_len(encoded_len)
}

fn search_from_js(value: JsValue) -> Result<QualitySearch, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(QualitySearch::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid quality search: {}", e)))
}
