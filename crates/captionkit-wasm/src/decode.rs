//! Image intake WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, is_image_media_type } from '@captionkit/wasm';
//!
//! if (is_image_media_type(file.type)) {
//!   const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//!   console.log(`Decoded ${image.width}x${image.height}`);
//! }
//! ```

use crate::types::JsRaster;
use captionkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image file (JPEG, PNG, GIF, WebP or BMP) to RGB.
///
/// The format is detected from the bytes, not the file name. EXIF
/// orientation is applied so the result matches what the browser displays.
///
/// # Errors
///
/// Returns an error if the format is not recognized, the data is corrupt, or
/// the image has no pixels.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check a dropped file's declared media type (`File.type`).
///
/// Only `image/*` types are accepted; everything else should be ignored.
#[wasm_bindgen]
pub fn is_image_media_type(media_type: &str) -> bool {
    decode::is_image_media_type(media_type)
}

/// EXIF orientation of the file (1-8), 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("IMAGE/JPEG"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn test_image_orientation_without_exif() {
        assert_eq!(image_orientation(&[0, 1, 2, 3]), 1);
    }
}
