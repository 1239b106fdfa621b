//! Caption rendering WASM binding.

use crate::types::{bundled_font, style_from_js, JsRaster};
use captionkit_core::composite::{self, CaptionOverlay};
use wasm_bindgen::prelude::*;

/// Draw a caption over an image and return the composite.
///
/// With no caption (or a blank one) the result is a copy of `image`.
/// `style` is an optional partial `CaptionStyle`.
///
/// # Example
///
/// ```typescript
/// const out = render_caption(image, 'hello world', { fillColor: [255, 255, 255] });
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(out.rgba_pixels()), out.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn render_caption(
    image: &JsRaster,
    caption: Option<String>,
    style: JsValue,
) -> Result<JsRaster, JsValue> {
    let style = style_from_js(style)?;
    let font = bundled_font()?;
    let overlay = caption.as_deref().map(CaptionOverlay::new);

    composite::render(&image.to_raster(), overlay, &style, &font)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray(width: u32, height: u32) -> JsRaster {
        JsRaster::new(width, height, vec![90u8; (width * height * 3) as usize])
    }

    #[wasm_bindgen_test]
    fn test_render_without_caption_is_copy() {
        let image = gray(40, 30);
        let out = render_caption(&image, None, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.pixels(), image.pixels());
    }

    #[wasm_bindgen_test]
    fn test_render_with_caption_draws() {
        let image = gray(400, 300);
        let out = render_caption(&image, Some("hello".to_string()), JsValue::UNDEFINED).unwrap();
        assert_eq!(out.width(), 400);
        assert_ne!(out.pixels(), image.pixels());
    }

    #[wasm_bindgen_test]
    fn test_render_empty_image_errors() {
        let image = JsRaster::new(0, 0, vec![]);
        assert!(render_caption(&image, None, JsValue::UNDEFINED).is_err());
    }
}
