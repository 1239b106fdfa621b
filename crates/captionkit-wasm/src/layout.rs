//! Caption layout WASM bindings.
//!
//! [`wrap_caption`] lets the page wrap against its own canvas font via a
//! measure callback. [`wrap_caption_for_image`] computes the whole layout
//! with the bundled font, matching what [`crate::render_caption`] draws.

use std::cell::RefCell;

use crate::types::{bundled_font, style_from_js};
use captionkit_core::layout::{self, CaptionLayout};
use wasm_bindgen::prelude::*;

/// Wrap a caption against a JS measurement function.
///
/// The caption is uppercased, then broken greedily. `measure` is called with
/// candidate line text (uppercased, with a trailing space) and must return its
/// width in pixels, e.g. `text => ctx.measureText(text).width`.
///
/// Returns an array of lines; an empty caption gives `[""]`.
///
/// # Errors
///
/// Returns the first error thrown by `measure`, or an error if it returns
/// something other than a number.
#[wasm_bindgen]
pub fn wrap_caption(
    caption: &str,
    max_width: f32,
    measure: &js_sys::Function,
) -> Result<js_sys::Array, JsValue> {
    let failure: RefCell<Option<JsValue>> = RefCell::new(None);

    let lines = layout::wrap(caption, max_width, |text| {
        if failure.borrow().is_some() {
            return 0.0;
        }
        match measure.call1(&JsValue::NULL, &JsValue::from_str(text)) {
            Ok(width) => match width.as_f64() {
                Some(width) => width as f32,
                None => {
                    *failure.borrow_mut() =
                        Some(JsValue::from_str("measure callback must return a number"));
                    0.0
                }
            },
            Err(e) => {
                *failure.borrow_mut() = Some(e);
                0.0
            }
        }
    });

    if let Some(e) = failure.into_inner() {
        return Err(e);
    }
    Ok(lines.iter().map(|line| JsValue::from_str(line)).collect())
}

/// Lay out a caption for an image of the given size with the bundled font.
///
/// `style` is an optional partial `CaptionStyle`. Returns a plain object:
/// `{ lines, fontSize, lineSpacing, strokeWidth, maxWidth, anchor,
/// rotationDegrees }`.
#[wasm_bindgen]
pub fn wrap_caption_for_image(
    caption: &str,
    image_width: u32,
    image_height: u32,
    style: JsValue,
) -> Result<JsValue, JsValue> {
    let style = style_from_js(style)?;
    let font = bundled_font()?;
    let layout = CaptionLayout::new(caption, image_width, image_height, &style, |text, size| {
        font.measure(text, size)
    });
    serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn ten_per_char() -> js_sys::Function {
        js_sys::Function::new_with_args("text", "return text.length * 10;")
    }

    fn lines_of(array: js_sys::Array) -> Vec<String> {
        array.iter().filter_map(|v| v.as_string()).collect()
    }

    #[wasm_bindgen_test]
    fn test_wrap_caption_uppercases_and_breaks() {
        let lines = wrap_caption("aaa bbb ccc", 80.0, &ten_per_char()).unwrap();
        assert_eq!(lines_of(lines), vec!["AAA BBB", "CCC"]);
    }

    #[wasm_bindgen_test]
    fn test_wrap_caption_empty() {
        let lines = wrap_caption("", 100.0, &ten_per_char()).unwrap();
        assert_eq!(lines_of(lines), vec![""]);
    }

    #[wasm_bindgen_test]
    fn test_wrap_caption_propagates_throw() {
        let throws = js_sys::Function::new_with_args("text", "throw new Error('nope');");
        assert!(wrap_caption("a b", 100.0, &throws).is_err());
    }

    #[wasm_bindgen_test]
    fn test_wrap_caption_rejects_non_number() {
        let bad = js_sys::Function::new_with_args("text", "return 'wide';");
        assert!(wrap_caption("a b", 100.0, &bad).is_err());
    }

    #[wasm_bindgen_test]
    fn test_wrap_caption_for_image_anchor() {
        let value = wrap_caption_for_image("hello world", 1000, 800, JsValue::UNDEFINED).unwrap();
        let layout: CaptionLayout = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(layout.anchor, (100.0, 160.0));
        assert_eq!(layout.font_size, 80.0);
    }
}
