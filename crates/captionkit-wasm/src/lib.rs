//! CaptionKit WASM - WebAssembly bindings for CaptionKit
//!
//! This crate exposes the captionkit-core functionality to the browser page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for rasters and export results
//! - `decode` - File intake (media type filter, image decoding)
//! - `layout` - Caption wrapping and layout
//! - `render` - One-shot caption compositing
//! - `encode` - JPEG export, fixed quality or size-bounded
//! - `session` - The stateful drop / caption / export workflow
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCaptionSession } from '@captionkit/wasm';
//!
//! await init();
//! const session = new JsCaptionSession();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod layout;
mod logger;
mod render;
mod session;
mod types;

pub use decode::{decode_image, image_orientation, is_image_media_type};
pub use encode::{encode_jpeg, encode_jpeg_bounded, estimated_bytes_from_base64_len};
pub use layout::{wrap_caption, wrap_caption_for_image};
pub use render::render_caption;
pub use session::{JsCaptionSession, JsLoadTicket};
pub use types::{JsEncodedArtifact, JsExportedFile, JsRaster};

/// Initialize the WASM module (called automatically on load).
///
/// Routes core log output to the browser console at `info` level.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`). Returns false for an unknown name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logger::parse_level(level) {
        Some(filter) => {
            logger::install(filter);
            true
        }
        None => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
