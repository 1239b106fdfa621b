//! CaptionKit Core - caption overlay and thumbnail export
//!
//! This crate provides the image side of CaptionKit: decoding a dropped
//! image, wrapping and placing a tilted caption, compositing it onto the
//! image, and exporting the result as a size-bounded JPEG.
//!
//! Everything here is synchronous and platform independent. The browser
//! bindings live in `captionkit-wasm`.

pub mod composite;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod session;
pub mod style;
pub mod surface;

pub use composite::{composite, draw_layout, render, CaptionOverlay, CompositeError};
pub use decode::{decode_image, is_image_media_type, DecodeError, Raster};
pub use encode::{encode_bounded, EncodeError, EncodedArtifact, QualitySearch};
pub use layout::{wrap, CaptionLayout, Transform};
pub use session::{CaptionSession, ExportedFile, LoadTicket, StageKind};
pub use style::{CaptionStyle, ExportSettings, DEFAULT_EXPORT_FILE_NAME, DEFAULT_MAX_EXPORT_BYTES};
pub use surface::{CaptionFont, FontError, RasterSurface, Surface, TextMeasure};
