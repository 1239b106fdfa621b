//! Image decoding for caption sources.
//!
//! This module provides functionality for:
//! - Filtering dropped files by declared media type
//! - Decoding JPEG, PNG, GIF, WebP and BMP bytes into an RGB [`Raster`]
//! - Applying EXIF orientation so the raster matches what the browser shows
//!
//! # Examples
//!
//! ```ignore
//! use captionkit_core::decode::{decode_image, is_image_media_type};
//!
//! if is_image_media_type("image/png") {
//!     let raster = decode_image(&bytes)?;
//!     println!("Decoded {}x{} image", raster.width, raster.height);
//! }
//! ```

mod intake;
mod reader;
mod types;

pub use intake::is_image_media_type;
pub use reader::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, Raster};
