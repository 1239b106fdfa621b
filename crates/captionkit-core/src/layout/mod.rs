//! Caption text layout.
//!
//! - [`wrap`] breaks a caption into lines against a width measurement
//! - [`CaptionLayout`] places those lines on an image: font size, anchor,
//!   line spacing and the rotation of the block
//! - [`Transform`] (`tiny_skia::Transform`) is the affine matrix shared with
//!   the raster surface
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the image, y axis pointing down
//! - Each line is positioned by its baseline origin
//! - Rotation angles are in degrees; negative tilts counter-clockwise on screen

mod position;
mod wrap;

pub use position::CaptionLayout;
pub use tiny_skia::Transform;
pub use wrap::{wrap, wrap_words};
