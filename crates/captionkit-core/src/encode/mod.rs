//! Image encoding pipeline for export.
//!
//! This module provides functionality for:
//! - Encoding rasters to JPEG with a fixed quality
//! - Size-bounded export that steps quality down until a byte budget is met
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use captionkit_core::encode::{encode_bounded, QualitySearch};
//!
//! let artifact = encode_bounded(&composite, 1_992_294, QualitySearch::default())?;
//! println!("{} bytes at quality {}", artifact.len(), artifact.quality);
//! ```

mod bounded;
mod jpeg;

pub use bounded::{
    encode_bounded, encode_bounded_with, estimated_bytes_from_base64_len, EncodedArtifact,
    QualitySearch,
};
pub use jpeg::{encode_jpeg, encode_raster_jpeg, EncodeError};
