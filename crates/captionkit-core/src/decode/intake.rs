//! File intake filtering.

/// Returns true if a dropped file's declared media type is an image type.
///
/// Only the `image/` prefix is checked; the actual format is sniffed from
/// content at decode time.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}
