//! On-demand image resizing for the image endpoint.
//!
//! The `image` crate is kept behind this module; the rest of the system
//! treats resizing as `resize(bytes, width) -> bytes`.

use std::io::Cursor;

use image::imageops::FilterType;

use crate::content::ContentError;

/// Resize `bytes` to `width`, preserving aspect ratio and source format.
///
/// Scales up as well as down, matching the behavior of serving whatever
/// width the client asked for.
///
/// # Errors
/// Returns an error if the bytes cannot be decoded or re-encoded.
pub fn resize_to_width(bytes: &[u8], width: u32) -> Result<Vec<u8>, ContentError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let resized = decoded.resize(width, u32::MAX, FilterType::Lanczos3);

    let mut out = Cursor::new(Vec::new());
    resized.write_to(&mut out, format)?;
    Ok(out.into_inner())
}

/// Content type served for an image file name, from its extension.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}
