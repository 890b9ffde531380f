//! Decode, composite and encode operations over RGBA bitmaps

use std::io::Cursor;

use image::{imageops, ImageFormat, RgbaImage};

use crate::core::error::{AppError, AppResult};

/// Decodes raw image bytes and normalizes to RGBA8
///
/// # Arguments
/// * `bytes` - Encoded image bytes (any format enabled on the `image` crate)
///
/// # Returns
/// The decoded bitmap, or `AppError::Decode` if the bytes are not a valid image
pub fn decode_rgba(bytes: &[u8]) -> AppResult<RgbaImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

/// Alpha-blends `overlay` over `photo` (source-over) into a new bitmap
///
/// Both inputs are left untouched. The overlay must already be resized to the
/// photo's exact dimensions; anything else is a wiring bug upstream and comes
/// back as `AppError::DimensionMismatch`.
pub fn composite(photo: &RgbaImage, overlay: &RgbaImage) -> AppResult<RgbaImage> {
    if photo.dimensions() != overlay.dimensions() {
        let (photo_width, photo_height) = photo.dimensions();
        let (overlay_width, overlay_height) = overlay.dimensions();
        return Err(AppError::DimensionMismatch {
            photo_width,
            photo_height,
            overlay_width,
            overlay_height,
        });
    }

    let mut stamped = photo.clone();
    imageops::overlay(&mut stamped, overlay, 0, 0);
    Ok(stamped)
}

/// Serializes a bitmap to PNG bytes
pub fn encode_png(bitmap: &RgbaImage) -> AppResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}
