//! Raster snapshot encoding for the recognition request.
//!
//! The wire format is a PNG wrapped in a `data:image/png;base64,...` URL,
//! the standard lossless shape the recognition service accepts.

use image::ImageEncoder;

use crate::error::{RasterError, RasterResult};
use crate::surface::RasterSurface;

/// Encode the surface as PNG bytes.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(surface: &RasterSurface) -> RasterResult<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder
        .write_image(
            surface.data(),
            surface.width(),
            surface.height(),
            image::ColorType::Rgba8.into(),
        )
        .map_err(|e| RasterError::Encode(format!("PNG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

/// Encode the surface as a PNG data URL.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn to_data_uri(surface: &RasterSurface) -> RasterResult<String> {
    use base64::Engine;

    let png = encode_png(surface)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    Ok(format!("data:image/png;base64,{encoded}"))
}
