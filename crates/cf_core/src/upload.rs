use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use crate::{Error, Result};

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Checks the upload's file extension against the accepted image types.
pub fn check_extension(file_name: &str) -> Result<()> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Unsupported image type for '{}'. Upload a png, jpg or jpeg file",
            file_name
        )))
    }
}

/// Re-encodes an uploaded image as JPEG and returns it base64-encoded.
pub fn encode_upload(file_name: &str, bytes: &[u8]) -> Result<String> {
    check_extension(file_name)?;
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::Image(format!("could not read '{}': {}", file_name, e)))?;
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .map_err(|e| Error::Image(format!("could not encode '{}' as JPEG: {}", file_name, e)))?;
    tracing::debug!("Encoded {} ({} bytes) as {} bytes of JPEG", file_name, bytes.len(), jpeg.len());

    Ok(STANDARD.encode(jpeg))
}
