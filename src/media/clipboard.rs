//! Clipboard access for pasting images.

use std::io::Cursor;

use arboard::Clipboard;
use image::{DynamicImage, ImageFormat, RgbaImage};

/// Handler for clipboard operations.
pub struct ClipboardHandler {
    clipboard: Clipboard,
}

impl ClipboardHandler {
    /// Create a new clipboard handler.
    pub fn new() -> Result<Self, arboard::Error> {
        let clipboard = Clipboard::new()?;
        Ok(Self { clipboard })
    }

    /// Read the clipboard image and encode it as PNG.
    ///
    /// Returns `Ok(None)` when the clipboard holds no image.
    pub fn image_png(&mut self) -> Result<Option<Vec<u8>>, String> {
        let data = match self.clipboard.get_image() {
            Ok(data) => data,
            Err(arboard::Error::ContentNotAvailable) => return Ok(None),
            Err(e) => return Err(format!("Failed to read clipboard image: {}", e)),
        };
        rgba_to_png(data.width, data.height, data.bytes.into_owned()).map(Some)
    }
}

fn rgba_to_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Vec<u8>, String> {
    let buffer = RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or_else(|| format!("Clipboard image buffer does not match {}×{}", width, height))?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode clipboard image: {}", e))?;
    Ok(out.into_inner())
}
