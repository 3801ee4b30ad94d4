use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use super::PickedImage;

/// Longest edge of the preview thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 48;

/// Formats Gemini accepts as inline data without conversion.
const PASSTHROUGH_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("the selection is empty")]
    Empty,

    #[error("unrecognized image format")]
    Unsupported,

    #[error("{source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    #[error("failed to re-encode image: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },
}

/// Upload payload for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub bytes: Arc<[u8]>,
}

/// Small RGB raster for the terminal preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// A decoded image owned by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
    pub upload: EncodedImage,
    pub thumbnail: Thumbnail,
}

impl SelectedImage {
    /// One-line description for the image panel, e.g. `cake.png  640×480  12.3 KiB`.
    pub fn summary(&self) -> String {
        let name = self.name.as_deref().unwrap_or("image");
        format!(
            "{}  {}×{}  {}",
            name,
            self.width,
            self.height,
            format_size(self.upload.bytes.len())
        )
    }
}

/// Decode a picked file into something the screen can show and upload.
///
/// PNG, JPEG and WebP within `max_dimension` are uploaded byte-for-byte;
/// anything else is scaled to fit and re-encoded as PNG.
pub fn decode_selection(
    picked: PickedImage,
    max_dimension: u32,
) -> Result<SelectedImage, ImageDecodeError> {
    let PickedImage { name, bytes } = picked;
    if bytes.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    let format = image::guess_format(&bytes).map_err(|_| ImageDecodeError::Unsupported)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|source| ImageDecodeError::Decode { source })?;

    let oversized = decoded.width() > max_dimension || decoded.height() > max_dimension;
    let upload = if PASSTHROUGH_FORMATS.contains(&format) && !oversized {
        EncodedImage {
            mime_type: format.to_mime_type(),
            bytes: Arc::from(bytes),
        }
    } else {
        tracing::debug!(
            ?format,
            width = decoded.width(),
            height = decoded.height(),
            "Re-encoding selection as PNG"
        );
        let scaled = if oversized {
            decoded.resize(max_dimension, max_dimension, FilterType::Triangle)
        } else {
            decoded.clone()
        };
        encode_png(&scaled)?
    };

    Ok(SelectedImage {
        name,
        width: decoded.width(),
        height: decoded.height(),
        upload,
        thumbnail: make_thumbnail(&decoded),
    })
}

fn encode_png(image: &DynamicImage) -> Result<EncodedImage, ImageDecodeError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|source| ImageDecodeError::Encode { source })?;
    Ok(EncodedImage {
        mime_type: ImageFormat::Png.to_mime_type(),
        bytes: Arc::from(out.into_inner()),
    })
}

fn make_thumbnail(image: &DynamicImage) -> Thumbnail {
    let rgb = image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| p.0).collect();
    Thumbnail {
        width,
        height,
        pixels,
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    }
}
