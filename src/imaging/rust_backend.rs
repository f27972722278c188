//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, BMP, TIFF, WebP, ICO) | `image::load_from_memory` (format sniffed from content) |
//! | Square crop | [`center_square`] + `image::imageops::crop_imm` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (8-bit RGBA) |

use super::backend::{BackendError, ImageBackend};
use super::calculations::center_square;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

/// Resampling filter for every resize. Lanczos3 keeps edges crisp across
/// large downscale ratios such as 512 → 16.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, BackendError> {
        let img = image::load_from_memory(bytes).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(img.to_rgba8())
    }

    fn normalize(&self, image: &RgbaImage) -> RgbaImage {
        let window = center_square(image.width(), image.height());
        imageops::crop_imm(image, window.x, window.y, window.width, window.height).to_image()
    }

    fn resize(&self, image: &RgbaImage, edge: u32) -> RgbaImage {
        imageops::resize(image, edge, edge, RESIZE_FILTER)
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, BackendError> {
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| BackendError::Encode(format!("PNG encode failed: {e}")))?;
        Ok(buffer)
    }
}
