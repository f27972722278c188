//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the operations the pipeline needs from
//! an imaging library: decode, square crop, resize, and PNG encode. Keeping
//! them behind a trait lets orchestrator tests substitute a recording mock
//! and run without touching real pixel data.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Trait for image processing backends.
///
/// Images travel between operations as 8-bit RGBA buffers, so every backend
/// agrees on one color model and the encoders never see anything they cannot
/// represent.
pub trait ImageBackend: Sync {
    /// Decode raw bytes of any supported raster format. The format is sniffed
    /// from the content.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, BackendError>;

    /// Crop to the largest centered square.
    fn normalize(&self, image: &RgbaImage) -> RgbaImage;

    /// Resample to exactly `edge` x `edge` pixels. Upscaling and downscaling
    /// are both supported.
    fn resize(&self, image: &RgbaImage, edge: u32) -> RgbaImage;

    /// Encode as a lossless PNG byte stream.
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, BackendError>;
}
