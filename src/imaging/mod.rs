//! Image processing in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Square crop** | [`center_square`] + `crop_imm` |
//! | **Resize** | Lanczos3 via `image::imageops::resize` |
//! | **PNG** | `image::codecs::png::PngEncoder` |
//! | **ICO** | custom container writer ([`ico`]) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **ICO**: the multi-frame icon container writer

pub mod backend;
mod calculations;
pub mod ico;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{CropWindow, center_square};
pub use ico::{IcoFrame, encode_ico};
pub use rust_backend::{RESIZE_FILTER, RustBackend};
