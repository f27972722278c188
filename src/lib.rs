//! # favicon-kit
//!
//! Turn one image into a complete favicon and web-app icon set: 23 PNG
//! icons, an Apple touch icon, a `favicon.ico`, a web manifest (under both
//! conventional names), a Windows `browserconfig.xml`, and a README, packed
//! into a single ZIP.
//!
//! # Architecture: One Pure Pipeline
//!
//! ```text
//! image bytes + branding  →  AssetMap (filename → bytes)  →  ZIP bytes
//! ```
//!
//! The core is a pure function of its inputs. It reads no files, keeps no
//! state between runs, and does not care how the image arrived: the CLI in
//! `main.rs` reads it from disk, but a web handler could pass an upload body
//! straight to [`pipeline::generate_archive`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrates a run, reports progress, maps failures to three error kinds |
//! | [`imaging`] | Decode, center-square crop, Lanczos3 resize, PNG encode, ICO container |
//! | [`manifest`] | Web manifest, tile config, and README documents |
//! | [`archive`] | ZIP assembly behind the [`archive::ArchiveWriter`] trait |
//! | [`icons`] | The constant icon table and conventional filenames |
//! | [`config`] | Branding parameters: TOML file + CLI layering, defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Square First, Then Resize
//!
//! The source is cropped to its largest centered square once, and every icon
//! is resampled from that square. Icons never letterbox or stretch, and odd
//! crop excess always lands on the trailing edge, so the result is the same
//! on every run.
//!
//! ## Deterministic Archives
//!
//! Members are written in filename order with a fixed timestamp. Feeding the
//! same image and branding twice produces byte-identical ZIPs, which makes
//! the output cacheable.
//!
//! ## Branding Is Passed Through
//!
//! Names and colors are not validated or escaped beyond what JSON requires.
//! Whatever the caller supplies appears verbatim in the manifest, tile
//! config, and README.

pub mod archive;
pub mod config;
pub mod icons;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod pipeline;

pub use archive::AssetMap;
pub use config::BrandingParams;
pub use pipeline::{PipelineError, generate_archive, generate_assets};

#[cfg(test)]
pub(crate) mod test_helpers;
