//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Source 1920x1080
//!     square 1080px
//!     001 favicon-16x16.png (16px, 812 B)
//!     002 favicon-32x32.png (32px, 2.1 KB)
//!     ...
//! Encoded 23 icons (1.4 MB)
//! favicon.ico (1 frame, 18.2 KB)
//! Metadata: site.webmanifest, manifest.json, browserconfig.xml, README.txt
//! Archive: 29 files, 1.3 MB
//! ```
//!
//! ## Icons
//!
//! ```text
//! Icons
//!     001 favicon-16x16.png  16x16
//!     ...
//! Also generated
//!     apple-touch-icon.png
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: they do no I/O.

use crate::archive::AssetMap;
use crate::icons::{self, IconSpec};
use crate::pipeline::PipelineEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count: `812 B`, `2.1 KB`, `1.4 MB`.
pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

// ============================================================================
// Pipeline progress
// ============================================================================

/// Format one pipeline event as display lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Decoded { width, height } => {
            vec![format!("Source {}x{}", width, height)]
        }
        PipelineEvent::Normalized { edge } => vec![format!("    square {}px", edge)],
        PipelineEvent::Resized {
            index,
            filename,
            size,
            bytes,
            ..
        } => vec![format!(
            "    {} {} ({}px, {})",
            format_index(*index),
            filename,
            size,
            format_bytes(*bytes)
        )],
        PipelineEvent::Encoded { count, bytes } => vec![format!(
            "Encoded {} icons ({})",
            count,
            format_bytes(*bytes)
        )],
        PipelineEvent::Containerized { frames, bytes } => {
            let noun = if *frames == 1 { "frame" } else { "frames" };
            vec![format!(
                "{} ({} {}, {})",
                icons::FAVICON_ICO,
                frames,
                noun,
                format_bytes(*bytes)
            )]
        }
        PipelineEvent::MetadataBuilt { files } => vec![format!("Metadata: {}", files.join(", "))],
        PipelineEvent::Assembled { members, bytes } => vec![format!(
            "Archive: {} files, {}",
            members,
            format_bytes(*bytes)
        )],
    }
}

// ============================================================================
// Asset listing
// ============================================================================

/// Format the generated files, one per line, in filename order.
pub fn format_asset_listing(assets: &AssetMap) -> Vec<String> {
    let width = assets.keys().map(|k| k.len()).max().unwrap_or(0);
    let mut lines = vec!["Files".to_string()];
    for (name, data) in assets {
        lines.push(format!(
            "    {:<width$}  {}",
            name,
            format_bytes(data.len()),
            width = width
        ));
    }
    lines
}

/// Print the generated files to stdout.
pub fn print_asset_listing(assets: &AssetMap) {
    for line in format_asset_listing(assets) {
        println!("{}", line);
    }
}

// ============================================================================
// Icon table
// ============================================================================

/// Format the fixed icon table and the auxiliary files.
pub fn format_icon_table(specs: &[IconSpec]) -> Vec<String> {
    let width = specs.iter().map(|s| s.filename.len()).max().unwrap_or(0);
    let mut lines = vec!["Icons".to_string()];
    for (i, spec) in specs.iter().enumerate() {
        lines.push(format!(
            "    {} {:<width$}  {}",
            format_index(i + 1),
            spec.filename,
            icons::size_label(spec.size),
            width = width
        ));
    }
    lines.push(String::new());
    lines.push("Also generated".to_string());
    for name in icons::AUXILIARY_FILES {
        lines.push(format!("    {}", name));
    }
    lines
}

/// Print the icon table to stdout.
pub fn print_icon_table(specs: &[IconSpec]) {
    for line in format_icon_table(specs) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
