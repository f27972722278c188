//! Metadata documents shipped next to the icons.
//!
//! Three text documents are generated per run:
//!
//! | File | Content |
//! |---|---|
//! | `site.webmanifest`, `manifest.json` | Web app manifest (identical bytes) |
//! | `browserconfig.xml` | Windows tile configuration |
//! | `README.txt` | Short human-readable note |
//!
//! Branding values are inserted verbatim. The manifest goes through
//! `serde_json`, so it is always structurally valid JSON, but nothing else is
//! escaped: markup in a name or color lands in `browserconfig.xml` as-is.

use crate::config::Branding;
use crate::icons::{self, IconSpec};
use serde::{Deserialize, Serialize};

pub const PNG_MIME: &str = "image/png";
pub const START_URL: &str = "/";
pub const DISPLAY_MODE: &str = "standalone";
pub const MASKABLE_PURPOSE: &str = "any maskable";

/// One entry in the manifest's `icons` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub src: String,
    /// `"WxH"`, e.g. `"192x192"`.
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl IconDescriptor {
    pub fn png(src: &str, size: u32) -> Self {
        Self {
            src: src.to_string(),
            sizes: icons::size_label(size),
            mime_type: PNG_MIME.to_string(),
            purpose: None,
        }
    }
}

/// Web app manifest, serialized to `site.webmanifest` and `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<IconDescriptor>,
}

impl ManifestDocument {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the manifest from resolved branding and the generated PNG icons.
///
/// Icons are listed in table order, then the 512px icon is listed a second
/// time with purpose `"any maskable"`. Non-PNG entries are skipped.
pub fn build_manifest(branding: &Branding, specs: &[IconSpec]) -> ManifestDocument {
    let mut descriptors: Vec<IconDescriptor> = specs
        .iter()
        .filter(|s| s.filename.ends_with(".png"))
        .map(|s| IconDescriptor::png(s.filename, s.size))
        .collect();
    descriptors.push(IconDescriptor {
        purpose: Some(MASKABLE_PURPOSE.to_string()),
        ..IconDescriptor::png(icons::MASKABLE_SOURCE, icons::MASKABLE_SIZE)
    });

    ManifestDocument {
        name: branding.name.clone(),
        short_name: branding.short_name.clone(),
        start_url: START_URL.to_string(),
        display: DISPLAY_MODE.to_string(),
        background_color: branding.background_color.clone(),
        theme_color: branding.theme_color.clone(),
        icons: descriptors,
    }
}

/// Windows tile configuration with the tile color substituted.
pub fn build_browserconfig(tile_color: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
  <msapplication>
    <tile>
      <square70x70logo src="{tile70}"/>
      <square150x150logo src="{tile150}"/>
      <square310x310logo src="{tile310}"/>
      <TileColor>{tile_color}</TileColor>
    </tile>
  </msapplication>
</browserconfig>"#,
        tile70 = icons::TILE_70,
        tile150 = icons::TILE_150,
        tile310 = icons::TILE_310,
    )
}

/// Plain-text note placed at the archive root.
pub fn build_readme(name: &str, theme_color: &str) -> String {
    format!(
        "Generated favicons for {name}\n\nAll icons are in the root of the ZIP.\nTheme color: {theme_color}\n"
    )
}
