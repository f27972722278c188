//! Branding configuration.
//!
//! Branding parameters come from up to two layers, later layers winning:
//!
//! ```text
//! favicon.toml        --config FILE (optional)
//! CLI flags           --name, --theme-color, ...
//! ```
//!
//! Defaults are applied last, by [`BrandingParams::resolve`]. A field that is
//! absent *or empty* takes its default, and `tile_color` falls back to the
//! resolved `theme_color` rather than to a fixed value.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//! name = "My App"
//! short_name = "App"
//! theme_color = "#ffffff"
//! background_color = "#ffffff"
//! # tile_color = "#ffffff"   # defaults to theme_color
//! ```
//!
//! Unknown keys are rejected to catch typos early. Values are never
//! validated: colors and names pass through verbatim into the generated
//! manifest, tile config, and README.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_NAME: &str = "My App";
pub const DEFAULT_SHORT_NAME: &str = "App";
pub const DEFAULT_THEME_COLOR: &str = "#ffffff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Caller-supplied branding, before defaults.
///
/// Every field is optional; an empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_color: Option<String>,
}

/// Branding with every default applied. This is what the generators consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub name: String,
    pub short_name: String,
    pub theme_color: String,
    pub background_color: String,
    pub tile_color: String,
}

impl Default for Branding {
    fn default() -> Self {
        BrandingParams::default().resolve()
    }
}

/// Non-empty value or `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BrandingParams {
    /// Apply defaults to absent or empty fields.
    pub fn resolve(&self) -> Branding {
        let theme_color = present(&self.theme_color)
            .unwrap_or(DEFAULT_THEME_COLOR)
            .to_string();
        Branding {
            name: present(&self.name).unwrap_or(DEFAULT_NAME).to_string(),
            short_name: present(&self.short_name)
                .unwrap_or(DEFAULT_SHORT_NAME)
                .to_string(),
            background_color: present(&self.background_color)
                .unwrap_or(DEFAULT_BACKGROUND_COLOR)
                .to_string(),
            tile_color: present(&self.tile_color)
                .unwrap_or(&theme_color)
                .to_string(),
            theme_color,
        }
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a branding config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional file layer and the CLI layer, then deserialize.
///
/// Unknown keys in either layer are rejected.
pub fn resolve_params(
    file: Option<toml::Value>,
    cli: &BrandingParams,
) -> Result<BrandingParams, ConfigError> {
    let base = file.unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()));
    let overlay = toml::Value::try_from(cli)?;
    Ok(merge_toml(base, overlay).try_into()?)
}

/// Load branding from an optional config file with CLI values layered on top.
pub fn load_params(
    path: Option<&Path>,
    cli: &BrandingParams,
) -> Result<BrandingParams, ConfigError> {
    let file = path.map(load_raw_config).transpose()?;
    resolve_params(file, cli)
}

/// Returns a fully-commented stock `favicon.toml`.
///
/// Used by the `gen-config` CLI command. Every key is commented out, so the
/// file parses to an empty [`BrandingParams`] and every default applies.
pub fn stock_config_toml() -> &'static str {
    r##"# favicon-kit branding
# ====================
# All settings are optional. Uncomment the ones you want to change.
# Values shown below are the defaults. Empty strings also mean "default".
# Unknown keys will cause an error.
#
# Values are copied verbatim into site.webmanifest, manifest.json,
# browserconfig.xml and README.txt. Colors are not validated.

# Full application name (manifest "name", README title).
# name = "My App"

# Short name for home screens (manifest "short_name").
# short_name = "App"

# Browser UI color (manifest "theme_color", README).
# theme_color = "#ffffff"

# Splash screen background (manifest "background_color").
# background_color = "#ffffff"

# Windows tile color (browserconfig.xml <TileColor>).
# Defaults to theme_color when unset.
# tile_color = "#ffffff"
"##
}
