//! The fixed icon table and the conventional names of every generated file.
//!
//! The table is a compile-time constant: it is never mutated and carries no
//! lifecycle beyond the process. Order matters in exactly one place: the web
//! manifest lists icons in table order.
//!
//! | Prefix | Sizes | Consumer |
//! |---|---|---|
//! | `favicon-` | 16, 32, 48 | Desktop browser tabs |
//! | `apple-icon-` | 57 – 180 | iOS home screen |
//! | `android-icon-` | 96 – 512 | Android / PWA install |
//! | `ms-icon-` | 32, 70, 150, 310 | Windows tiles |

/// One row of the icon table: a square edge length and the PNG filename it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub filename: &'static str,
}

const fn spec(size: u32, filename: &'static str) -> IconSpec {
    IconSpec { size, filename }
}

/// Every PNG the pipeline renders from the normalized source.
pub const ICON_SPECS: &[IconSpec] = &[
    spec(16, "favicon-16x16.png"),
    spec(32, "favicon-32x32.png"),
    spec(48, "favicon-48x48.png"),
    spec(57, "apple-icon-57x57.png"),
    spec(60, "apple-icon-60x60.png"),
    spec(72, "apple-icon-72x72.png"),
    spec(76, "apple-icon-76x76.png"),
    spec(96, "android-icon-96x96.png"),
    spec(114, "apple-icon-114x114.png"),
    spec(120, "apple-icon-120x120.png"),
    spec(128, "android-icon-128x128.png"),
    spec(144, "android-icon-144x144.png"),
    spec(152, "apple-icon-152x152.png"),
    spec(167, "apple-icon-167x167.png"),
    spec(180, "apple-icon-180x180.png"),
    spec(192, "android-icon-192x192.png"),
    spec(256, "android-icon-256x256.png"),
    spec(384, "android-icon-384x384.png"),
    spec(512, "android-icon-512x512.png"),
    spec(150, "ms-icon-150x150.png"),
    spec(32, "ms-icon-32x32.png"),
    spec(70, "ms-icon-70x70.png"),
    spec(310, "ms-icon-310x310.png"),
];

/// Source of the `apple-touch-icon.png` alias.
pub const APPLE_TOUCH_SOURCE: &str = "apple-icon-180x180.png";
pub const APPLE_TOUCH_ICON: &str = "apple-touch-icon.png";

/// Icon re-listed in the manifest with the `"any maskable"` purpose.
pub const MASKABLE_SOURCE: &str = "android-icon-512x512.png";
pub const MASKABLE_SIZE: u32 = 512;

/// Edge length of the single frame packed into `favicon.ico`.
pub const ICO_FRAME_SIZE: u32 = 128;

pub const FAVICON_ICO: &str = "favicon.ico";
pub const WEB_MANIFEST: &str = "site.webmanifest";
pub const MANIFEST_JSON: &str = "manifest.json";
pub const BROWSERCONFIG: &str = "browserconfig.xml";
pub const README: &str = "README.txt";

/// Windows tile logos referenced by `browserconfig.xml`.
pub const TILE_70: &str = "ms-icon-70x70.png";
pub const TILE_150: &str = "ms-icon-150x150.png";
pub const TILE_310: &str = "ms-icon-310x310.png";

/// Files produced next to the table PNGs, in the order the CLI lists them.
pub const AUXILIARY_FILES: &[&str] = &[
    APPLE_TOUCH_ICON,
    FAVICON_ICO,
    WEB_MANIFEST,
    MANIFEST_JSON,
    BROWSERCONFIG,
    README,
];

/// Every filename a successful run produces.
pub fn expected_filenames() -> Vec<&'static str> {
    ICON_SPECS
        .iter()
        .map(|s| s.filename)
        .chain(AUXILIARY_FILES.iter().copied())
        .collect()
}

/// `"WxH"` size string used by the web manifest.
pub fn size_label(size: u32) -> String {
    format!("{size}x{size}")
}
