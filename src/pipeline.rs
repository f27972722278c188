//! Asset generation pipeline.
//!
//! One run turns an uploaded image plus branding into the full icon set:
//!
//! ```text
//! bytes ─ decode ─ normalize ─┬─ resize × 23 ─ PNG ──────────────┐
//!                             ├─ resize 128 ─ PNG ─ ICO ─────────┤
//!                             └─ (branding) manifest, tiles, README
//!                                                                ▼
//!                                                 AssetMap ─ ZIP bytes
//! ```
//!
//! Stages run strictly in order and the first failure ends the run; no
//! partial asset map or archive is ever returned. A run is single-threaded
//! and shares nothing with other runs except the constant icon table, so a
//! server may call [`generate_archive`] from as many requests at once as it
//! likes.
//!
//! ## Errors
//!
//! | Variant | Cause | Fault |
//! |---|---|---|
//! | [`PipelineError::Decode`] | Unreadable or unsupported input | client |
//! | [`PipelineError::Encode`] | PNG, ICO, or manifest serialization failed | server |
//! | [`PipelineError::Archive`] | ZIP assembly failed | server |
//!
//! ## Progress
//!
//! Pass a `Sender<PipelineEvent>` to observe each stage. The pipeline never
//! blocks on the receiver, and a dropped receiver is ignored.

use crate::archive::{ArchiveError, ArchiveWriter, AssetMap, ZipArchiver};
use crate::config::BrandingParams;
use crate::icons::{self, ICON_SPECS, IconSpec};
use crate::imaging::{BackendError, IcoFrame, ImageBackend, RustBackend, encode_ico};
use crate::manifest;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] BackendError),
    #[error("Failed to encode {asset}: {source}")]
    Encode {
        asset: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to assemble archive: {0}")]
    Archive(#[from] ArchiveError),
}

impl PipelineError {
    /// True when the caller sent something unusable. A transport maps this
    /// to a client-fault status and everything else to a server fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, PipelineError::Decode(_))
    }

    fn encode(asset: &str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        PipelineError::Encode {
            asset: asset.to_string(),
            source: Box::new(source),
        }
    }
}

/// Progress event emitted once per stage transition.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Decoded {
        width: u32,
        height: u32,
    },
    Normalized {
        edge: u32,
    },
    /// One table icon resized and encoded. `index` is 1-based.
    Resized {
        index: usize,
        total: usize,
        filename: String,
        size: u32,
        bytes: usize,
    },
    Encoded {
        count: usize,
        bytes: usize,
    },
    Containerized {
        frames: usize,
        bytes: usize,
    },
    MetadataBuilt {
        files: Vec<String>,
    },
    Assembled {
        members: usize,
        bytes: usize,
    },
}

fn emit(events: Option<&Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

/// Generate every asset using the production backend.
pub fn generate_assets(image: &[u8], params: &BrandingParams) -> Result<AssetMap, PipelineError> {
    generate_assets_with_backend(&RustBackend::new(), image, params, None)
}

/// Generate every asset and pack them into a ZIP, using the production backend.
pub fn generate_archive(image: &[u8], params: &BrandingParams) -> Result<Vec<u8>, PipelineError> {
    generate_archive_with(&RustBackend::new(), &ZipArchiver::new(), image, params, None)
}

/// Generate assets using a specific backend (allows testing with mock).
pub fn generate_assets_with_backend(
    backend: &impl ImageBackend,
    image: &[u8],
    params: &BrandingParams,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<AssetMap, PipelineError> {
    let source = backend.decode(image).map_err(PipelineError::Decode)?;
    emit(
        events,
        PipelineEvent::Decoded {
            width: source.width(),
            height: source.height(),
        },
    );

    let square = backend.normalize(&source);
    drop(source);
    emit(
        events,
        PipelineEvent::Normalized {
            edge: square.width(),
        },
    );

    let mut assets = AssetMap::new();
    render_icon_table(backend, &square, ICON_SPECS, &mut assets, events)?;

    if let Some(touch) = assets.get(icons::APPLE_TOUCH_SOURCE).cloned() {
        assets.insert(icons::APPLE_TOUCH_ICON.to_string(), touch);
    }

    let ico = render_favicon_ico(backend, &square)?;
    emit(
        events,
        PipelineEvent::Containerized {
            frames: 1,
            bytes: ico.len(),
        },
    );
    assets.insert(icons::FAVICON_ICO.to_string(), ico);

    let metadata = build_metadata(params, ICON_SPECS)?;
    emit(
        events,
        PipelineEvent::MetadataBuilt {
            files: metadata.iter().map(|(name, _)| name.clone()).collect(),
        },
    );
    assets.extend(metadata);

    Ok(assets)
}

/// Generate assets and assemble them with the given archive writer.
pub fn generate_archive_with(
    backend: &impl ImageBackend,
    archiver: &impl ArchiveWriter,
    image: &[u8],
    params: &BrandingParams,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<Vec<u8>, PipelineError> {
    let assets = generate_assets_with_backend(backend, image, params, events)?;
    assemble(archiver, &assets, events)
}

/// Pack an already generated asset map. The final stage of a run.
pub fn assemble(
    archiver: &impl ArchiveWriter,
    assets: &AssetMap,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<Vec<u8>, PipelineError> {
    let archive = archiver.assemble(assets)?;
    emit(
        events,
        PipelineEvent::Assembled {
            members: assets.len(),
            bytes: archive.len(),
        },
    );
    Ok(archive)
}

/// Resize and PNG-encode every table entry into `assets`.
fn render_icon_table(
    backend: &impl ImageBackend,
    square: &image::RgbaImage,
    specs: &[IconSpec],
    assets: &mut AssetMap,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<(), PipelineError> {
    let mut total_bytes = 0;
    for (i, spec) in specs.iter().enumerate() {
        let resized = backend.resize(square, spec.size);
        let png = backend
            .encode_png(&resized)
            .map_err(|e| PipelineError::encode(spec.filename, e))?;
        total_bytes += png.len();
        emit(
            events,
            PipelineEvent::Resized {
                index: i + 1,
                total: specs.len(),
                filename: spec.filename.to_string(),
                size: spec.size,
                bytes: png.len(),
            },
        );
        assets.insert(spec.filename.to_string(), png);
    }
    emit(
        events,
        PipelineEvent::Encoded {
            count: specs.len(),
            bytes: total_bytes,
        },
    );
    Ok(())
}

/// A dedicated resize feeds the ICO, independent of the icon table.
fn render_favicon_ico(
    backend: &impl ImageBackend,
    square: &image::RgbaImage,
) -> Result<Vec<u8>, PipelineError> {
    let frame = backend.resize(square, icons::ICO_FRAME_SIZE);
    let png = backend
        .encode_png(&frame)
        .map_err(|e| PipelineError::encode(icons::FAVICON_ICO, e))?;
    encode_ico(&[IcoFrame {
        width: frame.width(),
        height: frame.height(),
        png,
    }])
    .map_err(|e| PipelineError::encode(icons::FAVICON_ICO, e))
}

/// Manifest (twice), tile config, and README.
fn build_metadata(
    params: &BrandingParams,
    specs: &[IconSpec],
) -> Result<Vec<(String, Vec<u8>)>, PipelineError> {
    let branding = params.resolve();
    let manifest_json = manifest::build_manifest(&branding, specs)
        .to_json()
        .map_err(|e| PipelineError::encode(icons::WEB_MANIFEST, e))?
        .into_bytes();

    Ok(vec![
        (icons::WEB_MANIFEST.to_string(), manifest_json.clone()),
        (icons::MANIFEST_JSON.to_string(), manifest_json),
        (
            icons::BROWSERCONFIG.to_string(),
            manifest::build_browserconfig(&branding.tile_color).into_bytes(),
        ),
        (
            icons::README.to_string(),
            manifest::build_readme(&branding.name, &branding.theme_color).into_bytes(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::ExhaustedWriter;
    use crate::archive::write_zip;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::collections::BTreeSet;
    use std::sync::mpsc;

    fn expected_names() -> BTreeSet<String> {
        icons::expected_filenames()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Archive writer that always fails, standing in for I/O exhaustion.
    struct FailingArchiver;

    impl ArchiveWriter for FailingArchiver {
        fn assemble(&self, assets: &AssetMap) -> Result<Vec<u8>, ArchiveError> {
            write_zip(
                ExhaustedWriter::new(16),
                assets,
                zip::CompressionMethod::Stored,
            )
            .map(|_| Vec::new())
        }
    }

    #[test]
    fn produces_exactly_the_expected_files() {
        let backend = MockBackend::with_source(300, 200);
        let assets =
            generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
                .unwrap();

        let names: BTreeSet<String> = assets.keys().cloned().collect();
        assert_eq!(names, expected_names());
        assert_eq!(assets.len(), 29);
        assert_eq!(assets.keys().filter(|k| k.ends_with(".png")).count(), 24);
    }

    #[test]
    fn each_table_icon_gets_its_own_size() {
        let backend = MockBackend::with_source(600, 600);
        let assets =
            generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
                .unwrap();

        for spec in ICON_SPECS {
            assert_eq!(
                assets[spec.filename],
                format!("png:{0}x{0}", spec.size).into_bytes(),
                "{}",
                spec.filename
            );
        }
    }

    #[test]
    fn apple_touch_icon_aliases_180() {
        let backend = MockBackend::with_source(600, 600);
        let assets =
            generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
                .unwrap();
        assert_eq!(
            assets["apple-touch-icon.png"],
            assets["apple-icon-180x180.png"]
        );
    }

    #[test]
    fn operation_sequence() {
        let backend = MockBackend::with_source(640, 480);
        generate_assets_with_backend(&backend, b"12345", &BrandingParams::default(), None)
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops[0], RecordedOp::Decode(5));
        assert_eq!(
            ops[1],
            RecordedOp::Normalize {
                width: 640,
                height: 480
            }
        );

        let resizes: Vec<u32> = ops
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Resize { from, to } => {
                    assert_eq!(*from, 480, "resizes start from the normalized square");
                    Some(*to)
                }
                _ => None,
            })
            .collect();
        let mut expected: Vec<u32> = ICON_SPECS.iter().map(|s| s.size).collect();
        expected.push(128);
        assert_eq!(resizes, expected);
    }

    #[test]
    fn favicon_ico_wraps_a_dedicated_128_frame() {
        let backend = MockBackend::with_source(64, 64);
        let assets =
            generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
                .unwrap();

        let ico = &assets["favicon.ico"];
        assert_eq!(&ico[..6], &[0, 0, 1, 0, 1, 0]);
        assert_eq!(ico[6], 128);
        assert_eq!(ico[7], 128);
        assert!(ico.ends_with(b"png:128x128"));
    }

    #[test]
    fn manifest_copies_are_identical() {
        let backend = MockBackend::with_source(64, 64);
        let assets =
            generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
                .unwrap();
        assert_eq!(assets["manifest.json"], assets["site.webmanifest"]);
    }

    #[test]
    fn branding_reaches_documents() {
        let backend = MockBackend::with_source(64, 64);
        let params = BrandingParams {
            name: Some("Test App".to_string()),
            theme_color: Some("#123456".to_string()),
            ..BrandingParams::default()
        };
        let assets = generate_assets_with_backend(&backend, b"img", &params, None).unwrap();

        let manifest: serde_json::Value =
            serde_json::from_slice(&assets["manifest.json"]).unwrap();
        assert_eq!(manifest["theme_color"], "#123456");
        assert_eq!(manifest["name"], "Test App");

        let readme = String::from_utf8(assets["README.txt"].clone()).unwrap();
        assert!(readme.contains("Test App"));
        assert!(readme.contains("#123456"));

        let tiles = String::from_utf8(assets["browserconfig.xml"].clone()).unwrap();
        assert!(tiles.contains("<TileColor>#123456</TileColor>"));
    }

    #[test]
    fn decode_failure_is_client_fault() {
        let backend = MockBackend::new();
        let err = generate_assets_with_backend(&backend, b"", &BrandingParams::default(), None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
        assert!(err.is_client_fault());
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn encode_failure_stops_the_run() {
        let backend = MockBackend::with_source(100, 100).failing_encode_at(72);
        let err = generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
            .unwrap_err();

        match &err {
            PipelineError::Encode { asset, .. } => assert_eq!(asset, "apple-icon-72x72.png"),
            other => panic!("expected encode error, got {other:?}"),
        }
        assert!(!err.is_client_fault());

        // Nothing after the failing icon was attempted
        let last = backend.get_operations().last().cloned().unwrap();
        assert_eq!(
            last,
            RecordedOp::EncodePng {
                width: 72,
                height: 72
            }
        );
    }

    #[test]
    fn table_icon_fails_before_ico_frame() {
        // 128 is both a table size and the ICO frame size; the table runs first
        let backend = MockBackend::with_source(100, 100).failing_encode_at(128);
        let err = generate_assets_with_backend(&backend, b"img", &BrandingParams::default(), None)
            .unwrap_err();
        match err {
            PipelineError::Encode { asset, .. } => assert_eq!(asset, "android-icon-128x128.png"),
            other => panic!("expected encode error, got {other:?}"),
        }
    }

    #[test]
    fn archive_failure_is_server_fault() {
        let backend = MockBackend::with_source(32, 32);
        let err = generate_archive_with(
            &backend,
            &FailingArchiver,
            b"img",
            &BrandingParams::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Archive(_)));
        assert!(!err.is_client_fault());
    }

    #[test]
    fn events_follow_stage_order() {
        let backend = MockBackend::with_source(50, 40);
        let (tx, rx) = mpsc::channel();
        generate_archive_with(
            &backend,
            &ZipArchiver::stored(),
            b"img",
            &BrandingParams::default(),
            Some(&tx),
        )
        .unwrap();
        drop(tx);

        let events: Vec<PipelineEvent> = rx.iter().collect();
        assert_eq!(
            events[0],
            PipelineEvent::Decoded {
                width: 50,
                height: 40
            }
        );
        assert_eq!(events[1], PipelineEvent::Normalized { edge: 40 });

        let resized = &events[2..2 + ICON_SPECS.len()];
        for (i, event) in resized.iter().enumerate() {
            assert!(
                matches!(event, PipelineEvent::Resized { index, total: 23, .. } if *index == i + 1)
            );
        }

        let tail = &events[2 + ICON_SPECS.len()..];
        assert!(matches!(tail[0], PipelineEvent::Encoded { count: 23, .. }));
        assert!(matches!(tail[1], PipelineEvent::Containerized { frames: 1, .. }));
        assert!(
            matches!(&tail[2], PipelineEvent::MetadataBuilt { files } if files.len() == 4)
        );
        assert!(matches!(tail[3], PipelineEvent::Assembled { members: 29, .. }));
        assert_eq!(tail.len(), 4);
    }

    #[test]
    fn dropped_receiver_does_not_fail_the_run() {
        let backend = MockBackend::with_source(10, 10);
        let (tx, rx) = mpsc::channel();
        drop(rx);
        assert!(
            generate_assets_with_backend(
                &backend,
                b"img",
                &BrandingParams::default(),
                Some(&tx)
            )
            .is_ok()
        );
    }

    #[test]
    fn real_backend_one_by_one_image() {
        let png = crate::test_helpers::encode_test_png(&crate::test_helpers::gradient_image(1, 1));
        let assets = generate_assets(&png, &BrandingParams::default()).unwrap();
        assert_eq!(assets.len(), 29);

        let icon = image::load_from_memory(&assets["android-icon-512x512.png"]).unwrap();
        assert_eq!((icon.width(), icon.height()), (512, 512));
    }
}
