//! Shared test utilities for the favicon-kit test suite.
//!
//! Synthetic images are generated in memory so tests never depend on fixture
//! files, and archive helpers read a ZIP back into an [`AssetMap`] for
//! whole-map comparisons.

use crate::archive::AssetMap;
use image::{Rgba, RgbaImage};
use std::io::{Cursor, Read};

/// An image whose pixels encode their own coordinates, so crops and offsets
/// can be checked by sampling. Coordinates wrap at 256.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, (x ^ y) as u8, 255 - ((x + y) % 128) as u8])
    })
}

/// Encode with the `image` crate's own PNG path, independent of the backend under test.
pub fn encode_test_png(image: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    buffer
}

/// Read every member of a ZIP into a filename → bytes map.
pub fn read_zip(bytes: &[u8]) -> AssetMap {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut members = AssetMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        let previous = members.insert(file.name().to_string(), data);
        assert!(previous.is_none(), "duplicate member {}", file.name());
    }
    members
}
