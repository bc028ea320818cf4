use image::{GrayImage, Rgb, RgbImage};
use laoskit_camtools::{DocumentInfo, LaosDocument, PixelBuffer, RasterError};
use laoskit_settings::{keys, FeatureTable, LaserConfig};
use std::fs;
use tempfile::TempDir;

fn config() -> LaserConfig {
    let mut features = FeatureTable::new();
    features.set(keys::PAGE_LENGTH, "8");
    features.set(keys::PAGE_WIDTH, "2");
    features.set(keys::SCALE, "1");
    features.set(keys::BOUNDARY_BOX, "False");
    features.set(keys::PROLOG, "");
    features.set(keys::TRAILER, "");
    LaserConfig::from_features(&features)
}

fn info() -> DocumentInfo {
    DocumentInfo {
        version: "test".to_string(),
        filename: "page.ps".to_string(),
        date: "now".to_string(),
    }
}

fn render_with_raster(path: &std::path::Path) -> String {
    let mut doc = LaosDocument::new(Vec::new(), config(), info());
    doc.open().unwrap();
    doc.attach_raster_file(path);
    String::from_utf8(doc.close().unwrap()).unwrap()
}

#[test]
fn test_png_raster_is_engraved() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("page.png");

    let mut img = RgbImage::from_pixel(8, 2, Rgb([255, 255, 255]));
    for x in 2..=5 {
        img.put_pixel(x, 0, Rgb([0, 0, 0]));
    }
    img.save(&png).unwrap();

    let out = render_with_raster(&png);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(
        &lines[..5],
        ["7 100 100000", "7 101 5000", "0 2 2", "9 1 3 15", "1 5 2"]
    );
}

#[test]
fn test_loaded_buffer_matches_file() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("gradient.png");
    let img = RgbImage::from_fn(3, 2, |x, y| Rgb([(x * 100) as u8, (y * 100) as u8, 7]));
    img.save(&png).unwrap();

    let buffer = PixelBuffer::from_file(&png).unwrap();
    assert_eq!(buffer.row(1)[2], [200, 100, 7]);
}

#[test]
fn test_grayscale_png_is_skipped() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("gray.png");
    GrayImage::new(8, 2).save(&png).unwrap();

    assert!(matches!(
        PixelBuffer::from_file(&png),
        Err(RasterError::UnsupportedLayout(_))
    ));
    let out = render_with_raster(&png);
    assert!(!out.lines().any(|l| l.starts_with("9 ")));
}

#[test]
fn test_corrupt_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("broken.png");
    fs::write(&png, b"not an image").unwrap();

    assert!(matches!(
        PixelBuffer::from_file(&png),
        Err(RasterError::Decode(_))
    ));
    let out = render_with_raster(&png);
    assert_eq!(out, "7 100 100000\n7 101 5000\n7 100 100000\n7 101 7000\n7 100 10000\n7 101 10000\n");
}
