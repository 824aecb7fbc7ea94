use image::{Rgb, RgbImage, Rgba, RgbaImage};
use media_ripper::{convert_and_replace, is_convertible};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let image = RgbaImage::from_pixel(8, 8, Rgba([200, 40, 40, 255]));
    image.save(&path).unwrap();
    path
}

fn write_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_pixel(8, 8, Rgb([40, 40, 200]));
    image.save(&path).unwrap();
    path
}

#[test]
fn test_png_is_replaced_by_webp_sibling() {
    let temp_dir = tempdir().unwrap();
    let png_path = write_png(temp_dir.path(), "sample.png");

    let webp_path = convert_and_replace(&png_path).unwrap();

    assert_eq!(webp_path, temp_dir.path().join("sample.webp"));
    assert!(webp_path.exists(), "converted file should exist");
    assert!(!png_path.exists(), "original file should be gone");

    // WebP files are RIFF containers.
    let bytes = fs::read(&webp_path).unwrap();
    assert!(bytes.len() > 12);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WEBP");
}

#[test]
fn test_jpeg_is_replaced_by_webp_sibling() {
    let temp_dir = tempdir().unwrap();
    let jpeg_path = write_jpeg(temp_dir.path(), "sample.jpg");

    let webp_path = convert_and_replace(&jpeg_path).unwrap();

    assert_eq!(webp_path, temp_dir.path().join("sample.webp"));
    assert!(webp_path.exists());
    assert!(!jpeg_path.exists());
}

#[test]
fn test_conversion_failure_leaves_original_intact() {
    let temp_dir = tempdir().unwrap();
    let bogus_path = temp_dir.path().join("corrupt.png");
    fs::write(&bogus_path, b"this is not image data").unwrap();

    let result = convert_and_replace(&bogus_path);

    assert!(result.is_err());
    assert!(bogus_path.exists(), "failed conversion must not remove the download");
    assert!(!temp_dir.path().join("corrupt.webp").exists());
}

#[test]
fn test_is_convertible_matches_jpeg_and_png_case_insensitively() {
    assert!(is_convertible(Path::new("a.jpg")));
    assert!(is_convertible(Path::new("a.jpeg")));
    assert!(is_convertible(Path::new("a.png")));
    assert!(is_convertible(Path::new("a.JPG")));
    assert!(is_convertible(Path::new("a.JPEG")));
    assert!(is_convertible(Path::new("a.PNG")));

    assert!(!is_convertible(Path::new("a.gif")));
    assert!(!is_convertible(Path::new("a.webp")));
    assert!(!is_convertible(Path::new("a.mp4")));
    assert!(!is_convertible(Path::new("no_extension")));
    assert!(!is_convertible(Path::new(".png")));
}

#[test]
fn test_reconversion_after_replacement_is_a_noop_candidate() {
    let temp_dir = tempdir().unwrap();
    let png_path = write_png(temp_dir.path(), "sample.png");

    let webp_path = convert_and_replace(&png_path).unwrap();

    // The surviving file no longer qualifies for conversion.
    assert!(!is_convertible(&webp_path));
}
