use anyhow::{anyhow, Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use webp::Encoder;

const WEBP_QUALITY: f32 = 80.0;

/// Only JPEG and PNG downloads are recompressed; everything else is kept in
/// its fetched form.
pub fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|extension| {
            matches!(
                extension.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "png"
            )
        })
        .unwrap_or(false)
}

/// Re-encodes the file at `path` as WebP next to it (same stem, `.webp`
/// extension) and deletes the original. The original is only removed once the
/// converted sibling has been written, so a failed conversion leaves the
/// downloaded file intact.
pub fn convert_and_replace(path: &Path) -> Result<PathBuf> {
    let webp_path = convert_to_webp(path)?;

    fs::remove_file(path)
        .with_context(|| format!("Failed to remove original file: {}", path.display()))?;

    Ok(webp_path)
}

fn convert_to_webp(path: &Path) -> Result<PathBuf> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;

    let encoder = Encoder::from_image(&image)
        .map_err(|e| anyhow!("Unsupported pixel format for {}: {}", path.display(), e))?;
    let encoded = encoder.encode(WEBP_QUALITY);

    let webp_path = path.with_extension("webp");
    fs::write(&webp_path, &*encoded)
        .with_context(|| format!("Failed to write converted file: {}", webp_path.display()))?;

    Ok(webp_path)
}
