use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Clone)]
pub struct FileManager {
    base_dir: PathBuf,
}

impl FileManager {
    /// Creates the output directory (including intermediate directories)
    /// up front, before any fetch happens.
    pub fn new(base_dir: &Path) -> Result<Self> {
        let base_dir = base_dir.to_path_buf();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", base_dir))?;

        Ok(Self { base_dir })
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.resolve(file_name).exists()
    }
}

/// Derives the output filename for a URL: last path segment with the query
/// string excluded, percent-decoded, then sanitized. If the result carries no
/// extension, one guessed from the response `Content-Type` is appended.
pub fn derive_file_name(url: &Url, content_type: Option<&str>) -> String {
    let raw = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let mut name = sanitize_file_name(&decoded);

    if Path::new(&name).extension().is_none() {
        if let Some(extension) = content_type.and_then(extension_for_content_type) {
            name.push('.');
            name.push_str(extension);
        }
    }

    name
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_` so the name is
/// safe on every filesystem we write to.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Guesses a file extension from a `Content-Type` header value. Returns
/// `None` when the header doesn't parse as a MIME type or the type is
/// unknown; callers must treat that as "no extension", not as an empty one.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime: mime::Mime = content_type.parse().ok()?;

    mime_guess::get_mime_extensions(&mime)
        .and_then(|extensions| extensions.first())
        .copied()
}
