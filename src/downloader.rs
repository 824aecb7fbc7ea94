use anyhow::{bail, Context, Result};
use colored::*;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::converter;
use crate::file_manager::{derive_file_name, FileManager};
use crate::html_parser::{
    extract_media_urls, is_external_url, load_document, normalize_protocol_relative,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-run counters, returned to the caller and printed at the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RipSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub converted: usize,
    pub failed: usize,
}

enum FetchOutcome {
    Saved(PathBuf),
    AlreadyExists(String),
}

pub struct MediaRipper {
    input: PathBuf,
    base_url: Option<Url>,
    convert_to_webp: bool,
    client: Client,
    file_manager: FileManager,
}

impl MediaRipper {
    pub fn new(
        input: &Path,
        output_dir: &Path,
        base_url: Option<Url>,
        convert_to_webp: bool,
    ) -> Result<Self> {
        let client = Self::build_http_client()?;
        let file_manager = FileManager::new(output_dir)?;

        Ok(Self {
            input: input.to_path_buf(),
            base_url,
            convert_to_webp,
            client,
            file_manager,
        })
    }

    fn build_http_client() -> Result<Client> {
        let client = ClientBuilder::new()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(client)
    }

    /// Runs the whole pipeline: load, extract, then fetch each URL in turn.
    /// A missing input file is fatal; every per-URL failure is reported and
    /// the remaining URLs are still processed.
    pub async fn rip(&self) -> Result<RipSummary> {
        // The full URL set is materialized before the first fetch begins.
        let urls = {
            let document = load_document(&self.input)?;
            extract_media_urls(&document, self.base_url.as_ref())
        };

        println!(
            "📄 Input document: {}",
            self.input.display().to_string().blue()
        );
        println!("🔗 Found {} unique media URL(s)", urls.len());

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap(),
        );

        let mut summary = RipSummary::default();

        for url in &urls {
            // Applied once at collection time already; idempotent here.
            let url = normalize_protocol_relative(url);

            if !is_external_url(&url) {
                continue;
            }

            progress_bar.set_message(format!("Downloading: {}", url));

            match self.download_asset(&url).await {
                Ok(FetchOutcome::AlreadyExists(file_name)) => {
                    summary.skipped += 1;
                    println!("⏭️  Skipping already downloaded file: {}", file_name.dimmed());
                }
                Ok(FetchOutcome::Saved(path)) => {
                    summary.downloaded += 1;
                    println!("✅ Downloaded: {}", path.display().to_string().green());

                    if self.convert_to_webp && converter::is_convertible(&path) {
                        match converter::convert_and_replace(&path) {
                            Ok(webp_path) => {
                                summary.converted += 1;
                                println!(
                                    "🖼️  Converted to WebP: {}",
                                    webp_path.display().to_string().green()
                                );
                            }
                            Err(e) => {
                                eprintln!("⚠️  Failed to convert {}: {:#}", path.display(), e);
                            }
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    eprintln!("❌ Failed to download {}: {:#}", url, e);
                }
            }
        }

        progress_bar.finish_and_clear();

        println!(
            "📊 {} downloaded, {} skipped, {} converted, {} failed",
            summary.downloaded, summary.skipped, summary.converted, summary.failed
        );

        Ok(summary)
    }

    async fn download_asset(&self, url: &str) -> Result<FetchOutcome> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {} for {}", status, url);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let file_name = derive_file_name(&parsed, content_type.as_deref());

        // Existing files are treated as already satisfied, never re-fetched.
        if self.file_manager.exists(&file_name) {
            return Ok(FetchOutcome::AlreadyExists(file_name));
        }

        let output_path = self.file_manager.resolve(&file_name);

        let mut file = fs::File::create(&output_path)
            .with_context(|| format!("Failed to create file: {:?}", output_path))?;

        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk =
                chunk.with_context(|| format!("Failed to read response body of {}", url))?;
            file.write_all(&chunk)
                .with_context(|| format!("Failed to write to file: {:?}", output_path))?;
        }

        Ok(FetchOutcome::Saved(output_path))
    }
}
