use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "media-ripper",
    about = "Download all images and videos referenced by a local HTML file",
    version,
    long_about = "Extracts media URLs (src, data-src, data-srcset attributes and CSS url(...) references) from a local HTML or Astro file, then downloads every externally-hosted asset into the output directory. JPEG and PNG downloads are recompressed to WebP unless --keep-originals is given."
)]
pub struct RipCommand {
    /// Path to the input HTML or Astro file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for downloaded assets (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Base URL used to resolve relative url(...) references found in CSS
    #[arg(long)]
    pub base_url: Option<Url>,

    /// Keep downloaded JPEG/PNG files instead of converting them to WebP
    #[arg(long)]
    pub keep_originals: bool,
}
