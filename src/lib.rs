pub mod cli;
pub mod converter;
pub mod downloader;
pub mod file_manager;
pub mod html_parser;

// Re-export main types for convenience
pub use cli::RipCommand;
pub use converter::{convert_and_replace, is_convertible};
pub use downloader::{MediaRipper, RipSummary};
pub use file_manager::{derive_file_name, extension_for_content_type, sanitize_file_name, FileManager};
pub use html_parser::{
    extract_media_urls, extract_urls_from_css, is_external_url, load_document,
    normalize_protocol_relative,
};
