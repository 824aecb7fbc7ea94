use anyhow::{Context, Result};
use regex::Regex;
use select::document::Document;
use select::predicate::{Attr, Name, Or};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use url::Url;

/// Reads the input file and parses it into a queryable document.
/// Parsing is best-effort: malformed or partial markup never fails here,
/// only a missing or unreadable file does.
pub fn load_document(path: &Path) -> Result<Document> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    Ok(Document::from(html.as_str()))
}

/// Collects every candidate media URL from the document into a deduplicated,
/// unordered set.
///
/// Media elements (`img`, `video`, `source`) are checked in precedence order:
/// `data-srcset` (first whitespace token only), then `data-src`, then `src`.
/// CSS is scanned twice: `<style>` blocks and inline `style` attributes.
/// `base_url` only affects CSS-embedded references; attribute URLs are kept
/// exactly as written in the markup.
pub fn extract_media_urls(document: &Document, base_url: Option<&Url>) -> HashSet<String> {
    let mut urls = HashSet::new();

    for node in document.find(Or(Name("img"), Or(Name("video"), Name("source")))) {
        let candidate = if let Some(srcset) = node.attr("data-srcset") {
            // srcset syntax is "url descriptor, url descriptor, ..." —
            // only the first URL is retained
            srcset.split_whitespace().next()
        } else if let Some(src) = node.attr("data-src") {
            Some(src)
        } else {
            node.attr("src")
        };

        if let Some(url) = candidate {
            if !url.is_empty() {
                urls.insert(normalize_protocol_relative(url));
            }
        }
    }

    for style in document.find(Name("style")) {
        let css = style.text();
        if !css.trim().is_empty() {
            for url in extract_urls_from_css(&css, base_url) {
                urls.insert(normalize_protocol_relative(&url));
            }
        }
    }

    for node in document.find(Attr("style", ())) {
        if let Some(css) = node.attr("style") {
            for url in extract_urls_from_css(css, base_url) {
                urls.insert(normalize_protocol_relative(&url));
            }
        }
    }

    urls
}

/// Scans CSS text for `url(...)` references, stripping enclosing single or
/// double quotes. Relative references are joined against `base_url` when one
/// is given; otherwise they are returned as captured.
pub fn extract_urls_from_css(css: &str, base_url: Option<&Url>) -> Vec<String> {
    let mut urls = Vec::new();

    if let Ok(pattern) = Regex::new(r"url\(([^)]*)\)") {
        for caps in pattern.captures_iter(css) {
            if let Some(m) = caps.get(1) {
                let url = m.as_str().trim_matches(|c| c == '"' || c == '\'');
                if url.is_empty() {
                    continue;
                }

                match base_url {
                    Some(base) => match base.join(url) {
                        Ok(absolute) => urls.push(absolute.to_string()),
                        Err(_) => urls.push(url.to_string()),
                    },
                    None => urls.push(url.to_string()),
                }
            }
        }
    }

    urls
}

/// Rewrites protocol-relative URLs (`//host/path`) to `https`. Idempotent,
/// so it is safe to apply both at collection time and again before fetching.
pub fn normalize_protocol_relative(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// Only absolute `http`/`https` URLs qualify for fetching. Relative paths,
/// `data:` URIs, fragments and anything else unparseable are dropped.
pub fn is_external_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}
