//! Sitemap inspection command

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use seomap_core::{SitemapDocument, format_timestamp, read_sitemap};

use crate::error::CliError;
use crate::output::{OutputFormat, write_json};

/// Summarize the sitemap or sitemap index at `path`.
///
/// # Errors
///
/// Missing files exit with code 3; malformed XML is a usage error.
pub fn execute_inspect<W: Write>(
    path: &Path,
    format: OutputFormat,
    mut writer: W,
) -> Result<SitemapDocument> {
    let document = read_sitemap(path).map_err(CliError::from)?;

    match (&document, format) {
        (SitemapDocument::UrlSet(entries), OutputFormat::Json) => write_json(
            &mut writer,
            &serde_json::json!({ "kind": "urlset", "count": entries.len(), "entries": entries }),
        )?,
        (SitemapDocument::Index(refs), OutputFormat::Json) => write_json(
            &mut writer,
            &serde_json::json!({ "kind": "sitemapindex", "count": refs.len(), "sitemaps": refs }),
        )?,
        (SitemapDocument::UrlSet(entries), OutputFormat::Text) => {
            let images: usize = entries.iter().map(|entry| entry.images.len()).sum();
            let videos: usize = entries.iter().map(|entry| entry.videos.len()).sum();
            let alternates: usize = entries.iter().map(|entry| entry.alternate_links.len()).sum();

            writeln!(
                writer,
                "{} {} URL(s) in {}",
                "urlset:".bold(),
                entries.len(),
                path.display()
            )?;
            writeln!(
                writer,
                "  images: {images}, videos: {videos}, alternates: {alternates}"
            )?;
            for entry in entries {
                let lastmod = entry
                    .last_modified
                    .as_ref()
                    .map_or_else(String::new, format_timestamp);
                writeln!(writer, "  {}  {}", entry.location, lastmod.dimmed())?;
            }
        },
        (SitemapDocument::Index(refs), OutputFormat::Text) => {
            writeln!(
                writer,
                "{} {} sitemap(s) in {}",
                "sitemapindex:".bold(),
                refs.len(),
                path.display()
            )?;
            for sitemap in refs {
                let lastmod = sitemap
                    .last_modified
                    .as_ref()
                    .map_or_else(String::new, format_timestamp);
                writeln!(writer, "  {}  {}", sitemap.location, lastmod.dimmed())?;
            }
        },
    }
    Ok(document)
}

/// Run the command against stdout.
///
/// # Errors
///
/// See [`execute_inspect`].
pub fn run(path: &Path, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    execute_inspect(path, format, &mut stdout_lock)?;
    Ok(())
}
