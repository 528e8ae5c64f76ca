//! Human-readable text output.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use seomap_core::SitemapFileSet;

/// Status symbol for a line of command output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Info,
}

/// Write one status line, e.g. `✓ Generated 3 file(s)`.
pub fn write_status<W: Write>(mut writer: W, status: Status, message: &str) -> Result<()> {
    let symbol = match status {
        Status::Success => "✓".green(),
        Status::Failure => "✗".red(),
        Status::Info => "ℹ".blue(),
    };
    writeln!(writer, "{symbol} {message}")?;
    Ok(())
}

/// List the files of one store's generation, index last.
pub fn write_file_set<W: Write>(mut writer: W, files: &SitemapFileSet) -> Result<()> {
    for leaf in &files.leaf_files {
        writeln!(writer, "  - {} ({} URLs)", leaf.filename, leaf.entry_count)?;
    }
    if let Some(index) = &files.index_file {
        writeln!(writer, "  - {} {}", index, "(index)".dimmed())?;
    }
    Ok(())
}
