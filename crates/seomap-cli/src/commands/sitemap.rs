//! Sitemap generation command

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Result, anyhow};
use colored::Colorize;
use seomap_core::{SitemapBuilder, SitemapFileSet, StoreId, StoreResult};

use crate::error::CliError;
use crate::output::{OutputFormat, Status, write_file_set, write_json, write_status};

/// Generate one store, or every active store when `store` is `None`.
///
/// Writes the per-store outcome to `writer` and returns the results keyed
/// by store id.
///
/// # Errors
///
/// A single-store run fails with the store's error (unknown ids exit with
/// code 3). A fleet run fails with a partial-failure error when any store
/// failed, after all results have been written.
pub fn execute_sitemap<W: Write>(
    builder: &SitemapBuilder,
    store: Option<StoreId>,
    format: OutputFormat,
    mut writer: W,
) -> Result<BTreeMap<StoreId, StoreResult>> {
    let results = match store {
        Some(store_id) => {
            if format == OutputFormat::Text {
                writeln!(writer, "Generating sitemap for store {store_id}...")?;
            }
            let files = builder.generate_for_store(store_id).map_err(CliError::from)?;
            let store_code = builder.catalog().store(store_id).map_err(CliError::from)?.code;
            BTreeMap::from([(store_id, StoreResult::Success { store_code, files })])
        },
        None => {
            if format == OutputFormat::Text {
                writeln!(writer, "Generating sitemaps for all active stores...")?;
            }
            builder.generate_for_all_stores().map_err(CliError::from)?
        },
    };

    match format {
        OutputFormat::Json => write_json(&mut writer, &results.values().collect::<Vec<_>>())?,
        OutputFormat::Text => {
            for (store_id, result) in &results {
                write_result(&mut writer, *store_id, result)?;
            }
        },
    }

    let failed = results.values().filter(|result| !result.is_success()).count();
    if failed > 0 {
        return Err(CliError::partial_failure(anyhow!(
            "{failed} of {} stores failed to generate",
            results.len()
        ))
        .into());
    }
    Ok(results)
}

fn write_result<W: Write>(mut writer: W, store_id: StoreId, result: &StoreResult) -> Result<()> {
    match result {
        StoreResult::Success { store_code, files } => {
            write_success(&mut writer, store_id, store_code, files)
        },
        StoreResult::Failure { store_code, error } => write_status(
            &mut writer,
            Status::Failure,
            &format!("Store {} ({store_id}): {error}", store_code.bold()),
        ),
    }
}

fn write_success<W: Write>(
    mut writer: W,
    store_id: StoreId,
    store_code: &str,
    files: &SitemapFileSet,
) -> Result<()> {
    if files.is_empty() {
        return write_status(
            &mut writer,
            Status::Info,
            &format!(
                "Store {} ({store_id}): no sitemap files generated (disabled or no entries)",
                store_code.bold()
            ),
        );
    }

    write_status(
        &mut writer,
        Status::Success,
        &format!(
            "Store {} ({store_id}): generated {} file(s), {} URLs",
            store_code.bold(),
            files.filenames().len(),
            files.total_entries()
        ),
    )?;
    write_file_set(&mut writer, files)
}

/// Run the command against stdout.
///
/// # Errors
///
/// See [`execute_sitemap`].
pub fn run(builder: &SitemapBuilder, store: Option<u32>, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    execute_sitemap(builder, store.map(StoreId), format, &mut stdout_lock)?;
    Ok(())
}
