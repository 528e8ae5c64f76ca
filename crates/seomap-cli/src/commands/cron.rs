//! Scheduled generation command

use std::io::{self, Write};

use anyhow::{Result, anyhow};
use seomap_core::{ScheduledRun, SitemapBuilder, run_scheduled};

use crate::error::CliError;
use crate::output::{OutputFormat, Status, write_json, write_status};

/// Run the scheduled job once, as the system scheduler would.
///
/// # Errors
///
/// Fails when the store list cannot be read, or with a partial-failure
/// error when any store failed.
pub fn execute_cron<W: Write>(
    builder: &SitemapBuilder,
    format: OutputFormat,
    mut writer: W,
) -> Result<ScheduledRun> {
    let run = run_scheduled(builder).map_err(CliError::from)?;

    let ScheduledRun::Completed(results) = &run else {
        match format {
            OutputFormat::Json => write_json(&mut writer, &serde_json::json!({ "enabled": false }))?,
            OutputFormat::Text => write_status(
                &mut writer,
                Status::Info,
                "Scheduled generation is disabled (sitemap.cron_enabled = false)",
            )?,
        }
        return Ok(run);
    };

    let failed = results.values().filter(|result| !result.is_success()).count();
    match format {
        OutputFormat::Json => write_json(
            &mut writer,
            &serde_json::json!({
                "enabled": true,
                "stores": results.values().collect::<Vec<_>>(),
            }),
        )?,
        OutputFormat::Text if failed == 0 => write_status(
            &mut writer,
            Status::Success,
            &format!("Scheduled generation finished for {} store(s)", results.len()),
        )?,
        OutputFormat::Text => write_status(
            &mut writer,
            Status::Failure,
            &format!(
                "Scheduled generation finished with {failed} failure(s) out of {} store(s)",
                results.len()
            ),
        )?,
    }

    if failed > 0 {
        return Err(CliError::partial_failure(anyhow!(
            "{failed} of {} stores failed to generate",
            results.len()
        ))
        .into());
    }
    Ok(run)
}

/// Run the command against stdout.
///
/// # Errors
///
/// See [`execute_cron`].
pub fn run(builder: &SitemapBuilder, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    execute_cron(builder, format, &mut stdout_lock)?;
    Ok(())
}
