//! Cron expression command

use std::io::{self, Write};

use anyhow::Result;
use seomap_core::{cron_expression, hour_options};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{OutputFormat, write_json};

#[derive(Serialize)]
struct ScheduleInfo {
    hour: u8,
    expression: String,
    enabled: bool,
}

#[derive(Serialize)]
struct HourOption {
    hour: u8,
    label: String,
}

/// Print the daily cron expression for `hour`, or all selectable hours.
///
/// # Errors
///
/// Returns a usage error for hours outside `0..=23`.
pub fn execute_schedule<W: Write>(
    hour: u8,
    cron_enabled: bool,
    list_hours: bool,
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    if list_hours {
        let options: Vec<HourOption> = hour_options()
            .into_iter()
            .map(|(hour, label)| HourOption { hour, label })
            .collect();
        match format {
            OutputFormat::Json => write_json(&mut writer, &options)?,
            OutputFormat::Text => {
                for option in options {
                    writeln!(writer, "{:>2}  {}", option.hour, option.label)?;
                }
            },
        }
        return Ok(());
    }

    let expression = cron_expression(hour).map_err(CliError::from)?;
    match format {
        OutputFormat::Json => write_json(
            &mut writer,
            &ScheduleInfo {
                hour,
                expression,
                enabled: cron_enabled,
            },
        )?,
        OutputFormat::Text => writeln!(writer, "{expression}")?,
    }
    Ok(())
}

/// Run the command against stdout.
///
/// # Errors
///
/// See [`execute_schedule`].
pub fn run(hour: u8, cron_enabled: bool, list_hours: bool, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    execute_schedule(hour, cron_enabled, list_hours, format, &mut stdout_lock)
}
