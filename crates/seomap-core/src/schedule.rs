//! Scheduled sitemap generation.
//!
//! The job runs once a day at a configured hour. [`cron_expression`] turns
//! that hour into the crontab line to install; [`run_scheduled`] is the job
//! body.

use std::collections::BTreeMap;

use tracing::{error, info};

use crate::builder::{SitemapBuilder, StoreResult};
use crate::types::StoreId;
use crate::{Error, Result};

/// Outcome of one scheduled invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledRun {
    /// `cron_enabled` is off; nothing ran.
    Disabled,
    /// Per-store results of the fleet run.
    Completed(BTreeMap<StoreId, StoreResult>),
}

/// Daily cron expression for `hour`, e.g. `0 3 * * *`.
///
/// # Errors
///
/// Returns [`Error::Config`] for hours outside `0..=23`.
pub fn cron_expression(hour: u8) -> Result<String> {
    if hour > 23 {
        return Err(Error::Config(format!(
            "cron hour must be between 0 and 23, got {hour}"
        )));
    }
    Ok(format!("0 {hour} * * *"))
}

/// Selectable hours with their `HH:00` labels.
#[must_use]
pub fn hour_options() -> Vec<(u8, String)> {
    (0..24).map(|hour| (hour, format!("{hour:02}:00"))).collect()
}

/// Run the scheduled job: generate every active store when enabled.
///
/// # Errors
///
/// Returns an error only if the store list cannot be read; per-store
/// failures are logged and reported in the result map.
pub fn run_scheduled(builder: &SitemapBuilder) -> Result<ScheduledRun> {
    if !builder.config().sitemap.cron_enabled {
        return Ok(ScheduledRun::Disabled);
    }

    info!("Starting scheduled sitemap generation");
    let results = builder.generate_for_all_stores().inspect_err(|err| {
        error!(error = %err, "Scheduled sitemap generation aborted");
    })?;

    for (store_id, result) in &results {
        match result {
            StoreResult::Success { store_code, files } => info!(
                store_id = store_id.0,
                store = %store_code,
                files = ?files.filenames(),
                "Sitemap generated successfully"
            ),
            StoreResult::Failure { store_code, error } => error!(
                store_id = store_id.0,
                store = %store_code,
                error = %error,
                "Sitemap generation failed"
            ),
        }
    }
    Ok(ScheduledRun::Completed(results))
}
