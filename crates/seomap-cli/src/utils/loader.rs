//! Configuration and catalog loading for commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use seomap_core::{Catalog, Config, SnapshotCatalog};
use tracing::debug;

use crate::error::CliError;

/// Load the configuration from `path`, or from the platform config
/// directory when no path was given.
///
/// # Errors
///
/// Unreadable or invalid configuration is a usage error (exit code 2).
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .map_err(CliError::usage)?;

    debug!(
        public_dir = %config.public_dir.display(),
        catalog = ?config.catalog,
        "Loaded configuration"
    );
    Ok(config)
}

/// Open the catalog snapshot named by `config.catalog`.
///
/// # Errors
///
/// A missing `catalog` setting or snapshot file is a usage error; an
/// invalid snapshot maps through its core error category.
pub fn load_catalog(config: &Config) -> Result<Arc<dyn Catalog>> {
    let Some(path) = config.catalog.as_deref() else {
        return Err(CliError::usage(anyhow!(
            "No catalog configured: set `catalog` in the configuration file"
        ))
        .into());
    };

    if !path.exists() {
        return Err(CliError::usage(anyhow!(
            "Catalog snapshot {} does not exist",
            path.display()
        ))
        .into());
    }

    let catalog = SnapshotCatalog::from_file(path).map_err(CliError::from)?;
    Ok(Arc::new(catalog))
}
