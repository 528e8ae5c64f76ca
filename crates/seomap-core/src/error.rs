//! Error types and handling for seomap-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! categorized so callers (the CLI, the scheduled job) can log and map them
//! without matching on message text.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: writing sitemap files, reading config or catalog files
//! - **Parse Errors**: malformed sitemap XML, unparsable values
//! - **Configuration Errors**: invalid settings (priority out of range, bad cron hour)
//! - **Catalog Errors**: the entity/store data source failed
//! - **Not Found**: unknown store
//!
//! Generation is a deterministic re-derivation from catalog state, so nothing
//! here is retried automatically; the prescribed recovery is to run again.
//!
//! ```rust
//! use seomap_core::Error;
//!
//! let err = Error::NotFound("store 7".to_string());
//! assert_eq!(err.category(), "not_found");
//! assert_eq!(err.to_string(), "Not found: store 7");
//! ```

use thiserror::Error;

/// The main error type for seomap-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers writing leaf/index files into the public directory, deploying
    /// the XSL stylesheet and reading configuration or catalog snapshots.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing operation failed.
    ///
    /// Occurs when sitemap XML cannot be read back or a value does not match
    /// the expected format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Priority outside `0.0..=1.0`
    /// - Cron hour outside `0..=23`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for unknown store ids and missing files.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing an XML document failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// The catalog backing a generation run failed.
    ///
    /// Raised by [`Catalog`](crate::catalog::Catalog) implementations when
    /// products, categories, pages or stores cannot be listed.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Build an [`Error::Xml`] from any quick-xml writer or reader failure.
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field:
    ///
    /// ```rust
    /// use seomap_core::Error;
    ///
    /// let err = Error::Config("max_urls_per_sitemap must be positive".into());
    /// tracing::error!(category = err.category(), error = %err, "generation failed");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
            Self::Xml(_) => "xml",
            Self::Catalog(_) => "catalog",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
