//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so that cron wrappers and CI pipelines can tell a
//! bad configuration apart from a store that failed to generate.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Unknown store or missing file |
//! | 4 | `PartialFailure` | At least one store failed to generate |
//!
//! # Usage
//!
//! ```bash
//! seomap sitemap
//! case $? in
//!     0) echo "All stores generated" ;;
//!     4) echo "Some stores failed, see log" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;
use std::io;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    ///
    /// Catalog failures, unwritable public directories and anything else
    /// that is not the caller's fault.
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// Requested resource not found (exit code 3).
    ///
    /// Unknown store ids and files passed to `inspect` that do not exist.
    NotFound = 3,

    /// Some stores of a fleet run failed (exit code 4).
    PartialFailure = 4,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::PartialFailure => "partial failure",
        }
    }

    /// Category for an error raised by `seomap-core`.
    #[must_use]
    pub fn from_core(err: &seomap_core::Error) -> Self {
        use seomap_core::Error;

        match err {
            Error::NotFound(_) => Self::NotFound,
            Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => Self::NotFound,
            Error::Config(_) | Error::Parse(_) | Error::InvalidUrl(_) | Error::Serialization(_) => {
                Self::Usage
            },
            _ => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Heuristic fallback for errors that were not explicitly categorized.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
            || msg_lower.contains("unknown store")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("stores failed") {
            return Self::PartialFailure;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("missing required")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("configuration")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` with an `ErrorCategory` so commands can choose
/// the exit code while preserving the full error chain.
///
/// ```rust,ignore
/// use seomap_cli::error::CliError;
///
/// let err = CliError::partial_failure(anyhow::anyhow!("1 of 2 stores failed to generate"));
/// assert_eq!(err.exit_code(), 4);
/// ```
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a partial-failure error.
    pub fn partial_failure(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::PartialFailure, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<seomap_core::Error> for CliError {
    fn from(err: seomap_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit `CliError`s win, then errors from `seomap-core` anywhere in the
/// chain; everything else is inferred from the message.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<seomap_core::Error>())
    {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
