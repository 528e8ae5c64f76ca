//! # Output Formatting
//!
//! Commands print either human-readable text or JSON for scripting.
//!
//! ```bash
//! # Human-readable output (default)
//! seomap sitemap
//!
//! # JSON for scripts
//! seomap sitemap --format json | jq '.[] | select(.success == false)'
//! ```
//!
//! JSON goes to stdout; logs always go to stderr, so piping stays clean.

mod formatter;
mod json;
mod text;

pub use formatter::OutputFormat;
pub use json::write_json;
pub use text::{Status, write_file_set, write_status};
