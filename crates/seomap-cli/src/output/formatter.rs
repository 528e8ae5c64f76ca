//! Output format selection.

/// Output format for command results.
///
/// ```bash
/// seomap sitemap --format text
/// seomap inspect pub/default-sitemap.xml --format json | jq '.entries | length'
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
