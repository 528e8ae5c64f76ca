//! Per-run generation context.

use chrono::{DateTime, Utc};

use crate::catalog::Store;
use crate::config::SitemapConfig;
use crate::{Error, Result};

/// Everything a generation run for one store needs, fixed at run start.
///
/// Built once by the builder and passed by reference to every generator and
/// to the writer, so no component keeps per-run state of its own.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The store being generated.
    pub store: Store,
    /// Sitemap settings resolved for this store.
    pub settings: SitemapConfig,
    /// Absolute URL of the XSL stylesheet, when deployed.
    pub xsl_url: Option<String>,
    /// Run timestamp: index `<lastmod>` and fallback entry `<lastmod>`.
    pub generated_at: DateTime<Utc>,
}

impl GenerationContext {
    /// Create a context without a stylesheet.
    #[must_use]
    pub const fn new(store: Store, settings: SitemapConfig, generated_at: DateTime<Utc>) -> Self {
        Self {
            store,
            settings,
            xsl_url: None,
            generated_at,
        }
    }

    /// Attach the stylesheet URL.
    #[must_use]
    pub fn with_xsl_url(mut self, xsl_url: Option<String>) -> Self {
        self.xsl_url = xsl_url;
        self
    }

    /// Store base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.store.base_url()
    }

    /// Name of the store's sitemap index, `{code}-sitemap.xml`.
    #[must_use]
    pub fn index_filename(&self) -> String {
        index_filename(&self.store.code)
    }

    /// Name of a leaf file, `{code}-sitemap-{kind}[-{part}].xml`.
    #[must_use]
    pub fn leaf_filename(&self, kind: &str, part: Option<usize>) -> String {
        match part {
            Some(part) => format!("{}-sitemap-{kind}-{part}.xml", self.store.code),
            None => format!("{}-sitemap-{kind}.xml", self.store.code),
        }
    }
}

/// Sitemap index filename for a store code.
#[must_use]
pub fn index_filename(store_code: &str) -> String {
    format!("{store_code}-sitemap.xml")
}

/// Check that a store code is usable as a filename prefix.
///
/// Codes must be non-empty and limited to ASCII letters, digits, `_` and
/// `-`, so generated files always land directly in the public directory.
///
/// # Errors
///
/// Returns [`Error::Catalog`] for any other code.
pub fn validate_store_code(code: &str) -> Result<()> {
    let valid = !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(Error::Catalog(format!(
            "Invalid store code '{code}': only letters, digits, '_' and '-' are allowed"
        )))
    }
}
