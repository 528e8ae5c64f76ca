use std::sync::Arc;

use tracing::debug;

use super::{Alternates, EntityGenerator, last_modified};
use crate::Result;
use crate::catalog::{Catalog, Store};
use crate::context::GenerationContext;
use crate::types::{Priority, SitemapEntry};

/// Identifier of the store front page.
pub const HOME_PAGE_IDENTIFIER: &str = "home";

/// System pages that are never listed.
pub const EXCLUDED_PAGE_IDENTIFIERS: [&str; 3] = [
    "no-route",
    "enable-cookies",
    "privacy-policy-cookie-restriction-mode",
];

/// Generates `{code}-sitemap-cms*.xml` entries.
pub struct CmsGenerator {
    catalog: Arc<dyn Catalog>,
}

impl CmsGenerator {
    /// Create a generator reading from `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

fn page_url(store: &Store, identifier: &str) -> String {
    if identifier == HOME_PAGE_IDENTIFIER {
        format!("{}/", store.base_url())
    } else {
        format!("{}/{identifier}", store.base_url())
    }
}

impl EntityGenerator for CmsGenerator {
    fn filename(&self) -> &'static str {
        "cms"
    }

    fn is_enabled(&self, ctx: &GenerationContext) -> bool {
        ctx.settings.cms.enabled
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<Vec<SitemapEntry>> {
        let config = &ctx.settings.cms;
        let pages = self.catalog.pages(&ctx.store)?;
        let alternates = Alternates::load(self.catalog.as_ref(), ctx);

        let mut entries = Vec::with_capacity(pages.len());
        for page in &pages {
            let identifier = page.identifier.trim();
            if !page.is_active
                || identifier.is_empty()
                || EXCLUDED_PAGE_IDENTIFIERS.contains(&identifier)
            {
                continue;
            }

            let priority = if identifier == HOME_PAGE_IDENTIFIER {
                Priority::highest()
            } else {
                config.priority.clone()
            };

            let mut entry = SitemapEntry::new(page_url(&ctx.store, identifier))
                .with_last_modified(last_modified(
                    page.updated_at.as_deref(),
                    page.created_at.as_deref(),
                    ctx.generated_at,
                ))
                .with_change_frequency(config.changefreq)
                .with_priority(priority);

            if let Some(alternates) = &alternates {
                entry = entry
                    .with_alternate_links(alternates.links(|store| Some(page_url(store, identifier))));
            }
            entries.push(entry);
        }

        debug!(store = %ctx.store.code, entries = entries.len(), "Generated CMS entries");
        Ok(entries)
    }
}
