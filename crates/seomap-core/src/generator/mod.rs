//! Entity generators: catalog entities in, sitemap entries out.
//!
//! Each generator reads one entity kind for the store in the
//! [`GenerationContext`], applies the exclusion filters for that kind and maps
//! every surviving entity to a [`SitemapEntry`]. Entities without a canonical
//! URL are skipped before they reach the output.
//!
//! Generators run in a fixed order (see [`default_generators`]), and the
//! order of entries follows catalog iteration order.

mod category;
mod cms;
mod product;

pub use category::CategoryGenerator;
pub use cms::{CmsGenerator, EXCLUDED_PAGE_IDENTIFIERS, HOME_PAGE_IDENTIFIER};
pub use product::ProductGenerator;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::Result;
use crate::catalog::{Catalog, Store};
use crate::context::GenerationContext;
use crate::types::{AlternateLink, SitemapEntry, StoreId, X_DEFAULT_HREFLANG, locale_to_hreflang, parse_timestamp};

/// Produces the entries of one leaf-file family.
pub trait EntityGenerator: Send + Sync {
    /// Type segment used in leaf filenames (`products`, `categories`, `cms`).
    fn filename(&self) -> &'static str;

    /// Whether this entity kind is enabled for the store.
    fn is_enabled(&self, ctx: &GenerationContext) -> bool;

    /// Build the entries for the store, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot list the entities.
    fn generate(&self, ctx: &GenerationContext) -> Result<Vec<SitemapEntry>>;
}

/// Product, category and CMS generators, in generation order.
#[must_use]
pub fn default_generators(catalog: &Arc<dyn Catalog>) -> Vec<Box<dyn EntityGenerator>> {
    vec![
        Box::new(ProductGenerator::new(Arc::clone(catalog))),
        Box::new(CategoryGenerator::new(Arc::clone(catalog))),
        Box::new(CmsGenerator::new(Arc::clone(catalog))),
    ]
}

/// Pick `<lastmod>`: update time, then creation time, then the run timestamp.
pub(crate) fn last_modified(
    updated_at: Option<&str>,
    created_at: Option<&str>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    updated_at
        .and_then(parse_timestamp)
        .or_else(|| created_at.and_then(parse_timestamp))
        .unwrap_or(now)
}

/// Active stores used to build hreflang alternates for one generation run.
#[derive(Debug)]
pub(crate) struct Alternates {
    stores: Vec<Store>,
    current: StoreId,
}

impl Alternates {
    /// Load the active stores when hreflang is enabled for the run.
    ///
    /// A failing store lookup disables alternates for the whole run.
    pub(crate) fn load(catalog: &dyn Catalog, ctx: &GenerationContext) -> Option<Self> {
        if !ctx.settings.hreflang_enabled {
            return None;
        }
        match catalog.stores() {
            Ok(stores) => Some(Self {
                stores: stores.into_iter().filter(|store| store.is_active).collect(),
                current: ctx.store.id,
            }),
            Err(err) => {
                debug!(store = %ctx.store.code, error = %err, "Store lookup failed, omitting hreflang links");
                None
            },
        }
    }

    /// One link per active store, with `x-default` right after the current store.
    ///
    /// `href_in` returns the entity URL in a given store, or `None` when it
    /// cannot be resolved; any unresolvable store yields an empty list.
    pub(crate) fn links(&self, href_in: impl Fn(&Store) -> Option<String>) -> Vec<AlternateLink> {
        let mut links = Vec::with_capacity(self.stores.len() + 1);
        for store in &self.stores {
            let Some(locale) = store.locale.as_deref().filter(|l| !l.is_empty()) else {
                debug!(store = %store.code, "Store has no locale, omitting hreflang links");
                return Vec::new();
            };
            let Some(href) = href_in(store) else {
                return Vec::new();
            };

            if store.id == self.current {
                links.push(AlternateLink {
                    hreflang: locale_to_hreflang(locale),
                    href: href.clone(),
                });
                links.push(AlternateLink {
                    hreflang: X_DEFAULT_HREFLANG.to_string(),
                    href,
                });
            } else {
                links.push(AlternateLink {
                    hreflang: locale_to_hreflang(locale),
                    href,
                });
            }
        }
        links
    }
}
