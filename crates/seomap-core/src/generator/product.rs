use std::sync::Arc;

use tracing::debug;

use super::{Alternates, EntityGenerator, last_modified};
use crate::Result;
use crate::catalog::{Catalog, NO_SELECTION, ProductView, Store};
use crate::config::ProductSitemapConfig;
use crate::context::GenerationContext;
use crate::types::{ImageLink, SitemapEntry};

/// Generates `{code}-sitemap-products*.xml` entries.
pub struct ProductGenerator {
    catalog: Arc<dyn Catalog>,
}

impl ProductGenerator {
    /// Create a generator reading from `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

fn is_excluded(product: &ProductView, config: &ProductSitemapConfig) -> bool {
    (config.exclude_disabled && !product.enabled)
        || (config.exclude_not_visible && !product.visible_in_site)
        || (config.exclude_out_of_stock && !product.in_stock)
}

/// Gallery images, or the base image when the gallery is empty.
fn product_images(product: &ProductView, store: &Store) -> Vec<ImageLink> {
    let title = Some(product.name.clone()).filter(|name| !name.is_empty());

    let gallery: Vec<ImageLink> = product
        .gallery
        .iter()
        .filter(|url| !url.is_empty())
        .map(|url| ImageLink {
            url: url.clone(),
            title: title.clone(),
        })
        .collect();
    if !gallery.is_empty() {
        return gallery;
    }

    match product.base_image.as_deref() {
        Some(path) if !path.is_empty() && path != NO_SELECTION => {
            let path = path.trim_start_matches('/');
            vec![ImageLink {
                url: format!("{}catalog/product/{path}", store.media_url()),
                title,
            }]
        },
        _ => Vec::new(),
    }
}

impl EntityGenerator for ProductGenerator {
    fn filename(&self) -> &'static str {
        "products"
    }

    fn is_enabled(&self, ctx: &GenerationContext) -> bool {
        ctx.settings.product.enabled
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<Vec<SitemapEntry>> {
        let config = &ctx.settings.product;
        let products = self.catalog.products(&ctx.store)?;
        let alternates = Alternates::load(self.catalog.as_ref(), ctx);

        let mut entries = Vec::with_capacity(products.len());
        let mut skipped = 0usize;
        for product in &products {
            if is_excluded(product, config) {
                skipped += 1;
                continue;
            }
            let Some(location) = product.url.as_deref().filter(|url| !url.is_empty()) else {
                debug!(product_id = product.id, "Product has no URL, skipping");
                skipped += 1;
                continue;
            };

            let mut entry = SitemapEntry::new(location.to_string())
                .with_last_modified(last_modified(
                    product.updated_at.as_deref(),
                    product.created_at.as_deref(),
                    ctx.generated_at,
                ))
                .with_change_frequency(config.changefreq)
                .with_priority(config.priority.clone());

            if config.images {
                entry = entry.with_images(product_images(product, &ctx.store));
            }
            if config.videos {
                entry = entry.with_videos(product.videos.clone());
            }
            if let Some(alternates) = &alternates {
                let url_key = product.url_key.as_deref().filter(|key| !key.is_empty());
                entry = entry.with_alternate_links(alternates.links(|store| {
                    url_key.map(|key| {
                        format!("{}/{key}{}", store.base_url(), store.product_url_suffix)
                    })
                }));
            }
            entries.push(entry);
        }

        debug!(
            store = %ctx.store.code,
            entries = entries.len(),
            skipped,
            "Generated product entries"
        );
        Ok(entries)
    }
}
