use std::sync::Arc;

use tracing::debug;

use super::{Alternates, EntityGenerator, last_modified};
use crate::Result;
use crate::catalog::{Catalog, Store};
use crate::context::GenerationContext;
use crate::types::{ImageLink, SitemapEntry};

/// Categories above this tree level are roots and never listed.
const MIN_CATEGORY_LEVEL: u32 = 2;

/// Generates `{code}-sitemap-categories*.xml` entries.
pub struct CategoryGenerator {
    catalog: Arc<dyn Catalog>,
}

impl CategoryGenerator {
    /// Create a generator reading from `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

/// Absolute URL for a category image value.
fn category_image_url(image: &str, store: &Store) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        None
    } else if image.starts_with("http://") || image.starts_with("https://") {
        Some(image.to_string())
    } else if image.starts_with('/') {
        Some(format!("{}{image}", store.base_url()))
    } else {
        Some(format!("{}catalog/category/{image}", store.media_url()))
    }
}

impl EntityGenerator for CategoryGenerator {
    fn filename(&self) -> &'static str {
        "categories"
    }

    fn is_enabled(&self, ctx: &GenerationContext) -> bool {
        ctx.settings.category.enabled
    }

    fn generate(&self, ctx: &GenerationContext) -> Result<Vec<SitemapEntry>> {
        let config = &ctx.settings.category;
        let categories = self.catalog.categories(&ctx.store)?;
        let alternates = Alternates::load(self.catalog.as_ref(), ctx);

        let mut entries = Vec::with_capacity(categories.len());
        for category in &categories {
            if category.level < MIN_CATEGORY_LEVEL || !category.is_active {
                continue;
            }
            let Some(location) = category.url.as_deref().filter(|url| !url.is_empty()) else {
                debug!(category_id = category.id, "Category has no URL, skipping");
                continue;
            };

            let mut entry = SitemapEntry::new(location.to_string())
                .with_last_modified(last_modified(
                    category.updated_at.as_deref(),
                    category.created_at.as_deref(),
                    ctx.generated_at,
                ))
                .with_change_frequency(config.changefreq)
                .with_priority(config.priority.clone());

            if let Some(url) = category
                .image
                .as_deref()
                .and_then(|image| category_image_url(image, &ctx.store))
            {
                entry = entry.with_images(vec![ImageLink {
                    url,
                    title: Some(category.name.clone()).filter(|name| !name.is_empty()),
                }]);
            }
            if let Some(alternates) = &alternates {
                let url_key = category.url_key.as_deref().filter(|key| !key.is_empty());
                entry = entry.with_alternate_links(alternates.links(|store| {
                    url_key.map(|key| {
                        format!("{}/{key}{}", store.base_url(), store.category_url_suffix)
                    })
                }));
            }
            entries.push(entry);
        }

        debug!(store = %ctx.store.code, entries = entries.len(), "Generated category entries");
        Ok(entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::CategoryView;
    use crate::config::SitemapConfig;
    use crate::generator::test_support::{MemoryCatalog, store};

    fn category(id: u64, level: u32, url_key: &str) -> CategoryView {
        CategoryView {
            id,
            name: format!("Category {id}"),
            url: Some(format!("https://default.shop.test/{url_key}.html")),
            url_key: Some(url_key.to_string()),
            level,
            is_active: true,
            ..CategoryView::default()
        }
    }

    fn run(categories: Vec<CategoryView>) -> Vec<SitemapEntry> {
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            categories,
            ..MemoryCatalog::default()
        };
        let ctx = GenerationContext::new(
            catalog.stores[0].clone(),
            SitemapConfig::default(),
            Utc::now(),
        );
        CategoryGenerator::new(Arc::new(catalog)).generate(&ctx).unwrap()
    }

    #[test]
    fn test_root_categories_are_excluded_even_when_active() {
        let mut inactive = category(4, 3, "inactive");
        inactive.is_active = false;

        let entries = run(vec![
            category(1, 0, "tree-root"),
            category(2, 1, "default-category"),
            category(3, 2, "gear"),
            inactive,
            category(5, 3, "bags"),
        ]);

        let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                "https://default.shop.test/gear.html",
                "https://default.shop.test/bags.html"
            ]
        );
    }

    #[test]
    fn test_category_image_forms() {
        let shop = store(1, "default", "en_US");
        assert_eq!(
            category_image_url("https://cdn.test/c.png", &shop).as_deref(),
            Some("https://cdn.test/c.png")
        );
        assert_eq!(
            category_image_url("/media/catalog/category/c.png", &shop).as_deref(),
            Some("https://default.shop.test/media/catalog/category/c.png")
        );
        assert_eq!(
            category_image_url("c.png", &shop).as_deref(),
            Some("https://default.shop.test/media/catalog/category/c.png")
        );
        assert_eq!(category_image_url("  ", &shop), None);
    }

    #[test]
    fn test_category_image_attached_with_name_title() {
        let mut with_image = category(1, 2, "gear");
        with_image.image = Some("gear.png".to_string());

        let entries = run(vec![with_image, category(2, 2, "plain")]);
        assert_eq!(entries[0].images.len(), 1);
        assert_eq!(entries[0].images[0].title.as_deref(), Some("Category 1"));
        assert!(entries[1].images.is_empty());
    }
}
