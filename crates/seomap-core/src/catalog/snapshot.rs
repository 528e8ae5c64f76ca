//! Catalog adapter over a JSON export.
//!
//! ```json
//! {
//!   "stores": [
//!     {"id": 1, "code": "default", "base_url": "https://shop.test/", "locale": "en_US"}
//!   ],
//!   "products": [
//!     {"id": 7, "name": "Bag", "url_key": "bag", "enabled": true,
//!      "visible_in_site": true, "in_stock": true, "store_ids": [1]}
//!   ],
//!   "categories": [],
//!   "pages": [{"identifier": "home", "is_active": true}]
//! }
//! ```
//!
//! Entities without `store_ids` belong to every store. A canonical URL is
//! taken from `urls.<store code>`, then `url`, then built from `url_key` and
//! the store's URL suffix.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{Catalog, CategoryView, PageView, ProductView, Store};
use crate::types::StoreId;
use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
struct Scoped<T> {
    #[serde(default)]
    store_ids: Vec<StoreId>,
    #[serde(default)]
    urls: BTreeMap<String, String>,
    #[serde(flatten)]
    view: T,
}

impl<T> Scoped<T> {
    fn in_store(&self, store: &Store) -> bool {
        self.store_ids.is_empty() || self.store_ids.contains(&store.id)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Snapshot {
    stores: Vec<Store>,
    products: Vec<Scoped<ProductView>>,
    categories: Vec<Scoped<CategoryView>>,
    pages: Vec<Scoped<PageView>>,
}

/// Read-only catalog loaded from a JSON snapshot.
#[derive(Debug)]
pub struct SnapshotCatalog {
    snapshot: Snapshot,
}

impl SnapshotCatalog {
    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Self::from_json`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            stores = catalog.snapshot.stores.len(),
            products = catalog.snapshot.products.len(),
            categories = catalog.snapshot.categories.len(),
            pages = catalog.snapshot.pages.len(),
            "Loaded catalog snapshot"
        );
        Ok(catalog)
    }

    /// Parse a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] for malformed JSON,
    /// [`Error::InvalidUrl`] for a store base URL that is not absolute, and
    /// [`Error::Catalog`] for duplicate store ids or codes.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;

        let mut ids = BTreeSet::new();
        let mut codes = BTreeSet::new();
        for store in &snapshot.stores {
            url::Url::parse(&store.base_url).map_err(|e| {
                Error::InvalidUrl(format!("store '{}' base_url '{}': {e}", store.code, store.base_url))
            })?;
            if !ids.insert(store.id) {
                return Err(Error::Catalog(format!("duplicate store id {}", store.id)));
            }
            if !codes.insert(store.code.as_str()) {
                return Err(Error::Catalog(format!("duplicate store code '{}'", store.code)));
            }
        }

        Ok(Self { snapshot })
    }
}

fn canonical_url<T>(
    scoped: &Scoped<T>,
    store: &Store,
    url: Option<&String>,
    url_key: Option<&String>,
    suffix: &str,
) -> Option<String> {
    scoped
        .urls
        .get(&store.code)
        .or(url)
        .cloned()
        .or_else(|| {
            url_key
                .filter(|key| !key.is_empty())
                .map(|key| format!("{}/{key}{suffix}", store.base_url()))
        })
}

impl Catalog for SnapshotCatalog {
    fn stores(&self) -> Result<Vec<Store>> {
        Ok(self.snapshot.stores.clone())
    }

    fn products(&self, store: &Store) -> Result<Vec<ProductView>> {
        Ok(self
            .snapshot
            .products
            .iter()
            .filter(|scoped| scoped.in_store(store))
            .map(|scoped| {
                let mut view = scoped.view.clone();
                view.url = canonical_url(
                    scoped,
                    store,
                    view.url.as_ref(),
                    view.url_key.as_ref(),
                    &store.product_url_suffix,
                );
                view
            })
            .collect())
    }

    fn categories(&self, store: &Store) -> Result<Vec<CategoryView>> {
        Ok(self
            .snapshot
            .categories
            .iter()
            .filter(|scoped| scoped.in_store(store))
            .map(|scoped| {
                let mut view = scoped.view.clone();
                view.url = canonical_url(
                    scoped,
                    store,
                    view.url.as_ref(),
                    view.url_key.as_ref(),
                    &store.category_url_suffix,
                );
                view
            })
            .collect())
    }

    fn pages(&self, store: &Store) -> Result<Vec<PageView>> {
        Ok(self
            .snapshot
            .pages
            .iter()
            .filter(|scoped| scoped.in_store(store))
            .map(|scoped| scoped.view.clone())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "stores": [
            {"id": 1, "code": "default", "base_url": "https://shop.test/", "locale": "en_US"},
            {"id": 2, "code": "german", "base_url": "https://shop.test/de/", "locale": "de_DE",
             "product_url_suffix": ""}
        ],
        "products": [
            {"id": 10, "name": "Bag", "url_key": "bag", "enabled": true, "store_ids": [1, 2],
             "urls": {"german": "https://shop.test/de/tasche"}},
            {"id": 11, "name": "Hat", "url_key": "hat", "store_ids": [2]},
            {"id": 12, "name": "Orphan"}
        ],
        "categories": [
            {"id": 3, "name": "Gear", "url_key": "gear", "level": 2, "is_active": true}
        ],
        "pages": [
            {"id": 1, "identifier": "home", "is_active": true},
            {"id": 2, "identifier": "about-us", "is_active": true, "store_ids": [1]}
        ]
    }"#;

    fn store(catalog: &SnapshotCatalog, id: u32) -> Store {
        catalog.store(StoreId(id)).unwrap()
    }

    #[test]
    fn test_products_are_scoped_and_urls_resolved() {
        let catalog = SnapshotCatalog::from_json(SNAPSHOT).unwrap();

        let default = catalog.products(&store(&catalog, 1)).unwrap();
        let ids: Vec<u64> = default.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert_eq!(default[0].url.as_deref(), Some("https://shop.test/bag.html"));
        assert_eq!(default[1].url, None);

        let german = catalog.products(&store(&catalog, 2)).unwrap();
        assert_eq!(german[0].url.as_deref(), Some("https://shop.test/de/tasche"));
        assert_eq!(german[1].url.as_deref(), Some("https://shop.test/de/hat"));
    }

    #[test]
    fn test_categories_and_pages() {
        let catalog = SnapshotCatalog::from_json(SNAPSHOT).unwrap();
        let categories = catalog.categories(&store(&catalog, 1)).unwrap();
        assert_eq!(categories[0].url.as_deref(), Some("https://shop.test/gear.html"));

        assert_eq!(catalog.pages(&store(&catalog, 1)).unwrap().len(), 2);
        assert_eq!(catalog.pages(&store(&catalog, 2)).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let err = SnapshotCatalog::from_json(
            r#"{"stores": [{"id": 1, "code": "default", "base_url": "/shop"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_duplicate_store_ids() {
        let err = SnapshotCatalog::from_json(
            r#"{"stores": [
                {"id": 1, "code": "a", "base_url": "https://a.test"},
                {"id": 1, "code": "b", "base_url": "https://b.test"}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(err.category(), "catalog");
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, SNAPSHOT).unwrap();

        let catalog = SnapshotCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.stores().unwrap().len(), 2);

        let missing = SnapshotCatalog::from_file(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(Error::Catalog(_))));
    }
}
