//! Per-store sitemap orchestration.
//!
//! [`SitemapBuilder`] resolves a store's settings, runs the product, category
//! and CMS generators in that order, chunk-writes their entries and finishes
//! with the store's sitemap index. A single-store run propagates any failure;
//! a fleet run ([`SitemapBuilder::generate_for_all_stores`]) records failures
//! per store and keeps going.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, error, info, instrument, warn};

use crate::Result;
use crate::catalog::{Catalog, Store};
use crate::config::Config;
use crate::context::{GenerationContext, validate_store_code};
use crate::generator::{EntityGenerator, default_generators};
use crate::types::{SitemapFileSet, StoreId};
use crate::writer::SitemapWriter;
use crate::xsl;

/// Outcome of one store in a fleet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreResult {
    /// Generation finished; the file set may be empty.
    Success {
        /// Store code.
        store_code: String,
        /// Files written.
        files: SitemapFileSet,
    },
    /// Generation failed for this store.
    Failure {
        /// Store code.
        store_code: String,
        /// Error message.
        error: String,
    },
}

impl StoreResult {
    /// Whether the store generated without error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Code of the store this result belongs to.
    #[must_use]
    pub fn store_code(&self) -> &str {
        match self {
            Self::Success { store_code, .. } | Self::Failure { store_code, .. } => store_code,
        }
    }
}

impl Serialize for StoreResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StoreResult", 3)?;
        match self {
            Self::Success { store_code, files } => {
                state.serialize_field("store", store_code)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("files", &files.filenames())?;
            },
            Self::Failure { store_code, error } => {
                state.serialize_field("store", store_code)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            },
        }
        state.end()
    }
}

/// Builds sitemaps for the stores of a catalog.
pub struct SitemapBuilder {
    catalog: Arc<dyn Catalog>,
    config: Config,
    writer: SitemapWriter,
    generators: Vec<Box<dyn EntityGenerator>>,
}

impl SitemapBuilder {
    /// Create a builder writing into `config.public_dir`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, config: Config) -> Self {
        let writer = SitemapWriter::new(config.public_dir.clone());
        let generators = default_generators(&catalog);
        Self {
            catalog,
            config,
            writer,
            generators,
        }
    }

    /// The catalog stores are read from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    /// The configuration settings are resolved from.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generate all sitemap files for one store.
    ///
    /// Returns an empty file set when the store's sitemap is disabled or no
    /// generator produced entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unknown, a generator fails or a file
    /// cannot be written.
    #[instrument(skip(self), fields(store = %store_id))]
    pub fn generate_for_store(&self, store_id: StoreId) -> Result<SitemapFileSet> {
        let store = self.catalog.store(store_id)?;
        self.generate(store)
    }

    /// Generate sitemaps for every active store, isolating failures.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store list itself cannot be read.
    #[instrument(skip(self))]
    pub fn generate_for_all_stores(&self) -> Result<BTreeMap<StoreId, StoreResult>> {
        let stores = self.catalog.stores()?;
        let mut results = BTreeMap::new();

        for store in stores.into_iter().filter(|store| store.is_active) {
            let result = match self.generate_for_store(store.id) {
                Ok(files) => StoreResult::Success {
                    store_code: store.code,
                    files,
                },
                Err(err) => {
                    error!(
                        store = %store.code,
                        category = err.category(),
                        error = %err,
                        "Sitemap generation failed"
                    );
                    StoreResult::Failure {
                        store_code: store.code,
                        error: err.to_string(),
                    }
                },
            };
            results.insert(store.id, result);
        }
        Ok(results)
    }

    fn generate(&self, store: Store) -> Result<SitemapFileSet> {
        validate_store_code(&store.code)?;
        let settings = self.config.sitemap_for_store(&store.code);
        if !settings.enabled {
            info!(store = %store.code, "Sitemap disabled for store, skipping");
            return Ok(SitemapFileSet::default());
        }

        let xsl_url = self.stylesheet_url(&store);
        let ctx = GenerationContext::new(store, settings, Utc::now()).with_xsl_url(xsl_url);

        let mut files = SitemapFileSet::default();
        for generator in &self.generators {
            if !generator.is_enabled(&ctx) {
                debug!(kind = generator.filename(), "Generator disabled");
                continue;
            }
            let entries = generator.generate(&ctx)?;
            if entries.is_empty() {
                debug!(kind = generator.filename(), "No entries, skipping");
                continue;
            }
            let leaves = self
                .writer
                .write_entries(&ctx, generator.filename(), &entries)?;
            files.leaf_files.extend(leaves);
        }

        if !files.leaf_files.is_empty() {
            let index = ctx.index_filename();
            self.writer.write_index(&ctx, &files.leaf_files, &index)?;
            files.index_file = Some(index);
        }

        info!(
            store = %ctx.store.code,
            files = files.leaf_files.len(),
            entries = files.total_entries(),
            "Sitemap generated"
        );
        Ok(files)
    }

    fn stylesheet_url(&self, store: &Store) -> Option<String> {
        match xsl::deploy(self.writer.public_dir()) {
            Ok(_) => Some(xsl::stylesheet_url(store.base_url())),
            Err(err) => {
                warn!(error = %err, "Could not deploy sitemap stylesheet, omitting reference");
                None
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;
    use crate::catalog::{CategoryView, PageView};
    use crate::generator::test_support::{MemoryCatalog, product, store};
    use crate::reader::{SitemapDocument, read_sitemap};
    use crate::types::SitemapEntry;

    fn config(dir: &Path) -> Config {
        Config {
            public_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    fn builder(catalog: MemoryCatalog, config: Config) -> SitemapBuilder {
        SitemapBuilder::new(Arc::new(catalog), config)
    }

    fn urlset(path: &Path) -> Vec<SitemapEntry> {
        match read_sitemap(path).unwrap() {
            SitemapDocument::UrlSet(entries) => entries,
            SitemapDocument::Index(_) => panic!("expected urlset at {}", path.display()),
        }
    }

    #[test]
    fn test_fifty_products_without_images() {
        // Given: 50 enabled products and images turned off
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            products: (1..=50).map(|i| product(i, &format!("p{i}"))).collect(),
            ..MemoryCatalog::default()
        };
        let mut config = config(dir.path());
        config.sitemap.product.images = false;

        // When: generating the store
        let files = builder(catalog, config).generate_for_store(StoreId(1)).unwrap();

        // Then: one unsuffixed product sitemap in catalog order
        assert_eq!(
            files.filenames(),
            vec!["default-sitemap-products.xml", "default-sitemap.xml"]
        );
        let xml = fs::read_to_string(dir.path().join("default-sitemap-products.xml")).unwrap();
        assert_eq!(xml.matches("<url>").count(), 50);
        assert!(!xml.contains("<image:image>"));

        let entries = urlset(&dir.path().join("default-sitemap-products.xml"));
        assert!(entries.iter().all(|e| e.priority.as_ref().unwrap().as_str() == "0.5"));
        let expected: Vec<String> = (1..=50)
            .map(|i| format!("https://default.shop.test/p{i}.html"))
            .collect();
        let actual: Vec<String> = entries.into_iter().map(|e| e.location).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_generators_run_in_fixed_order_and_index_lists_all_leaves() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            products: (1..=3).map(|i| product(i, &format!("p{i}"))).collect(),
            categories: vec![CategoryView {
                id: 1,
                url: Some("https://default.shop.test/gear.html".into()),
                level: 2,
                is_active: true,
                ..CategoryView::default()
            }],
            pages: vec![PageView {
                identifier: "home".into(),
                is_active: true,
                ..PageView::default()
            }],
            ..MemoryCatalog::default()
        };
        let mut config = config(dir.path());
        config.sitemap.max_urls_per_sitemap = 2;

        let files = builder(catalog, config).generate_for_store(StoreId(1)).unwrap();

        assert_eq!(
            files.filenames(),
            vec![
                "default-sitemap-products-1.xml",
                "default-sitemap-products-2.xml",
                "default-sitemap-categories.xml",
                "default-sitemap-cms.xml",
                "default-sitemap.xml",
            ]
        );
        assert_eq!(files.total_entries(), 5);

        match read_sitemap(&dir.path().join("default-sitemap.xml")).unwrap() {
            SitemapDocument::Index(refs) => {
                assert_eq!(refs.len(), 4);
                assert_eq!(
                    refs[0].location,
                    "https://default.shop.test/default-sitemap-products-1.xml"
                );
            },
            SitemapDocument::UrlSet(_) => panic!("expected index"),
        }
        assert!(dir.path().join(xsl::XSL_FILENAME).exists());
        let leaf = fs::read_to_string(dir.path().join("default-sitemap-cms.xml")).unwrap();
        assert!(leaf.contains("href=\"https://default.shop.test/sitemap.xsl\""));
    }

    #[test]
    fn test_disabled_store_or_generator_produces_nothing() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            products: vec![product(1, "p1")],
            ..MemoryCatalog::default()
        };
        let mut config = config(dir.path());
        config.sitemap.product.enabled = false;

        let files = builder(catalog, config.clone())
            .generate_for_store(StoreId(1))
            .unwrap();
        assert!(files.is_empty());
        assert!(!dir.path().join("default-sitemap.xml").exists());

        config.sitemap.product.enabled = true;
        config.sitemap.enabled = false;
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            products: vec![product(1, "p1")],
            ..MemoryCatalog::default()
        };
        assert!(builder(catalog, config).generate_for_store(StoreId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            ..MemoryCatalog::default()
        };

        let err = builder(catalog, config(dir.path()))
            .generate_for_store(StoreId(42))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_all_stores_isolates_failures() {
        // Given: store A is healthy, store B's lookup fails, store C is inactive
        let dir = TempDir::new().unwrap();
        let mut inactive = store(3, "closed", "fr_FR");
        inactive.is_active = false;
        let catalog = MemoryCatalog {
            stores: vec![store(1, "a", "en_US"), store(2, "b", "de_DE"), inactive],
            products: vec![product(1, "p1")],
            failing_stores: [StoreId(2)].into_iter().collect(),
            ..MemoryCatalog::default()
        };

        // When
        let results = builder(catalog, config(dir.path()))
            .generate_for_all_stores()
            .unwrap();

        // Then
        assert_eq!(results.len(), 2);
        assert!(results[&StoreId(1)].is_success());
        assert!(!results[&StoreId(2)].is_success());
        assert!(dir.path().join("a-sitemap.xml").exists());
        assert!(dir.path().join("a-sitemap-products.xml").exists());
        assert!(!dir.path().join("b-sitemap.xml").exists());

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["1"]["success"], true);
        assert_eq!(json["1"]["files"][0], "a-sitemap-products.xml");
        assert_eq!(json["2"]["success"], false);
        assert!(json["2"]["error"].as_str().unwrap().contains("lookup failed"));
    }

    #[test]
    fn test_all_stores_fails_when_store_list_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores_fail: true,
            ..MemoryCatalog::default()
        };
        assert!(builder(catalog, config(dir.path())).generate_for_all_stores().is_err());
    }

    #[test]
    fn test_hreflang_across_three_locales() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![
                store(1, "en", "en_US"),
                store(2, "de", "de_DE"),
                store(3, "fr", "fr_FR"),
            ],
            products: vec![product(1, "bag")],
            product_urls: [((StoreId(1), 1), "https://en.shop.test/bag.html".to_string())]
                .into_iter()
                .collect(),
            ..MemoryCatalog::default()
        };
        let mut config = config(dir.path());
        config.sitemap.hreflang_enabled = true;

        builder(catalog, config).generate_for_store(StoreId(1)).unwrap();

        let entries = urlset(&dir.path().join("en-sitemap-products.xml"));
        let links = &entries[0].alternate_links;
        let tags: Vec<&str> = links.iter().map(|l| l.hreflang.as_str()).collect();
        assert_eq!(tags, vec!["en-us", "x-default", "de-de", "fr-fr"]);
        let x_default = links.iter().find(|l| l.hreflang == "x-default").unwrap();
        assert_eq!(x_default.href, "https://en.shop.test/bag.html");
        assert_eq!(entries[0].location, x_default.href);
    }

    #[test]
    fn test_regeneration_is_byte_identical_for_leaves() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US")],
            products: (1..=5).map(|i| product(i, &format!("p{i}"))).collect(),
            ..MemoryCatalog::default()
        };
        let builder = builder(catalog, config(dir.path()));
        let leaf = dir.path().join("default-sitemap-products.xml");

        builder.generate_for_store(StoreId(1)).unwrap();
        let first = fs::read(&leaf).unwrap();
        builder.generate_for_store(StoreId(1)).unwrap();
        let second = fs::read(&leaf).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_store_override_changes_only_that_store() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "a", "en_US"), store(2, "b", "de_DE")],
            products: vec![product(1, "p1")],
            ..MemoryCatalog::default()
        };
        let config: Config = toml::from_str("[stores.b.sitemap]\nenabled = false\n").unwrap();
        let config = Config {
            public_dir: dir.path().to_path_buf(),
            ..config
        };

        let results = builder(catalog, config).generate_for_all_stores().unwrap();
        match &results[&StoreId(2)] {
            StoreResult::Success { files, .. } => assert!(files.is_empty()),
            StoreResult::Failure { error, .. } => panic!("unexpected failure: {error}"),
        }
        assert!(dir.path().join("a-sitemap.xml").exists());
    }

    #[test]
    fn test_store_code_cannot_leave_public_dir() {
        let root = TempDir::new().unwrap();
        let public = root.path().join("pub");
        fs::create_dir(&public).unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "default", "en_US"), store(2, "../escaped", "en_GB")],
            products: vec![product(1, "p1")],
            ..MemoryCatalog::default()
        };

        let results = builder(catalog, config(&public))
            .generate_for_all_stores()
            .unwrap();

        match &results[&StoreId(2)] {
            StoreResult::Failure { error, .. } => assert!(error.contains("Invalid store code")),
            StoreResult::Success { .. } => panic!("store with a path code generated"),
        }
        assert!(results[&StoreId(1)].is_success());
        assert!(!root.path().join("escaped-sitemap.xml").exists());
        assert!(!root.path().join("escaped-sitemap-products.xml").exists());
        assert!(public.join("default-sitemap.xml").exists());
    }
}
