//! Typed read access to the store catalog.
//!
//! Generators never talk to the platform directly. They read stores and
//! entities through the [`Catalog`] trait, which exposes one explicit view per
//! entity kind. Adapters implement the trait over whatever backs the catalog;
//! [`SnapshotCatalog`] reads a JSON export.

mod snapshot;

pub use snapshot::SnapshotCatalog;

use serde::{Deserialize, Serialize};

use crate::types::{StoreId, VideoLink};
use crate::{Error, Result};

/// Base-image value the platform uses for "no image selected".
pub const NO_SELECTION: &str = "no_selection";

/// A store view: one localized storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Numeric id.
    pub id: StoreId,
    /// Store code, used as the sitemap filename prefix.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Secure base URL, e.g. `https://shop.example/`.
    pub base_url: String,
    /// Media base URL; defaults to `{base_url}/media/`.
    #[serde(default)]
    pub media_url: Option<String>,
    /// Locale code such as `en_US`.
    #[serde(default)]
    pub locale: Option<String>,
    /// Whether the storefront is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Suffix appended to product URL keys.
    #[serde(default = "default_url_suffix")]
    pub product_url_suffix: String,
    /// Suffix appended to category URL keys.
    #[serde(default = "default_url_suffix")]
    pub category_url_suffix: String,
}

const fn default_true() -> bool {
    true
}

fn default_url_suffix() -> String {
    ".html".to_string()
}

impl Store {
    /// Base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Media base URL, always ending in `/`.
    #[must_use]
    pub fn media_url(&self) -> String {
        match &self.media_url {
            Some(url) if url.ends_with('/') => url.clone(),
            Some(url) => format!("{url}/"),
            None => format!("{}/media/", self.base_url()),
        }
    }
}

/// A product as seen from one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductView {
    /// Entity id.
    pub id: u64,
    /// Product name, used as image title.
    pub name: String,
    /// Canonical URL in this store.
    pub url: Option<String>,
    /// URL key shared across stores.
    pub url_key: Option<String>,
    /// Status attribute is "enabled".
    pub enabled: bool,
    /// Visible in catalog or search.
    pub visible_in_site: bool,
    /// Stock status is "in stock".
    pub in_stock: bool,
    /// Raw update timestamp.
    pub updated_at: Option<String>,
    /// Raw creation timestamp.
    pub created_at: Option<String>,
    /// Absolute URLs of the media gallery images, in gallery order.
    pub gallery: Vec<String>,
    /// Base image path relative to the product media directory.
    pub base_image: Option<String>,
    /// Attached videos.
    pub videos: Vec<VideoLink>,
}

/// A category as seen from one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryView {
    /// Entity id.
    pub id: u64,
    /// Category name.
    pub name: String,
    /// Canonical URL in this store.
    pub url: Option<String>,
    /// URL key shared across stores.
    pub url_key: Option<String>,
    /// Tree depth; `0` is the tree root, `1` a store root category.
    pub level: u32,
    /// Whether the category is active.
    pub is_active: bool,
    /// Raw update timestamp.
    pub updated_at: Option<String>,
    /// Raw creation timestamp.
    pub created_at: Option<String>,
    /// Image as an absolute URL, a `/`-rooted path or a bare filename.
    pub image: Option<String>,
}

/// A CMS page as seen from one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageView {
    /// Entity id.
    pub id: u64,
    /// URL identifier; `home` is the store front page.
    pub identifier: String,
    /// Page title.
    pub title: String,
    /// Whether the page is active.
    pub is_active: bool,
    /// Raw update timestamp.
    pub updated_at: Option<String>,
    /// Raw creation timestamp.
    pub created_at: Option<String>,
}

/// Source of stores and store-scoped entities.
///
/// Implementations return entities in catalog iteration order; generators
/// preserve that order. Filtering (status, visibility, stock, tree level) is
/// applied by the generators, not by the catalog.
pub trait Catalog: Send + Sync {
    /// All stores, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the store list cannot be read.
    fn stores(&self) -> Result<Vec<Store>>;

    /// Look up one store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or whatever
    /// [`Catalog::stores`] returns.
    fn store(&self, id: StoreId) -> Result<Store> {
        self.stores()?
            .into_iter()
            .find(|store| store.id == id)
            .ok_or_else(|| Error::NotFound(format!("store {id}")))
    }

    /// Products assigned to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the products cannot be listed.
    fn products(&self, store: &Store) -> Result<Vec<ProductView>>;

    /// Categories assigned to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the categories cannot be listed.
    fn categories(&self, store: &Store) -> Result<Vec<CategoryView>>;

    /// CMS pages assigned to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if the pages cannot be listed.
    fn pages(&self, store: &Store) -> Result<Vec<PageView>>;
}
