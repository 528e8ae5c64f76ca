//! Configuration management for seomap.
//!
//! Settings live in a single TOML file with global defaults and optional
//! per-store overrides, mirroring the store-scoped configuration of the host
//! platform.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Built-in defaults**: [`Config::default`]
//! 2. **Config file**: `--config`, `SEOMAP_CONFIG`, or the platform config dir
//! 3. **Store scope**: `[stores.<code>.sitemap]` overrides, resolved with
//!    [`Config::sitemap_for_store`]
//!
//! ## Example Configuration File
//!
//! ```toml
//! public_dir = "pub"
//! catalog = "catalog.json"
//!
//! [sitemap]
//! enabled = true
//! max_urls_per_sitemap = 50000
//! hreflang_enabled = true
//! cron_enabled = true
//! cron_hour = 3
//!
//! [sitemap.product]
//! priority = "0.8"
//! changefreq = "daily"
//! exclude_out_of_stock = true
//!
//! [sitemap.cms]
//! priority = "0.3"
//!
//! [robots]
//! enabled = true
//!
//! [stores.german.sitemap]
//! enabled = false
//! ```
//!
//! ```rust
//! use seomap_core::Config;
//!
//! let config: Config = toml::from_str(r#"
//!     [sitemap.product]
//!     priority = "0.8"
//!
//!     [stores.outlet.sitemap.product]
//!     priority = "0.2"
//! "#)?;
//!
//! assert_eq!(config.sitemap_for_store("default").product.priority.as_str(), "0.8");
//! assert_eq!(config.sitemap_for_store("outlet").product.priority.as_str(), "0.2");
//! # Ok::<(), toml::de::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{ChangeFrequency, Priority};
use crate::{Error, Result};

/// Default cap on `<url>` elements per leaf sitemap (the sitemap protocol limit).
pub const DEFAULT_MAX_URLS_PER_SITEMAP: usize = 50_000;

/// Default hour of day for the scheduled generation job.
pub const DEFAULT_CRON_HOUR: u8 = 3;

const DEFAULT_ROBOTS_CONTENT: &str = "User-agent: *
Disallow: /checkout/
Disallow: /customer/
Disallow: /catalogsearch/
Disallow: /wishlist/";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Public web root the sitemap, stylesheet and robots.txt are written to.
    pub public_dir: PathBuf,
    /// Catalog snapshot consumed by the CLI.
    pub catalog: Option<PathBuf>,
    /// Global sitemap settings.
    pub sitemap: SitemapConfig,
    /// robots.txt settings.
    pub robots: RobotsConfig,
    /// Per-store overrides keyed by store code.
    pub stores: BTreeMap<String, StoreOverrides>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("pub"),
            catalog: None,
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
            stores: BTreeMap::new(),
        }
    }
}

/// Sitemap settings, either global or resolved for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Master switch for sitemap generation.
    pub enabled: bool,
    /// Maximum `<url>` elements per leaf file; `0` means the default.
    pub max_urls_per_sitemap: usize,
    /// Attach hreflang alternates to every entry.
    pub hreflang_enabled: bool,
    /// Let the scheduled job run.
    pub cron_enabled: bool,
    /// Hour of day (0-23) the scheduled job runs at.
    pub cron_hour: u8,
    /// Product sitemap settings.
    pub product: ProductSitemapConfig,
    /// Category sitemap settings.
    pub category: EntitySitemapConfig,
    /// CMS page sitemap settings.
    pub cms: EntitySitemapConfig,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_urls_per_sitemap: DEFAULT_MAX_URLS_PER_SITEMAP,
            hreflang_enabled: false,
            cron_enabled: false,
            cron_hour: DEFAULT_CRON_HOUR,
            product: ProductSitemapConfig::default(),
            category: EntitySitemapConfig::default(),
            cms: EntitySitemapConfig::default(),
        }
    }
}

impl SitemapConfig {
    /// Per-file cap actually used when chunking.
    #[must_use]
    pub const fn effective_max_urls(&self) -> usize {
        if self.max_urls_per_sitemap == 0 {
            DEFAULT_MAX_URLS_PER_SITEMAP
        } else {
            self.max_urls_per_sitemap
        }
    }

    fn apply(&mut self, overrides: &SitemapOverrides) {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(max) = overrides.max_urls_per_sitemap {
            self.max_urls_per_sitemap = max;
        }
        if let Some(hreflang) = overrides.hreflang_enabled {
            self.hreflang_enabled = hreflang;
        }
        self.product.apply(&overrides.product);
        self.category.apply(&overrides.category);
        self.cms.apply(&overrides.cms);
    }
}

/// Settings shared by the category and CMS sitemaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySitemapConfig {
    /// Whether this entity type is included.
    pub enabled: bool,
    /// Priority written for each entry.
    pub priority: Priority,
    /// Change frequency written for each entry.
    pub changefreq: ChangeFrequency,
}

impl Default for EntitySitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: Priority::default(),
            changefreq: ChangeFrequency::default(),
        }
    }
}

impl EntitySitemapConfig {
    fn apply(&mut self, overrides: &EntityOverrides) {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(priority) = &overrides.priority {
            self.priority = priority.clone();
        }
        if let Some(changefreq) = overrides.changefreq {
            self.changefreq = changefreq;
        }
    }
}

/// Product sitemap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ProductSitemapConfig {
    /// Whether products are included.
    pub enabled: bool,
    /// Priority written for each entry.
    pub priority: Priority,
    /// Change frequency written for each entry.
    pub changefreq: ChangeFrequency,
    /// Attach gallery images.
    pub images: bool,
    /// Attach product videos.
    pub videos: bool,
    /// Skip disabled products.
    pub exclude_disabled: bool,
    /// Skip products not visible in catalog or search.
    pub exclude_not_visible: bool,
    /// Skip out-of-stock products.
    pub exclude_out_of_stock: bool,
}

impl Default for ProductSitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: Priority::default(),
            changefreq: ChangeFrequency::default(),
            images: true,
            videos: false,
            exclude_disabled: true,
            exclude_not_visible: true,
            exclude_out_of_stock: false,
        }
    }
}

impl ProductSitemapConfig {
    fn apply(&mut self, overrides: &ProductOverrides) {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(priority) = &overrides.priority {
            self.priority = priority.clone();
        }
        if let Some(changefreq) = overrides.changefreq {
            self.changefreq = changefreq;
        }
        if let Some(images) = overrides.images {
            self.images = images;
        }
        if let Some(videos) = overrides.videos {
            self.videos = videos;
        }
        if let Some(flag) = overrides.exclude_disabled {
            self.exclude_disabled = flag;
        }
        if let Some(flag) = overrides.exclude_not_visible {
            self.exclude_not_visible = flag;
        }
        if let Some(flag) = overrides.exclude_out_of_stock {
            self.exclude_out_of_stock = flag;
        }
    }
}

/// robots.txt settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Whether robots.txt is managed at all.
    pub enabled: bool,
    /// Append a `Sitemap:` line per store with sitemaps enabled.
    pub include_sitemaps: bool,
    /// Directive block written at the top of the file.
    pub content: String,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            include_sitemaps: true,
            content: DEFAULT_ROBOTS_CONTENT.to_string(),
        }
    }
}

/// Store-scoped overrides (`[stores.<code>]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOverrides {
    /// Sitemap overrides for this store.
    pub sitemap: SitemapOverrides,
}

/// Optional sitemap overrides; `None` inherits the global value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapOverrides {
    /// Override for [`SitemapConfig::enabled`].
    pub enabled: Option<bool>,
    /// Override for [`SitemapConfig::max_urls_per_sitemap`].
    pub max_urls_per_sitemap: Option<usize>,
    /// Override for [`SitemapConfig::hreflang_enabled`].
    pub hreflang_enabled: Option<bool>,
    /// Product overrides.
    pub product: ProductOverrides,
    /// Category overrides.
    pub category: EntityOverrides,
    /// CMS overrides.
    pub cms: EntityOverrides,
}

/// Optional overrides for [`EntitySitemapConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityOverrides {
    /// Override for `enabled`.
    pub enabled: Option<bool>,
    /// Override for `priority`.
    pub priority: Option<Priority>,
    /// Override for `changefreq`.
    pub changefreq: Option<ChangeFrequency>,
}

/// Optional overrides for [`ProductSitemapConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductOverrides {
    /// Override for `enabled`.
    pub enabled: Option<bool>,
    /// Override for `priority`.
    pub priority: Option<Priority>,
    /// Override for `changefreq`.
    pub changefreq: Option<ChangeFrequency>,
    /// Override for `images`.
    pub images: Option<bool>,
    /// Override for `videos`.
    pub videos: Option<bool>,
    /// Override for `exclude_disabled`.
    pub exclude_disabled: Option<bool>,
    /// Override for `exclude_not_visible`.
    pub exclude_not_visible: Option<bool>,
    /// Override for `exclude_out_of_stock`.
    pub exclude_out_of_stock: Option<bool>,
}

impl Config {
    /// Load configuration from the default location, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config directory cannot be determined
    /// - The config file exists but cannot be read or parsed
    /// - The config file contains invalid values
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// Relative `public_dir` and `catalog` paths are resolved against the
    /// directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Get the path where the configuration file is looked up by default.
    ///
    /// - Linux: `~/.config/seomap/config.toml`
    /// - macOS: `~/Library/Application Support/dev.flipdev.seomap/config.toml`
    /// - Windows: `%APPDATA%\flipdev\seomap\config\config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "flipdev", "seomap")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `sitemap.cron_hour` is outside `0..=23`.
    pub fn validate(&self) -> Result<()> {
        if self.sitemap.cron_hour > 23 {
            return Err(Error::Config(format!(
                "sitemap.cron_hour must be between 0 and 23, got {}",
                self.sitemap.cron_hour
            )));
        }
        Ok(())
    }

    /// Resolve the sitemap settings for one store code.
    #[must_use]
    pub fn sitemap_for_store(&self, store_code: &str) -> SitemapConfig {
        let mut settings = self.sitemap.clone();
        if let Some(overrides) = self.stores.get(store_code) {
            settings.apply(&overrides.sitemap);
        }
        settings
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        if self.public_dir.is_relative() {
            self.public_dir = base.join(&self.public_dir);
        }
        if let Some(catalog) = self.catalog.as_mut() {
            if catalog.is_relative() {
                *catalog = base.join(&*catalog);
            }
        }
    }
}
