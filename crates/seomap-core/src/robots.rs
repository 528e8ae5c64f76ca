//! robots.txt generation.
//!
//! The file is the configured directive block followed, when enabled, by a
//! `Sitemap:` line for each active store whose sitemap is enabled.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::Result;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::context::{index_filename, validate_store_code};

/// robots.txt filename inside the public directory.
pub const ROBOTS_FILENAME: &str = "robots.txt";

/// Renders and writes robots.txt.
pub struct RobotsGenerator {
    catalog: Arc<dyn Catalog>,
    config: Config,
}

impl RobotsGenerator {
    /// Create a generator for `config.public_dir`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, config: Config) -> Self {
        Self { catalog, config }
    }

    /// Whether robots.txt management is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.robots.enabled
    }

    /// Path of the managed file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.config.public_dir.join(ROBOTS_FILENAME)
    }

    /// Render the file content.
    ///
    /// # Errors
    ///
    /// Returns an error if sitemap lines are requested and the store list
    /// cannot be read.
    pub fn render(&self) -> Result<String> {
        let robots = &self.config.robots;
        let mut content = robots.content.trim_end().to_string();
        content.push('\n');

        if robots.include_sitemaps {
            let sitemap_lines: Vec<String> = self
                .catalog
                .stores()?
                .into_iter()
                .filter(|store| store.is_active && self.config.sitemap_for_store(&store.code).enabled)
                .filter(|store| validate_store_code(&store.code).is_ok())
                .map(|store| format!("Sitemap: {}/{}", store.base_url(), index_filename(&store.code)))
                .collect();

            if !sitemap_lines.is_empty() {
                content.push('\n');
                for line in sitemap_lines {
                    content.push_str(&line);
                    content.push('\n');
                }
            }
        }
        Ok(content)
    }

    /// Write robots.txt when enabled.
    ///
    /// Returns `false` without touching the file when disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn generate(&self) -> Result<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }
        let content = self.render()?;
        fs::create_dir_all(&self.config.public_dir)?;
        fs::write(self.path(), content)?;
        info!(path = %self.path().display(), "Wrote robots.txt");
        Ok(true)
    }

    /// Current robots.txt content, if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn current_content(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.path()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::generator::test_support::{MemoryCatalog, store};

    fn generator(dir: &TempDir, toml_src: &str) -> RobotsGenerator {
        let mut inactive = store(3, "closed", "fr_FR");
        inactive.is_active = false;
        let catalog = MemoryCatalog {
            stores: vec![store(1, "en", "en_US"), store(2, "de", "de_DE"), inactive],
            ..MemoryCatalog::default()
        };
        let mut config: Config = toml::from_str(toml_src).unwrap();
        config.public_dir = dir.path().to_path_buf();
        RobotsGenerator::new(Arc::new(catalog), config)
    }

    #[test]
    fn test_render_lists_only_enabled_active_stores() {
        let dir = TempDir::new().unwrap();
        let robots = generator(
            &dir,
            r#"
            [robots]
            enabled = true
            content = "User-agent: *\nDisallow: /checkout/\n\n"

            [stores.de.sitemap]
            enabled = false
            "#,
        );

        assert_eq!(
            robots.render().unwrap(),
            "User-agent: *\nDisallow: /checkout/\n\nSitemap: https://en.shop.test/en-sitemap.xml\n"
        );
    }

    #[test]
    fn test_render_skips_stores_that_cannot_have_a_sitemap() {
        let dir = TempDir::new().unwrap();
        let catalog = MemoryCatalog {
            stores: vec![store(1, "en", "en_US"), store(2, "../escaped", "en_GB")],
            ..MemoryCatalog::default()
        };
        let config = Config {
            public_dir: dir.path().to_path_buf(),
            ..toml::from_str::<Config>("[robots]\nenabled = true\ncontent = \"User-agent: *\"\n").unwrap()
        };

        let content = RobotsGenerator::new(Arc::new(catalog), config).render().unwrap();
        assert_eq!(
            content,
            "User-agent: *\n\nSitemap: https://en.shop.test/en-sitemap.xml\n"
        );
    }

    #[test]
    fn test_render_without_sitemaps() {
        let dir = TempDir::new().unwrap();
        let robots = generator(
            &dir,
            "[robots]\nenabled = true\ninclude_sitemaps = false\ncontent = \"User-agent: *\"\n",
        );
        assert_eq!(robots.render().unwrap(), "User-agent: *\n");
    }

    #[test]
    fn test_generate_respects_enabled_flag() {
        let dir = TempDir::new().unwrap();

        let disabled = generator(&dir, "");
        assert!(!disabled.generate().unwrap());
        assert_eq!(disabled.current_content().unwrap(), None);

        let enabled = generator(&dir, "[robots]\nenabled = true\n");
        assert!(enabled.generate().unwrap());
        let written = enabled.current_content().unwrap().unwrap();
        assert!(written.starts_with("User-agent: *"));
        assert!(written.contains("Sitemap: https://de.shop.test/de-sitemap.xml"));
    }
}
