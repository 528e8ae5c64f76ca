#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Two active stores with products, one category and CMS pages, plus an
/// inactive store.
#[allow(dead_code)]
pub const CATALOG: &str = r#"{
    "stores": [
        {"id": 1, "code": "default", "name": "English", "base_url": "https://shop.test/",
         "locale": "en_US"},
        {"id": 2, "code": "german", "name": "Deutsch", "base_url": "https://shop.test/de/",
         "locale": "de_DE"},
        {"id": 3, "code": "closed", "base_url": "https://closed.test/", "is_active": false}
    ],
    "products": [
        {"id": 1, "name": "Bag", "url_key": "bag", "enabled": true, "visible_in_site": true,
         "in_stock": true, "updated_at": "2024-01-15 10:30:00",
         "gallery": ["https://shop.test/media/catalog/product/b/a/bag.jpg"]},
        {"id": 2, "name": "Hat", "url_key": "hat", "enabled": true, "visible_in_site": true,
         "in_stock": true, "updated_at": "2024-01-16 08:00:00"},
        {"id": 3, "name": "Retired", "url_key": "retired", "enabled": false,
         "visible_in_site": true, "in_stock": true}
    ],
    "categories": [
        {"id": 1, "name": "Root", "url_key": "root", "level": 1, "is_active": true},
        {"id": 5, "name": "Gear", "url_key": "gear", "level": 2, "is_active": true,
         "updated_at": "2024-01-10 00:00:00"}
    ],
    "pages": [
        {"id": 1, "identifier": "home", "title": "Home", "is_active": true},
        {"id": 2, "identifier": "about-us", "title": "About", "is_active": true},
        {"id": 3, "identifier": "no-route", "title": "404", "is_active": true}
    ]
}"#;

/// A temporary shop: `seomap.toml`, `catalog.json` and a `pub/` output dir.
#[allow(dead_code)]
pub struct Shop {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Shop {
    /// Shop using [`CATALOG`] and the given extra configuration.
    pub fn new(extra_config: &str) -> Self {
        Self::with_catalog(CATALOG, extra_config)
    }

    pub fn with_catalog(catalog: &str, extra_config: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create shop dir");
        fs::write(dir.path().join("catalog.json"), catalog).unwrap();
        fs::write(
            dir.path().join("seomap.toml"),
            format!("public_dir = \"pub\"\ncatalog = \"catalog.json\"\n\n{extra_config}\n"),
        )
        .unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("seomap.toml")
    }

    pub fn public_dir(&self) -> PathBuf {
        self.dir.path().join("pub")
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.public_dir().join(name)).unwrap()
    }

    /// `seomap --config <shop>/seomap.toml`
    pub fn cmd(&self) -> Command {
        let mut cmd = seomap_cmd(self.dir.path());
        cmd.arg("--config").arg(self.config_path());
        cmd
    }
}

/// Create a `seomap` command isolated from the user's configuration.
#[allow(dead_code)]
pub fn seomap_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("seomap"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("SEOMAP_CONFIG");
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    cmd.env("NO_COLOR", "1");
    cmd
}
