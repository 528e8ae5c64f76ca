//! # seomap-core
//!
//! Core functionality for seomap - multi-store XML sitemap and robots.txt
//! generation for an e-commerce catalog.
//!
//! ## Architecture
//!
//! - **Catalog**: typed read access to stores, products, categories and CMS pages
//! - **Generators**: one per entity kind, turning catalog views into sitemap entries
//! - **Writer**: chunks entries into bounded `urlset` files plus a `sitemapindex`
//! - **Builder**: per-store orchestration and fleet runs with failure isolation
//! - **Robots / Schedule**: robots.txt rendering and the daily scheduled job
//! - **Reader**: parses generated documents back for inspection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use seomap_core::{Config, SitemapBuilder, SnapshotCatalog, StoreId};
//!
//! let config = Config::load()?;
//! let catalog = SnapshotCatalog::from_file("catalog.json".as_ref())?;
//! let builder = SitemapBuilder::new(Arc::new(catalog), config);
//!
//! let files = builder.generate_for_store(StoreId(1))?;
//! for name in files.filenames() {
//!     println!("{name}");
//! }
//! # Ok::<(), seomap_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`]; [`Error::category`] gives a
//! stable identifier for logging.

/// Orchestration of per-store generation
pub mod builder;
/// Catalog trait, typed entity views and the JSON snapshot adapter
pub mod catalog;
/// Configuration with per-store overrides
pub mod config;
/// Immutable per-run generation context
pub mod context;
/// Error types and result aliases
pub mod error;
/// Entity generators (products, categories, CMS pages)
pub mod generator;
/// Sitemap XML parsing
pub mod reader;
/// robots.txt generation
pub mod robots;
/// Scheduled generation and cron expressions
pub mod schedule;
/// Core data types
pub mod types;
/// Chunking sitemap XML writer
pub mod writer;
/// Browser stylesheet deployment
pub mod xsl;

// Re-export commonly used types
pub use builder::{SitemapBuilder, StoreResult};
pub use catalog::{Catalog, CategoryView, PageView, ProductView, SnapshotCatalog, Store};
pub use config::{Config, EntitySitemapConfig, ProductSitemapConfig, RobotsConfig, SitemapConfig};
pub use context::GenerationContext;
pub use error::{Error, Result};
pub use generator::{CategoryGenerator, CmsGenerator, EntityGenerator, ProductGenerator};
pub use reader::{IndexRef, SitemapDocument, parse_sitemap, read_sitemap};
pub use robots::RobotsGenerator;
pub use schedule::{ScheduledRun, cron_expression, hour_options, run_scheduled};
pub use types::*;
pub use writer::SitemapWriter;
