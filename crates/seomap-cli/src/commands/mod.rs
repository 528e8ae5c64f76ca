//! Command implementations for the seomap CLI
//!
//! Each command has an `execute_*` function that writes to any `Write`
//! (used by the tests) and a `run` wrapper bound to stdout.

pub mod cron;
pub mod inspect;
pub mod robots;
pub mod schedule;
pub mod sitemap;
