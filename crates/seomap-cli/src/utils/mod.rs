//! # Utility Functions and Helpers
//!
//! - [`logging`]: tracing subscriber and color setup
//! - [`loader`]: configuration and catalog loading with exit-code categories

pub mod loader;
pub mod logging;
