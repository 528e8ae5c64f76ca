//! robots.txt generation command

use std::io::{self, Write};

use anyhow::Result;
use seomap_core::RobotsGenerator;

use crate::error::CliError;
use crate::output::{Status, write_status};

/// Outcome of [`execute_robots`].
#[derive(Debug, PartialEq, Eq)]
pub enum RobotsOutcome {
    /// `robots.enabled` is off; nothing was written.
    Disabled,
    /// robots.txt was written with this content.
    Written { content: String },
}

/// Write robots.txt when enabled and echo the result.
///
/// # Errors
///
/// Returns an error if the store list cannot be read or the file cannot be
/// written.
pub fn execute_robots<W: Write>(generator: &RobotsGenerator, mut writer: W) -> Result<RobotsOutcome> {
    if !generator.generate().map_err(CliError::from)? {
        write_status(
            &mut writer,
            Status::Info,
            "robots.txt management is disabled (robots.enabled = false)",
        )?;
        return Ok(RobotsOutcome::Disabled);
    }

    let content = generator
        .current_content()
        .map_err(CliError::from)?
        .unwrap_or_default();

    write_status(
        &mut writer,
        Status::Success,
        &format!("robots.txt generated: {}", generator.path().display()),
    )?;
    writeln!(writer)?;
    write!(writer, "{content}")?;
    Ok(RobotsOutcome::Written { content })
}

/// Run the command against stdout.
///
/// # Errors
///
/// See [`execute_robots`].
pub fn run(generator: &RobotsGenerator) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();
    execute_robots(generator, &mut stdout_lock)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use seomap_core::{Config, SnapshotCatalog};
    use tempfile::TempDir;

    use super::*;

    fn generator(dir: &TempDir, enabled: bool) -> RobotsGenerator {
        let catalog = SnapshotCatalog::from_json(
            r#"{"stores": [{"id": 1, "code": "default", "base_url": "https://shop.test/"}]}"#,
        )
        .expect("valid catalog");
        let mut config = Config {
            public_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        config.robots.enabled = enabled;
        RobotsGenerator::new(Arc::new(catalog), config)
    }

    #[test]
    fn execute_robots_reports_disabled() -> Result<()> {
        colored::control::set_override(false);
        let dir = TempDir::new()?;
        let mut output = Vec::new();

        let outcome = execute_robots(&generator(&dir, false), &mut output)?;

        assert_eq!(outcome, RobotsOutcome::Disabled);
        assert!(!dir.path().join("robots.txt").exists());
        let rendered = String::from_utf8(output).expect("valid utf8");
        assert!(rendered.contains("robots.txt management is disabled"));
        Ok(())
    }

    #[test]
    fn execute_robots_writes_and_echoes_content() -> Result<()> {
        colored::control::set_override(false);
        let dir = TempDir::new()?;
        let mut output = Vec::new();

        let outcome = execute_robots(&generator(&dir, true), &mut output)?;

        let RobotsOutcome::Written { content } = outcome else {
            anyhow::bail!("expected robots.txt to be written");
        };
        assert!(content.contains("Disallow: /checkout/"));
        assert!(content.ends_with("Sitemap: https://shop.test/default-sitemap.xml\n"));
        let rendered = String::from_utf8(output).expect("valid utf8");
        assert!(rendered.starts_with("✓ robots.txt generated:"));
        assert!(rendered.ends_with(&content));
        Ok(())
    }
}
