//! Config initialization command

use anyhow::{Context, Result};
use plexus_field::FieldConfig;
use std::fs;
use std::path::Path;

const HEADER: &str = "\
# Plexus point field configuration
#
# motion:        chase | drift
# opacity:       linear | threshold
# arrival_reset: factor | random (chase only)
# Add `seed = <integer>` for reproducible runs.

";

pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    let body = FieldConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    fs::write(path, format!("{}{}", HEADER, body))
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    println!("[init] wrote {}", path.display());
    println!("");
    println!("Next steps:");
    println!("  plexus render --config {}", path.display());

    Ok(())
}
