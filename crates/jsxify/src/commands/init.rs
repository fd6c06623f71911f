//! Initialize jsxify in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DEFAULT_CONFIG;

/// Run the init command in `root`.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing jsxify...");

    let config_path = root.join("jsxify.toml");
    if config_path.exists() && !yes {
        tracing::warn!("jsxify.toml already exists. Use --yes to overwrite.");
        return Ok(());
    }
    fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write jsxify.toml")?;
    tracing::info!("Created jsxify.toml");

    let icons_dir = root.join("icons");
    if !icons_dir.exists() {
        fs::create_dir_all(&icons_dir).context("Failed to create icons directory")?;
    }

    let sample_path = icons_dir.join("check-circle.svg");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, SAMPLE_ICON).context("Failed to write check-circle.svg")?;
        tracing::info!("Created icons/check-circle.svg");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'jsxify batch icons' to generate components.");

    Ok(())
}

const SAMPLE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" class="icon">
  <circle cx="12" cy="12" r="10" fill="none" stroke="currentColor" stroke-width="2"/>
  <path d="m9 12 2 2 4-4" style="stroke:currentColor;stroke-linecap:round;stroke-linejoin:round" fill-rule="evenodd"/>
</svg>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use jsxify_core::convert;
    use tempfile::tempdir;

    #[test]
    fn creates_config_and_sample() {
        let temp = tempdir().unwrap();

        run(temp.path(), false).unwrap();

        assert!(temp.path().join("jsxify.toml").exists());
        assert!(temp.path().join("icons/check-circle.svg").exists());
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("jsxify.toml");
        fs::write(&config, "# mine").unwrap();

        run(temp.path(), false).unwrap();

        assert_eq!(fs::read_to_string(&config).unwrap(), "# mine");
    }

    #[test]
    fn sample_icon_converts() {
        let out = convert(SAMPLE_ICON).unwrap();

        assert!(out.as_str().contains(r#"className="icon""#));
        assert!(out.as_str().contains(r#"strokeWidth="2""#));
        assert!(out.as_str().contains(
            r#"style={{stroke: "currentColor", strokeLinecap: "round", strokeLinejoin: "round"}}"#
        ));
    }
}
