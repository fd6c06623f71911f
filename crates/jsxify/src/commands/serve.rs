//! Playground server command.

use anyhow::Result;
use jsxify_server::{Playground, PlaygroundConfig};

/// Run the playground server.
pub async fn run(config: PlaygroundConfig) -> Result<()> {
    if let Some(dir) = &config.watch_dir {
        if !dir.is_dir() {
            anyhow::bail!("Directory not found: {}", dir.display());
        }
    }

    tracing::info!("Starting playground on port {}", config.port);

    Playground::new(config).start().await?;

    Ok(())
}
