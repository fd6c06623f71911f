//! Re-convert SVG files as they change.

use anyhow::{Context, Result};
use jsxify_server::{FileWatcher, WatchEvent};

use crate::commands::batch::{self, BatchConfig, FileError, FileOutcome};

/// Run the watch command.
pub async fn run(config: BatchConfig) -> Result<()> {
    // Bring the output up to date before watching.
    let report = batch::convert_all(&config)?;
    tracing::info!(
        "Converted {} files ({} failed)",
        report.converted,
        report.failed.len()
    );

    let (watcher, mut rx) = FileWatcher::new(&[config.input_dir.clone()])
        .context("Failed to start file watcher")?;
    tracing::info!(
        "Watching {} (press Ctrl+C to stop)",
        config.input_dir.display()
    );

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => handle_event(&config, event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }

    drop(watcher);
    Ok(())
}

fn handle_event(config: &BatchConfig, event: WatchEvent) {
    match event {
        WatchEvent::Changed(path) => match batch::convert_file(config, &path) {
            Ok(FileOutcome::Written(target)) => {
                tracing::info!("{} -> {}", path.display(), target.display());
            }
            Ok(FileOutcome::Empty) => {
                tracing::debug!("{} is empty, skipping", path.display());
            }
            Err(FileError::Convert(e)) => {
                tracing::warn!("{}: {}", path.display(), jsxify_core::Notice::from(&e));
            }
            Err(e) => tracing::error!("{}", e),
        },
        WatchEvent::Removed(path) => {
            let target = batch::output_path(config, &path);
            if target.exists() {
                match std::fs::remove_file(&target) {
                    Ok(()) => tracing::info!("Removed {}", target.display()),
                    Err(e) => tracing::warn!("Failed to remove {}: {}", target.display(), e),
                }
            }
        }
    }
}
