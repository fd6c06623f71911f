//! Convert every SVG file under a directory.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use jsxify_core::{component_name_from_stem, read_source, ConvertOptions, Notice, Pipeline};
use jsxify_server::is_svg_path;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Batch conversion settings.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory searched for `.svg` files
    pub input_dir: PathBuf,

    /// Directory generated components are written to
    pub output_dir: PathBuf,

    /// Extension for generated files (without the dot)
    pub extension: String,

    /// Conversion options; the component name is replaced per file
    pub options: ConvertOptions,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted and written
    pub converted: usize,

    /// Empty files skipped
    pub skipped: usize,

    /// Files that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,

    /// Total time in milliseconds
    pub duration_ms: u64,
}

/// Errors for one file in a batch.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{0}")]
    Convert(#[from] jsxify_core::ConvertError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of converting one file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Empty,
}

/// Find every `.svg` file under `dir`, sorted for stable output.
pub fn discover_svgs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_svg_path(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Output path for `source`: same relative directory, component-named file.
pub fn output_path(config: &BatchConfig, source: &Path) -> PathBuf {
    let relative_dir = source
        .parent()
        .and_then(|p| p.strip_prefix(&config.input_dir).ok())
        .unwrap_or_else(|| Path::new(""));
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let file_name = format!("{}.{}", component_name_from_stem(stem), config.extension);

    config.output_dir.join(relative_dir).join(file_name)
}

/// Drop files whose output path an earlier file already claims.
///
/// Stems such as `arrow-left` and `arrow_left` map to the same component
/// name. `files` is sorted, so the first path in order keeps the output.
fn claim_outputs(
    config: &BatchConfig,
    files: Vec<PathBuf>,
) -> (Vec<PathBuf>, Vec<(PathBuf, String)>) {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut claimed = Vec::with_capacity(files.len());
    let mut collisions = Vec::new();

    for path in files {
        match owners.entry(output_path(config, &path)) {
            Entry::Occupied(owner) => {
                let reason = format!(
                    "{} is already written from {}",
                    owner.key().display(),
                    owner.get().display()
                );
                collisions.push((path, reason));
            }
            Entry::Vacant(slot) => {
                slot.insert(path.clone());
                claimed.push(path);
            }
        }
    }

    (claimed, collisions)
}

/// Convert one file and write the component next to its siblings.
pub fn convert_file(config: &BatchConfig, source: &Path) -> Result<FileOutcome, FileError> {
    let markup = read_source(source)?;
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let options = ConvertOptions {
        component_name: component_name_from_stem(stem),
        ..config.options.clone()
    };

    let output = Pipeline::new(&options).convert(&markup)?;
    if output.is_empty() {
        return Ok(FileOutcome::Empty);
    }

    let target = output_path(config, source);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| FileError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&target, output.as_str()).map_err(|source| FileError::Write {
        path: target.clone(),
        source,
    })?;

    Ok(FileOutcome::Written(target))
}

/// Convert all files under the input directory in parallel.
pub fn convert_all(config: &BatchConfig) -> Result<BatchReport> {
    if !config.input_dir.is_dir() {
        anyhow::bail!("Directory not found: {}", config.input_dir.display());
    }

    let start = Instant::now();
    let files = discover_svgs(&config.input_dir);
    tracing::debug!("Found {} SVG files", files.len());

    let (files, collisions) = claim_outputs(config, files);
    for (path, reason) in &collisions {
        tracing::warn!("{}: {}", path.display(), reason);
    }

    let results: Vec<(PathBuf, Result<FileOutcome, FileError>)> = files
        .par_iter()
        .map(|path| (path.clone(), convert_file(config, path)))
        .collect();

    let mut report = BatchReport {
        failed: collisions,
        ..BatchReport::default()
    };
    for (path, result) in results {
        match result {
            Ok(FileOutcome::Written(target)) => {
                tracing::debug!("{} -> {}", path.display(), target.display());
                report.converted += 1;
            }
            Ok(FileOutcome::Empty) => {
                tracing::debug!("Skipping empty file {}", path.display());
                report.skipped += 1;
            }
            Err(e) => {
                let reason = match &e {
                    FileError::Convert(err) => Notice::from(err).to_string(),
                    FileError::Write { .. } => e.to_string(),
                };
                tracing::warn!("{}: {}", path.display(), reason);
                report.failed.push((path, reason));
            }
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}

/// Run the batch command.
pub fn run(config: BatchConfig) -> Result<()> {
    tracing::info!("Converting SVG files in {}...", config.input_dir.display());

    let report = convert_all(&config)?;

    tracing::info!(
        "Converted {} files ({} empty, {} failed) in {}ms",
        report.converted,
        report.skipped,
        report.failed.len(),
        report.duration_ms
    );
    tracing::info!("Output: {}", config.output_dir.display());

    if !report.failed.is_empty() {
        anyhow::bail!("{} files failed to convert", report.failed.len());
    }

    Ok(())
}
