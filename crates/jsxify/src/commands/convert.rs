//! Convert a single SVG file (or stdin) to a component.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsxify_core::session::SVG_EXTENSION;
use jsxify_core::{read_source, ConvertOptions, Notice, Output, Pipeline};

/// Where the markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `None` and `-` mean stdin.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => Input::File(path),
            _ => Input::Stdin,
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .context("Failed to read stdin")?;
                Ok(source)
            }
            Input::File(path) => {
                if !has_svg_suffix(path) {
                    anyhow::bail!("{}: {}", path.display(), Notice::WrongFileType);
                }
                Ok(read_source(path)?)
            }
        }
    }
}

fn has_svg_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SVG_EXTENSION))
}

/// Convert `source`, turning a format error into the user-facing notice.
pub fn convert_source(source: &str, options: &ConvertOptions) -> Result<Output> {
    Pipeline::new(options)
        .convert(source)
        .map_err(|e| anyhow::anyhow!("{}", Notice::from(&e)))
}

/// Run the convert command.
pub fn run(input: Input, output: Option<PathBuf>, options: &ConvertOptions) -> Result<()> {
    let source = input.read()?;
    let converted = convert_source(&source, options)?;

    if converted.is_empty() {
        tracing::info!("Input is empty, nothing to convert");
        return Ok(());
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, converted.as_str())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", converted.as_str()).context("Failed to write stdout")?;
        }
    }

    Ok(())
}
