//! jsxify CLI - convert SVG markup into React components.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jsxify_core::{ConvertOptions, RenameMode};
use jsxify_server::PlaygroundConfig;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::batch::BatchConfig;
use config::{validate_component_name, ConfigFile, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "jsxify")]
#[command(about = "Convert SVG markup into React components")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to jsxify.toml config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one SVG file (or stdin) and print the component
    Convert {
        /// SVG file to read, or "-" for stdin
        input: Option<PathBuf>,

        /// Write the component to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component name (defaults to config or "SvgIcon")
        #[arg(short, long)]
        name: Option<String>,

        /// Rewrite every hyphenated lowercase run, not just attribute names
        #[arg(long)]
        legacy: bool,
    },

    /// Convert every SVG file under a directory
    Batch {
        /// Directory containing SVG files
        dir: PathBuf,

        /// Output directory (defaults to config or "components")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rewrite every hyphenated lowercase run, not just attribute names
        #[arg(long)]
        legacy: bool,
    },

    /// Re-convert SVG files in a directory whenever they change
    Watch {
        /// Directory containing SVG files
        dir: PathBuf,

        /// Output directory (defaults to config or "components")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rewrite every hyphenated lowercase run, not just attribute names
        #[arg(long)]
        legacy: bool,
    },

    /// Start the browser playground
    Serve {
        /// Port to listen on (defaults to config or 7777)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,

        /// Also re-convert SVG files in this directory and show the results
        #[arg(short, long)]
        watch: Option<PathBuf>,
    },

    /// Write a default jsxify.toml
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for converted output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = ConfigFile::load(&cli.config)?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            legacy,
        } => {
            let options = convert_options(&file_config.convert, name, legacy)?;
            commands::convert::run(commands::convert::Input::from_arg(input), output, &options)?;
        }
        Commands::Batch {
            dir,
            output,
            legacy,
        } => {
            let options = convert_options(&file_config.convert, None, legacy)?;
            commands::batch::run(batch_config(&file_config, dir, output, options))?;
        }
        Commands::Watch {
            dir,
            output,
            legacy,
        } => {
            let options = convert_options(&file_config.convert, None, legacy)?;
            commands::watch::run(batch_config(&file_config, dir, output, options)).await?;
        }
        Commands::Serve {
            port,
            no_open,
            watch,
        } => {
            let config = PlaygroundConfig {
                port: port.unwrap_or(file_config.serve.port),
                host: file_config.serve.host.clone(),
                open: file_config.serve.open && !no_open,
                watch_dir: watch,
                options: file_config.convert.clone(),
            };
            commands::serve::run(config).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(&std::env::current_dir()?, yes)?;
        }
    }

    Ok(())
}

/// Merge command-line overrides into the configured options.
fn convert_options(
    base: &ConvertOptions,
    name: Option<String>,
    legacy: bool,
) -> Result<ConvertOptions> {
    let mut options = base.clone();
    if let Some(name) = name {
        validate_component_name(&name)?;
        options.component_name = name;
    }
    if legacy {
        options.rename_mode = RenameMode::Legacy;
    }
    Ok(options)
}

fn batch_config(
    file_config: &ConfigFile,
    dir: PathBuf,
    output: Option<PathBuf>,
    options: ConvertOptions,
) -> BatchConfig {
    BatchConfig {
        input_dir: dir,
        output_dir: output.unwrap_or_else(|| file_config.batch.output.clone()),
        extension: file_config.batch.extension.clone(),
        options,
    }
}
