use anyhow::{Context, Result};
use clap::Parser;
use rollholder::{generate, init_logging, write_output, HolderOverrides};
use rollholder_settings::{Config, OutputFormat};
use std::path::PathBuf;

/// Roll holder cut file generator
#[derive(Parser, Debug)]
#[command(name = "rollholder")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(about = "Generate laser cut files for a wall mounted roll holder")]
struct Args {
    /// Configuration file (.toml or .json); the user config is used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output file; written to stdout when omitted
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format: gcode, svg or dxf
    #[arg(long, short = 'f')]
    format: Option<OutputFormat>,

    /// Save the effective configuration to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    #[command(flatten)]
    holder: HolderOverrides,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::default_path() {
        Ok(path) if path.exists() => {
            tracing::info!(path = %path.display(), "Using user configuration");
            Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging()?;

    let mut config = load_config(args.config.as_ref())?;
    args.holder.apply(&mut config);

    if let Some(format) = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
    {
        config.output.format = format;
    }

    if let Some(path) = &args.write_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved configuration");
        return Ok(());
    }

    let bytes = generate(&config)?;
    write_output(&bytes, args.output.as_deref())?;

    Ok(())
}
