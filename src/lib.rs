//! # Roll Holder
//!
//! Generates cut files for a wall mounted roll holder made from sheet
//! material: two side panels carrying the axle, two triangular supports,
//! one or two back plates and a pair of retention rings.
//!
//! ## Architecture
//!
//! 1. **rollholder-camtools** - Holder geometry, sheet layout, renderer and cut file writers
//! 2. **rollholder-settings** - Configuration file handling
//! 3. **rollholder** - Command line binary tying both together

use anyhow::{Context, Result};
use rollholder_camtools::dxf_export::write_dxf;
use rollholder_camtools::svg_export::to_svg;
use rollholder_camtools::{render, GcodeWriter, HeightPolicy, RollHolderMaker};
use rollholder_settings::{Config, OutputFormat};
use std::io::Write;
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, keeping stdout free for cut files
/// - RUST_LOG environment variable support
pub fn init_logging() -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

/// Holder dimensions given on the command line, overriding the config file.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct HolderOverrides {
    /// Length of the axle (mm)
    #[arg(long)]
    pub width: Option<f32>,

    /// Maximum diameter of the roll (mm)
    #[arg(long)]
    pub diameter: Option<f32>,

    /// Height of the mounting plate (mm)
    #[arg(long)]
    pub height: Option<f32>,

    /// Diameter of the axle including play (mm)
    #[arg(long)]
    pub axle: Option<f32>,

    /// Diameter of the mounting holes (mm)
    #[arg(long)]
    pub screw_holes: Option<f32>,

    /// Material thickness (mm)
    #[arg(long, short = 't')]
    pub thickness: Option<f32>,

    /// Two separate back plates instead of one continuous plate
    #[arg(long)]
    pub two_piece: bool,

    /// Fail instead of raising a mounting plate that is too low
    #[arg(long)]
    pub strict_height: bool,

    /// Gap between panels on the sheet (mm)
    #[arg(long)]
    pub spacing: Option<f32>,
}

impl HolderOverrides {
    pub fn apply(&self, config: &mut Config) {
        let holder = &mut config.holder;
        if let Some(width) = self.width {
            holder.width = width;
        }
        if let Some(diameter) = self.diameter {
            holder.diameter = diameter;
        }
        if let Some(height) = self.height {
            holder.height = height;
        }
        if let Some(axle) = self.axle {
            holder.axle_diameter = axle;
        }
        if let Some(screw_holes) = self.screw_holes {
            holder.screw_hole_diameter = screw_holes;
        }
        if let Some(thickness) = self.thickness {
            holder.thickness = thickness;
        }
        if self.two_piece {
            holder.one_piece = false;
        }
        if self.strict_height {
            holder.height_policy = HeightPolicy::Strict;
        }
        if let Some(spacing) = self.spacing {
            config.layout.spacing = spacing;
        }
    }
}

/// Run the whole pipeline and return the cut file contents.
pub fn generate(config: &Config) -> Result<Vec<u8>> {
    config.validate().context("Invalid configuration")?;

    let maker = RollHolderMaker::new(config.holder.clone())?.with_spacing(config.layout.spacing);
    let sheet = maker.generate()?;
    let rendered = render(
        &sheet.commands(),
        &config.finger_joint,
        maker.measurements().thickness,
    )?;

    let tolerance = config.output.tolerance;
    let bytes = match config.output.format {
        OutputFormat::Gcode => GcodeWriter::new(&config.laser, tolerance)
            .write(&rendered, maker.measurements())
            .into_bytes(),
        OutputFormat::Svg => to_svg(&rendered).into_bytes(),
        OutputFormat::Dxf => {
            let mut buffer = Vec::new();
            write_dxf(&rendered, tolerance, &mut buffer)?;
            buffer
        }
    };

    tracing::debug!(
        format = %config.output.format,
        bytes = bytes.len(),
        "Rendered cut file"
    );
    Ok(bytes)
}

/// Write the cut file to `path`, or to stdout when no path is given.
pub fn write_output(bytes: &[u8], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote cut file");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
