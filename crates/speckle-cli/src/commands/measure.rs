use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use speckle_core::io::crop::extract_template;
use speckle_core::io::frames::frame_index;
use speckle_core::io::image_io::load_gray;
use speckle_core::pipeline::config::OutputMode;
use speckle_core::pipeline::{check_frame_size, measure_frame};

use super::{load_config, parse_roi};

#[derive(Args)]
pub struct MeasureArgs {
    /// Frame the template is cropped from
    pub reference: PathBuf,

    /// Frame to search
    pub frame: PathBuf,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Template rectangle as X,Y,WIDTH,HEIGHT
    #[arg(long)]
    pub roi: Option<String>,

    /// Skip the millimetre conversion
    #[arg(long)]
    pub calibration_mode: bool,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Frame index carried by the file name of `path`.
fn index_of(path: &Path) -> Result<u64> {
    frame_index(&file_name(path))
        .with_context(|| format!("Cannot take a frame index from {}", path.display()))
}

pub fn run(args: &MeasureArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ref roi) = args.roi {
        config.roi = parse_roi(roi)?;
    }
    if args.calibration_mode {
        config.mode = OutputMode::Calibration;
    }

    let name = file_name(&args.frame);
    let index = index_of(&args.frame)?;

    let reference = load_gray(&args.reference, 0)
        .with_context(|| format!("Failed to read {}", args.reference.display()))?;
    check_frame_size(&reference, &config.frame_size)?;
    let template = extract_template(&reference, &config.roi)?;
    let frame = load_gray(&args.frame, index)
        .with_context(|| format!("Failed to read {}", args.frame.display()))?;
    check_frame_size(&frame, &config.frame_size)?;

    let metrics = measure_frame(&frame, &name, &template, &config)?;
    let m = &metrics.matched;

    println!("Frame:        {}", args.frame.display());
    println!("Dimensions:   {}x{}", frame.width(), frame.height());
    println!("Match:        ({}, {})", m.x, m.y);
    println!("Confidence:   {:.2}%", m.confidence);
    println!("Pixel shift:  x={} y={}", m.shift_x, m.shift_y);
    match metrics.displacement {
        Some(d) => println!("Distance:     x={:.4} mm y={:.4} mm", d.x_mm, d.y_mm),
        None => println!("Distance:     (calibration mode)"),
    }
    println!("MIG:          {:.4}", metrics.mig);

    Ok(())
}
