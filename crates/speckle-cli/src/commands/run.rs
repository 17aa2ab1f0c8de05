use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use speckle_core::io::walker::ExperimentDir;
use speckle_core::pipeline::config::{AnalysisConfig, FailurePolicy, OutputMode};
use speckle_core::pipeline::{run_batch_reported, ProgressReporter};

use crate::summary::{print_batch_summary, print_run_summary};

use super::{load_config, parse_frame_size, parse_roi};

#[derive(Args)]
pub struct RunArgs {
    /// Images root (gain/movement/exposure folders)
    pub root: Option<PathBuf>,

    /// Results root
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save every frame with the match drawn on it under this root
    #[arg(long)]
    pub annotate: Option<PathBuf>,

    /// Analysis config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Template rectangle as X,Y,WIDTH,HEIGHT
    #[arg(long)]
    pub roi: Option<String>,

    /// Expected frame size as WIDTHxHEIGHT
    #[arg(long)]
    pub frame_size: Option<String>,

    /// Leave the millimetre columns empty (transform is being measured)
    #[arg(long)]
    pub calibration_mode: bool,

    /// Stop at the first experiment folder that fails
    #[arg(long)]
    pub abort_on_error: bool,
}

/// Drives an indicatif bar, one bar length per experiment folder.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_experiment(&self, experiment: &ExperimentDir, total_frames: usize) {
        self.pb.reset();
        self.pb.set_length(total_frames as u64);
        self.pb.set_message(experiment.to_string());
    }

    fn advance(&self, frames_done: usize) {
        self.pb.set_position(frames_done as u64);
    }

    fn finish_experiment(&self) {
        self.pb.tick();
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    print_run_summary(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let summary = run_batch_reported(&config, &reporter)?;
    reporter.pb.finish_and_clear();

    print_batch_summary(&summary);

    if !summary.is_success() {
        bail!("{} experiment folder(s) failed", summary.failures.len());
    }
    Ok(())
}

fn build_config(args: &RunArgs) -> Result<AnalysisConfig> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(ref root) = args.root {
        config.input = root.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if args.annotate.is_some() {
        config.annotated_output = args.annotate.clone();
    }
    if let Some(ref roi) = args.roi {
        config.roi = parse_roi(roi)?;
    }
    if let Some(ref size) = args.frame_size {
        config.frame_size = parse_frame_size(size)?;
    }
    if args.calibration_mode {
        config.mode = OutputMode::Calibration;
    }
    if args.abort_on_error {
        config.on_failure = FailurePolicy::Abort;
    }

    tracing::debug!(?config, "Resolved analysis config");
    Ok(config)
}
