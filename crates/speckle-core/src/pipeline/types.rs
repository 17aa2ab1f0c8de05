use std::path::PathBuf;

use crate::error::SpeckleError;
use crate::io::results::DirStatus;
use crate::io::walker::ExperimentDir;

/// A finished experiment folder.
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    pub experiment: ExperimentDir,
    pub csv_path: PathBuf,
    pub frames: usize,
    /// Whether the results folder had to be created.
    pub dir_status: DirStatus,
}

/// A folder that could not be processed.
///
/// `experiment` is `None` when the walker itself failed to list a folder.
#[derive(Debug)]
pub struct ExperimentFailure {
    pub experiment: Option<ExperimentDir>,
    pub error: SpeckleError,
}

impl std::fmt::Display for ExperimentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.experiment {
            Some(exp) => write!(f, "{exp}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Result of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub experiments: Vec<ExperimentReport>,
    pub failures: Vec<ExperimentFailure>,
    /// The walk stopped early because of [`FailurePolicy::Abort`](super::config::FailurePolicy::Abort).
    pub aborted: bool,
}

impl BatchSummary {
    pub fn frames_processed(&self) -> usize {
        self.experiments.iter().map(|e| e.frames).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress reporting for the batch.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter {
    /// Processing of an experiment folder with `total_frames` frames started.
    fn begin_experiment(&self, _experiment: &ExperimentDir, _total_frames: usize) {}

    /// `frames_done` frames of the current experiment are written.
    fn advance(&self, _frames_done: usize) {}

    /// The current experiment is finished (successfully or not).
    fn finish_experiment(&self) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
