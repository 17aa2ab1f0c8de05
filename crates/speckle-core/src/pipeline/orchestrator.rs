use tracing::{error, info, warn};

use crate::error::Result;
use crate::io::walker::walk_experiments;

use super::config::{AnalysisConfig, FailurePolicy};
use super::experiment::process_experiment;
use super::types::{BatchSummary, ExperimentFailure, NoOpReporter, ProgressReporter};

/// Walk the input tree and process every experiment folder.
///
/// A missing input root or an invalid configuration fails the whole run.
/// Failures inside one folder are recorded in the summary; whether the walk
/// continues afterwards is decided by `config.on_failure`.
pub fn run_batch_reported(
    config: &AnalysisConfig,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    config.validate()?;
    let walker = walk_experiments(&config.input)?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        mode = %config.mode,
        "Starting batch"
    );

    let mut summary = BatchSummary::default();
    for item in walker {
        let outcome = match item {
            Ok(experiment) => process_experiment(config, &experiment, reporter).map_err(|error| {
                ExperimentFailure {
                    experiment: Some(experiment),
                    error,
                }
            }),
            Err(error) => Err(ExperimentFailure {
                experiment: None,
                error,
            }),
        };

        match outcome {
            Ok(report) => summary.experiments.push(report),
            Err(failure) => {
                error!("{failure}");
                summary.failures.push(failure);
                if config.on_failure == FailurePolicy::Abort {
                    warn!("Stopping after first failure");
                    summary.aborted = true;
                    break;
                }
            }
        }
    }

    info!(
        experiments = summary.experiments.len(),
        frames = summary.frames_processed(),
        failures = summary.failures.len(),
        "Batch finished"
    );
    Ok(summary)
}

/// Walk the input tree and process every experiment folder.
pub fn run_batch(config: &AnalysisConfig) -> Result<BatchSummary> {
    run_batch_reported(config, &NoOpReporter)
}
