pub mod config;
mod experiment;
mod orchestrator;
mod types;

pub use experiment::{check_frame_size, measure_frame, process_experiment};
pub use orchestrator::{run_batch, run_batch_reported};
pub use types::{BatchSummary, ExperimentFailure, ExperimentReport, NoOpReporter, ProgressReporter};
