use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::consts::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
    DEFAULT_RESULTS_FILE_NAME,
};
use crate::error::{Result, SpeckleError};
use crate::io::crop::RoiRect;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Root of the gain/movement/exposure image tree.
    pub input: PathBuf,
    /// Root of the mirrored results tree.
    pub output: PathBuf,
    /// Root of the mirrored tree of frames with the match drawn on them.
    #[serde(default)]
    pub annotated_output: Option<PathBuf>,
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default)]
    pub on_failure: FailurePolicy,
    #[serde(default = "default_results_file_name")]
    pub results_file_name: String,
    #[serde(default)]
    pub calibration: Calibration,
    #[serde(default)]
    pub roi: RoiRect,
    #[serde(default)]
    pub frame_size: FrameSize,
}

fn default_results_file_name() -> String {
    DEFAULT_RESULTS_FILE_NAME.to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            annotated_output: None,
            mode: OutputMode::default(),
            on_failure: FailurePolicy::default(),
            results_file_name: default_results_file_name(),
            calibration: Calibration::default(),
            roi: RoiRect::default(),
            frame_size: FrameSize::default(),
        }
    }
}

impl AnalysisConfig {
    /// Reject geometry and calibration that can never produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(SpeckleError::InvalidDimensions {
                width: self.frame_size.width,
                height: self.frame_size.height,
            });
        }

        self.roi.validated(self.frame_size.width, self.frame_size.height)?;

        if self.mode == OutputMode::Measurement {
            self.calibration.validate()?;
        }

        let name = self.results_file_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(SpeckleError::InvalidConfig(format!(
                "results file name must be a plain file name, got {name:?}"
            )));
        }

        Ok(())
    }
}

/// Expected sensor dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

/// Which columns of the results table are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// Pixel shift, confidence, millimetre distance and MIG.
    #[default]
    Measurement,
    /// Pixel shift, confidence and MIG only; used while the transform is
    /// being measured.
    Calibration,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Measurement => write!(f, "Measurement"),
            Self::Calibration => write!(f, "Calibration"),
        }
    }
}

/// What the batch does after an experiment folder fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next folder.
    #[default]
    Continue,
    /// Stop walking at the first failure.
    Abort,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::Abort => write!(f, "Abort"),
        }
    }
}
