use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeckleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Input directory does not exist: {}", .0.display())]
    InputRootMissing(PathBuf),

    #[error("Frame name has no embedded index: {0}")]
    MalformedFrameName(String),

    #[error("No reference frame (index 0) in {}", .0.display())]
    MissingReferenceFrame(PathBuf),

    #[error("Image is empty or corrupted: {0}")]
    EmptyFrame(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Region of interest invalid: {0}")]
    RoiOutOfBounds(String),

    #[error("Calibration transform is singular (determinant {0})")]
    SingularTransform(f64),

    #[error("Cannot open results file {}: {source}", path.display())]
    CsvOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot list folder {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create folder {}: {source}", path.display())]
    DirCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SpeckleError>;
