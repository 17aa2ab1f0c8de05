/// Default calibration coefficient: pixels per millimetre along X, from X motion.
pub const DEFAULT_TXX: f64 = -256.75;

/// Default calibration coefficient: X pixels per millimetre of Y motion.
pub const DEFAULT_TXY: f64 = 2.5;

/// Default calibration coefficient: Y pixels per millimetre of X motion.
pub const DEFAULT_TYX: f64 = 3.5;

/// Default calibration coefficient: pixels per millimetre along Y, from Y motion.
pub const DEFAULT_TYY: f64 = 260.5;

/// Default template width in pixels.
pub const DEFAULT_ROI_WIDTH: u32 = 128;

/// Default template height in pixels.
pub const DEFAULT_ROI_HEIGHT: u32 = 128;

/// Default template top-left column.
pub const DEFAULT_ROI_X: u32 = 300;

/// Default template top-left row.
pub const DEFAULT_ROI_Y: u32 = 208;

/// Default sensor width in pixels.
pub const DEFAULT_FRAME_WIDTH: u32 = 728;

/// Default sensor height in pixels.
pub const DEFAULT_FRAME_HEIGHT: u32 = 544;

/// File name of the per-experiment results table.
pub const DEFAULT_RESULTS_FILE_NAME: &str = "Results.csv";

/// Header row written at the top of every results table.
pub const CSV_HEADER: &str = "Pixel Shift X (Columns),Pixel Shift Y (Rows),Confidence (%),\
Dist. X (mm),Dist. Y (mm),Error X (mm),Error Y (mm),Error X (%),Error Y (%),MIG";

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Frame index that marks the reference frame of an experiment.
pub const REFERENCE_FRAME_INDEX: u64 = 0;

/// Gray level used to draw the match rectangle in annotated frames.
pub const ANNOTATION_VALUE: f32 = 0.0;

/// Line thickness (pixels) of the match rectangle in annotated frames.
pub const ANNOTATION_THICKNESS: u32 = 3;

/// Number of directory levels between the input root and an experiment folder.
pub const EXPERIMENT_DEPTH: usize = 3;

/// Images root used when none is given.
pub const DEFAULT_INPUT_DIR: &str = "../laser_decorrelation_images";

/// Results root used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "../laser_decorrelation_results";
