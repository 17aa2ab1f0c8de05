use ndarray::Array2;

/// A single grayscale image frame.
/// Pixel values are f32 gray levels in [0.0, 255.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Index embedded in the source file name
    pub index: u64,
}

impl Frame {
    pub fn new(data: Array2<f32>, index: u64) -> Self {
        Self { data, index }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Best position of a template inside a frame.
///
/// Shifts are measured from the frame centre to the template centre:
/// positive `shift_x` = template moved right, positive `shift_y` = moved down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateMatch {
    /// Top-left column of the best match.
    pub x: u32,
    /// Top-left row of the best match.
    pub y: u32,
    /// Normalized cross-correlation score in [-1, 1].
    pub score: f64,
    /// `score` as a percentage.
    pub confidence: f64,
    pub shift_x: i32,
    pub shift_y: i32,
}

/// Physical displacement in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Everything measured on one frame of an experiment.
#[derive(Clone, Debug)]
pub struct FrameMetrics {
    pub frame_index: u64,
    pub file_name: String,
    pub matched: TemplateMatch,
    /// `None` when the calibration transform is not applied.
    pub displacement: Option<Displacement>,
    /// Mean intensity gradient.
    pub mig: f64,
}
