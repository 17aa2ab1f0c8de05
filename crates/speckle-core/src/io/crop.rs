use ndarray::s;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ROI_HEIGHT, DEFAULT_ROI_WIDTH, DEFAULT_ROI_X, DEFAULT_ROI_Y};
use crate::error::{Result, SpeckleError};
use crate::frame::Frame;

/// Rectangle in image coordinates used as the matching template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for RoiRect {
    fn default() -> Self {
        Self {
            x: DEFAULT_ROI_X,
            y: DEFAULT_ROI_Y,
            width: DEFAULT_ROI_WIDTH,
            height: DEFAULT_ROI_HEIGHT,
        }
    }
}

impl RoiRect {
    /// Check that the rectangle is non-empty and fits inside `src_w` x `src_h`.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<RoiRect> {
        if self.width == 0 || self.height == 0 {
            return Err(SpeckleError::RoiOutOfBounds(
                "ROI width and height must be > 0".into(),
            ));
        }

        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        if right > src_w as u64 || bottom > src_h as u64 {
            return Err(SpeckleError::RoiOutOfBounds(format!(
                "ROI ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }
}

/// Copy the region of interest out of the reference frame.
pub fn extract_template(frame: &Frame, roi: &RoiRect) -> Result<Frame> {
    let roi = roi.validated(frame.width() as u32, frame.height() as u32)?;
    let (x, y) = (roi.x as usize, roi.y as usize);
    let (w, h) = (roi.width as usize, roi.height as usize);

    let data = frame.data.slice(s![y..y + h, x..x + w]).to_owned();
    Ok(Frame::new(data, frame.index))
}
