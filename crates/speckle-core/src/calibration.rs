use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TXX, DEFAULT_TXY, DEFAULT_TYX, DEFAULT_TYY, EPSILON};
use crate::error::{Result, SpeckleError};
use crate::frame::Displacement;

/// Fixed linear map from millimetres of stage motion to pixels of image shift.
///
/// ```text
/// | shift_x |   | txx  txy | | x_mm |
/// | shift_y | = | tyx  tyy | | y_mm |
/// ```
///
/// Measurements apply the inverse of this matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub txx: f64,
    pub txy: f64,
    pub tyx: f64,
    pub tyy: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            txx: DEFAULT_TXX,
            txy: DEFAULT_TXY,
            tyx: DEFAULT_TYX,
            tyy: DEFAULT_TYY,
        }
    }
}

impl Calibration {
    pub fn determinant(&self) -> f64 {
        self.txx * self.tyy - self.txy * self.tyx
    }

    /// Fail if the matrix cannot be inverted.
    pub fn validate(&self) -> Result<()> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < EPSILON {
            return Err(SpeckleError::SingularTransform(det));
        }
        Ok(())
    }

    /// Convert a pixel shift to millimetres.
    pub fn to_millimetres(&self, shift_x: f64, shift_y: f64) -> Result<Displacement> {
        self.validate()?;
        let det = self.determinant();
        Ok(Displacement {
            x_mm: (shift_x * self.tyy - shift_y * self.txy) / det,
            y_mm: (shift_y * self.txx - shift_x * self.tyx) / det,
        })
    }

    /// Convert millimetres back to a pixel shift `(x, y)`.
    pub fn to_pixels(&self, displacement: &Displacement) -> (f64, f64) {
        (
            self.txx * displacement.x_mm + self.txy * displacement.y_mm,
            self.tyx * displacement.x_mm + self.tyy * displacement.y_mm,
        )
    }
}
