use ndarray::{s, Array2};

use crate::consts::EPSILON;
use crate::error::{Result, SpeckleError};
use crate::frame::{Frame, TemplateMatch};

use super::fft::cross_correlate;

/// Window energies below this fraction of the whole-image energy are
/// treated as zero; summed-area differences carry rounding noise of
/// that order.
const ENERGY_FLOOR_RATIO: f64 = 1e-12;

/// Summed-area table with a leading zero row and column.
fn integral_of_squares(data: &Array2<f64>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut table = Array2::<f64>::zeros((h + 1, w + 1));
    for row in 0..h {
        let mut row_sum = 0.0;
        for col in 0..w {
            let v = data[[row, col]];
            row_sum += v * v;
            table[[row + 1, col + 1]] = table[[row, col + 1]] + row_sum;
        }
    }
    table
}

/// Slide `template` over every position where it fits inside `image` and
/// score each with normalized cross-correlation:
///
/// ```text
/// R(x, y) = sum(T * I) / sqrt(sum(T^2) * sum(I^2))
/// ```
///
/// The returned surface has shape `(H - h + 1, W - w + 1)`. Positions where
/// the template or the image window has no energy score 0. When neither
/// input has negative pixels the exact score is never negative, so FFT
/// rounding below zero is clipped to 0.
pub fn match_template(image: &Array2<f32>, template: &Array2<f32>) -> Result<Array2<f64>> {
    let (h, w) = image.dim();
    let (th, tw) = template.dim();
    if h == 0 || w == 0 || th == 0 || tw == 0 {
        return Err(SpeckleError::EmptyFrame("template matching input".into()));
    }
    if th > h || tw > w {
        return Err(SpeckleError::InvalidDimensions {
            width: tw as u32,
            height: th as u32,
        });
    }

    let non_negative = image.iter().chain(template.iter()).all(|&v| v >= 0.0);
    let lowest_score = if non_negative { 0.0 } else { -1.0 };

    let image = image.mapv(|v| v as f64);
    let template = template.mapv(|v| v as f64);

    let numerator = cross_correlate(&image, &template);
    let template_energy: f64 = template.iter().map(|v| v * v).sum();
    let sat = integral_of_squares(&image);

    let energy_floor = sat[[h, w]] * ENERGY_FLOOR_RATIO + EPSILON;

    let (out_h, out_w) = (h - th + 1, w - tw + 1);
    let mut scores = numerator.slice(s![..out_h, ..out_w]).to_owned();

    for ((row, col), score) in scores.indexed_iter_mut() {
        let window_energy = sat[[row + th, col + tw]] - sat[[row, col + tw]]
            - sat[[row + th, col]]
            + sat[[row, col]];
        let denom = (template_energy * window_energy).sqrt();
        *score = if window_energy > energy_floor && template_energy > EPSILON {
            (*score / denom).clamp(lowest_score, 1.0)
        } else {
            0.0
        };
    }

    Ok(scores)
}

/// Location `(x, y)` and value of the highest score, first in row-major
/// order on ties.
pub fn peak(scores: &Array2<f64>) -> (usize, usize, f64) {
    let mut best = (0, 0, f64::NEG_INFINITY);
    for ((row, col), &v) in scores.indexed_iter() {
        if v > best.2 {
            best = (col, row, v);
        }
    }
    best
}

/// Find `template` inside `frame` and express the match as a shift of the
/// template centre from the frame centre.
pub fn locate(frame: &Frame, template: &Frame) -> Result<TemplateMatch> {
    let scores = match_template(&frame.data, &template.data)?;
    let (x, y, score) = peak(&scores);

    let shift_x = (x + template.width() / 2) as i64 - (frame.width() / 2) as i64;
    let shift_y = (y + template.height() / 2) as i64 - (frame.height() / 2) as i64;

    Ok(TemplateMatch {
        x: x as u32,
        y: y as u32,
        score,
        confidence: score * 100.0,
        shift_x: shift_x as i32,
        shift_y: shift_y as i32,
    })
}
