use ndarray::Array2;

use crate::error::{Result, SpeckleError};
use crate::frame::Frame;

/// Map a possibly out-of-range index back inside `0..n` by mirroring about
/// the edge pixel without repeating it (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    let mirrored = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    mirrored as usize
}

/// Compute the Sobel gradient magnitude image.
///
/// Sobel kernels:
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///   Gy = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]]
///
/// Every pixel gets a value; the 3x3 neighbourhood of border pixels is
/// completed with reflect-101 extension.
pub fn sobel_magnitude(data: &Array2<f32>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut result = Array2::<f64>::zeros((h, w));

    for row in 0..h {
        let up = reflect_101(row as isize - 1, h);
        let down = reflect_101(row as isize + 1, h);
        for col in 0..w {
            let left = reflect_101(col as isize - 1, w);
            let right = reflect_101(col as isize + 1, w);
            let px = |r: usize, c: usize| data[[r, c]] as f64;

            let gx = -px(up, left) + px(up, right) - 2.0 * px(row, left) + 2.0 * px(row, right)
                - px(down, left)
                + px(down, right);

            let gy = -px(up, left) - 2.0 * px(up, col) - px(up, right)
                + px(down, left)
                + 2.0 * px(down, col)
                + px(down, right);

            result[[row, col]] = (gx * gx + gy * gy).sqrt();
        }
    }

    result
}

/// Mean Intensity Gradient: Sobel magnitude summed over every pixel and
/// divided by the pixel count. Higher = sharper.
pub fn mean_intensity_gradient(frame: &Frame) -> Result<f64> {
    if frame.is_empty() {
        return Err(SpeckleError::EmptyFrame(format!("frame {}", frame.index)));
    }

    let magnitude = sobel_magnitude(&frame.data);
    Ok(magnitude.sum() / magnitude.len() as f64)
}
