use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{Result, SpeckleError};
use crate::frame::Frame;

/// Load an image file as an 8-bit grayscale Frame.
///
/// Colour images are converted to luminance. A zero-sized image is
/// reported as [`SpeckleError::EmptyFrame`].
pub fn load_gray(path: &Path, index: u64) -> Result<Frame> {
    let gray = image::open(path)?.to_luma8();
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(SpeckleError::EmptyFrame(path.display().to_string()));
    }

    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    for (col, row, pixel) in gray.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[0] as f32;
    }

    Ok(Frame::new(data, index))
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = frame.data[[row, col]].round().clamp(0.0, 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Draw a hollow rectangle with corners `(x, y)` and `(x + width, y + height)`.
///
/// The outline is centred on the rectangle edges and clipped to the frame.
pub fn draw_rectangle(
    frame: &mut Frame,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    thickness: u32,
    value: f32,
) {
    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return;
    }

    let half = (thickness / 2) as i64;
    let (x0, y0) = (x as i64, y as i64);
    let (x1, y1) = (x0 + width as i64, y0 + height as i64);

    let row_start = (y0 - half).max(0);
    let row_end = (y1 + half).min(h as i64 - 1);
    let col_start = (x0 - half).max(0);
    let col_end = (x1 + half).min(w as i64 - 1);

    for row in row_start..=row_end {
        let on_horizontal = row <= y0 + half || row >= y1 - half;
        for col in col_start..=col_end {
            if on_horizontal || col <= x0 + half || col >= x1 - half {
                frame.data[[row as usize, col as usize]] = value;
            }
        }
    }
}
