use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;

/// 2D FFT: row-wise FFT, then column-wise FFT.
pub(super) fn fft2d(data: &Array2<f64>, planner: &mut FftPlanner<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v, 0.0));

    let mut row_data = vec![Complex::new(0.0, 0.0); w];
    for mut row in result.rows_mut() {
        row_data.iter_mut().zip(row.iter()).for_each(|(d, s)| *d = *s);
        fft_row.process(&mut row_data);
        row.iter_mut().zip(row_data.iter()).for_each(|(d, s)| *d = *s);
    }

    let mut col_data = vec![Complex::new(0.0, 0.0); h];
    for mut col in result.columns_mut() {
        col_data.iter_mut().zip(col.iter()).for_each(|(d, s)| *d = *s);
        fft_col.process(&mut col_data);
        col.iter_mut().zip(col_data.iter()).for_each(|(d, s)| *d = *s);
    }

    result
}

/// Inverse 2D FFT, returning the normalized real part.
pub(super) fn ifft2d(data: &Array2<Complex<f64>>, planner: &mut FftPlanner<f64>) -> Array2<f64> {
    let (h, w) = data.dim();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    let mut col_data = vec![Complex::new(0.0, 0.0); h];
    for mut col in work.columns_mut() {
        col_data.iter_mut().zip(col.iter()).for_each(|(d, s)| *d = *s);
        ifft_col.process(&mut col_data);
        col.iter_mut().zip(col_data.iter()).for_each(|(d, s)| *d = *s);
    }

    let mut row_data = vec![Complex::new(0.0, 0.0); w];
    for mut row in work.rows_mut() {
        row_data.iter_mut().zip(row.iter()).for_each(|(d, s)| *d = *s);
        ifft_row.process(&mut row_data);
        row.iter_mut().zip(row_data.iter()).for_each(|(d, s)| *d = *s);
    }

    let scale = 1.0 / (h * w) as f64;
    work.mapv(|c| c.re * scale)
}

/// Circular cross-correlation `C[y, x] = sum_ij kernel[i, j] * image[y + i, x + j]`.
///
/// `kernel` is zero-padded to the image size, so positions where the kernel
/// stays inside the image are free of wrap-around.
pub(super) fn cross_correlate(image: &Array2<f64>, kernel: &Array2<f64>) -> Array2<f64> {
    let (h, w) = image.dim();
    let (kh, kw) = kernel.dim();

    let mut padded = Array2::<f64>::zeros((h, w));
    padded.slice_mut(ndarray::s![..kh, ..kw]).assign(kernel);

    let mut planner = FftPlanner::new();
    let image_fft = fft2d(image, &mut planner);
    let kernel_fft = fft2d(&padded, &mut planner);

    let mut product = image_fft;
    product
        .iter_mut()
        .zip(kernel_fft.iter())
        .for_each(|(p, k)| *p *= k.conj());

    ifft2d(&product, &mut planner)
}
