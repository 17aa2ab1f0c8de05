pub mod gradient;

pub use gradient::{mean_intensity_gradient, sobel_magnitude};
