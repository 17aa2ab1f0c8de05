mod fft;
pub mod ncc;

pub use ncc::{locate, match_template, peak};
